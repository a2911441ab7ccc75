//! Unification of the gallery representations into one ordered image list.

use serde_json::Value;

use super::fields::non_empty_str;
use super::numeric::to_number;
use crate::models::RawPropertyPayload;

/// Ordered image list plus the chosen cover
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageSet {
    pub images: Vec<String>,
    pub featured_image: Option<String>,
}

/// Build the image list and cover image.
///
/// A direct `images` array is taken as is, even when empty. Otherwise
/// `galleryImages` objects are sorted by `orderIndex` (missing counts as 0,
/// ties keep their order) and mapped to their `url`. The cover is the payload's own
/// `featuredImage`, else the first image.
pub fn unify_images(payload: &RawPropertyPayload) -> ImageSet {
    let images = legacy_images(payload)
        .or_else(|| gallery_images(payload))
        .unwrap_or_default();

    let featured_image = payload
        .get("featuredImage")
        .and_then(non_empty_str)
        .map(str::to_string)
        .or_else(|| images.first().cloned());

    ImageSet {
        images,
        featured_image,
    }
}

fn legacy_images(payload: &RawPropertyPayload) -> Option<Vec<String>> {
    let entries = payload.get("images")?.as_array()?;
    Some(
        entries
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
    )
}

fn gallery_images(payload: &RawPropertyPayload) -> Option<Vec<String>> {
    let entries = payload.get("galleryImages")?.as_array()?;

    let mut ordered: Vec<(f64, &str)> = entries
        .iter()
        .filter_map(|entry| {
            let url = entry.get("url").and_then(non_empty_str)?;
            let order = entry.get("orderIndex").and_then(to_number).unwrap_or(0.0);
            Some((order, url))
        })
        .collect();

    // sort_by is stable, so equal indexes keep payload order
    ordered.sort_by(|a, b| a.0.total_cmp(&b.0));

    Some(ordered.into_iter().map(|(_, url)| url.to_string()).collect())
}
