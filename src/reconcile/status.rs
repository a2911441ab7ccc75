//! Lifecycle status resolution.
//!
//! The same logical status travels under different keys depending on the
//! endpoint, and the same value may arrive as an enum code, a localized
//! label or a boolean-ish token. Resolution therefore runs in two stages:
//! [`resolve_raw_status`] picks the first usable candidate field, then
//! [`normalize_status`] classifies its text.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use super::fields::{FieldResolver, Rule};
use crate::models::{Diagnostic, PropertyStatus, RawPropertyPayload, Reconciled};

/// Candidate status fields: labels, then codes, then sub-fields of a nested
/// status object, then the generic keys.
pub const STATUS_CANDIDATES: FieldResolver = FieldResolver::new(&[
    Rule::Key("statusLabel"),
    Rule::Key("propertyStatusLabel"),
    Rule::Key("statusCode"),
    Rule::Key("propertyStatusCode"),
    Rule::Path(&["propertyStatus", "label"]),
    Rule::Path(&["propertyStatus", "name"]),
    Rule::Path(&["propertyStatus", "status"]),
    Rule::Path(&["propertyStatus", "code"]),
    Rule::Path(&["status", "label"]),
    Rule::Path(&["status", "name"]),
    Rule::Path(&["status", "status"]),
    Rule::Path(&["status", "code"]),
    Rule::Key("status"),
    Rule::Key("propertyStatus"),
    Rule::Key("state"),
]);

/// Exact upper-case codes meaning "active"
const ACTIVE_CODES: &[&str] = &[
    "ACTIVE",
    "AVAILABLE",
    "FOR_SALE",
    "FOR_RENT",
    "PUBLISHED",
    "PUBLICADA",
    "PUBLICADO",
];

/// Locale-tolerant keys meaning "active", in [`status_key`] form
const ACTIVE_KEYS: &[&str] = &[
    "active",
    "available",
    "disponible",
    "activo",
    "activa",
    "forsale",
    "forrent",
    "enventa",
    "enalquiler",
    "published",
    "publicada",
    "publicado",
    "vigente",
];

const TRUTHY_TOKENS: &[&str] = &["true", "1", "si"];
const FALSY_TOKENS: &[&str] = &["false", "0", "no"];

/// Status applied when the payload carries no usable status field.
///
/// Note the asymmetry with unrecognized text, which classifies as inactive.
/// A candidate is usable when it has content after trimming, but `raw` keeps
/// the untrimmed text so operators see exactly what the backend sent.
pub const STATUS_WHEN_ABSENT: PropertyStatus = PropertyStatus::Active;

/// Resolved status plus the raw text it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedStatus {
    pub status: PropertyStatus,
    /// Untrimmed candidate value
    pub raw: Option<String>,
}

/// First candidate status field holding a non-blank string.
pub fn resolve_raw_status(payload: &RawPropertyPayload) -> Option<&str> {
    STATUS_CANDIDATES.first_string(payload)
}

/// Resolve and classify the status of `payload`.
pub fn resolve_status(payload: &RawPropertyPayload) -> Reconciled<ResolvedStatus> {
    match resolve_raw_status(payload) {
        Some(raw) => normalize_status(raw).map(|status| ResolvedStatus {
            status,
            raw: Some(raw.to_string()),
        }),
        None => Reconciled::clean(ResolvedStatus {
            status: STATUS_WHEN_ABSENT,
            raw: None,
        }),
    }
}

/// Classify free status text as active or inactive.
///
/// Text matching no code, key or boolean token is inactive and raises
/// [`Diagnostic::UnrecognizedStatus`].
pub fn normalize_status(raw: &str) -> Reconciled<PropertyStatus> {
    match classify(raw) {
        Some(status) => Reconciled::clean(status),
        None => Reconciled::with_warning(
            PropertyStatus::Inactive,
            Diagnostic::UnrecognizedStatus {
                raw: raw.to_string(),
            },
        ),
    }
}

fn classify(raw: &str) -> Option<PropertyStatus> {
    let code = raw.trim().to_uppercase();
    if ACTIVE_CODES.contains(&code.as_str()) {
        return Some(PropertyStatus::Active);
    }

    let key = status_key(raw);
    if ACTIVE_KEYS.contains(&key.as_str()) || TRUTHY_TOKENS.contains(&key.as_str()) {
        return Some(PropertyStatus::Active);
    }
    if FALSY_TOKENS.contains(&key.as_str()) {
        return Some(PropertyStatus::Inactive);
    }
    None
}

/// Lower-cased, diacritic-free form with whitespace, hyphens and
/// underscores removed: `"En Venta"` and `"en_venta"` both become `"enventa"`.
pub fn status_key(raw: &str) -> String {
    raw.nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}
