use crate::models::RawPropertyPayload;
use crate::sources::traits::PayloadSource;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Keys under which paged list responses carry their rows
const ENVELOPE_KEYS: [&str; 4] = ["content", "data", "items", "results"];

/// Reads backend responses saved as JSON on disk
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl PayloadSource for JsonFileSource {
    async fn fetch(&self) -> Result<Vec<RawPropertyPayload>> {
        info!("Reading raw payloads from {}", self.path.display());

        let text = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read {}", self.path.display()))?;

        debug!("Read {} bytes of JSON", text.len());

        let json: Value = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse {} as JSON", self.path.display()))?;

        let payloads = payloads_from_json(json);
        if payloads.is_empty() {
            warn!("No payloads found in {}", self.path.display());
        }

        Ok(payloads)
    }

    fn source_name(&self) -> &'static str {
        "json-file"
    }
}

/// Split a backend response into per-property payloads.
///
/// Accepts a bare list, a paging envelope (rows under `content`, `data`,
/// `items` or `results`) or a single detail object. Rows that are not
/// objects become empty payloads.
pub fn payloads_from_json(json: Value) -> Vec<RawPropertyPayload> {
    match json {
        Value::Array(rows) => rows.into_iter().map(RawPropertyPayload::from_value).collect(),
        Value::Object(mut fields) => {
            let envelope = ENVELOPE_KEYS
                .iter()
                .find(|key| fields.get(**key).is_some_and(Value::is_array));

            match envelope {
                Some(key) => {
                    let rows = fields.remove(*key).unwrap_or_default();
                    payloads_from_json(rows)
                }
                None => vec![RawPropertyPayload::new(fields)],
            }
        }
        Value::Null => Vec::new(),
        other => vec![RawPropertyPayload::from_value(other)],
    }
}
