use std::env;
use std::path::PathBuf;

pub const DEFAULT_INPUT: &str = "raw_properties.json";
pub const DEFAULT_OUTPUT: &str = "reconciled_properties.json";

/// Runtime settings for the reconciler binary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Raw backend response to read
    pub input_path: PathBuf,
    /// Where the reconciliation report is written
    pub output_path: PathBuf,
    /// Optional directory receiving one JSON file per record
    pub records_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT),
            output_path: PathBuf::from(DEFAULT_OUTPUT),
            records_dir: None,
        }
    }
}

impl Config {
    /// Load from the environment (after `.env`, if present).
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Ok(Self::from_lookup(|key| env::var(key).ok()))
    }

    /// Build from any key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Self {
            input_path: var("RECONCILER_INPUT")
                .map(PathBuf::from)
                .unwrap_or(defaults.input_path),
            output_path: var("RECONCILER_OUTPUT")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_path),
            records_dir: var("RECONCILER_RECORDS_DIR").map(PathBuf::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(Config::from_lookup(lookup(&[])), Config::default());
    }

    #[test]
    fn overrides_and_blank_values() {
        let config = Config::from_lookup(lookup(&[
            ("RECONCILER_INPUT", "rows.json"),
            ("RECONCILER_OUTPUT", " "),
            ("RECONCILER_RECORDS_DIR", "records"),
        ]));
        assert_eq!(config.input_path, PathBuf::from("rows.json"));
        assert_eq!(config.output_path, PathBuf::from(DEFAULT_OUTPUT));
        assert_eq!(config.records_dir, Some(PathBuf::from("records")));
    }
}
