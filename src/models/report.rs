use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

use super::record::{CurrencyCode, PropertyRecord};

/// Non-fatal finding raised while reconciling a payload
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Diagnostic {
    /// Currency outside the supported set; `fallback` was used instead
    UnsupportedCurrency { raw: String, fallback: CurrencyCode },
    /// Status text matched no known code, key or boolean token
    UnrecognizedStatus { raw: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnsupportedCurrency { raw, fallback } => {
                write!(f, "unsupported currency {:?}, using {}", raw, fallback)
            }
            Diagnostic::UnrecognizedStatus { raw } => {
                write!(f, "unrecognized status {:?}, treated as inactive", raw)
            }
        }
    }
}

/// A normalized value together with the diagnostics produced on the way
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciled<T> {
    pub value: T,
    pub warnings: Vec<Diagnostic>,
}

impl<T> Reconciled<T> {
    pub fn clean(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    pub fn with_warning(value: T, warning: Diagnostic) -> Self {
        Self {
            value,
            warnings: vec![warning],
        }
    }

    /// Move this value's warnings into `sink` and return the bare value.
    pub fn drain_into(self, sink: &mut Vec<Diagnostic>) -> T {
        sink.extend(self.warnings);
        self.value
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Reconciled<U> {
        Reconciled {
            value: f(self.value),
            warnings: self.warnings,
        }
    }
}

/// Output of one batch run
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationReport {
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub record_count: usize,
    pub warning_count: usize,
    pub records: Vec<PropertyRecord>,
}

impl ReconciliationReport {
    pub fn new(source: impl Into<String>, results: Vec<Reconciled<PropertyRecord>>) -> Self {
        let warning_count = results.iter().map(|r| r.warnings.len()).sum();
        let records: Vec<PropertyRecord> = results.into_iter().map(|r| r.value).collect();

        Self {
            generated_at: Utc::now(),
            source: source.into(),
            record_count: records.len(),
            warning_count,
            records,
        }
    }

    /// File stem for one record: its id with path separators replaced, or
    /// `record_<index>` when the id is empty.
    pub fn file_stem(record: &PropertyRecord, index: usize) -> String {
        if record.id.is_empty() {
            format!("record_{}", index)
        } else {
            record.id.replace(['/', '\\'], "_")
        }
    }

    /// Unique file stem per record, in record order. A stem already taken
    /// by an earlier record gets the record index appended.
    pub fn record_file_stems(&self) -> Vec<String> {
        let mut taken = HashSet::new();

        self.records
            .iter()
            .enumerate()
            .map(|(i, record)| {
                let mut stem = Self::file_stem(record, i);
                while taken.contains(&stem) {
                    stem = format!("{}_{}", stem, i);
                }
                taken.insert(stem.clone());
                stem
            })
            .collect()
    }
}
