//! "First present value wins" lookup over an ordered list of candidate
//! locations in a raw payload.

use serde_json::Value;

use crate::models::RawPropertyPayload;

/// One candidate location for a logical value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Top-level key
    Key(&'static str),
    /// Nested path, e.g. `["neighborhood", "id"]`
    Path(&'static [&'static str]),
}

impl Rule {
    pub fn extract<'a>(&self, payload: &'a RawPropertyPayload) -> Option<&'a Value> {
        match self {
            Rule::Key(key) => payload.get(key),
            Rule::Path(path) => payload.lookup(path),
        }
    }
}

/// Ordered candidate rules, evaluated in priority order.
#[derive(Debug, Clone, Copy)]
pub struct FieldResolver {
    rules: &'static [Rule],
}

impl FieldResolver {
    pub const fn new(rules: &'static [Rule]) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &'static [Rule] {
        self.rules
    }

    /// Raw candidate values in priority order, skipping absent ones.
    pub fn candidates<'a>(
        &self,
        payload: &'a RawPropertyPayload,
    ) -> impl Iterator<Item = &'a Value> + 'a {
        let rules = self.rules;
        rules.iter().filter_map(move |rule| rule.extract(payload))
    }

    /// First candidate that is a string with content after trimming.
    pub fn first_string<'a>(&self, payload: &'a RawPropertyPayload) -> Option<&'a str> {
        self.candidates(payload).find_map(non_empty_str)
    }

    /// First non-null candidate, whatever its type.
    pub fn first_value<'a>(&self, payload: &'a RawPropertyPayload) -> Option<&'a Value> {
        self.candidates(payload).next()
    }

    /// First candidate that `convert` accepts.
    pub fn first_map<'a, T>(
        &self,
        payload: &'a RawPropertyPayload,
        convert: impl FnMut(&'a Value) -> Option<T>,
    ) -> Option<T> {
        self.candidates(payload).find_map(convert)
    }

    pub fn string_or(&self, payload: &RawPropertyPayload, default: &str) -> String {
        self.first_string(payload).unwrap_or(default).to_string()
    }
}

/// String value with content after trimming. The untrimmed value is returned.
pub fn non_empty_str(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| !s.trim().is_empty())
}
