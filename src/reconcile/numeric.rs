//! Coercion of numeric-ish payload fields.

use serde_json::Value;

use super::fields::{FieldResolver, Rule};
use crate::models::RawPropertyPayload;

pub const PRICE: FieldResolver = FieldResolver::new(&[Rule::Key("price")]);
pub const BEDROOMS: FieldResolver = FieldResolver::new(&[Rule::Key("bedrooms")]);
pub const BATHROOMS: FieldResolver = FieldResolver::new(&[Rule::Key("bathrooms")]);
pub const AREA: FieldResolver = FieldResolver::new(&[Rule::Key("area")]);
pub const PARKING: FieldResolver =
    FieldResolver::new(&[Rule::Key("parking"), Rule::Key("parkingSpaces")]);
pub const YEAR_BUILT: FieldResolver = FieldResolver::new(&[Rule::Key("yearBuilt")]);

/// Numbers and numeric strings as `f64`. Blank strings count as zero.
pub fn to_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                0.0
            } else {
                s.parse::<f64>().ok()?
            }
        }
        _ => return None,
    };
    number.is_finite().then_some(number)
}

/// Finite, non-negative number or 0.
pub fn coerce(value: Option<&Value>) -> f64 {
    value
        .and_then(to_number)
        .filter(|n| *n >= 0.0)
        .unwrap_or(0.0)
}

/// Coerce the first present candidate of `resolver`.
///
/// The first non-null candidate decides; a later alias is only consulted
/// when earlier keys are absent.
pub fn resolve(resolver: &FieldResolver, payload: &RawPropertyPayload) -> f64 {
    coerce(resolver.first_value(payload))
}

/// Integer identifier from a number or numeric string.
///
/// Integral floats (`7.0`, `"7.0"`) are accepted; fractional ones are not.
pub fn to_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(integral)),
        Value::String(s) => s
            .trim()
            .parse()
            .ok()
            .or_else(|| s.trim().parse::<f64>().ok().and_then(integral)),
        _ => None,
    }
}

fn integral(n: f64) -> Option<i64> {
    (n.is_finite() && n.fract() == 0.0 && n.abs() <= i64::MAX as f64).then(|| n as i64)
}
