//! Currency normalization onto the supported set.

use serde_json::Value;

use super::fields::non_empty_str;
use crate::models::{CurrencyCode, Diagnostic, RawPropertyPayload, Reconciled};

/// Currency used when the payload names none, or names one we don't support
pub const DEFAULT_CURRENCY: CurrencyCode = CurrencyCode::Usd;

/// Resolve the record currency.
///
/// `currencyCode` wins over a `currency` object's `code`, which wins over a
/// plain `currency` string. Never fails: unknown codes fall back to
/// [`DEFAULT_CURRENCY`] with a diagnostic.
pub fn normalize_currency(payload: &RawPropertyPayload) -> Reconciled<CurrencyCode> {
    normalize_fields(payload.get("currencyCode"), payload.get("currency"))
}

/// Same resolution over loose `currencyCode` / `currency` values, for nested
/// objects such as floor plans.
pub fn normalize_fields(
    currency_code: Option<&Value>,
    currency: Option<&Value>,
) -> Reconciled<CurrencyCode> {
    match raw_code(currency_code, currency) {
        Some(raw) => classify(raw),
        None => Reconciled::clean(DEFAULT_CURRENCY),
    }
}

/// The currency text the payload carries, if any.
pub fn raw_code<'a>(
    currency_code: Option<&'a Value>,
    currency: Option<&'a Value>,
) -> Option<&'a str> {
    currency_code
        .and_then(non_empty_str)
        .or_else(|| {
            currency
                .and_then(|c| c.get("code"))
                .and_then(Value::as_str)
        })
        .or_else(|| currency.and_then(Value::as_str))
}

fn classify(raw: &str) -> Reconciled<CurrencyCode> {
    let code = raw.trim().to_uppercase();
    match CurrencyCode::from_code(&code) {
        Some(currency) => Reconciled::clean(currency),
        None => Reconciled::with_warning(
            DEFAULT_CURRENCY,
            Diagnostic::UnsupportedCurrency {
                raw: raw.to_string(),
                fallback: DEFAULT_CURRENCY,
            },
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn normalize(value: Value) -> Reconciled<CurrencyCode> {
        normalize_currency(&RawPropertyPayload::from_value(value))
    }

    #[test]
    fn direct_code_wins_over_nested_object() {
        let result = normalize(json!({ "currencyCode": "eur", "currency": { "code": "USD" } }));
        assert_eq!(result, Reconciled::clean(CurrencyCode::Eur));
    }

    #[test]
    fn nested_code_then_plain_string() {
        assert_eq!(normalize(json!({ "currency": { "code": "ars" } })).value, CurrencyCode::Ars);
        assert_eq!(normalize(json!({ "currency": "brl" })).value, CurrencyCode::Brl);
    }

    #[test]
    fn blank_currency_code_is_skipped() {
        let result = normalize(json!({ "currencyCode": "  ", "currency": "MXN" }));
        assert_eq!(result.value, CurrencyCode::Mxn);
    }

    #[test]
    fn missing_currency_defaults_silently() {
        assert_eq!(normalize(json!({})), Reconciled::clean(CurrencyCode::Usd));
        assert_eq!(
            normalize(json!({ "currency": { "id": 3 } })),
            Reconciled::clean(CurrencyCode::Usd)
        );
    }

    #[test]
    fn unsupported_currency_falls_back_with_diagnostic() {
        let result = normalize(json!({ "currency": "XYZ" }));
        assert_eq!(result.value, CurrencyCode::Usd);
        assert_eq!(
            result.warnings,
            vec![Diagnostic::UnsupportedCurrency {
                raw: "XYZ".to_string(),
                fallback: CurrencyCode::Usd,
            }]
        );
    }

    #[test]
    fn every_supported_code_round_trips() {
        for currency in CurrencyCode::SUPPORTED {
            let result = normalize(json!({ "currencyCode": currency.as_str().to_lowercase() }));
            assert_eq!(result, Reconciled::clean(currency));
        }
    }
}
