//! Assembly of the canonical [`PropertyRecord`] from a raw payload.

use serde_json::{Map, Value};

use super::currency::{normalize_currency, normalize_fields, raw_code};
use super::fields::{non_empty_str, FieldResolver, Rule};
use super::images::unify_images;
use super::numeric::{self, to_id};
use super::relations::{resolve_id, resolve_relation, CITY, CURRENCY_ID, NEIGHBORHOOD};
use super::status::resolve_status;
use crate::models::{
    Diagnostic, EntityId, FloorPlan, PropertyRecord, RawPropertyPayload, Reconciled,
};

const RECORD_ID: FieldResolver = FieldResolver::new(&[Rule::Key("id"), Rule::Key("propertyId")]);
const AMENITIES: FieldResolver =
    FieldResolver::new(&[Rule::Key("amenities"), Rule::Key("amenityIds")]);
const SERVICES: FieldResolver =
    FieldResolver::new(&[Rule::Key("services"), Rule::Key("serviceIds")]);
const ADDITIONAL_TYPES: FieldResolver = FieldResolver::new(&[
    Rule::Key("additionalPropertyTypes"),
    Rule::Key("additionalPropertyTypeIds"),
]);
const FLOOR_PLANS: FieldResolver = FieldResolver::new(&[Rule::Key("floorPlans")]);

const PLAN_TITLE: FieldResolver = FieldResolver::new(&[Rule::Key("title"), Rule::Key("name")]);
const PLAN_SIZE: FieldResolver = FieldResolver::new(&[Rule::Key("size"), Rule::Key("area")]);
const PLAN_IMAGE: FieldResolver =
    FieldResolver::new(&[Rule::Key("image"), Rule::Key("imageUrl")]);
const PLAN_DESCRIPTION: FieldResolver = FieldResolver::new(&[Rule::Key("description")]);

/// Build the canonical record for one backend payload.
///
/// Pure: no I/O, no shared state, same input gives the same output.
/// Malformed or missing fields degrade to defaults; anything worth
/// surfacing is returned in `warnings`.
pub fn assemble(payload: &RawPropertyPayload) -> Reconciled<PropertyRecord> {
    let mut warnings = Vec::new();

    let currency = normalize_currency(payload).drain_into(&mut warnings);
    let status = resolve_status(payload).drain_into(&mut warnings);
    let images = unify_images(payload);
    let city = resolve_relation(&CITY, payload);
    let neighborhood = resolve_relation(&NEIGHBORHOOD, payload);
    let floor_plans = floor_plans(payload, &mut warnings);

    let record = PropertyRecord {
        id: RECORD_ID
            .first_value(payload)
            .and_then(id_string)
            .unwrap_or_default(),
        price: numeric::resolve(&numeric::PRICE, payload),
        bedrooms: numeric::resolve(&numeric::BEDROOMS, payload),
        bathrooms: numeric::resolve(&numeric::BATHROOMS, payload),
        area: numeric::resolve(&numeric::AREA, payload),
        parking: numeric::resolve(&numeric::PARKING, payload),
        year_built: numeric::resolve(&numeric::YEAR_BUILT, payload),
        currency,
        currency_id: resolve_id(&CURRENCY_ID, payload),
        status: status.status,
        status_raw: status.raw,
        city: city.name,
        city_id: city.id,
        neighborhood: neighborhood.name,
        neighborhood_id: neighborhood.id,
        images: images.images,
        featured_image: images.featured_image,
        amenities: entity_ids(&AMENITIES, payload),
        services: entity_ids(&SERVICES, payload),
        additional_property_types: entity_ids(&ADDITIONAL_TYPES, payload)
            .iter()
            .map(ToString::to_string)
            .collect(),
        floor_plans,
        extra: pass_through(payload),
    };

    Reconciled {
        value: record,
        warnings,
    }
}

/// Map [`assemble`] over a batch of payloads.
pub fn assemble_all(payloads: &[RawPropertyPayload]) -> Vec<Reconciled<PropertyRecord>> {
    payloads.iter().map(assemble).collect()
}

fn floor_plans(payload: &RawPropertyPayload, warnings: &mut Vec<Diagnostic>) -> Vec<FloorPlan> {
    let Some(entries) = FLOOR_PLANS.first_value(payload).and_then(Value::as_array) else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(Value::as_object)
        .map(|fields| {
            let plan = RawPropertyPayload::new(fields.clone());
            floor_plan(&plan).drain_into(warnings)
        })
        .collect()
}

fn floor_plan(plan: &RawPropertyPayload) -> Reconciled<FloorPlan> {
    let mut warnings = Vec::new();

    // unset unless the plan carries currency data of its own
    let currency = raw_code(plan.get("currencyCode"), plan.get("currency"))
        .map(|_| normalize_fields(plan.get("currencyCode"), plan.get("currency")))
        .map(|currency| currency.drain_into(&mut warnings));

    let value = FloorPlan {
        id: plan.get("id").and_then(id_string).unwrap_or_default(),
        title: PLAN_TITLE.string_or(plan, ""),
        bedrooms: numeric::resolve(&numeric::BEDROOMS, plan),
        bathrooms: numeric::resolve(&numeric::BATHROOMS, plan),
        price: numeric::resolve(&numeric::PRICE, plan),
        size: numeric::resolve(&PLAN_SIZE, plan),
        image: PLAN_IMAGE.first_string(plan).map(str::to_string),
        description: PLAN_DESCRIPTION.string_or(plan, ""),
        currency_id: resolve_id(&CURRENCY_ID, plan),
        currency,
    };

    Reconciled { value, warnings }
}

/// Ids of a relation list. Entries may be numbers, strings or objects
/// carrying `id`; anything else is dropped.
fn entity_ids(resolver: &FieldResolver, payload: &RawPropertyPayload) -> Vec<EntityId> {
    resolver
        .first_map(payload, Value::as_array)
        .map(|entries| entries.iter().filter_map(entity_id).collect())
        .unwrap_or_default()
}

fn entity_id(value: &Value) -> Option<EntityId> {
    match value {
        Value::Number(_) => to_id(value).map(EntityId::Numeric),
        Value::String(_) => non_empty_str(value).map(|s| EntityId::Text(s.to_string())),
        Value::Object(fields) => fields.get("id").and_then(entity_id),
        _ => None,
    }
}

fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        // integral floats render without the trailing `.0`
        Value::Number(n) => Some(
            to_id(value).map_or_else(|| n.to_string(), |id| id.to_string()),
        ),
        _ => None,
    }
}

fn pass_through(payload: &RawPropertyPayload) -> Map<String, Value> {
    payload
        .fields()
        .iter()
        .filter(|(key, _)| !PropertyRecord::CANONICAL_KEYS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CurrencyCode, PropertyStatus};
    use serde_json::json;

    fn build(value: Value) -> Reconciled<PropertyRecord> {
        assemble(&RawPropertyPayload::from_value(value))
    }

    #[test]
    fn empty_payload_yields_defaults() {
        let result = build(json!({}));
        let record = result.value;
        assert!(result.warnings.is_empty());
        assert_eq!(record.id, "");
        assert_eq!(record.price, 0.0);
        assert_eq!(record.year_built, 0.0);
        assert_eq!(record.currency, CurrencyCode::Usd);
        assert_eq!(record.currency_id, None);
        assert_eq!(record.status, PropertyStatus::Active);
        assert_eq!(record.status_raw, None);
        assert_eq!(record.city, "");
        assert!(record.images.is_empty());
        assert_eq!(record.featured_image, None);
        assert!(record.floor_plans.is_empty());
        assert!(record.extra.is_empty());
    }

    #[test]
    fn string_and_numeric_ids() {
        assert_eq!(build(json!({ "id": 42 })).value.id, "42");
        assert_eq!(build(json!({ "id": "abc-1" })).value.id, "abc-1");
        assert_eq!(build(json!({ "propertyId": 9 })).value.id, "9");
    }

    #[test]
    fn integral_float_ids_are_normalized() {
        let record = build(json!({ "id": 42.0, "neighborhoodId": "7.0", "cityId": 3.0 })).value;
        assert_eq!(record.id, "42");
        assert_eq!(record.neighborhood_id, Some(7));
        assert_eq!(record.city_id, Some(3));
        assert_eq!(build(json!({ "id": 4.5 })).value.id, "4.5");
    }

    #[test]
    fn relation_lists_accept_mixed_entries() {
        let record = build(json!({
            "amenities": [1, "pool", { "id": 3, "name": "Gym" }, null, { "name": "x" }],
            "serviceIds": ["2"],
            "additionalPropertyTypes": [5, { "id": "office" }]
        }))
        .value;
        assert_eq!(
            record.amenities,
            vec![
                EntityId::Numeric(1),
                EntityId::Text("pool".to_string()),
                EntityId::Numeric(3)
            ]
        );
        assert_eq!(record.services, vec![EntityId::Text("2".to_string())]);
        assert_eq!(record.additional_property_types, vec!["5", "office"]);
    }

    #[test]
    fn floor_plans_are_coerced_per_entry() {
        let result = build(json!({
            "floorPlans": [
                {
                    "id": 1, "name": "2 Ambientes", "bedrooms": "2", "bathrooms": 1,
                    "price": "95000", "area": 48.5, "imageUrl": "/p1.png",
                    "currency": { "id": 2, "code": "ars" }
                },
                { "id": "b", "title": "Loft", "price": "a consultar", "currencyCode": "GBP" },
                "garbage"
            ]
        }));

        let plans = &result.value.floor_plans;
        assert_eq!(plans.len(), 2);
        assert_eq!(
            plans[0],
            FloorPlan {
                id: "1".to_string(),
                title: "2 Ambientes".to_string(),
                bedrooms: 2.0,
                bathrooms: 1.0,
                price: 95000.0,
                size: 48.5,
                image: Some("/p1.png".to_string()),
                description: String::new(),
                currency_id: Some(2),
                currency: Some(CurrencyCode::Ars),
            }
        );
        assert_eq!(plans[1].price, 0.0);
        assert_eq!(plans[1].currency, Some(CurrencyCode::Usd));
        assert_eq!(
            result.warnings,
            vec![Diagnostic::UnsupportedCurrency {
                raw: "GBP".to_string(),
                fallback: CurrencyCode::Usd
            }]
        );
    }

    #[test]
    fn floor_plan_without_currency_leaves_it_unset() {
        let record = build(json!({ "floorPlans": [{ "id": 1 }] })).value;
        assert_eq!(record.floor_plans[0].currency, None);
        assert_eq!(record.floor_plans[0].title, "");
    }

    #[test]
    fn unknown_keys_pass_through_unmodified() {
        let record = build(json!({
            "id": 1,
            "title": "Casa en Lambaré",
            "propertyStatus": { "label": "Publicada" },
            "coordinates": { "lat": -25.3, "lng": -57.6 }
        }))
        .value;
        assert_eq!(record.extra.get("title"), Some(&json!("Casa en Lambaré")));
        assert_eq!(record.extra.get("propertyStatus"), Some(&json!({ "label": "Publicada" })));
        assert!(record.extra.contains_key("coordinates"));
        assert!(!record.extra.contains_key("id"));
    }

    #[test]
    fn serialized_record_uses_camel_case_and_flattens_extra() {
        let record = build(json!({ "id": 1, "yearBuilt": "1998", "title": "Depto" })).value;
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["yearBuilt"], json!(1998.0));
        assert_eq!(json["status"], json!("active"));
        assert_eq!(json["currency"], json!("USD"));
        assert_eq!(json["statusRaw"], Value::Null);
        assert_eq!(json["title"], json!("Depto"));
        assert!(json.get("featuredImage").is_none());
    }

    #[test]
    fn batch_maps_each_payload_independently() {
        let payloads = vec![
            RawPropertyPayload::from_value(json!({ "id": 1, "currency": "XYZ" })),
            RawPropertyPayload::from_value(json!({ "id": 2 })),
        ];
        let results = assemble_all(&payloads);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].warnings.len(), 1);
        assert!(results[1].warnings.is_empty());
        assert_eq!(results[1].value.id, "2");
    }
}
