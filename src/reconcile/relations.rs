//! Ids and display names of related entities, which may arrive as a scalar
//! id, a nested object or a denormalized name field.

use super::fields::{FieldResolver, Rule};
use super::numeric::to_id;
use crate::models::RawPropertyPayload;

/// Where to look for a relation's id and display name
#[derive(Debug, Clone, Copy)]
pub struct RelationRules {
    pub id: FieldResolver,
    pub name: FieldResolver,
}

pub const NEIGHBORHOOD: RelationRules = RelationRules {
    id: FieldResolver::new(&[
        Rule::Key("neighborhoodId"),
        Rule::Path(&["neighborhood", "id"]),
        Rule::Path(&["neighborhood", "neighborhoodId"]),
    ]),
    name: FieldResolver::new(&[
        Rule::Key("neighborhood"),
        Rule::Path(&["neighborhood", "name"]),
        Rule::Key("neighborhoodName"),
        Rule::Path(&["neighborhood", "nombre"]),
    ]),
};

pub const CITY: RelationRules = RelationRules {
    id: FieldResolver::new(&[
        Rule::Key("cityId"),
        Rule::Path(&["city", "id"]),
        Rule::Path(&["city", "cityId"]),
    ]),
    name: FieldResolver::new(&[
        Rule::Key("city"),
        Rule::Path(&["city", "name"]),
        Rule::Key("cityName"),
        Rule::Path(&["city", "nombre"]),
    ]),
};

pub const CURRENCY_ID: FieldResolver = FieldResolver::new(&[
    Rule::Key("currencyId"),
    Rule::Path(&["currency", "id"]),
    Rule::Path(&["currency", "currencyId"]),
]);

/// Resolved relation. Id and name are independent: either may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Relation {
    pub id: Option<i64>,
    pub name: String,
}

pub fn resolve_relation(rules: &RelationRules, payload: &RawPropertyPayload) -> Relation {
    Relation {
        id: resolve_id(&rules.id, payload),
        name: rules.name.string_or(payload, ""),
    }
}

/// The first non-null candidate decides; it is then coerced to an integer.
pub fn resolve_id(resolver: &FieldResolver, payload: &RawPropertyPayload) -> Option<i64> {
    resolver.first_value(payload).and_then(to_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn neighborhood(value: Value) -> Relation {
        resolve_relation(&NEIGHBORHOOD, &RawPropertyPayload::from_value(value))
    }

    #[test]
    fn nested_object_supplies_id_and_name() {
        let relation = neighborhood(json!({ "neighborhood": { "id": 7, "name": "Centro" } }));
        assert_eq!(
            relation,
            Relation {
                id: Some(7),
                name: "Centro".to_string()
            }
        );
    }

    #[test]
    fn direct_id_wins_and_string_ids_are_coerced() {
        let relation = neighborhood(json!({
            "neighborhoodId": "12",
            "neighborhood": { "id": 7, "nombre": "Recoleta" }
        }));
        assert_eq!(relation.id, Some(12));
        assert_eq!(relation.name, "Recoleta");
    }

    #[test]
    fn legacy_nested_id_key() {
        let relation = neighborhood(json!({ "neighborhood": { "neighborhoodId": 4 } }));
        assert_eq!(relation.id, Some(4));
        assert_eq!(relation.name, "");
    }

    #[test]
    fn plain_string_and_sibling_name() {
        assert_eq!(neighborhood(json!({ "neighborhood": "Palermo" })).name, "Palermo");
        let relation = neighborhood(json!({ "neighborhoodName": "Centro" }));
        assert_eq!(relation, Relation { id: None, name: "Centro".to_string() });
    }

    #[test]
    fn city_follows_the_same_pattern() {
        let payload = RawPropertyPayload::from_value(json!({ "city": { "cityId": 2, "nombre": "Asunción" } }));
        let relation = resolve_relation(&CITY, &payload);
        assert_eq!(relation.id, Some(2));
        assert_eq!(relation.name, "Asunción");
    }

    #[test]
    fn currency_id_from_nested_object() {
        let payload = RawPropertyPayload::from_value(json!({ "currency": { "id": 3, "code": "EUR" } }));
        assert_eq!(resolve_id(&CURRENCY_ID, &payload), Some(3));
        let payload = RawPropertyPayload::from_value(json!({ "currency": "EUR" }));
        assert_eq!(resolve_id(&CURRENCY_ID, &payload), None);
    }
}
