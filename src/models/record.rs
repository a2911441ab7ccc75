use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Currencies the platform can display and filter on
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum CurrencyCode {
    #[default]
    Usd,
    Ars,
    Eur,
    Pyg,
    Mxn,
    Brl,
}

impl CurrencyCode {
    pub const SUPPORTED: [CurrencyCode; 6] = [
        CurrencyCode::Usd,
        CurrencyCode::Ars,
        CurrencyCode::Eur,
        CurrencyCode::Pyg,
        CurrencyCode::Mxn,
        CurrencyCode::Brl,
    ];

    /// Match an upper-case ISO code against the supported set.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::SUPPORTED
            .into_iter()
            .find(|currency| currency.as_str() == code)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CurrencyCode::Usd => "USD",
            CurrencyCode::Ars => "ARS",
            CurrencyCode::Eur => "EUR",
            CurrencyCode::Pyg => "PYG",
            CurrencyCode::Mxn => "MXN",
            CurrencyCode::Brl => "BRL",
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Binary lifecycle state of a listing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PropertyStatus {
    Active,
    Inactive,
}

impl PropertyStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, PropertyStatus::Active)
    }
}

/// Identifier of a related entity (amenity, service, ...).
///
/// The backend mixes numeric and string ids, so both are kept as they came.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum EntityId {
    Numeric(i64),
    Text(String),
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Numeric(id) => write!(f, "{}", id),
            EntityId::Text(id) => f.write_str(id),
        }
    }
}

/// One unit layout offered inside a development
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FloorPlan {
    pub id: String,
    pub title: String,
    pub bedrooms: f64,
    pub bathrooms: f64,
    pub price: f64,
    pub size: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<CurrencyCode>,
}

/// Canonical property record consumed by listing, search and report views.
///
/// Every numeric field is finite and non-negative. Keys of the raw payload
/// that have no canonical counterpart are carried unmodified in `extra`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRecord {
    pub id: String,
    pub price: f64,
    pub bedrooms: f64,
    pub bathrooms: f64,
    pub area: f64,
    pub parking: f64,
    pub year_built: f64,
    pub currency: CurrencyCode,
    pub currency_id: Option<i64>,
    pub status: PropertyStatus,
    /// Status value exactly as the backend sent it
    pub status_raw: Option<String>,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city_id: Option<i64>,
    pub neighborhood: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neighborhood_id: Option<i64>,
    pub images: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,
    pub amenities: Vec<EntityId>,
    pub services: Vec<EntityId>,
    pub additional_property_types: Vec<String>,
    pub floor_plans: Vec<FloorPlan>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PropertyRecord {
    /// Payload keys owned by the canonical fields above. They are never
    /// copied into `extra`, which keeps the flattened output free of
    /// duplicate keys.
    pub const CANONICAL_KEYS: [&'static str; 21] = [
        "id",
        "price",
        "bedrooms",
        "bathrooms",
        "area",
        "parking",
        "yearBuilt",
        "currency",
        "currencyId",
        "status",
        "statusRaw",
        "city",
        "cityId",
        "neighborhood",
        "neighborhoodId",
        "images",
        "featuredImage",
        "amenities",
        "services",
        "additionalPropertyTypes",
        "floorPlans",
    ];

    /// Cover image: the explicit one, else the first gallery entry.
    pub fn cover_image(&self) -> Option<&str> {
        self.featured_image
            .as_deref()
            .or_else(|| self.images.first().map(String::as_str))
    }
}
