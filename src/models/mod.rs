mod payload;
mod record;
mod report;

pub use payload::RawPropertyPayload;
pub use record::{CurrencyCode, EntityId, FloorPlan, PropertyRecord, PropertyStatus};
pub use report::{Diagnostic, Reconciled, ReconciliationReport};
