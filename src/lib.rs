//! Reconciliation of loosely shaped property payloads into canonical
//! [`PropertyRecord`](models::PropertyRecord)s.

pub mod config;
pub mod models;
pub mod reconcile;
pub mod sources;

pub use models::{PropertyRecord, RawPropertyPayload, Reconciled};
pub use reconcile::{assemble, assemble_all};
