pub mod assembler;
pub mod currency;
pub mod fields;
pub mod images;
pub mod numeric;
pub mod relations;
pub mod status;

pub use assembler::{assemble, assemble_all};
pub use currency::{normalize_currency, DEFAULT_CURRENCY};
pub use fields::{FieldResolver, Rule};
pub use images::{unify_images, ImageSet};
pub use relations::{resolve_relation, Relation, RelationRules};
pub use status::{normalize_status, resolve_status, ResolvedStatus};
