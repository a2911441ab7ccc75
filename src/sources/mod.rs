pub mod file;
pub mod traits;

pub use file::JsonFileSource;
pub use traits::PayloadSource;
