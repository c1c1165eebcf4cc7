//! Request extractors that reject with the flat `{error}` body.

pub mod uuid_path;
pub mod validated_json;

pub use uuid_path::UuidPath;
pub use validated_json::{Normalize, ValidatedJson};
