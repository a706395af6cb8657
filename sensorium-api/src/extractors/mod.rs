//! Custom extractors that reject with the shared error envelope.

pub mod json;
pub mod path_id;

pub use json::ApiJson;
pub use path_id::PathId;
