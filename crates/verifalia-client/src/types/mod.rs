/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust structs/enums with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

pub mod content_type;
pub mod enums;
pub mod models;
pub mod requests;
pub mod responses;
pub mod time_span;

pub use content_type::ContentType;
pub use enums::*;
pub use models::*;
pub use requests::*;
pub use time_span::{format_time_span, parse_time_span};
