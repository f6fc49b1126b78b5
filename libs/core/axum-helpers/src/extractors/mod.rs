//! Custom extractors for Axum handlers.
//!
//! Both extractors deserialize and then run `validator::Validate`, rejecting
//! with the shared [`ErrorResponse`](crate::errors::ErrorResponse) shape.

pub mod validated_json;
pub mod validated_query;

pub use validated_json::ValidatedJson;
pub use validated_query::ValidatedQuery;
