//! Request/response data-transfer objects.
//!
//! All API-facing datetimes use the `yyyy-MM-dd HH:mm:ss` format and all
//! field names are camelCase, matching the platform's wire contract.

pub mod category;
pub mod compilation;
pub mod datetime;
pub mod event;
pub mod location;
pub mod params;
pub mod request;
pub mod user;
