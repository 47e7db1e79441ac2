//! Geographic location.

/// A point on the map with a coverage radius in kilometers.
///
/// Named rows are standalone places managed by admins; unnamed rows hold the
/// inline coordinates of a single event.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Location {
    pub id: i64,
    pub name: Option<String>,
    pub lat: f64,
    pub lon: f64,
    pub radius: f64,
}

/// Input data for creating a location row.
#[derive(Debug, Clone)]
pub struct NewLocation {
    pub name: Option<String>,
    pub lat: f64,
    pub lon: f64,
    pub radius: f64,
}
