//! Location DTOs.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::LocationDraft;
use crate::domain::entities::Location;

/// Location as embedded in event payloads: either an `id` reference or
/// inline coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub lat: f64,
    pub lon: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
}

impl LocationDto {
    pub fn to_draft(&self) -> LocationDraft {
        LocationDraft {
            id: self.id,
            name: self.name.clone(),
            lat: self.lat,
            lon: self.lon,
            radius: self.radius,
        }
    }
}

impl From<&Location> for LocationDto {
    fn from(location: &Location) -> Self {
        Self {
            id: Some(location.id),
            name: location.name.clone(),
            lat: location.lat,
            lon: location.lon,
            radius: Some(location.radius),
        }
    }
}

impl From<Location> for LocationDto {
    fn from(location: Location) -> Self {
        (&location).into()
    }
}

/// Body of `POST /admin/locations`: a named place with a mandatory radius.
#[derive(Debug, Deserialize, Validate)]
pub struct NewLocationDto {
    #[validate(length(min = 1, max = 120, message = "name must be 1 to 120 characters long"))]
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    #[validate(range(min = 0.0, message = "radius must be zero or positive"))]
    pub radius: f64,
}

impl NewLocationDto {
    pub fn into_draft(self) -> LocationDraft {
        LocationDraft {
            id: None,
            name: Some(self.name),
            lat: self.lat,
            lon: self.lon,
            radius: Some(self.radius),
        }
    }
}
