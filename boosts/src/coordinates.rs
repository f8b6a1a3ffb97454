use serde::{Deserialize, Serialize};

/// A validated point in decimal degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinates")]
pub struct Coordinates {
    lat: f64,
    lng: f64,
}

#[derive(Deserialize)]
struct RawCoordinates {
    lat: f64,
    lng: f64,
}

impl TryFrom<RawCoordinates> for Coordinates {
    type Error = String;

    fn try_from(raw: RawCoordinates) -> Result<Self, Self::Error> {
        Coordinates::new(raw.lat, raw.lng)
            .ok_or_else(|| format!("{}, {} is not a valid point", raw.lat, raw.lng))
    }
}

impl Coordinates {
    /// `None` for non-finite or out of range values.
    pub fn new(lat: f64, lng: f64) -> Option<Self> {
        let valid = lat.is_finite()
            && lng.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lng);
        valid.then_some(Coordinates { lat, lng })
    }

    /// Both halves must be present, as the boost records store them separately.
    pub fn from_parts(lat: Option<f64>, lng: Option<f64>) -> Option<Self> {
        Coordinates::new(lat?, lng?)
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }
}
