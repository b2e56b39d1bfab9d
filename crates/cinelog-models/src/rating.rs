use crate::error::ModelError;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A star rating on the 0-5 scale in half-star steps.
///
/// Stored as a count of half steps so equality is exact. An unrated entry is
/// `Option::<Rating>::None`, never `Rating(0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rating(u8);

impl Rating {
    pub const MAX_STARS: u8 = 5;

    /// Default for a fresh record: the middle of the five stars.
    pub const MIDDLE_STAR: Rating = Rating(6);

    pub fn new(value: f64) -> Result<Self, ModelError> {
        if !value.is_finite() || value < 0.0 || value > f64::from(Self::MAX_STARS) {
            return Err(ModelError::RatingOutOfRange(value));
        }
        let halves = value * 2.0;
        if (halves - halves.round()).abs() > 1e-9 {
            return Err(ModelError::RatingOffStep(value));
        }
        Ok(Rating(halves.round() as u8))
    }

    pub fn from_half_steps(half_steps: u8) -> Result<Self, ModelError> {
        if half_steps > Self::MAX_STARS * 2 {
            return Err(ModelError::RatingOutOfRange(f64::from(half_steps) / 2.0));
        }
        Ok(Rating(half_steps))
    }

    pub fn half_steps(self) -> u8 {
        self.0
    }

    pub fn value(self) -> f64 {
        f64::from(self.0) / 2.0
    }

    /// Five-glyph star bar, e.g. `★★★½☆` for 3.5.
    pub fn stars(self) -> String {
        let full = usize::from(self.0 / 2);
        let half = usize::from(self.0 % 2);
        let empty = usize::from(Self::MAX_STARS) - full - half;
        format!("{}{}{}", "★".repeat(full), "½".repeat(half), "☆".repeat(empty))
    }
}

impl fmt::Display for Rating {
    // `3` for whole stars, `3.5` for halves; matches what the backend echoes
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl FromStr for Rating {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|_| ModelError::InvalidNumber(s.to_string()))?;
        Rating::new(value)
    }
}

impl Serialize for Rating {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.value())
    }
}

impl<'de> Deserialize<'de> for Rating {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Decimal columns often come back as strings ("3.5")
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(value) => Rating::new(value).map_err(de::Error::custom),
            Raw::Text(text) => text.parse().map_err(de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_steps_accepted() {
        assert_eq!(Rating::new(3.5).unwrap().half_steps(), 7);
        assert_eq!(Rating::new(0.0).unwrap().half_steps(), 0);
        assert_eq!(Rating::new(5.0).unwrap().half_steps(), 10);
    }

    #[test]
    fn test_off_scale_rejected() {
        assert_eq!(Rating::new(3.3), Err(ModelError::RatingOffStep(3.3)));
        assert_eq!(Rating::new(5.5), Err(ModelError::RatingOutOfRange(5.5)));
        assert!(Rating::new(-0.5).is_err());
        assert!(Rating::new(f64::NAN).is_err());
        assert!(Rating::from_half_steps(11).is_err());
    }

    #[test]
    fn test_json_round_trip_keeps_half_star() {
        let rating: Rating = serde_json::from_str("3.5").unwrap();
        assert_eq!(serde_json::to_string(&rating).unwrap(), "3.5");
    }

    #[test]
    fn test_null_is_absent_not_zero() {
        let rating: Option<Rating> = serde_json::from_str("null").unwrap();
        assert_eq!(rating, None);
        assert_eq!(serde_json::to_string(&rating).unwrap(), "null");

        let zero: Option<Rating> = serde_json::from_str("0").unwrap();
        assert_eq!(zero, Some(Rating::new(0.0).unwrap()));
    }

    #[test]
    fn test_decimal_string_accepted() {
        let rating: Rating = serde_json::from_str("\"4.5\"").unwrap();
        assert_eq!(rating.value(), 4.5);
        assert!(serde_json::from_str::<Rating>("\"abc\"").is_err());
    }

    #[test]
    fn test_display_and_stars() {
        assert_eq!(Rating::new(3.0).unwrap().to_string(), "3");
        assert_eq!(Rating::new(3.5).unwrap().to_string(), "3.5");
        assert_eq!(Rating::new(3.5).unwrap().stars(), "★★★½☆");
        assert_eq!(Rating::new(0.0).unwrap().stars(), "☆☆☆☆☆");
        assert_eq!(Rating::MIDDLE_STAR.value(), 3.0);
    }
}
