//! Oil: the amount of filler surrounding each embedded character.

use crate::config::HASHED_PASSWORD_SECURE_LEVEL_OIL;
use crate::error::Error;
use serde::{Deserialize, Serialize};

/// Filler lengths placed before (negative) and after (positive) each
/// embedded character.
///
/// Large values make embedding and extraction proportionally slow, so callers
/// taking oil from untrusted input should bound it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyOil {
    negative_oil_length: u32,
    positive_oil_length: u32,
}

impl KeyOil {
    /// Create an oil from its negative and positive lengths.
    pub const fn new(negative_oil_length: u32, positive_oil_length: u32) -> Self {
        Self {
            negative_oil_length,
            positive_oil_length,
        }
    }

    /// Oil adding no filler at all.
    pub const fn none() -> Self {
        Self::new(0, 0)
    }

    /// Filler length before each character.
    pub fn negative(&self) -> u32 {
        self.negative_oil_length
    }

    /// Filler length after each character.
    pub fn positive(&self) -> u32 {
        self.positive_oil_length
    }

    /// Whether both lengths are zero.
    pub fn has_no_oil(&self) -> bool {
        self.negative_oil_length == 0 && self.positive_oil_length == 0
    }

    /// Oil used for the user password hash embedded next to data with this oil.
    ///
    /// Scaled down to 6%/4% of the data oil, or to 1.2%/0.5% once either side
    /// reaches [`HASHED_PASSWORD_SECURE_LEVEL_OIL`], so the hash segment stays
    /// short even for large oils.
    pub fn user_password_oil(&self) -> KeyOil {
        let (negative_rate, positive_rate) = if self.negative_oil_length
            < HASHED_PASSWORD_SECURE_LEVEL_OIL
            && self.positive_oil_length < HASHED_PASSWORD_SECURE_LEVEL_OIL
        {
            (0.06, 0.04)
        } else {
            (0.012, 0.005)
        };
        KeyOil::new(
            scale(self.negative_oil_length, negative_rate),
            scale(self.positive_oil_length, positive_rate),
        )
    }
}

fn scale(length: u32, rate: f64) -> u32 {
    (f64::from(length) * rate) as u32
}

impl TryFrom<(i64, i64)> for KeyOil {
    type Error = Error;

    fn try_from((negative, positive): (i64, i64)) -> Result<Self, Self::Error> {
        let negative = u32::try_from(negative).map_err(|_| Error::InvalidOil)?;
        let positive = u32::try_from(positive).map_err(|_| Error::InvalidOil)?;
        Ok(KeyOil::new(negative, positive))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_no_oil() {
        assert!(KeyOil::none().has_no_oil());
        assert!(KeyOil::default().has_no_oil());
        assert!(!KeyOil::new(0, 1).has_no_oil());
        assert!(!KeyOil::new(1, 0).has_no_oil());
    }

    #[test]
    fn test_negative_oil_rejected() {
        assert!(matches!(KeyOil::try_from((-1, 5)), Err(Error::InvalidOil)));
        assert!(matches!(KeyOil::try_from((5, -1)), Err(Error::InvalidOil)));
        assert_eq!(KeyOil::try_from((3, 4)).unwrap(), KeyOil::new(3, 4));
    }

    #[test]
    fn test_user_password_oil_low_regime() {
        assert_eq!(KeyOil::new(100, 100).user_password_oil(), KeyOil::new(6, 4));
        assert_eq!(KeyOil::new(10, 10).user_password_oil(), KeyOil::none());
        assert_eq!(KeyOil::new(4999, 0).user_password_oil(), KeyOil::new(299, 0));
    }

    #[test]
    fn test_user_password_oil_high_regime() {
        assert_eq!(KeyOil::new(5000, 0).user_password_oil(), KeyOil::new(60, 0));
        assert_eq!(KeyOil::new(100, 10000).user_password_oil(), KeyOil::new(1, 50));
    }

    #[test]
    fn test_oil_stored_as_json() {
        let json = serde_json::to_string(&KeyOil::new(40, 25)).unwrap();
        assert_eq!(json, r#"{"negative_oil_length":40,"positive_oil_length":25}"#);
        assert_eq!(serde_json::from_str::<KeyOil>(&json).unwrap(), KeyOil::new(40, 25));
    }
}
