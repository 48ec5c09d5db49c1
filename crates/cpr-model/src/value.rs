//! Numeric values with units

use crate::unit::Unit;
use serde::{ser, Deserialize, Serialize, Serializer};
use std::fmt::{self, Display, Formatter};

/// A numeric magnitude paired with its [`Unit`]
///
/// JSON has no NaN or infinity, so serializing a non-finite magnitude fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "object_type", rename = "value")]
pub struct Value {
    #[serde(serialize_with = "serialize_finite")]
    value: f64,
    unit: Unit,
}

impl Value {
    /// Create value
    #[inline]
    #[must_use]
    pub fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    /// Numeric magnitude
    #[inline]
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Unit of the magnitude
    #[inline]
    #[must_use]
    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    /// Same unit, different magnitude
    #[inline]
    #[must_use]
    pub fn with_value(&self, value: f64) -> Self {
        Self {
            value,
            unit: self.unit.clone(),
        }
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn serialize_finite<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() {
        serializer.serialize_f64(*value)
    } else {
        Err(ser::Error::custom(format!("non-finite magnitude {value}")))
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}
