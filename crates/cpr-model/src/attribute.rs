//! Named attributes of entities and treatments
//!
//! An [`Attribute`] is either bound to a concrete [`Value`] or unbound,
//! carrying only the [`Unit`] a future value must use.

use crate::error::{ModelError, ModelResult};
use crate::unit::Unit;
use crate::value::Value;
use serde::{Deserialize, Serialize};

/// Named attribute, bound or unbound
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "AttributeWire", try_from = "AttributeWire")]
pub enum Attribute {
    /// Attribute with a concrete value
    Bound {
        /// Attribute name
        name: String,
        /// Concrete value
        value: Value,
    },
    /// Placeholder that only fixes the unit
    Unbound {
        /// Attribute name
        name: String,
        /// Unit a value must carry to bind
        unit: Unit,
    },
}

impl Attribute {
    /// Create bound attribute
    #[inline]
    #[must_use]
    pub fn bound(name: impl Into<String>, value: Value) -> Self {
        Self::Bound {
            name: name.into(),
            value,
        }
    }

    /// Create unbound attribute
    #[inline]
    #[must_use]
    pub fn unbound(name: impl Into<String>, unit: Unit) -> Self {
        Self::Unbound {
            name: name.into(),
            unit,
        }
    }

    /// Attribute name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Bound { name, .. } | Self::Unbound { name, .. } => name,
        }
    }

    /// True when a concrete value is attached
    #[inline]
    #[must_use]
    pub fn is_bound(&self) -> bool {
        matches!(self, Self::Bound { .. })
    }

    /// Attached value, if bound
    #[inline]
    #[must_use]
    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::Bound { value, .. } => Some(value),
            Self::Unbound { .. } => None,
        }
    }

    /// Unit of the attribute (the value's unit when bound)
    #[inline]
    #[must_use]
    pub fn unit(&self) -> &Unit {
        match self {
            Self::Bound { value, .. } => value.unit(),
            Self::Unbound { unit, .. } => unit,
        }
    }

    /// Bind an unbound attribute to `value`
    ///
    /// # Errors
    /// - [`ModelError::AlreadyBound`] if the attribute carries a value
    /// - [`ModelError::UnitMismatch`] if `value` uses a different unit
    pub fn bind(&self, value: Value) -> ModelResult<Self> {
        match self {
            Self::Bound { name, .. } => Err(ModelError::AlreadyBound(name.clone())),
            Self::Unbound { name, unit } => {
                if value.unit() != unit {
                    return Err(ModelError::UnitMismatch {
                        attribute: name.clone(),
                        expected: unit.clone(),
                        actual: value.unit().clone(),
                    });
                }
                Ok(Self::bound(name.clone(), value))
            }
        }
    }
}

/// Wire shape: exactly one of `value` / `unit` is present
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "object_type", rename = "attribute")]
struct AttributeWire {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    unit: Option<Unit>,
}

impl From<Attribute> for AttributeWire {
    fn from(attribute: Attribute) -> Self {
        match attribute {
            Attribute::Bound { name, value } => Self {
                name,
                value: Some(value),
                unit: None,
            },
            Attribute::Unbound { name, unit } => Self {
                name,
                value: None,
                unit: Some(unit),
            },
        }
    }
}

impl TryFrom<AttributeWire> for Attribute {
    type Error = String;

    fn try_from(wire: AttributeWire) -> Result<Self, Self::Error> {
        match (wire.value, wire.unit) {
            (Some(value), None) => Ok(Self::bound(wire.name, value)),
            (None, Some(unit)) => Ok(Self::unbound(wire.name, unit)),
            (Some(_), Some(_)) => Err(format!(
                "attribute '{}' has both value and unit",
                wire.name
            )),
            (None, None) => Err(format!(
                "attribute '{}' has neither value nor unit",
                wire.name
            )),
        }
    }
}
