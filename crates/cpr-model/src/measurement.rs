//! Samples, controls and measurements

use crate::design::{BlockReference, SubjectReference, TreatmentReference};
use serde::{Deserialize, Serialize};

/// A subject together with the treatments applied to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "object_type", rename = "sample")]
pub struct Sample {
    subject: SubjectReference,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    treatments: Vec<TreatmentReference>,
}

impl Sample {
    /// Create sample
    #[inline]
    #[must_use]
    pub fn new(subject: SubjectReference, treatments: Vec<TreatmentReference>) -> Self {
        Self {
            subject,
            treatments,
        }
    }

    /// Sampled subject
    #[inline]
    #[must_use]
    pub fn subject(&self) -> &SubjectReference {
        &self.subject
    }

    /// Applied treatments
    #[inline]
    #[must_use]
    pub fn treatments(&self) -> &[TreatmentReference] {
        &self.treatments
    }
}

/// Named control sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "object_type", rename = "control")]
pub struct Control {
    name: String,
    sample: Sample,
}

impl Control {
    /// Create control
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, sample: Sample) -> Self {
        Self {
            name: name.into(),
            sample,
        }
    }

    /// Control name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Control sample
    #[inline]
    #[must_use]
    pub fn sample(&self) -> &Sample {
        &self.sample
    }
}

/// A measurement of the samples produced by a design block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "object_type", rename = "measurement")]
pub struct Measurement {
    #[serde(rename = "type")]
    measurement_type: String,
    block: BlockReference,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    controls: Vec<Control>,
    performers: Vec<String>,
}

impl Measurement {
    /// Create measurement
    #[inline]
    #[must_use]
    pub fn new(
        measurement_type: impl Into<String>,
        block: BlockReference,
        controls: Vec<Control>,
        performers: Vec<String>,
    ) -> Self {
        Self {
            measurement_type: measurement_type.into(),
            block,
            controls,
            performers,
        }
    }

    /// Measurement type, e.g. `FLOW` or `PLATE_READER`
    #[inline]
    #[must_use]
    pub fn measurement_type(&self) -> &str {
        &self.measurement_type
    }

    /// Measured design block
    #[inline]
    #[must_use]
    pub fn block(&self) -> &BlockReference {
        &self.block
    }

    /// Controls
    #[inline]
    #[must_use]
    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    /// Performers able to run the measurement
    #[inline]
    #[must_use]
    pub fn performers(&self) -> &[String] {
        &self.performers
    }
}
