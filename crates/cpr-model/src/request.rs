//! The request document root

use crate::design::DesignBlock;
use crate::entity::{NamedEntity, Treatment};
use crate::measurement::Measurement;
use crate::version::Version;
use serde::{Deserialize, Serialize};

/// A complete experimental request
///
/// `subjects`, `treatments` and `designs` are the shared definitions that
/// references point into, keyed by subject name, treatment name and block
/// label respectively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "object_type", rename = "experimental_request")]
pub struct ExperimentalRequest {
    cp_name: String,
    reference: String,
    version: Version,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    subjects: Vec<NamedEntity>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    treatments: Vec<Treatment>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    designs: Vec<DesignBlock>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    measurements: Vec<Measurement>,
}

impl ExperimentalRequest {
    /// Create empty request
    #[inline]
    #[must_use]
    pub fn new(cp_name: impl Into<String>, reference: impl Into<String>, version: Version) -> Self {
        Self {
            cp_name: cp_name.into(),
            reference: reference.into(),
            version,
            subjects: Vec::new(),
            treatments: Vec::new(),
            designs: Vec::new(),
            measurements: Vec::new(),
        }
    }

    /// With subject definitions
    #[inline]
    #[must_use]
    pub fn with_subjects(mut self, subjects: Vec<NamedEntity>) -> Self {
        self.subjects = subjects;
        self
    }

    /// With treatment definitions
    #[inline]
    #[must_use]
    pub fn with_treatments(mut self, treatments: Vec<Treatment>) -> Self {
        self.treatments = treatments;
        self
    }

    /// With design block definitions
    #[inline]
    #[must_use]
    pub fn with_designs(mut self, designs: Vec<DesignBlock>) -> Self {
        self.designs = designs;
        self
    }

    /// With measurements
    #[inline]
    #[must_use]
    pub fn with_measurements(mut self, measurements: Vec<Measurement>) -> Self {
        self.measurements = measurements;
        self
    }

    /// Challenge problem name
    #[inline]
    #[must_use]
    pub fn cp_name(&self) -> &str {
        &self.cp_name
    }

    /// Challenge problem reference URL
    #[inline]
    #[must_use]
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Request format version
    #[inline]
    #[must_use]
    pub fn version(&self) -> Version {
        self.version
    }

    /// Subject definitions
    #[inline]
    #[must_use]
    pub fn subjects(&self) -> &[NamedEntity] {
        &self.subjects
    }

    /// Treatment definitions
    #[inline]
    #[must_use]
    pub fn treatments(&self) -> &[Treatment] {
        &self.treatments
    }

    /// Design block definitions
    #[inline]
    #[must_use]
    pub fn designs(&self) -> &[DesignBlock] {
        &self.designs
    }

    /// Measurements
    #[inline]
    #[must_use]
    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    /// Subject definition by name
    #[must_use]
    pub fn subject(&self, name: &str) -> Option<&NamedEntity> {
        self.subjects.iter().find(|s| s.name() == name)
    }

    /// Treatment definition by name
    #[must_use]
    pub fn treatment(&self, name: &str) -> Option<&Treatment> {
        self.treatments.iter().find(|t| t.name() == name)
    }

    /// Design block definition by label
    #[must_use]
    pub fn design(&self, label: &str) -> Option<&DesignBlock> {
        self.designs.iter().find(|d| d.label() == label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::SubjectReference;

    fn request() -> ExperimentalRequest {
        ExperimentalRequest::new("yeast-gates", "https://example.org/cp/yeast-gates", Version::new(1, 0, 0))
            .with_subjects(vec![NamedEntity::new("strain", "http://strain.one")])
            .with_designs(vec![DesignBlock::new(
                "main",
                SubjectReference::new("strain").into(),
            )])
    }

    #[test]
    fn lookup_definitions() {
        let request = request();

        assert!(request.subject("strain").is_some());
        assert!(request.subject("other").is_none());
        assert!(request.design("main").is_some());
        assert!(request.treatment("iptg").is_none());
    }

    #[test]
    fn wire_shape_skips_empty_sections() {
        let json = serde_json::to_value(request()).unwrap();

        assert_eq!(json["object_type"], "experimental_request");
        assert_eq!(json["version"]["major"], 1);
        assert!(json.get("treatments").is_none());
        assert!(json.get("measurements").is_none());
        assert_eq!(json["designs"][0]["definition"]["object_type"], "subject_reference");
    }
}
