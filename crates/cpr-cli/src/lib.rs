//! cp-request command-line support
//!
//! Everything the `cpr` binary does, as plain functions returning
//! [`anyhow::Result`].

#![warn(missing_docs)]

use anyhow::{Context, Result};
use cpr_codec::{decode_str, encode_to_string, Decoded, WireObject};
use cpr_model::ExperimentalRequest;
use cpr_transform::{
    validate_request, BlockInliner, DesignPrinter, ReferenceResolver, RequestTransformer, SweepExpander,
    TransformConfig, ValidationIssue,
};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Output settings for `cpr resolve`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON
    pub pretty: bool,
    /// Replace design block references with the referenced definitions
    pub inline_blocks: bool,
    /// Rewrite generate blocks as sums of fixed treatment values
    pub expand_sweeps: bool,
}

/// Configuration file contents
///
/// ```toml
/// [transform]
/// max_depth = 64
/// unresolved = "keep"
///
/// [output]
/// pretty = true
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Settings for every transform pass
    pub transform: TransformConfig,
    /// Settings for `resolve` output
    pub output: OutputConfig,
}

impl CliConfig {
    /// Parse from TOML text
    ///
    /// # Errors
    /// Returns error if `text` is not valid TOML of this shape
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).context("invalid configuration")
    }

    /// Load from a TOML file
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Builder: enable pretty output
    #[must_use]
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.output.pretty |= pretty;
        self
    }

    /// Builder: enable block inlining
    #[must_use]
    pub fn with_inline_blocks(mut self, inline: bool) -> Self {
        self.output.inline_blocks |= inline;
        self
    }

    /// Builder: enable sweep expansion
    #[must_use]
    pub fn with_expand_sweeps(mut self, expand: bool) -> Self {
        self.output.expand_sweeps |= expand;
        self
    }
}

/// Read and decode a request document
///
/// # Errors
/// Returns error if the file cannot be read, is not JSON, or is not an
/// experimental request
pub fn read_request(path: &Path) -> Result<ExperimentalRequest> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let decoded = decode_str::<ExperimentalRequest>(&text).with_context(|| format!("parsing {}", path.display()))?;
    if let Decoded::Unrecognized(raw) = &decoded {
        tracing::warn!(
            path = %path.display(),
            object_type = raw.get("object_type").and_then(serde_json::Value::as_str),
            "document is not an experimental request"
        );
    }
    decoded
        .into_result(ExperimentalRequest::TYPE_NAME)
        .with_context(|| format!("decoding {}", path.display()))
}

/// Run the configured passes over `request`
///
/// Sweep expansion runs first, then block inlining, then plain
/// resolution. Each pass uses a fresh transformer.
///
/// # Errors
/// Returns error if any pass fails
pub fn transform(request: &ExperimentalRequest, config: &CliConfig) -> Result<ExperimentalRequest> {
    let mut current = request.clone();
    if config.output.expand_sweeps {
        current = SweepExpander::new(config.transform)
            .transform_request(&current)
            .context("expanding sweeps")?;
    }
    if config.output.inline_blocks {
        current = BlockInliner::new(config.transform)
            .transform_request(&current)
            .context("inlining blocks")?;
    }
    ReferenceResolver::new(config.transform)
        .transform_request(&current)
        .context("resolving references")
}

/// `cpr resolve`: decode, transform, re-encode
///
/// Writes to `output` when given, otherwise returns the text.
///
/// # Errors
/// Returns error on any read, decode, transform or write failure
pub fn resolve(input: &Path, output: Option<&Path>, config: &CliConfig) -> Result<String> {
    let request = read_request(input)?;
    let resolved = transform(&request, config)?;
    let mut text = encode_to_string(&resolved, config.output.pretty).context("encoding result")?;
    text.push('\n');

    if let Some(path) = output {
        fs::write(path, &text).with_context(|| format!("writing {}", path.display()))?;
        tracing::info!(path = %path.display(), "wrote resolved request");
    }
    Ok(text)
}

/// `cpr validate`: issues found in the document
///
/// # Errors
/// Returns error if the document cannot be read or decoded
pub fn validate(input: &Path) -> Result<Vec<ValidationIssue>> {
    let request = read_request(input)?;
    let issues = validate_request(&request);
    tracing::debug!(issues = issues.len(), "validated {}", request.cp_name());
    Ok(issues)
}

/// `cpr show`: indented rendering of every design block
///
/// # Errors
/// Returns error if the document cannot be read or decoded
pub fn show(input: &Path) -> Result<String> {
    let request = read_request(input)?;
    if request.designs().is_empty() {
        tracing::info!(path = %input.display(), "request has no design blocks");
    }
    Ok(DesignPrinter::render_request(&request))
}
