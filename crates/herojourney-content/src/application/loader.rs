//! Loading and validating node documents.
//!
//! A document has the shape `{ "nodes": [ ... ] }` in JSON or YAML. Each
//! node is validated on its own; a node that fails validation is dropped
//! with a warning and never reaches the engine, while the rest of the
//! document still loads.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use herojourney_core::error::DomainError;
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::domain::catalog::ContentCatalog;
use crate::domain::nodes::{
    ContentNode, DifficultyTier, Outcome, OutcomeEffects, StatRequirements,
};

/// Why a content source could not be turned into a catalog.
#[derive(Debug, Error)]
pub enum ContentLoadError {
    /// The document could not be read.
    #[error("cannot read {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The document is not valid JSON.
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The document is not valid YAML.
    #[error("malformed YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The document has no `nodes` list.
    #[error("document is missing the 'nodes' list")]
    MissingNodes,

    /// The file extension is not one we can parse.
    #[error("unsupported content format: {0}")]
    UnsupportedFormat(String),
}

impl From<ContentLoadError> for DomainError {
    fn from(err: ContentLoadError) -> Self {
        DomainError::ContentLoad(err.to_string())
    }
}

/// Serialization format of a content document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Picks the format from a file extension.
    ///
    /// # Errors
    ///
    /// Returns `ContentLoadError::UnsupportedFormat` for anything other than
    /// `.json`, `.yaml` or `.yml`.
    pub fn from_path(path: &Path) -> Result<Self, ContentLoadError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(ContentLoadError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// A node that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedNode {
    /// The node id, or its position in the list when the id is unreadable.
    pub id: String,
    /// What was wrong with it.
    pub reason: String,
}

/// Result of a successful load.
#[derive(Debug, Clone)]
pub struct LoadReport {
    /// The validated catalog.
    pub catalog: ContentCatalog,
    /// Nodes dropped during validation.
    pub rejected: Vec<RejectedNode>,
    /// Accepted nodes with a non-fatal defect.
    pub warnings: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEffects {
    #[serde(default)]
    motivation_change: i32,
    #[serde(default, rename = "insanityChange", alias = "madnessChange")]
    madness_change: i32,
    #[serde(default)]
    insight_change: i32,
    #[serde(default)]
    stat_changes: BTreeMap<String, i32>,
    result_text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawOutcome {
    #[serde(default)]
    description: String,
    #[serde(default)]
    requirements: StatRequirements,
    effects: Option<RawEffects>,
    #[serde(default)]
    unlocks_nodes: Vec<String>,
    #[serde(default)]
    locks_nodes: Vec<String>,
    #[serde(default)]
    priority: i32,
    difficulty: Option<DifficultyTier>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawNode {
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    initially_locked: bool,
    repeatable: Option<bool>,
    outcomes: Option<Vec<RawOutcome>>,
}

fn validate_outcome(index: usize, raw: RawOutcome) -> Result<Outcome, String> {
    let difficulty = raw
        .difficulty
        .ok_or_else(|| format!("outcome {index} has no difficulty tier"))?;
    let effects = raw
        .effects
        .ok_or_else(|| format!("outcome {index} has no effects"))?;
    let result_text = effects
        .result_text
        .ok_or_else(|| format!("outcome {index} has no result text"))?;

    Ok(Outcome {
        description: raw.description,
        requirements: raw.requirements,
        effects: OutcomeEffects {
            motivation_change: effects.motivation_change,
            madness_change: effects.madness_change,
            insight_change: effects.insight_change,
            stat_changes: effects.stat_changes,
            result_text,
        },
        unlocks_nodes: raw.unlocks_nodes,
        locks_nodes: raw.locks_nodes,
        priority: raw.priority,
        difficulty,
    })
}

fn validate_node(raw: RawNode) -> Result<ContentNode, RejectedNode> {
    let reject = |reason: String| RejectedNode {
        id: raw.id.clone(),
        reason,
    };

    let raw_outcomes = match raw.outcomes {
        Some(list) if !list.is_empty() => list,
        _ => return Err(reject("node has no outcomes".to_owned())),
    };

    let mut outcomes = Vec::with_capacity(raw_outcomes.len());
    for (index, raw_outcome) in raw_outcomes.into_iter().enumerate() {
        outcomes.push(validate_outcome(index, raw_outcome).map_err(reject)?);
    }

    Ok(ContentNode {
        id: raw.id,
        title: raw.title,
        description: raw.description,
        category: raw.category,
        initially_locked: raw.initially_locked,
        repeatable: raw.repeatable.unwrap_or(true),
        outcomes,
    })
}

/// Parses and validates a content document.
///
/// # Errors
///
/// Returns `ContentLoadError` if the document is malformed or has no
/// `nodes` list. Individual bad nodes do not fail the load.
pub fn parse_catalog(text: &str, format: DocumentFormat) -> Result<LoadReport, ContentLoadError> {
    let document: serde_json::Value = match format {
        DocumentFormat::Json => serde_json::from_str(text)?,
        DocumentFormat::Yaml => serde_yaml::from_str(text)?,
    };

    let entries = document
        .get("nodes")
        .and_then(serde_json::Value::as_array)
        .ok_or(ContentLoadError::MissingNodes)?;

    let mut accepted: Vec<ContentNode> = Vec::with_capacity(entries.len());
    let mut rejected = Vec::new();

    for (position, entry) in entries.iter().enumerate() {
        let raw: RawNode = match serde_json::from_value(entry.clone()) {
            Ok(raw) => raw,
            Err(e) => {
                let id = entry
                    .get("id")
                    .and_then(serde_json::Value::as_str)
                    .map_or_else(|| format!("#{position}"), str::to_owned);
                warn!(node_id = %id, error = %e, "skipping unreadable node");
                rejected.push(RejectedNode {
                    id,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        if accepted.iter().any(|n| n.id == raw.id) {
            warn!(node_id = %raw.id, "skipping duplicate node id");
            rejected.push(RejectedNode {
                id: raw.id,
                reason: "duplicate node id".to_owned(),
            });
            continue;
        }

        match validate_node(raw) {
            Ok(node) => accepted.push(node),
            Err(rejection) => {
                warn!(node_id = %rejection.id, reason = %rejection.reason, "skipping invalid node");
                rejected.push(rejection);
            }
        }
    }

    let warnings = integrity_warnings(&accepted);
    for warning in &warnings {
        warn!("{warning}");
    }

    Ok(LoadReport {
        catalog: ContentCatalog::new(accepted),
        rejected,
        warnings,
    })
}

fn integrity_warnings(nodes: &[ContentNode]) -> Vec<String> {
    let mut warnings = Vec::new();
    for node in nodes {
        if !node.has_catch_all() {
            warnings.push(format!(
                "node '{}' has no zero-requirement outcome; resolution may fall back to its last outcome",
                node.id
            ));
        }
        for outcome in &node.outcomes {
            for target in outcome.unlocks_nodes.iter().chain(&outcome.locks_nodes) {
                if !nodes.iter().any(|n| &n.id == target) {
                    warnings.push(format!(
                        "node '{}' references unknown node '{target}'",
                        node.id
                    ));
                }
            }
        }
    }
    warnings
}

/// Reads and validates the document at `path`.
///
/// # Errors
///
/// Returns `ContentLoadError` if the file is missing, unreadable, in an
/// unsupported format, or malformed.
#[instrument(skip(path), fields(path = %path.display()))]
pub fn load_catalog(path: &Path) -> Result<LoadReport, ContentLoadError> {
    let format = DocumentFormat::from_path(path)?;
    let text = std::fs::read_to_string(path).map_err(|source| ContentLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let report = parse_catalog(&text, format)?;
    info!(
        loaded = report.catalog.len(),
        rejected = report.rejected.len(),
        "content catalog loaded"
    );
    Ok(report)
}

/// Loads the catalog at `path`, substituting the fallback catalog when the
/// source is missing or malformed.
#[must_use]
pub fn load_or_fallback(path: &Path) -> ContentCatalog {
    match load_catalog(path) {
        Ok(report) if !report.catalog.is_empty() => report.catalog,
        Ok(_) => {
            warn!(path = %path.display(), "content catalog is empty, using fallback catalog");
            ContentCatalog::fallback()
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "content load failed, using fallback catalog");
            ContentCatalog::fallback()
        }
    }
}
