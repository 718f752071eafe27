//! Manifest merge strategies.
//!
//! Pure functions that combine the bytes of a manifest already on disk with
//! the bytes of a template fragment. One strategy per file class:
//!
//! | Class | Strategy |
//! |-------|----------|
//! | YAML  | textual concatenation, leading `---` of the fragment stripped |
//! | JSON  | dependency tables unioned (new wins), other fields original-first |
//!
//! # Domain purity
//!
//! No I/O and no `tracing` here; callers own reading, snapshotting and writing.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, de::IgnoredAny};
use serde_json::{Map, Value};

use crate::domain::error::DomainError;

/// Top-level JSON fields merged key-wise instead of original-wins.
pub const UNION_FIELDS: [&str; 2] = ["dependencies", "devDependencies"];

const YAML_SEPARATOR: &str = "---";

/// File classes with a merge strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestKind {
    Yaml,
    Json,
}

impl ManifestKind {
    /// Classify by extension. Anything that is not yml/yaml/json has no
    /// merge strategy.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "yml" | "yaml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yaml => "YAML",
            Self::Json => "JSON",
        }
    }

    /// Merge `fragment` into `original` with this class's strategy.
    pub fn merge(self, original: &[u8], fragment: &[u8]) -> Result<Vec<u8>, DomainError> {
        match self {
            Self::Yaml => merge_yaml(original, fragment),
            Self::Json => merge_json(original, fragment),
        }
    }
}

// ── YAML ──────────────────────────────────────────────────────────────────────

/// Append a YAML fragment to an existing YAML document.
///
/// The existing text must be well-formed YAML; the result is not re-parsed. A leading
/// `---` (and its line break) is dropped from the fragment. When the original
/// does not end in a newline one is inserted so the first fragment line does
/// not fuse with the last original line.
pub fn merge_yaml(original: &[u8], fragment: &[u8]) -> Result<Vec<u8>, DomainError> {
    let original_text = utf8(ManifestKind::Yaml, original)?;
    let fragment_text = utf8(ManifestKind::Yaml, fragment)?;

    check_yaml_syntax(original_text)?;

    let body = strip_document_separator(fragment_text);

    let mut merged = String::with_capacity(original_text.len() + body.len() + 1);
    merged.push_str(original_text);
    if !original_text.is_empty() && !original_text.ends_with('\n') {
        merged.push('\n');
    }
    merged.push_str(body);
    Ok(merged.into_bytes())
}

/// Every document must parse. Values are ignored, so repeated keys left by
/// earlier concatenations are accepted.
fn check_yaml_syntax(text: &str) -> Result<(), DomainError> {
    for document in serde_yaml_ng::Deserializer::from_str(text) {
        IgnoredAny::deserialize(document).map_err(|e| DomainError::MalformedManifest {
            format: ManifestKind::Yaml.as_str(),
            reason: e.to_string(),
        })?;
    }
    Ok(())
}

fn strip_document_separator(fragment: &str) -> &str {
    match fragment.strip_prefix(YAML_SEPARATOR) {
        Some(rest) => rest
            .strip_prefix("\r\n")
            .or_else(|| rest.strip_prefix('\n'))
            .unwrap_or(rest),
        None => fragment,
    }
}

// ── JSON ──────────────────────────────────────────────────────────────────────

/// Merge two package-manifest-shaped JSON objects.
///
/// - [`UNION_FIELDS`] are unioned key-wise; on collision the fragment wins.
/// - Every other top-level field keeps the original's value; the fragment
///   only fills fields the original lacks.
///
/// The result is serialized with sorted keys and two-space indentation.
pub fn merge_json(original: &[u8], fragment: &[u8]) -> Result<Vec<u8>, DomainError> {
    let mut base = parse_object(original, "existing manifest")?;
    let incoming = parse_object(fragment, "template manifest")?;

    for (key, new_value) in incoming {
        if UNION_FIELDS.contains(&key.as_str()) {
            let new_table = string_table(&key, new_value)?;
            let merged = match base.remove(&key) {
                Some(old_value) => {
                    let mut table = string_table(&key, old_value)?;
                    table.extend(new_table);
                    table
                }
                None => new_table,
            };
            base.insert(key, Value::Object(merged));
        } else {
            base.entry(key).or_insert(new_value);
        }
    }

    let mut out = serde_json::to_string_pretty(&canonical_json(Value::Object(base)))
        .map_err(|e| DomainError::UnexpectedManifestShape {
            reason: e.to_string(),
        })?;
    out.push('\n');
    Ok(out.into_bytes())
}

/// Rebuild every object of `value` with its keys in sorted order.
///
/// Keeps serialization stable regardless of whether `serde_json` was compiled
/// with insertion-ordered maps.
pub fn canonical_json(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let sorted: BTreeMap<String, Value> = map
                .into_iter()
                .map(|(k, v)| (k, canonical_json(v)))
                .collect();
            Value::Object(sorted.into_iter().collect())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(canonical_json).collect()),
        other => other,
    }
}

fn parse_object(bytes: &[u8], what: &str) -> Result<Map<String, Value>, DomainError> {
    let value: Value =
        serde_json::from_slice(bytes).map_err(|e| DomainError::MalformedManifest {
            format: ManifestKind::Json.as_str(),
            reason: format!("{what}: {e}"),
        })?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(DomainError::UnexpectedManifestShape {
            reason: format!("{what} must be a JSON object, found {}", json_type(&other)),
        }),
    }
}

fn string_table(field: &str, value: Value) -> Result<Map<String, Value>, DomainError> {
    let Value::Object(map) = value else {
        return Err(DomainError::UnexpectedManifestShape {
            reason: format!("'{field}' must be an object, found {}", json_type(&value)),
        });
    };

    if let Some((name, bad)) = map.iter().find(|(_, v)| !v.is_string()) {
        return Err(DomainError::UnexpectedManifestShape {
            reason: format!(
                "'{field}.{name}' must be a version string, found {}",
                json_type(bad)
            ),
        });
    }

    Ok(map)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn utf8(kind: ManifestKind, bytes: &[u8]) -> Result<&str, DomainError> {
    std::str::from_utf8(bytes).map_err(|e| DomainError::MalformedManifest {
        format: kind.as_str(),
        reason: e.to_string(),
    })
}
