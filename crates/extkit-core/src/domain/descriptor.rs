//! The project descriptor and its source-flavor decision table.
//!
//! A [`ProjectDescriptor`] is built once from a validated
//! [`ScaffoldRequest`](crate::domain::ScaffoldRequest). It describes what to
//! create and doubles as the binding context for template rendering, so it
//! serializes with the field names templates see.
//!
//! # Domain purity
//!
//! This module must not import `tracing` or perform I/O.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use uuid::Uuid;

use crate::domain::request::ScaffoldRequest;

/// Key under which the main entry point is recorded in `entries`.
pub const MAIN_ENTRY: &str = "main";

// ── Source flavor ─────────────────────────────────────────────────────────────

/// Which language/renderer combination the generated source targets.
///
/// Derived once from the template id. Every use site asks the flavor instead
/// of re-checking substrings of the id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SourceFlavor {
    #[serde(rename = "react-typescript")]
    ReactTypeScript,
    #[serde(rename = "react")]
    React,
    #[serde(rename = "typescript")]
    TypeScript,
    #[serde(rename = "javascript")]
    JavaScript,
}

impl SourceFlavor {
    /// Classify a template id: `react` and `typescript` anywhere in the id
    /// switch the respective capability on.
    pub fn from_template_id(template_id: &str) -> Self {
        let id = template_id.to_ascii_lowercase();
        match (id.contains("react"), id.contains("typescript")) {
            (true, true) => Self::ReactTypeScript,
            (true, false) => Self::React,
            (false, true) => Self::TypeScript,
            (false, false) => Self::JavaScript,
        }
    }

    pub const fn uses_react(self) -> bool {
        matches!(self, Self::ReactTypeScript | Self::React)
    }

    pub const fn uses_typescript(self) -> bool {
        matches!(self, Self::ReactTypeScript | Self::TypeScript)
    }

    /// File name of the generated entry point inside `src/`.
    ///
    /// React without TypeScript keeps the plain `.js` extension.
    pub const fn entry_filename(self) -> &'static str {
        match self {
            Self::ReactTypeScript => "index.tsx",
            Self::TypeScript => "index.ts",
            Self::React | Self::JavaScript => "index.js",
        }
    }

    /// Stem of the main-body template in `types/<type>/main/`.
    pub const fn main_body(self) -> &'static str {
        if self.uses_react() {
            "react"
        } else {
            "javascript"
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ReactTypeScript => "react-typescript",
            Self::React => "react",
            Self::TypeScript => "typescript",
            Self::JavaScript => "javascript",
        }
    }
}

impl fmt::Display for SourceFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Descriptor ────────────────────────────────────────────────────────────────

/// Everything a scaffold needs to know, plus its derived fields.
///
/// Owned by the caller for the lifetime of one scaffold invocation. The only
/// mutation is the source-emitting step recording `entries["main"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectDescriptor {
    #[serde(rename = "type")]
    extension_type: String,
    uuid: Uuid,
    root_dir: PathBuf,
    build_dir: String,
    template_id: String,
    renderer_name: String,
    entries: BTreeMap<String, String>,

    // Derived, computed once.
    formatted_type: String,
    flavor: SourceFlavor,
    uses_react: bool,
    uses_typescript: bool,
}

impl ProjectDescriptor {
    /// Build a descriptor from a validated request.
    ///
    /// A fresh v4 UUID is generated unless the request pins one.
    pub fn from_request(request: &ScaffoldRequest) -> Self {
        let flavor = SourceFlavor::from_template_id(request.template_id());

        Self {
            extension_type: request.extension_type().to_string(),
            uuid: request.uuid().unwrap_or_else(Uuid::new_v4),
            root_dir: request.root_dir().to_path_buf(),
            build_dir: request.build_dir().to_string(),
            template_id: request.template_id().to_string(),
            renderer_name: request.renderer_name().to_string(),
            entries: BTreeMap::new(),
            formatted_type: request.extension_type().to_uppercase(),
            flavor,
            uses_react: flavor.uses_react(),
            uses_typescript: flavor.uses_typescript(),
        }
    }

    pub fn extension_type(&self) -> &str {
        &self.extension_type
    }
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }
    pub fn build_dir(&self) -> &str {
        &self.build_dir
    }
    pub fn template_id(&self) -> &str {
        &self.template_id
    }
    pub fn renderer_name(&self) -> &str {
        &self.renderer_name
    }
    pub fn formatted_type(&self) -> &str {
        &self.formatted_type
    }
    pub fn flavor(&self) -> SourceFlavor {
        self.flavor
    }
    pub fn uses_react(&self) -> bool {
        self.uses_react
    }
    pub fn uses_typescript(&self) -> bool {
        self.uses_typescript
    }

    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }

    pub fn entry(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Record an entry point, returning the value it replaced.
    pub fn set_entry(&mut self, name: impl Into<String>, path: impl Into<String>) -> Option<String> {
        self.entries.insert(name.into(), path.into())
    }

    /// Put an entry back to a previously observed value (`None` removes it).
    pub fn restore_entry(&mut self, name: &str, previous: Option<String>) {
        match previous {
            Some(path) => {
                self.entries.insert(name.to_string(), path);
            }
            None => {
                self.entries.remove(name);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(template_id: &str) -> ProjectDescriptor {
        let request = ScaffoldRequest::builder()
            .extension_type("checkout-ui")
            .renderer_name("react")
            .template_id(template_id)
            .root_dir("/tmp/ext1")
            .build()
            .unwrap();
        ProjectDescriptor::from_request(&request)
    }

    #[test]
    fn entry_filename_table() {
        let table = [
            ("typescript-react", true, true, "index.tsx", "react"),
            ("javascript-react", true, false, "index.js", "react"),
            ("typescript", false, true, "index.ts", "javascript"),
            ("javascript", false, false, "index.js", "javascript"),
        ];

        for (id, react, ts, entry, body) in table {
            let d = descriptor(id);
            assert_eq!(d.uses_react(), react, "{id}");
            assert_eq!(d.uses_typescript(), ts, "{id}");
            assert_eq!(d.flavor().entry_filename(), entry, "{id}");
            assert_eq!(d.flavor().main_body(), body, "{id}");
        }
    }

    #[test]
    fn formatted_type_is_uppercase() {
        assert_eq!(descriptor("javascript").formatted_type(), "CHECKOUT-UI");
    }

    #[test]
    fn defaults_applied() {
        let d = descriptor("javascript");
        assert_eq!(d.build_dir(), "build");
        assert!(d.entries().is_empty());
        assert!(!d.uuid().is_nil());
    }

    #[test]
    fn pinned_uuid_is_kept() {
        let id = Uuid::new_v4();
        let request = ScaffoldRequest::builder()
            .extension_type("checkout-ui")
            .renderer_name("react")
            .template_id("javascript")
            .root_dir("/tmp/x")
            .uuid(id)
            .build()
            .unwrap();
        assert_eq!(ProjectDescriptor::from_request(&request).uuid(), id);
    }

    #[test]
    fn set_and_restore_entry() {
        let mut d = descriptor("javascript");
        assert_eq!(d.set_entry(MAIN_ENTRY, "src/index.js"), None);
        let previous = d.set_entry(MAIN_ENTRY, "src/index.ts");
        assert_eq!(previous.as_deref(), Some("src/index.js"));

        d.restore_entry(MAIN_ENTRY, previous);
        assert_eq!(d.entry(MAIN_ENTRY), Some("src/index.js"));

        d.restore_entry(MAIN_ENTRY, None);
        assert_eq!(d.entry(MAIN_ENTRY), None);
    }

    #[test]
    fn serializes_binding_field_names() {
        let value = serde_json::to_value(descriptor("typescript-react")).unwrap();
        assert_eq!(value["type"], "checkout-ui");
        assert_eq!(value["formatted_type"], "CHECKOUT-UI");
        assert_eq!(value["uses_react"], true);
        assert_eq!(value["flavor"], "react-typescript");
        assert_eq!(value["root_dir"], "/tmp/ext1");
    }
}
