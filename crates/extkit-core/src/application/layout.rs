//! Fixed layout of the template store.
//!
//! ```text
//! shared/                    generic templates, rendered for every type
//! types/<type>/main/         main-body templates
//! types/<type>/src/          other source files, copied verbatim
//! types/<type>/manifest/     manifests copied or merged into the root
//! ```

use std::path::PathBuf;

pub const SHARED_DIR: &str = "shared";
pub const TYPES_DIR: &str = "types";
pub const MAIN_DIR: &str = "main";
pub const SOURCE_DIR: &str = "src";
pub const MANIFEST_DIR: &str = "manifest";

/// Suffix marking a file as a template to render.
pub const TEMPLATE_SUFFIX: &str = ".tpl";

/// Extension of the main-body templates.
pub const MAIN_BODY_EXTENSION: &str = "js";

pub fn type_dir(extension_type: &str) -> PathBuf {
    PathBuf::from(TYPES_DIR).join(extension_type)
}

pub fn type_subdir(extension_type: &str, section: &str) -> PathBuf {
    type_dir(extension_type).join(section)
}

/// Store path of a main body, without the template marker.
pub fn main_body_path(extension_type: &str, body: &str) -> PathBuf {
    type_subdir(extension_type, MAIN_DIR).join(format!("{body}.{MAIN_BODY_EXTENSION}"))
}

/// Strip the template marker from a file name, if present.
pub fn strip_template_suffix(name: &str) -> Option<&str> {
    name.strip_suffix(TEMPLATE_SUFFIX).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_follow_layout() {
        assert_eq!(
            main_body_path("checkout-ui", "react"),
            PathBuf::from("types/checkout-ui/main/react.js")
        );
        assert_eq!(
            type_subdir("checkout-ui", MANIFEST_DIR),
            PathBuf::from("types/checkout-ui/manifest")
        );
    }

    #[test]
    fn template_suffix_is_stripped() {
        assert_eq!(strip_template_suffix("README.md.tpl"), Some("README.md"));
        assert_eq!(strip_template_suffix("README.md"), None);
        assert_eq!(strip_template_suffix(".tpl"), None);
    }
}
