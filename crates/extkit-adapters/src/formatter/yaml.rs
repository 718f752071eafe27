use std::path::Path;

use extkit_core::{
    application::{ApplicationError, ports::ContentFormatter},
    error::ExtkitResult,
};

/// Checks that YAML parses and normalizes the file ending to exactly one
/// newline. The text itself, comments included, is kept as written.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlFormatter;

impl ContentFormatter for YamlFormatter {
    fn format(&self, path: &Path, content: &str) -> ExtkitResult<String> {
        serde_yaml_ng::from_str::<serde_yaml_ng::Value>(content).map_err(|e| {
            ApplicationError::FormattingFailed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        })?;

        let mut out = content.trim_end().to_string();
        out.push('\n');
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_comments_and_normalizes_ending() {
        let out = YamlFormatter
            .format(Path::new("a.yml"), "# note\nkey: value\n\n\n")
            .unwrap();
        assert_eq!(out, "# note\nkey: value\n");
    }

    #[test]
    fn adds_missing_newline() {
        assert_eq!(
            YamlFormatter.format(Path::new("a.yml"), "a: 1").unwrap(),
            "a: 1\n"
        );
    }

    #[test]
    fn rejects_invalid_yaml() {
        assert!(
            YamlFormatter
                .format(Path::new("a.yml"), "key: [unclosed\n")
                .is_err()
        );
    }
}
