use std::path::Path;

use extkit_core::{
    application::{ApplicationError, ports::ContentFormatter},
    domain::canonical_json,
    error::ExtkitResult,
};

/// Re-serializes JSON with sorted keys, two-space indentation and a trailing
/// newline.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

impl ContentFormatter for JsonFormatter {
    fn format(&self, path: &Path, content: &str) -> ExtkitResult<String> {
        let failed = |reason: String| ApplicationError::FormattingFailed {
            path: path.to_path_buf(),
            reason,
        };

        let value: serde_json::Value =
            serde_json::from_str(content).map_err(|e| failed(e.to_string()))?;
        let mut out = serde_json::to_string_pretty(&canonical_json(value))
            .map_err(|e| failed(e.to_string()))?;
        out.push('\n');
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorts_and_indents() {
        let out = JsonFormatter
            .format(Path::new("p.json"), r#"{"b":1,"a":[{"d":1,"c":2}]}"#)
            .unwrap();
        assert_eq!(
            out,
            "{\n  \"a\": [\n    {\n      \"c\": 2,\n      \"d\": 1\n    }\n  ],\n  \"b\": 1\n}\n"
        );
    }

    #[test]
    fn rejects_invalid_json() {
        let err = JsonFormatter
            .format(Path::new("p.json"), "{ nope")
            .unwrap_err();
        assert_eq!(err.kind(), extkit_core::error::ErrorKind::Format);
    }
}
