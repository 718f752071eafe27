//! Liquid template renderer.
//!
//! Templates see the serialized [`ProjectDescriptor`] as their globals, so
//! both `{{ formatted_type }}` and `{% if uses_react %}...{% endif %}` work.
//! Unknown variables are an error, not an empty string.

use extkit_core::{
    application::{ApplicationError, ports::TemplateRenderer},
    domain::ProjectDescriptor,
    error::ExtkitResult,
};
use tracing::instrument;

/// Renderer backed by the `liquid` crate with its standard library of tags
/// and filters.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiquidRenderer;

impl LiquidRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRenderer for LiquidRenderer {
    #[instrument(skip(self, source, descriptor))]
    fn render(
        &self,
        name: &str,
        source: &str,
        descriptor: &ProjectDescriptor,
    ) -> ExtkitResult<String> {
        let failed = |reason: String| ApplicationError::RenderingFailed {
            template: name.to_string(),
            reason,
        };

        let globals = liquid::model::to_object(descriptor).map_err(|e| failed(e.to_string()))?;

        let template = liquid::ParserBuilder::with_stdlib()
            .build()
            .and_then(|parser| parser.parse(source))
            .map_err(|e| failed(e.to_string()))?;

        template
            .render(&globals)
            .map_err(|e| failed(e.to_string()).into())
    }
}
