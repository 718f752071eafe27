//! Template renderer adapters.

mod liquid_renderer;

pub use liquid_renderer::LiquidRenderer;
