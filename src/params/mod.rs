//! Parameter definitions with documented units and semantics.
//!
//! All magic numbers are extracted here with:
//! - Physical units (world units, seconds, degrees)
//! - Documented ranges and meanings
//! - Type safety where possible

mod camera;
mod render;
mod waves;

// Re-export all types
pub use camera::{CameraConfig, OrbitConfig};
pub use render::RenderConfig;
pub use waves::{SurfaceGeometry, WaveParams};
