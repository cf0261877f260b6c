//! Wave field uniforms and surface geometry parameters.

/// Live shader uniforms for the wave surface.
///
/// Every field can be mutated between frames (e.g. from the debug panel)
/// without rebuilding the mesh or the pipeline; the renderer re-reads the
/// struct every frame when filling the uniform buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveParams {
    /// Surface albedo (linear RGB), 0x271442
    pub base_color: [f32; 3],

    /// Material roughness (0 = mirror, 1 = diffuse)
    pub roughness: f32,

    /// Emissive tint (linear RGB), 0xff0a81
    pub emissive_color: [f32; 3],

    /// Elevation mapped to full emissive intensity
    pub emissive_low: f32,

    /// Elevation mapped to zero emissive intensity
    ///
    /// Listed first in the remap on purpose: the source range is
    /// [high, low], which concentrates the glow in the wave troughs.
    pub emissive_high: f32,

    /// Exponent shaping the emissive falloff
    pub emissive_power: f32,

    /// Large-wave spatial frequency along X and Z (cycles per world unit)
    pub large_frequency: [f32; 2],

    /// Large-wave phase speed (radians per second)
    pub large_speed: f32,

    /// Large-wave amplitude (world units)
    pub large_multiplier: f32,

    /// Number of noise octaves (1..=N)
    pub small_iterations: u32,

    /// Base noise frequency, scaled by the octave index
    pub small_frequency: f32,

    /// Noise animation speed (noise-space units per second)
    pub small_speed: f32,

    /// Noise amplitude before the 1/i octave falloff (world units)
    pub small_multiplier: f32,

    /// Finite-difference shift for normal estimation (world units)
    ///
    /// Must stay well below the vertex spacing (7 / 256 ~ 0.027) for the
    /// normal approximation to hold.
    pub normal_shift: f32,
}

impl Default for WaveParams {
    fn default() -> Self {
        Self {
            base_color: [0.152941, 0.078431, 0.258824],
            roughness: 0.15,
            emissive_color: [1.0, 0.039216, 0.505882],
            emissive_low: -0.25,
            emissive_high: 0.2,
            emissive_power: 7.0,
            large_frequency: [3.0, 1.0],
            large_speed: 1.25,
            large_multiplier: 0.15,
            small_iterations: 3,
            small_frequency: 2.0,
            small_speed: 0.3,
            small_multiplier: 0.18,
            normal_shift: 0.01,
        }
    }
}

/// Wave surface mesh dimensions.
#[derive(Debug, Clone)]
pub struct SurfaceGeometry {
    /// Plane side length (world units)
    pub size: f32,

    /// Quads per side (256 => 257^2 vertices)
    pub subdivisions: usize,

    /// Perlin noise seed for the CPU reference field
    pub noise_seed: u32,
}

impl Default for SurfaceGeometry {
    fn default() -> Self {
        Self {
            size: 7.0,
            subdivisions: 256,
            noise_seed: 0,
        }
    }
}

impl SurfaceGeometry {
    /// Distance between neighboring vertices (world units)
    pub fn vertex_spacing(&self) -> f32 {
        self.size / self.subdivisions as f32
    }
}
