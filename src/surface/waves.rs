//! CPU reference implementation of the wave field.
//!
//! Mirrors the expressions in `shader.wgsl`: elevation from layered sines
//! minus absolute noise octaves, a finite-difference normal, and the
//! emissive remap. The struct captures its parameters once and every
//! method is a pure function of (position, time), so the same field can be
//! sampled at the base point and at the two normal-estimation offsets with
//! no shared mutable state.
//!
//! The GPU side uses an embedded WGSL Perlin; both are coherent gradient
//! noise but not bit-identical, so tests pin the analytic sine term and
//! structural invariants rather than noise snapshot values.

use glam::{Vec2, Vec3};
use noise::{NoiseFn, Perlin};

use crate::params::WaveParams;

/// Wave height / normal / emissive field with captured parameters.
pub struct WaveField {
    params: WaveParams,
    perlin: Perlin,
}

impl WaveField {
    pub fn new(params: WaveParams, seed: u32) -> Self {
        Self {
            params,
            perlin: Perlin::new(seed),
        }
    }

    pub fn params(&self) -> &WaveParams {
        &self.params
    }

    /// Surface elevation at an object-local position.
    ///
    /// Large waves: product of two phase-shifted sines over the XZ plane.
    /// Small waves: N noise octaves, frequency scaled by the octave index
    /// i and amplitude falling off as 1/i (not 1/2^i), each taken as an
    /// absolute value and subtracted, biasing the noise toward troughs.
    /// The +2 positional offset de-correlates the octaves at the origin.
    pub fn elevation(&self, position: Vec3, time: f32) -> f32 {
        let p = &self.params;

        let mut elevation = (position.x * p.large_frequency[0] + time * p.large_speed).sin()
            * (position.z * p.large_frequency[1] + time * p.large_speed).sin()
            * p.large_multiplier;

        for i in 1..=p.small_iterations {
            let fi = i as f32;
            let sample = (Vec2::new(position.x, position.z) + 2.0) * p.small_frequency * fi;
            let noise = self.perlin.get([
                sample.x as f64,
                sample.y as f64,
                (time * p.small_speed) as f64,
            ]) as f32;

            elevation -= (noise * p.small_multiplier / fi).abs();
        }

        elevation
    }

    /// Base position displaced vertically by the elevation field.
    pub fn displace(&self, position: Vec3, time: f32) -> Vec3 {
        position + Vec3::new(0.0, self.elevation(position, time), 0.0)
    }

    /// Finite-difference normal estimate.
    ///
    /// Samples the displaced field at the base point and at small shifts
    /// along +X and -Z, then crosses the two normalized difference
    /// vectors. First-order only; valid while the shift stays well below
    /// the mesh vertex spacing.
    pub fn normal(&self, position: Vec3, time: f32) -> Vec3 {
        let shift = self.params.normal_shift;

        let base = self.displace(position, time);
        let shifted_a = self.displace(position + Vec3::new(shift, 0.0, 0.0), time);
        let shifted_b = self.displace(position + Vec3::new(0.0, 0.0, -shift), time);

        let to_a = (shifted_a - base).normalize();
        let to_b = (shifted_b - base).normalize();
        to_a.cross(to_b)
    }

    /// Emissive intensity for a given elevation.
    ///
    /// Linear remap with reversed source endpoints [high, low] -> [0, 1]
    /// (so the glow concentrates in the troughs), floored at zero before
    /// exponentiation to keep the GPU `pow` defined, then raised to the
    /// emissive power.
    pub fn emissive(&self, elevation: f32) -> f32 {
        let p = &self.params;
        let remapped = (elevation - p.emissive_high) / (p.emissive_low - p.emissive_high);
        remapped.max(0.0).powf(p.emissive_power)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> WaveField {
        WaveField::new(WaveParams::default(), 0)
    }

    /// Params with both wave layers zeroed: elevation is identically 0
    fn flat_params() -> WaveParams {
        WaveParams {
            large_multiplier: 0.0,
            small_multiplier: 0.0,
            ..WaveParams::default()
        }
    }

    #[test]
    fn test_elevation_is_deterministic() {
        let field = field();
        let p = Vec3::new(1.3, 0.0, -2.1);
        let a = field.elevation(p, 4.2);
        let b = field.elevation(p, 4.2);
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn test_large_wave_term_is_zero_at_origin_at_t0() {
        // sin(0) * sin(0) = 0, so only the subtracted octaves remain
        let field = WaveField::new(
            WaveParams {
                small_multiplier: 0.0,
                ..WaveParams::default()
            },
            0,
        );
        assert_eq!(field.elevation(Vec3::ZERO, 0.0), 0.0);
    }

    #[test]
    fn test_large_wave_matches_analytic_form() {
        let field = WaveField::new(
            WaveParams {
                small_multiplier: 0.0,
                ..WaveParams::default()
            },
            0,
        );
        let p = field.params().clone();

        let pos = Vec3::new(0.7, 0.0, -1.4);
        let t = 2.5;
        let expected = (pos.x * p.large_frequency[0] + t * p.large_speed).sin()
            * (pos.z * p.large_frequency[1] + t * p.large_speed).sin()
            * p.large_multiplier;

        assert!((field.elevation(pos, t) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_octaves_only_subtract() {
        let with_noise = field();
        let without_noise = WaveField::new(
            WaveParams {
                small_multiplier: 0.0,
                ..WaveParams::default()
            },
            0,
        );

        for (x, z, t) in [(0.0, 0.0, 0.0), (1.1, -0.4, 3.0), (-3.2, 2.8, 7.5)] {
            let pos = Vec3::new(x, 0.0, z);
            assert!(with_noise.elevation(pos, t) <= without_noise.elevation(pos, t));
        }
    }

    #[test]
    fn test_octave_falloff_bounds_elevation() {
        // |perlin| <= 1, so the octaves can lower the large-wave term by
        // at most sum(multiplier / i)
        let field = field();
        let p = field.params().clone();

        let budget: f32 = (1..=p.small_iterations)
            .map(|i| p.small_multiplier / i as f32)
            .sum();

        for (x, z, t) in [(0.0, 0.0, 0.0), (2.4, 1.9, 1.0), (-1.0, -1.0, 9.0)] {
            let pos = Vec3::new(x, 0.0, z);
            let large_only = (pos.x * p.large_frequency[0] + t * p.large_speed).sin()
                * (pos.z * p.large_frequency[1] + t * p.large_speed).sin()
                * p.large_multiplier;
            let elevation = field.elevation(pos, t);
            assert!(elevation >= large_only - budget - 1e-6);
            assert!(elevation <= large_only + 1e-6);
        }
    }

    #[test]
    fn test_flat_field_normal_is_up() {
        for shift in [0.001, 0.01, 0.1] {
            let field = WaveField::new(
                WaveParams {
                    normal_shift: shift,
                    ..flat_params()
                },
                0,
            );
            let normal = field.normal(Vec3::new(0.4, 0.0, -0.9), 3.3);
            assert!((normal - Vec3::Y).length() < 1e-5);
        }
    }

    #[test]
    fn test_normal_points_upward() {
        // The cross of the two normalized tangent-ish vectors always has a
        // positive Y component for a heightfield (the surface never folds
        // over); its length shrinks below 1 only as slopes grow steep.
        let field = field();
        for (x, z, t) in [(0.0, 0.0, 0.5), (1.7, -2.2, 4.0), (-0.3, 3.1, 8.8)] {
            let normal = field.normal(Vec3::new(x, 0.0, z), t);
            assert!(normal.y > 0.0);
            assert!(normal.length() > 0.1 && normal.length() <= 1.0 + 1e-5);
        }
    }

    #[test]
    fn test_displace_only_moves_y() {
        let field = field();
        let pos = Vec3::new(1.0, 0.0, 2.0);
        let displaced = field.displace(pos, 1.0);
        assert_eq!(displaced.x, pos.x);
        assert_eq!(displaced.z, pos.z);
        assert_eq!(displaced.y, field.elevation(pos, 1.0));
    }

    #[test]
    fn test_emissive_remap_endpoints() {
        let field = field();
        let p = field.params().clone();

        // Elevation at the low bound maps to full intensity, at the high
        // bound to zero
        assert!((field.emissive(p.emissive_low) - 1.0).abs() < 1e-6);
        assert_eq!(field.emissive(p.emissive_high), 0.0);

        // Above the high bound the remap goes negative and is floored
        assert_eq!(field.emissive(p.emissive_high + 0.5), 0.0);

        // Midpoint is shaped by the power curve, strictly between the ends
        let mid = field.emissive((p.emissive_low + p.emissive_high) / 2.0);
        assert!(mid > 0.0 && mid < 1.0);
        assert!((mid - 0.5f32.powf(p.emissive_power)).abs() < 1e-6);
    }

    #[test]
    fn test_emissive_monotonic_toward_troughs() {
        let field = field();
        let p = field.params().clone();
        let mut last = field.emissive(p.emissive_high);
        let steps = 20;
        for s in 1..=steps {
            let e = p.emissive_high
                + (p.emissive_low - p.emissive_high) * (s as f32 / steps as f32);
            let intensity = field.emissive(e);
            assert!(intensity >= last);
            last = intensity;
        }
    }
}
