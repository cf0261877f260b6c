//! Shared scene root the renderer draws from.

use glam::Vec3;

use crate::surface::ProceduralSurface;

/// Single directional light aimed at the origin.
#[derive(Debug, Clone, Copy)]
pub struct DirectionalLight {
    pub color: [f32; 3],
    pub intensity: f32,
    pub position: Vec3,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0],
            intensity: 3.0,
            position: Vec3::new(-4.0, 2.0, 0.0),
        }
    }
}

impl DirectionalLight {
    /// Direction the light travels (toward the origin), normalized.
    pub fn direction(&self) -> Vec3 {
        (-self.position).normalize()
    }
}

/// Attach point for everything renderable.
#[derive(Default)]
pub struct Scene {
    pub light: Option<DirectionalLight>,
    pub surfaces: Vec<ProceduralSurface>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self, surface: ProceduralSurface) {
        self.surfaces.push(surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_light_direction_is_normalized() {
        let light = DirectionalLight::default();
        let dir = light.direction();
        assert!((dir.length() - 1.0).abs() < 1e-6);
        // Travels from (-4, 2, 0) toward the origin
        assert!(dir.x > 0.0 && dir.y < 0.0);
    }

    #[test]
    fn test_scene_starts_empty() {
        let scene = Scene::new();
        assert!(scene.light.is_none());
        assert!(scene.surfaces.is_empty());
    }
}
