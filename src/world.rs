//! Scene population, gated on asset readiness.

use crate::params::{SurfaceGeometry, WaveParams};
use crate::scene::{DirectionalLight, Scene};
use crate::surface::ProceduralSurface;

/// The name of the asset group that gates scene construction. The surface
/// needs no assets of its own; it shares the gate with the rest of the
/// scene for sequencing.
const BASE_GROUP: &str = "base";

/// Builds the light and the wave surface into the scene once the base
/// asset group ends, and owns the live wave uniforms the debug panel
/// mutates and the renderer re-reads every frame.
pub struct World {
    /// Live shader uniforms (mutable between frames without rebuilds)
    pub waves: WaveParams,
    geometry: SurfaceGeometry,
    built: bool,
}

impl World {
    pub fn new(geometry: SurfaceGeometry) -> Self {
        Self {
            waves: WaveParams::default(),
            geometry,
            built: false,
        }
    }

    /// React to a finished asset group. Builds exactly once, on the base
    /// group; any other name (or a repeat) does nothing.
    pub fn handle_group_end(&mut self, group: &str, scene: &mut Scene) {
        if group != BASE_GROUP || self.built {
            return;
        }

        scene.light = Some(DirectionalLight::default());
        scene.attach(ProceduralSurface::build(&self.geometry));
        self.built = true;

        log::info!(
            "wave surface built: {} vertices",
            scene.surfaces[0].grid.vertices.len()
        );
    }

    pub fn is_built(&self) -> bool {
        self.built
    }

    /// No-op: the surface shader reads the viewport only through the
    /// camera's projection.
    pub fn resize(&mut self) {}

    /// No-op: the wave field advances on the GPU via the time uniform.
    pub fn update(&mut self) {}

    /// No-op: GPU buffer disposal covers the mesh.
    pub fn teardown(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_group_builds_scene_once() {
        let mut world = World::new(SurfaceGeometry::default());
        let mut scene = Scene::new();
        assert!(!world.is_built());

        world.handle_group_end("base", &mut scene);
        assert!(world.is_built());
        assert!(scene.light.is_some());
        assert_eq!(scene.surfaces.len(), 1);

        // Repeats and other groups never rebuild
        world.handle_group_end("base", &mut scene);
        world.handle_group_end("extras", &mut scene);
        assert_eq!(scene.surfaces.len(), 1);
    }

    #[test]
    fn test_other_groups_build_nothing() {
        let mut world = World::new(SurfaceGeometry::default());
        let mut scene = Scene::new();

        world.handle_group_end("extras", &mut scene);
        assert!(!world.is_built());
        assert!(scene.light.is_none());
        assert!(scene.surfaces.is_empty());
    }

    #[test]
    fn test_end_to_end_gate_through_resources() {
        use crate::resources::Resources;

        let mut world = World::new(SurfaceGeometry::default());
        let mut scene = Scene::new();
        let mut resources = Resources::new();

        resources.declare_group("base", 0);
        resources.declare_group("extras", 0);
        for event in resources.drain_events() {
            world.handle_group_end(&event.name, &mut scene);
        }

        assert_eq!(scene.surfaces.len(), 1);
    }
}
