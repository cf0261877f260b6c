//! Dual-mode camera rig: an authored default camera and an orbit-controlled
//! debug camera driving a single externally-visible camera.

pub mod orbit;

use glam::{Mat4, Quat, Vec3};

use crate::params::CameraConfig;
use orbit::OrbitController;

/// Position + orientation pair shared by all cameras in the rig.
///
/// Orientation is a quaternion; where Euler angles are involved (the orbit
/// controller) they are composed in Y-X-Z order to avoid gimbal artifacts
/// while orbiting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

/// Perspective projection parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveProjection {
    /// Vertical field of view (degrees)
    pub fov_y_degrees: f32,
    /// Width / height
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl PerspectiveProjection {
    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_y_degrees.to_radians(),
            self.aspect,
            self.near,
            self.far,
        )
    }
}

/// One camera of the rig: its own projection and transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeCamera {
    pub projection: PerspectiveProjection,
    pub transform: Transform,
}

impl ModeCamera {
    /// World-to-clip matrix
    pub fn view_proj(&self) -> Mat4 {
        self.projection.matrix() * self.view_matrix()
    }

    /// World-to-view matrix (inverse of the camera's world transform)
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.transform.rotation, self.transform.position).inverse()
    }
}

/// Which per-mode camera drives the visible camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMode {
    Default,
    Debug,
}

impl CameraMode {
    pub fn label(&self) -> &'static str {
        match self {
            CameraMode::Default => "default",
            CameraMode::Debug => "debug",
        }
    }
}

/// Camera rig with independent `default` and `debug` mode cameras.
///
/// The visible camera (`camera`) is overwritten from the active mode's
/// transform on every `update()`; the two per-mode transforms are otherwise
/// free to diverge. The debug mode owns an orbit controller.
pub struct CameraRig {
    /// The camera the renderer looks through
    pub camera: ModeCamera,
    default_mode: ModeCamera,
    debug_mode: ModeCamera,
    orbit: Option<OrbitController>,
    active: CameraMode,
}

impl CameraRig {
    /// Build the rig for the given viewport aspect ratio.
    ///
    /// The debug camera starts at the configured position looking at the
    /// origin (one controller step is run so its orientation is valid
    /// before the first frame). The active mode starts as `Debug`.
    pub fn new(aspect: f32, config: &CameraConfig) -> Self {
        let camera = ModeCamera {
            projection: PerspectiveProjection {
                fov_y_degrees: config.fov_y_degrees,
                aspect,
                near: config.near_plane,
                far: config.far_plane,
            },
            transform: Transform::default(),
        };

        let default_mode = camera;

        let mut debug_mode = camera;
        debug_mode.transform.position = Vec3::from_array(config.debug_start_position);

        let mut orbit = OrbitController::new(
            config.orbit.clone(),
            debug_mode.transform.position,
            Vec3::ZERO,
        );
        orbit.update(&mut debug_mode.transform);

        Self {
            camera,
            default_mode,
            debug_mode,
            orbit: Some(orbit),
            active: CameraMode::Debug,
        }
    }

    /// Update the aspect ratio on the visible camera and both mode cameras.
    ///
    /// All three stay in sync so switching modes never causes a visible
    /// FOV/aspect jump.
    pub fn resize(&mut self, aspect: f32) {
        self.camera.projection.aspect = aspect;
        self.default_mode.projection.aspect = aspect;
        self.debug_mode.projection.aspect = aspect;
    }

    /// Per-frame step: advance the debug orbit controller, then hard-copy
    /// the active mode's transform onto the visible camera.
    ///
    /// The controller step may move the debug camera even without new
    /// input while damping decays. Must be called before each render.
    pub fn update(&mut self) {
        if let Some(orbit) = &mut self.orbit {
            orbit.update(&mut self.debug_mode.transform);
        }

        self.camera.transform = self.mode(self.active).transform;
    }

    /// Switch the driving mode. Takes effect on the next `update()`; the
    /// cut is hard, with no interpolation.
    pub fn set_active_mode(&mut self, mode: CameraMode) {
        self.active = mode;
    }

    pub fn active_mode(&self) -> CameraMode {
        self.active
    }

    /// Copy the debug camera's current transform onto the default mode,
    /// baking a manually-framed angle as the new default.
    pub fn sync_default_from_debug(&mut self) {
        self.default_mode.transform = self.debug_mode.transform;
    }

    /// Release the orbit controller. Safe to call more than once.
    pub fn teardown(&mut self) {
        self.orbit = None;
    }

    pub fn mode(&self, mode: CameraMode) -> &ModeCamera {
        match mode {
            CameraMode::Default => &self.default_mode,
            CameraMode::Debug => &self.debug_mode,
        }
    }

    /// World-to-clip matrix of the visible camera
    pub fn view_proj(&self) -> Mat4 {
        self.camera.view_proj()
    }

    // Input forwarding to the debug orbit controller. Inert after teardown.

    pub fn on_mouse_button(&mut self, button: winit::event::MouseButton, pressed: bool) {
        if let Some(orbit) = &mut self.orbit {
            orbit.on_mouse_button(button, pressed);
        }
    }

    pub fn on_cursor_moved(&mut self, x: f32, y: f32) {
        if let Some(orbit) = &mut self.orbit {
            orbit.on_cursor_moved(x, y);
        }
    }

    pub fn on_scroll(&mut self, delta: f32) {
        if let Some(orbit) = &mut self.orbit {
            orbit.on_scroll(delta);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rig(aspect: f32) -> CameraRig {
        CameraRig::new(aspect, &CameraConfig::default())
    }

    #[test]
    fn test_initial_state() {
        let rig = rig(16.0 / 9.0);

        assert_eq!(rig.active_mode(), CameraMode::Debug);
        assert_eq!(rig.camera.projection.fov_y_degrees, 25.0);
        assert_eq!(rig.camera.projection.near, 0.1);
        assert_eq!(rig.camera.projection.far, 150.0);

        // Debug camera keeps its configured start position after the
        // initial controller step
        let debug = rig.mode(CameraMode::Debug);
        let expected = Vec3::new(5.0, 5.0, 5.0);
        assert!((debug.transform.position - expected).length() < 1e-4);
    }

    #[test]
    fn test_resize_syncs_all_three_cameras() {
        let mut rig = rig(16.0 / 9.0);
        assert_eq!(rig.camera.projection.aspect, 16.0 / 9.0);
        assert_eq!(rig.mode(CameraMode::Default).projection.aspect, 16.0 / 9.0);
        assert_eq!(rig.mode(CameraMode::Debug).projection.aspect, 16.0 / 9.0);

        for aspect in [1.0, 4.0 / 3.0, 21.0 / 9.0] {
            rig.resize(aspect);
            assert_eq!(rig.camera.projection.aspect, aspect);
            assert_eq!(rig.mode(CameraMode::Default).projection.aspect, aspect);
            assert_eq!(rig.mode(CameraMode::Debug).projection.aspect, aspect);
        }
    }

    #[test]
    fn test_mode_switch_is_a_hard_cut() {
        let mut rig = rig(1.0);
        rig.update();
        assert_eq!(rig.camera.transform, rig.mode(CameraMode::Debug).transform);

        rig.set_active_mode(CameraMode::Default);
        rig.update();
        assert_eq!(
            rig.camera.transform,
            rig.mode(CameraMode::Default).transform
        );

        rig.set_active_mode(CameraMode::Debug);
        rig.update();
        assert_eq!(rig.camera.transform, rig.mode(CameraMode::Debug).transform);
    }

    #[test]
    fn test_sync_default_from_debug_is_exact() {
        let mut rig = rig(1.0);
        // Orbit the debug camera away from its start pose
        rig.on_mouse_button(winit::event::MouseButton::Left, true);
        rig.on_cursor_moved(0.0, 0.0);
        rig.on_cursor_moved(140.0, 60.0);
        rig.on_mouse_button(winit::event::MouseButton::Left, false);
        for _ in 0..10 {
            rig.update();
        }
        let snapshot = rig.mode(CameraMode::Debug).transform;

        rig.sync_default_from_debug();
        rig.set_active_mode(CameraMode::Default);
        rig.update();

        // Bit-for-bit copy of position and orientation
        assert_eq!(rig.camera.transform.position, snapshot.position);
        assert_eq!(rig.camera.transform.rotation, snapshot.rotation);
    }

    #[test]
    fn test_damping_keeps_moving_after_input_stops() {
        let mut rig = rig(1.0);
        rig.on_mouse_button(winit::event::MouseButton::Left, true);
        rig.on_cursor_moved(0.0, 0.0);
        rig.on_cursor_moved(200.0, 0.0);
        rig.on_mouse_button(winit::event::MouseButton::Left, false);

        rig.update();
        let after_first = rig.mode(CameraMode::Debug).transform.position;
        rig.update();
        let after_second = rig.mode(CameraMode::Debug).transform.position;

        // No new input between the two updates, yet the damped delta keeps
        // the debug camera drifting
        assert!((after_second - after_first).length() > 1e-6);
    }

    #[test]
    fn test_teardown_is_idempotent() {
        let mut rig = rig(1.0);
        rig.teardown();
        rig.teardown();

        // Rig still updates; the debug transform is simply static now
        let before = rig.mode(CameraMode::Debug).transform;
        rig.on_scroll(3.0);
        rig.update();
        assert_eq!(rig.mode(CameraMode::Debug).transform, before);
    }

    #[test]
    fn test_view_proj_is_valid() {
        let mut rig = rig(16.0 / 9.0);
        rig.update();
        let vp = rig.view_proj();
        assert_ne!(vp, Mat4::IDENTITY);
        assert!(vp.is_finite());
    }
}
