//! Camera rig and orbit controller configuration.

/// Shared perspective projection and rig setup.
#[derive(Debug, Clone)]
pub struct CameraConfig {
    /// Vertical field of view (degrees)
    pub fov_y_degrees: f32,

    /// Near clipping plane (world units)
    pub near_plane: f32,

    /// Far clipping plane (world units)
    pub far_plane: f32,

    /// Initial position of the debug camera (world units)
    pub debug_start_position: [f32; 3],

    /// Orbit controller tuning for the debug camera
    pub orbit: OrbitConfig,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 25.0,
            near_plane: 0.1,
            far_plane: 150.0,
            debug_start_position: [5.0, 5.0, 5.0],
            orbit: OrbitConfig::default(),
        }
    }
}

/// Orbit controller tuning.
///
/// Keyboard input is intentionally not wired up; the controller only reacts
/// to pointer drag and wheel events.
#[derive(Debug, Clone)]
pub struct OrbitConfig {
    /// Pan moves the pivot in screen space (camera right/up axes)
    pub screen_space_panning: bool,

    /// Wheel zoom speed multiplier (dimensionless)
    pub zoom_speed: f32,

    /// Rotation speed in radians per pixel of drag
    pub rotate_speed: f32,

    /// Pan speed in world units per pixel at unit distance
    pub pan_speed: f32,

    /// Apply inertia to rotation/zoom/pan
    pub enable_damping: bool,

    /// Fraction of the pending delta applied per update step (0..1)
    pub damping_factor: f32,

    /// Minimum orbit radius (world units)
    pub min_radius: f32,

    /// Pitch clamp keeping the camera off the poles (radians)
    pub pitch_limit: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            screen_space_panning: true,
            zoom_speed: 1.0,
            rotate_speed: 0.005,
            pan_speed: 0.002,
            enable_damping: true,
            damping_factor: 0.05,
            min_radius: 0.5,
            pitch_limit: std::f32::consts::FRAC_PI_2 - 0.01,
        }
    }
}
