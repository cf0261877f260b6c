//! Interactive orbit controller for the debug camera.
//!
//! Spherical coordinates around a pivot target: left-drag rotates, wheel
//! zooms, right-drag pans. Pending input is applied gradually with a
//! damping factor and decays geometrically, so the camera keeps gliding
//! for a few frames after the pointer stops. Keyboard input is not wired.

use glam::{EulerRot, Quat, Vec2, Vec3};
use winit::event::MouseButton;

use super::Transform;
use crate::params::OrbitConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DragState {
    None,
    Rotate,
    Pan,
}

/// Orbit manipulator bound to one camera transform.
pub struct OrbitController {
    config: OrbitConfig,

    /// Pivot the camera orbits around
    target: Vec3,
    radius: f32,
    /// Azimuth around +Y (radians)
    yaw: f32,
    /// Elevation above the horizon, clamped off the poles (radians)
    pitch: f32,

    // Pending input, consumed by update() under damping
    rotate_delta: Vec2,
    pan_delta: Vec2,
    zoom_delta: f32,

    drag: DragState,
    last_cursor: Option<Vec2>,
}

impl OrbitController {
    /// Create a controller whose orbit passes through `position` while
    /// looking at `target`.
    pub fn new(config: OrbitConfig, position: Vec3, target: Vec3) -> Self {
        let offset = position - target;
        let radius = offset.length().max(config.min_radius);
        let yaw = offset.x.atan2(offset.z);
        let pitch = (offset.y / radius).clamp(-1.0, 1.0).asin();

        Self {
            config,
            target,
            radius,
            yaw,
            pitch,
            rotate_delta: Vec2::ZERO,
            pan_delta: Vec2::ZERO,
            zoom_delta: 0.0,
            drag: DragState::None,
            last_cursor: None,
        }
    }

    pub fn on_mouse_button(&mut self, button: MouseButton, pressed: bool) {
        self.drag = match (button, pressed) {
            (MouseButton::Left, true) => DragState::Rotate,
            (MouseButton::Right, true) => DragState::Pan,
            _ => DragState::None,
        };
        if self.drag == DragState::None {
            self.last_cursor = None;
        }
    }

    pub fn on_cursor_moved(&mut self, x: f32, y: f32) {
        let cursor = Vec2::new(x, y);
        let delta = match self.last_cursor {
            Some(last) => cursor - last,
            None => Vec2::ZERO,
        };
        if self.drag != DragState::None {
            self.last_cursor = Some(cursor);
        }

        match self.drag {
            DragState::Rotate => self.rotate_delta += delta * self.config.rotate_speed,
            DragState::Pan => self.pan_delta += delta,
            DragState::None => {}
        }
    }

    /// Wheel input in scroll lines; positive zooms in.
    pub fn on_scroll(&mut self, delta: f32) {
        self.zoom_delta += delta * self.config.zoom_speed;
    }

    /// Apply one damped step of the pending input and write the resulting
    /// eye position and look-at orientation into `transform`.
    pub fn update(&mut self, transform: &mut Transform) {
        let k = if self.config.enable_damping {
            self.config.damping_factor
        } else {
            1.0
        };

        self.yaw -= self.rotate_delta.x * k;
        self.pitch = (self.pitch + self.rotate_delta.y * k)
            .clamp(-self.config.pitch_limit, self.config.pitch_limit);

        self.radius = (self.radius * 0.95f32.powf(self.zoom_delta * k)).max(self.config.min_radius);

        let rotation = self.look_rotation();
        if self.pan_delta != Vec2::ZERO {
            let right = rotation * Vec3::X;
            let up = if self.config.screen_space_panning {
                rotation * Vec3::Y
            } else {
                Vec3::Y
            };
            let scale = self.radius * self.config.pan_speed * k;
            self.target += (-self.pan_delta.x * right + self.pan_delta.y * up) * scale;
        }

        if self.config.enable_damping {
            let decay = 1.0 - self.config.damping_factor;
            self.rotate_delta *= decay;
            self.pan_delta *= decay;
            self.zoom_delta *= decay;
        } else {
            self.rotate_delta = Vec2::ZERO;
            self.pan_delta = Vec2::ZERO;
            self.zoom_delta = 0.0;
        }

        transform.position = self.target + self.offset();
        transform.rotation = self.look_rotation();
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    fn offset(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.radius * Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw)
    }

    /// Orientation looking from the orbit position toward the target,
    /// composed in Y-X-Z order with zero roll.
    fn look_rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, -self.pitch, 0.0)
    }
}
