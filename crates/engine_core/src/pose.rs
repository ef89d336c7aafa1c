//! Camera pose: where the viewer is and which way it faces.

use glam::{Mat4, Quat, Vec3};

/// Position and orientation of the viewing camera, sampled once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl CameraPose {
    /// Create a pose at the given position with identity rotation.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a pose with position and rotation.
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Create a pose at `position` looking at `target`.
    pub fn looking_at(position: Vec3, target: Vec3, up: Vec3) -> Self {
        let mut pose = Self::from_position(position);
        pose.look_at(target, up);
        pose
    }

    /// Get the forward direction (negative Z in right-handed coordinates).
    pub fn forward(&self) -> Vec3 {
        self.rotation * -Vec3::Z
    }

    /// Distance from the world origin (the galactic center).
    pub fn distance_from_origin(&self) -> f32 {
        self.position.length()
    }

    /// Rotate the pose around the world Y axis through the origin (orbit camera yaw).
    pub fn orbit_y(&mut self, angle: f32) {
        let q = Quat::from_rotation_y(angle);
        self.position = q * self.position;
        self.rotation = q * self.rotation;
    }

    /// Look at a target position.
    pub fn look_at(&mut self, target: Vec3, up: Vec3) {
        let forward = target - self.position;
        if forward.length_squared() > 0.0001 {
            self.rotation = Quat::from_mat4(&Mat4::look_at_rh(self.position, target, up)).inverse();
        }
    }
}
