use glam::{Mat4, Vec3};

/// Translate speed at zoom level zero, and the floor it never drops below.
pub const BASE_TRANSLATE_SPEED: f32 = 2.0;
pub const ZOOM_IN_FACTOR: f32 = 2.0;
pub const ZOOM_OUT_FACTOR: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

/// Accumulated pan/rotate/zoom applied to the quad.
///
/// Operations are composed on the right (`matrix = matrix * op`) in the order
/// they are issued, so the quad is first scaled, then rotated, then translated
/// in its own local frame exactly as the pointer produced them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    matrix: Mat4,
    zoom_level: i32,
    translate_speed: f32,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            matrix: Mat4::IDENTITY,
            zoom_level: 0,
            translate_speed: BASE_TRANSLATE_SPEED,
        }
    }
}

impl ViewTransform {
    pub fn matrix(&self) -> Mat4 {
        self.matrix
    }

    pub fn zoom_level(&self) -> i32 {
        self.zoom_level
    }

    pub fn translate_speed(&self) -> f32 {
        self.translate_speed
    }

    pub fn translate(&mut self, offset: Vec3) {
        self.matrix *= Mat4::from_translation(offset);
    }

    /// Rotates about the view axis (+Z) by `angle` radians.
    pub fn rotate(&mut self, angle: f32) {
        self.matrix *= Mat4::from_rotation_z(angle);
    }

    /// Applies one discrete scroll tick.
    ///
    /// Zooming out past level zero doubles the translate speed so panning keeps
    /// pace with the shrunken quad; zooming back in halves it again, never
    /// below [`BASE_TRANSLATE_SPEED`].
    pub fn zoom(&mut self, direction: ZoomDirection) {
        match direction {
            ZoomDirection::Out => {
                self.zoom_level -= 1;
                if self.zoom_level < 0 {
                    self.translate_speed *= 2.0;
                }
                self.matrix *= Mat4::from_scale(Vec3::splat(ZOOM_OUT_FACTOR));
            }
            ZoomDirection::In => {
                self.zoom_level += 1;
                if self.zoom_level == 0 {
                    self.translate_speed = BASE_TRANSLATE_SPEED;
                } else {
                    self.translate_speed = (self.translate_speed / 2.0).max(BASE_TRANSLATE_SPEED);
                }
                self.matrix *= Mat4::from_scale(Vec3::splat(ZOOM_IN_FACTOR));
            }
        }
    }
}
