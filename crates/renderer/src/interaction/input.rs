use glam::DVec2;
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton, MouseScrollDelta};
use winit::keyboard::KeyCode;

use crate::types::ImageSlot;

use super::filter::{GaussianKernel, LuminancePreset, SobelOrientation};
use super::view::ZoomDirection;

/// Keyboard commands understood by the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hotkey {
    SelectImage(ImageSlot),
    Luminance(LuminancePreset),
    Brightness,
    ResetFilters,
    Sobel(SobelOrientation),
    Sharpen,
    Gaussian(GaussianKernel),
    Close,
}

impl Hotkey {
    /// Maps a physical key to its command. Keys are matched by position, so the
    /// bindings stay put on non-QWERTY layouts.
    pub fn from_key_code(code: KeyCode) -> Option<Self> {
        let hotkey = match code {
            KeyCode::Escape => Hotkey::Close,
            KeyCode::Digit1 => Hotkey::SelectImage(ImageSlot::new(1)?),
            KeyCode::Digit2 => Hotkey::SelectImage(ImageSlot::new(2)?),
            KeyCode::Digit3 => Hotkey::SelectImage(ImageSlot::new(3)?),
            KeyCode::Digit4 => Hotkey::SelectImage(ImageSlot::new(4)?),
            KeyCode::Digit5 => Hotkey::SelectImage(ImageSlot::new(5)?),
            KeyCode::Digit6 => Hotkey::SelectImage(ImageSlot::new(6)?),
            KeyCode::KeyZ => Hotkey::Luminance(LuminancePreset::Average),
            KeyCode::KeyX => Hotkey::Luminance(LuminancePreset::Rec601),
            KeyCode::KeyC => Hotkey::Luminance(LuminancePreset::Rec709),
            KeyCode::KeyV => Hotkey::Brightness,
            KeyCode::KeyB => Hotkey::ResetFilters,
            KeyCode::KeyS => Hotkey::Sobel(SobelOrientation::Horizontal),
            KeyCode::KeyA => Hotkey::Sobel(SobelOrientation::Vertical),
            KeyCode::KeyD => Hotkey::Sharpen,
            KeyCode::KeyL => Hotkey::Gaussian(GaussianKernel::Size3),
            KeyCode::KeyK => Hotkey::Gaussian(GaussianKernel::Size5),
            KeyCode::KeyJ => Hotkey::Gaussian(GaussianKernel::Size7),
            _ => return None,
        };
        Some(hotkey)
    }
}

/// Cursor tracking plus the two drag latches.
///
/// `translating` and `rotating` are independent: pressing the right button
/// while the left is held sets both. The frame step resolves the overlap by
/// letting translation win for as long as the left button stays down.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    pub current: DVec2,
    pub previous: DVec2,
    pub translating: bool,
    pub rotating: bool,
}

impl PointerState {
    pub(crate) fn handle_cursor_moved(&mut self, position: PhysicalPosition<f64>) {
        self.current = DVec2::new(position.x, position.y);
    }

    pub(crate) fn handle_button(&mut self, button: MouseButton, state: ElementState) {
        let pressed = state == ElementState::Pressed;
        match button {
            MouseButton::Left => {
                self.translating = pressed;
                if pressed {
                    self.previous = self.current;
                }
            }
            MouseButton::Right => {
                self.rotating = pressed;
            }
            _ => {}
        }
    }

    /// Cursor travel since the last frame.
    pub fn delta(&self) -> DVec2 {
        self.current - self.previous
    }

    /// Records the current position as the reference for the next frame.
    pub(crate) fn end_frame(&mut self) {
        self.previous = self.current;
    }
}

/// Turns one wheel event into a single zoom tick, or `None` for events without
/// a vertical component.
pub fn zoom_direction(delta: MouseScrollDelta) -> Option<ZoomDirection> {
    let vertical = match delta {
        MouseScrollDelta::LineDelta(_, y) => f64::from(y),
        MouseScrollDelta::PixelDelta(position) => position.y,
    };
    if vertical > 0.0 {
        Some(ZoomDirection::In)
    } else if vertical < 0.0 {
        Some(ZoomDirection::Out)
    } else {
        None
    }
}
