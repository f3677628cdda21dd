//! Interaction state and the input handlers that mutate it.
//!
//! Nothing in here touches the GPU. Window events are decoded into plain
//! values (`Hotkey`, button/state pairs, scroll ticks), applied to
//! [`InteractionState`], and the frame renderer reads the result once per frame
//! through [`InteractionState::advance_frame`] and
//! [`InteractionState::shader_parameters`].

mod filter;
mod input;
mod view;

use glam::Vec3;
use tracing::debug;
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton, MouseScrollDelta};

use crate::types::ImageSlot;

pub use filter::{
    FilterMode, GaussianKernel, LuminancePreset, LuminanceWeights, ShaderParameters,
    SobelOrientation,
};
pub use input::{zoom_direction, Hotkey, PointerState};
pub use view::{ViewTransform, ZoomDirection, BASE_TRANSLATE_SPEED};

#[derive(Debug, Clone, Default)]
pub struct InteractionState {
    filter: FilterMode,
    view: ViewTransform,
    pointer: PointerState,
    pending_image: Option<ImageSlot>,
    close_requested: bool,
}

impl InteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(&self) -> FilterMode {
        self.filter
    }

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    pub fn close_requested(&self) -> bool {
        self.close_requested
    }

    /// Hands the most recent image request to the renderer, clearing it.
    pub fn take_pending_image(&mut self) -> Option<ImageSlot> {
        self.pending_image.take()
    }

    pub fn handle_hotkey(&mut self, hotkey: Hotkey) {
        let next = match hotkey {
            Hotkey::Close => {
                self.close_requested = true;
                return;
            }
            Hotkey::SelectImage(slot) => {
                self.pending_image = Some(slot);
                return;
            }
            Hotkey::Luminance(preset) => FilterMode::Luminance(preset.weights()),
            Hotkey::Brightness => FilterMode::Brightness,
            Hotkey::ResetFilters => FilterMode::None,
            Hotkey::Sobel(orientation) => FilterMode::Sobel(orientation),
            Hotkey::Sharpen => FilterMode::Sharpen,
            Hotkey::Gaussian(kernel) => FilterMode::Gaussian(kernel),
        };
        if next != self.filter {
            debug!(from = self.filter.label(), to = next.label(), "filter changed");
        }
        self.filter = next;
    }

    pub fn handle_cursor_moved(&mut self, position: PhysicalPosition<f64>) {
        self.pointer.handle_cursor_moved(position);
    }

    pub fn handle_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        self.pointer.handle_button(button, state);
    }

    pub fn handle_scroll(&mut self, delta: MouseScrollDelta) {
        let Some(direction) = zoom_direction(delta) else {
            return;
        };
        self.view.zoom(direction);
        debug!(
            ?direction,
            zoom_level = self.view.zoom_level(),
            translate_speed = self.view.translate_speed(),
            "zoom changed"
        );
    }

    /// Folds this frame's pointer travel into the view transform and records the
    /// cursor as the reference for the next frame.
    ///
    /// Travel is normalised by the displayed image size. Translation wins when
    /// both drag latches are held.
    pub fn advance_frame(&mut self, extent: (u32, u32)) {
        let width = extent.0.max(1) as f32;
        let height = extent.1.max(1) as f32;
        let delta = self.pointer.delta().as_vec2();

        if self.pointer.translating {
            let speed = self.view.translate_speed();
            self.view
                .translate(Vec3::new(speed * delta.x / width, -speed * delta.y / height, 0.0));
        } else if self.pointer.rotating {
            self.view.rotate(delta.x / width);
        }

        self.pointer.end_frame();
    }

    pub fn shader_parameters(&self, extent: (u32, u32)) -> ShaderParameters {
        ShaderParameters::new(&self.filter, self.view.matrix(), extent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Mat4, Vec4};

    const EXTENT: (u32, u32) = (512, 256);

    fn press(state: &mut InteractionState, hotkey: Hotkey) {
        state.handle_hotkey(hotkey);
    }

    fn active_categories(params: &ShaderParameters) -> usize {
        let luminance = params.luminance_values != [1.0, 1.0, 1.0];
        [
            luminance,
            params.adjust_brightness != 0.0,
            params.do_sobel != 0.0,
            params.do_unsharp != 0.0,
            params.do_gauss != 0.0,
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    #[test]
    fn sobel_then_gauss_end_to_end() {
        let mut state = InteractionState::new();

        press(&mut state, Hotkey::Sobel(SobelOrientation::Horizontal));
        let p = state.shader_parameters(EXTENT);
        assert_eq!((p.do_sobel, p.hor_sobel), (1.0, 1.0));
        assert_eq!(p.luminance_values, [1.0, 1.0, 1.0]);
        assert_eq!(p.adjust_brightness, 0.0);
        assert_eq!(p.do_unsharp, 0.0);
        assert_eq!((p.do_gauss, p.gauss_val), (0.0, 0.0));

        press(&mut state, Hotkey::Gaussian(GaussianKernel::Size5));
        let p = state.shader_parameters(EXTENT);
        assert_eq!((p.do_gauss, p.gauss_val), (1.0, 5.0));
        assert_eq!((p.do_sobel, p.hor_sobel), (0.0, 0.0));
        assert_eq!(p.luminance_values, [1.0, 1.0, 1.0]);
        assert_eq!(p.adjust_brightness, 0.0);
        assert_eq!(p.do_unsharp, 0.0);
    }

    #[test]
    fn hotkey_sequences_leave_at_most_one_filter() {
        let filters = [
            Hotkey::Luminance(LuminancePreset::Average),
            Hotkey::Luminance(LuminancePreset::Rec601),
            Hotkey::Luminance(LuminancePreset::Rec709),
            Hotkey::Brightness,
            Hotkey::ResetFilters,
            Hotkey::Sobel(SobelOrientation::Horizontal),
            Hotkey::Sobel(SobelOrientation::Vertical),
            Hotkey::Sharpen,
            Hotkey::Gaussian(GaussianKernel::Size3),
            Hotkey::Gaussian(GaussianKernel::Size5),
            Hotkey::Gaussian(GaussianKernel::Size7),
        ];

        // Every ordered pair and triple of filter keys.
        for first in filters {
            for second in filters {
                for third in filters {
                    let mut state = InteractionState::new();
                    for hotkey in [first, second, third] {
                        press(&mut state, hotkey);
                    }
                    let p = state.shader_parameters(EXTENT);
                    assert!(active_categories(&p) <= 1, "{first:?} {second:?} {third:?}");

                    let last_is_luminance = matches!(third, Hotkey::Luminance(_));
                    if !last_is_luminance {
                        assert_eq!(p.luminance_values, [1.0, 1.0, 1.0]);
                    }
                    if matches!(third, Hotkey::ResetFilters) {
                        assert_eq!(active_categories(&p), 0);
                    } else {
                        assert_eq!(active_categories(&p), 1);
                    }
                }
            }
        }
    }

    #[test]
    fn non_filter_keys_keep_the_filter() {
        let mut state = InteractionState::new();
        press(&mut state, Hotkey::Sharpen);
        press(&mut state, Hotkey::SelectImage(ImageSlot::new(2).unwrap()));
        press(&mut state, Hotkey::Close);
        assert_eq!(state.filter(), FilterMode::Sharpen);
        assert!(state.close_requested());
        assert_eq!(state.take_pending_image(), ImageSlot::new(2));
        assert_eq!(state.take_pending_image(), None);
    }

    #[test]
    fn latest_image_request_wins() {
        let mut state = InteractionState::new();
        press(&mut state, Hotkey::SelectImage(ImageSlot::new(1).unwrap()));
        press(&mut state, Hotkey::SelectImage(ImageSlot::new(6).unwrap()));
        assert_eq!(state.take_pending_image(), ImageSlot::new(6));
    }

    #[test]
    fn left_drag_translates_by_normalised_delta() {
        let mut state = InteractionState::new();
        state.handle_cursor_moved(PhysicalPosition::new(100.0, 100.0));
        state.handle_mouse_button(MouseButton::Left, ElementState::Pressed);
        state.handle_cursor_moved(PhysicalPosition::new(228.0, 164.0));
        state.advance_frame(EXTENT);

        // speed 2 * 128/512 = 0.5 right, 2 * 64/256 = 0.5 down (screen y grows downwards).
        let expected = Mat4::from_translation(Vec3::new(0.5, -0.5, 0.0));
        assert!(state.view().matrix().abs_diff_eq(expected, 1e-6));
        assert_eq!(state.pointer().delta(), glam::DVec2::ZERO);

        // No movement, no further change.
        state.advance_frame(EXTENT);
        assert!(state.view().matrix().abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn right_drag_rotates_by_horizontal_delta() {
        let mut state = InteractionState::new();
        state.handle_cursor_moved(PhysicalPosition::new(0.0, 0.0));
        state.advance_frame(EXTENT);
        state.handle_mouse_button(MouseButton::Right, ElementState::Pressed);
        state.handle_cursor_moved(PhysicalPosition::new(256.0, 90.0));
        state.advance_frame(EXTENT);

        let expected = Mat4::from_rotation_z(0.5);
        assert!(state.view().matrix().abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn translation_wins_when_both_buttons_are_held() {
        let mut state = InteractionState::new();
        state.handle_mouse_button(MouseButton::Left, ElementState::Pressed);
        state.handle_mouse_button(MouseButton::Right, ElementState::Pressed);
        state.handle_cursor_moved(PhysicalPosition::new(512.0, 0.0));
        state.advance_frame(EXTENT);

        let expected = Mat4::from_translation(Vec3::new(2.0, 0.0, 0.0));
        assert!(state.view().matrix().abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn idle_pointer_motion_only_updates_reference() {
        let mut state = InteractionState::new();
        state.handle_cursor_moved(PhysicalPosition::new(40.0, 30.0));
        state.advance_frame(EXTENT);
        assert_eq!(state.view().matrix(), Mat4::IDENTITY);
        assert_eq!(state.pointer().previous, glam::DVec2::new(40.0, 30.0));
    }

    #[test]
    fn translate_speed_follows_zoom() {
        let mut state = InteractionState::new();
        state.handle_scroll(MouseScrollDelta::LineDelta(0.0, -1.0));
        assert_eq!(state.view().translate_speed(), 4.0);

        state.handle_mouse_button(MouseButton::Left, ElementState::Pressed);
        state.handle_cursor_moved(PhysicalPosition::new(128.0, 0.0));
        state.advance_frame(EXTENT);

        // Half scale first, then a 4 * 128/512 = 1.0 local translation.
        let point = state.view().matrix() * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!((point.x - 0.5).abs() < 1e-6);
    }

    #[test]
    fn scroll_round_trip_settles_on_base_speed() {
        let mut state = InteractionState::new();
        for _ in 0..3 {
            state.handle_scroll(MouseScrollDelta::LineDelta(0.0, -1.0));
        }
        assert_eq!(state.view().zoom_level(), -3);
        assert_eq!(state.view().translate_speed(), 16.0);

        for _ in 0..5 {
            state.handle_scroll(MouseScrollDelta::LineDelta(0.0, 1.0));
        }
        assert_eq!(state.view().zoom_level(), 2);
        assert_eq!(state.view().translate_speed(), BASE_TRANSLATE_SPEED);

        press(&mut state, Hotkey::Luminance(LuminancePreset::Rec709));
        press(&mut state, Hotkey::Brightness);
        let p = state.shader_parameters(EXTENT);
        assert_eq!(p.luminance_values, [1.0, 1.0, 1.0]);
        assert_eq!(p.adjust_brightness, 1.0);
    }

    #[test]
    fn horizontal_scroll_is_not_a_zoom_tick() {
        let mut state = InteractionState::new();
        state.handle_scroll(MouseScrollDelta::LineDelta(1.0, 0.0));
        assert_eq!(state.view().zoom_level(), 0);
        assert_eq!(state.view().matrix(), Mat4::IDENTITY);
    }
}
