use anyhow::Result;
use tracing::{info, warn};

use crate::geometry::QuadGeometry;
use crate::types::ImageSlot;

/// Progress of the most recent image switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchState {
    Idle,
    Loading(ImageSlot),
    Ready(ImageSlot),
    Failed(ImageSlot),
}

/// A decoded and uploaded texture together with its pixel size.
pub struct LoadedTexture<T> {
    pub texture: T,
    pub width: u32,
    pub height: u32,
}

/// The texture currently on screen and the quad sized for it.
///
/// A switch either replaces texture, extent and geometry together, or leaves all
/// three untouched. `T` is the GPU texture in the renderer and a plain marker
/// in tests.
pub struct ImageDisplay<T> {
    texture: T,
    extent: (u32, u32),
    geometry: QuadGeometry,
    slot: Option<ImageSlot>,
    state: SwitchState,
}

impl<T> ImageDisplay<T> {
    /// Starts out showing `placeholder`, which no slot owns.
    pub fn new(placeholder: LoadedTexture<T>) -> Self {
        Self {
            geometry: QuadGeometry::for_image(placeholder.width, placeholder.height),
            extent: (placeholder.width, placeholder.height),
            texture: placeholder.texture,
            slot: None,
            state: SwitchState::Idle,
        }
    }

    pub fn texture(&self) -> &T {
        &self.texture
    }

    pub fn extent(&self) -> (u32, u32) {
        self.extent
    }

    pub fn geometry(&self) -> &QuadGeometry {
        &self.geometry
    }

    pub fn slot(&self) -> Option<ImageSlot> {
        self.slot
    }

    pub fn state(&self) -> SwitchState {
        self.state
    }

    /// Runs `load` synchronously and swaps in its result.
    ///
    /// On failure the error is logged and the previous texture and geometry stay
    /// on screen. There is no retry; pressing the hotkey again starts a new
    /// attempt.
    pub fn switch_with<F>(&mut self, slot: ImageSlot, load: F) -> SwitchState
    where
        F: FnOnce() -> Result<LoadedTexture<T>>,
    {
        self.state = SwitchState::Loading(slot);
        self.state = match load() {
            Ok(loaded) => {
                info!(
                    %slot,
                    width = loaded.width,
                    height = loaded.height,
                    "image loaded"
                );
                self.geometry = QuadGeometry::for_image(loaded.width, loaded.height);
                self.extent = (loaded.width, loaded.height);
                self.texture = loaded.texture;
                self.slot = Some(slot);
                SwitchState::Ready(slot)
            }
            Err(err) => {
                warn!(%slot, error = %format!("{err:#}"), "failed to load image; keeping current one");
                SwitchState::Failed(slot)
            }
        };
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::InteractionState;

    fn slot(n: u8) -> ImageSlot {
        ImageSlot::new(n).unwrap()
    }

    fn loaded(tag: &'static str, width: u32, height: u32) -> LoadedTexture<&'static str> {
        LoadedTexture {
            texture: tag,
            width,
            height,
        }
    }

    #[test]
    fn starts_idle_on_placeholder() {
        let display = ImageDisplay::new(loaded("placeholder", 1, 1));
        assert_eq!(display.state(), SwitchState::Idle);
        assert_eq!(display.slot(), None);
        assert_eq!(display.geometry().half_extent(), (1.0, 1.0));
    }

    #[test]
    fn successful_switch_recomputes_geometry() {
        let mut display = ImageDisplay::new(loaded("placeholder", 1, 1));
        let state = display.switch_with(slot(3), || Ok(loaded("aerial", 400, 200)));

        assert_eq!(state, SwitchState::Ready(slot(3)));
        assert_eq!(*display.texture(), "aerial");
        assert_eq!(display.extent(), (400, 200));
        assert_eq!(display.geometry().half_extent(), (1.0, 0.5));
        assert_eq!(display.slot(), Some(slot(3)));
    }

    #[test]
    fn failed_switch_keeps_previous_image() {
        let mut display = ImageDisplay::new(loaded("placeholder", 1, 1));
        display.switch_with(slot(5), || Ok(loaded("pattern", 300, 600)));
        let geometry = *display.geometry();

        let mut interaction = InteractionState::new();
        let before = interaction.shader_parameters(display.extent());

        let state = display.switch_with(slot(1), || anyhow::bail!("decode failed"));
        assert_eq!(state, SwitchState::Failed(slot(1)));
        assert_eq!(*display.texture(), "pattern");
        assert_eq!(display.slot(), Some(slot(5)));
        assert_eq!(*display.geometry(), geometry);

        interaction.advance_frame(display.extent());
        let after = interaction.shader_parameters(display.extent());
        assert_eq!(
            after.image_width.to_bits(),
            before.image_width.to_bits()
        );
        assert_eq!(
            after.image_height.to_bits(),
            before.image_height.to_bits()
        );
    }

    #[test]
    fn recovers_after_failure() {
        let mut display = ImageDisplay::new(loaded("placeholder", 1, 1));
        display.switch_with(slot(2), || anyhow::bail!("missing file"));
        assert_eq!(display.state(), SwitchState::Failed(slot(2)));
        assert_eq!(*display.texture(), "placeholder");

        display.switch_with(slot(2), || Ok(loaded("logo", 50, 50)));
        assert_eq!(display.state(), SwitchState::Ready(slot(2)));
        assert_eq!(*display.texture(), "logo");
    }

    #[test]
    fn loader_runs_exactly_once() {
        let mut display = ImageDisplay::new(loaded("placeholder", 1, 1));
        let mut calls = 0;
        display.switch_with(slot(6), || {
            calls += 1;
            Ok(loaded("banff", 10, 30))
        });
        assert_eq!(calls, 1);
        assert_eq!(display.geometry().half_extent(), (1.0 / 3.0, 1.0));
    }
}
