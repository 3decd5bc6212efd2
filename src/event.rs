//! Window events, decoupled from `winit`.
//!
//! The window translates the `winit` events it cares about into [`WindowEvent`]s before
//! handing them to the camera and to the click tracker. Keeping this layer small makes
//! those consumers testable without opening a window.

use winit::event::{ElementState, MouseScrollDelta};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Pixel scroll deltas are divided by this to get a number of wheel "lines".
const PIXELS_PER_LINE: f64 = 20.0;

/// State of a key or mouse button.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    /// Released.
    Release,
    /// Pressed.
    Press,
}

/// Mouse buttons.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left button.
    Button1,
    /// Right button.
    Button2,
    /// Middle button.
    Button3,
    /// Any other button.
    Other,
}

/// The keys the demo reacts to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Closes the window.
    Escape,
    /// Resets the camera.
    Return,
    /// Anything else.
    Unknown,
}

/// An input or window event.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum WindowEvent {
    /// The cursor moved to this position, in physical pixels from the top-left corner.
    CursorPos(f64, f64),
    /// A mouse button changed state.
    MouseButton(MouseButton, Action),
    /// The wheel was scrolled by this many lines (positive y means away from the user).
    Scroll(f64, f64),
    /// A key changed state.
    Key(Key, Action),
    /// The drawable surface now has this size, in physical pixels.
    FramebufferSize(u32, u32),
    /// The user asked to close the window.
    Close,
}

impl WindowEvent {
    /// Translates a `winit` window event, or returns `None` if the demo ignores it.
    pub fn from_winit(event: &winit::event::WindowEvent) -> Option<Self> {
        use winit::event::WindowEvent as W;

        match event {
            W::CloseRequested => Some(WindowEvent::Close),
            W::Resized(size) if size.width > 0 && size.height > 0 => {
                Some(WindowEvent::FramebufferSize(size.width, size.height))
            }
            W::CursorMoved { position, .. } => Some(WindowEvent::CursorPos(position.x, position.y)),
            W::MouseInput { state, button, .. } => Some(WindowEvent::MouseButton(
                translate_mouse_button(*button),
                translate_action(*state),
            )),
            W::MouseWheel { delta, .. } => {
                let (x, y) = match delta {
                    MouseScrollDelta::LineDelta(dx, dy) => (*dx as f64, *dy as f64),
                    MouseScrollDelta::PixelDelta(delta) => {
                        (delta.x / PIXELS_PER_LINE, delta.y / PIXELS_PER_LINE)
                    }
                };
                Some(WindowEvent::Scroll(x, y))
            }
            W::KeyboardInput { event, .. } => Some(WindowEvent::Key(
                translate_key(event.physical_key),
                translate_action(event.state),
            )),
            _ => None,
        }
    }
}

fn translate_action(state: ElementState) -> Action {
    match state {
        ElementState::Pressed => Action::Press,
        ElementState::Released => Action::Release,
    }
}

fn translate_mouse_button(button: winit::event::MouseButton) -> MouseButton {
    match button {
        winit::event::MouseButton::Left => MouseButton::Button1,
        winit::event::MouseButton::Right => MouseButton::Button2,
        winit::event::MouseButton::Middle => MouseButton::Button3,
        _ => MouseButton::Other,
    }
}

fn translate_key(physical_key: PhysicalKey) -> Key {
    match physical_key {
        PhysicalKey::Code(KeyCode::Escape) => Key::Escape,
        PhysicalKey::Code(KeyCode::Enter | KeyCode::NumpadEnter) => Key::Return,
        _ => Key::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalSize;

    #[test]
    fn zero_sized_resize_is_dropped() {
        let minimized = winit::event::WindowEvent::Resized(PhysicalSize::new(0, 0));
        assert_eq!(WindowEvent::from_winit(&minimized), None);

        let resized = winit::event::WindowEvent::Resized(PhysicalSize::new(640, 480));
        assert_eq!(
            WindowEvent::from_winit(&resized),
            Some(WindowEvent::FramebufferSize(640, 480))
        );
    }

    #[test]
    fn keys_and_buttons() {
        assert_eq!(translate_key(PhysicalKey::Code(KeyCode::Escape)), Key::Escape);
        assert_eq!(translate_key(PhysicalKey::Code(KeyCode::NumpadEnter)), Key::Return);
        assert_eq!(translate_key(PhysicalKey::Code(KeyCode::KeyQ)), Key::Unknown);
        assert_eq!(
            translate_mouse_button(winit::event::MouseButton::Right),
            MouseButton::Button2
        );
    }
}
