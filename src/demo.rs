//! The demo state: the registry, the removal rule, and click handling.

use crate::camera::Camera3d;
use crate::color;
use crate::event::{Action, MouseButton, WindowEvent};
use crate::options::DemoOptions;
use crate::picking;
use crate::scene::{AlwaysRemovable, ObjectId, Registry, RegistryError, RemovalRule, ToggleOutcome};
use glamx::{Vec2, Vec3};

/// Cursor travel, in pixels, beyond which a press becomes a drag rather than a click.
pub const CLICK_TOLERANCE: f32 = 4.0;

/// A click at a window position, in physical pixels from the top-left corner.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ClickEvent {
    /// Horizontal position, growing to the right.
    pub x: f32,
    /// Vertical position, growing downward.
    pub y: f32,
}

impl ClickEvent {
    /// A click at `(x, y)`.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The click position as a vector.
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Turns button and cursor events into clicks.
///
/// A click is a left press followed by a release without the cursor moving more than
/// [`CLICK_TOLERANCE`] in between, so that orbiting the camera does not toggle blocks.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ClickTracker {
    cursor: Vec2,
    pressed_at: Option<Vec2>,
    tolerance: f32,
}

impl Default for ClickTracker {
    fn default() -> Self {
        Self::new(CLICK_TOLERANCE)
    }
}

impl ClickTracker {
    /// A tracker accepting at most `tolerance` pixels of motion within a click.
    pub fn new(tolerance: f32) -> Self {
        Self {
            cursor: Vec2::ZERO,
            pressed_at: None,
            tolerance,
        }
    }

    /// Feeds an event, returning the click it completes, if any.
    pub fn handle_event(&mut self, event: &WindowEvent) -> Option<ClickEvent> {
        match *event {
            WindowEvent::CursorPos(x, y) => {
                self.cursor = Vec2::new(x as f32, y as f32);

                if let Some(start) = self.pressed_at {
                    if start.distance(self.cursor) > self.tolerance {
                        self.pressed_at = None;
                    }
                }

                None
            }
            WindowEvent::MouseButton(MouseButton::Button1, Action::Press) => {
                self.pressed_at = Some(self.cursor);
                None
            }
            WindowEvent::MouseButton(MouseButton::Button1, Action::Release) => self
                .pressed_at
                .take()
                .map(|_| ClickEvent::new(self.cursor.x, self.cursor.y)),
            _ => None,
        }
    }
}

/// The result of a click that hit a block.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ClickOutcome {
    /// The block under the cursor.
    pub id: ObjectId,
    /// What happened to it.
    pub outcome: ToggleOutcome,
}

/// Everything the demo knows about its blocks.
pub struct DisassemblyDemo {
    registry: Registry,
    rule: Box<dyn RemovalRule>,
}

impl DisassemblyDemo {
    /// A demo over `registry` where every block can always be removed.
    pub fn new(registry: Registry) -> Self {
        Self {
            registry,
            rule: Box::new(AlwaysRemovable),
        }
    }

    /// Creates the blocks listed in `options`, in order.
    ///
    /// # Errors
    /// Fails if two blocks share a name.
    pub fn from_options(options: &DemoOptions) -> Result<Self, RegistryError> {
        let mut registry = Registry::with_removed_color(options.removed_color());

        for block in &options.blocks {
            registry.create_object_with_extents(
                Vec3::from_array(block.position),
                Vec3::from_array(block.size),
                color::from_hex(block.color),
                &block.name,
            )?;
        }

        log::info!("Created {} blocks", registry.len());
        Ok(Self::new(registry))
    }

    /// Replaces the rule deciding whether a block may be removed.
    pub fn with_rule(mut self, rule: impl RemovalRule + 'static) -> Self {
        self.rule = Box::new(rule);
        self
    }

    /// The blocks.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Toggles the block under `click`, if any.
    ///
    /// `viewport` is the size in pixels of the surface the click happened on. Clicks on
    /// the background do nothing and return `None`.
    pub fn handle_click(
        &mut self,
        click: ClickEvent,
        viewport: Vec2,
        camera: &dyn Camera3d,
    ) -> Option<ClickOutcome> {
        let Some(object) = picking::resolve(click.position(), viewport, camera, self.registry.objects())
        else {
            log::debug!("Click at ({}, {}) hit nothing", click.x, click.y);
            return None;
        };

        let id = object.id();
        let name = object.name().to_owned();
        let outcome = self.registry.toggle(id, self.rule.as_ref());

        match outcome {
            ToggleOutcome::Removed => log::info!("Clicked block: {}", name),
            ToggleOutcome::Restored => log::info!("{} is already removed.", name),
            ToggleOutcome::Blocked => log::info!("{} cannot be removed yet.", name),
        }

        Some(ClickOutcome { id, outcome })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press_release(tracker: &mut ClickTracker, from: (f64, f64), to: (f64, f64)) -> Option<ClickEvent> {
        tracker.handle_event(&WindowEvent::CursorPos(from.0, from.1));
        tracker.handle_event(&WindowEvent::MouseButton(MouseButton::Button1, Action::Press));
        tracker.handle_event(&WindowEvent::CursorPos(to.0, to.1));
        tracker.handle_event(&WindowEvent::MouseButton(MouseButton::Button1, Action::Release))
    }

    #[test]
    fn still_press_is_a_click() {
        let mut tracker = ClickTracker::default();
        let click = press_release(&mut tracker, (100.0, 50.0), (102.0, 51.0));
        assert_eq!(click, Some(ClickEvent::new(102.0, 51.0)));
    }

    #[test]
    fn drag_is_not_a_click() {
        let mut tracker = ClickTracker::default();
        assert_eq!(press_release(&mut tracker, (100.0, 50.0), (140.0, 50.0)), None);
    }

    #[test]
    fn drag_that_comes_back_is_still_not_a_click() {
        let mut tracker = ClickTracker::default();
        tracker.handle_event(&WindowEvent::CursorPos(100.0, 100.0));
        tracker.handle_event(&WindowEvent::MouseButton(MouseButton::Button1, Action::Press));
        tracker.handle_event(&WindowEvent::CursorPos(200.0, 100.0));
        tracker.handle_event(&WindowEvent::CursorPos(100.0, 100.0));
        let click =
            tracker.handle_event(&WindowEvent::MouseButton(MouseButton::Button1, Action::Release));
        assert_eq!(click, None);
    }

    #[test]
    fn other_buttons_do_not_click() {
        let mut tracker = ClickTracker::default();
        tracker.handle_event(&WindowEvent::MouseButton(MouseButton::Button2, Action::Press));
        let click =
            tracker.handle_event(&WindowEvent::MouseButton(MouseButton::Button2, Action::Release));
        assert_eq!(click, None);

        // A release without a press is not a click either.
        let click =
            tracker.handle_event(&WindowEvent::MouseButton(MouseButton::Button1, Action::Release));
        assert_eq!(click, None);
    }

    #[test]
    fn duplicate_block_names_fail_setup() {
        let mut options = DemoOptions::default();
        options.blocks.push(options.blocks[0].clone());

        match DisassemblyDemo::from_options(&options) {
            Err(RegistryError::DuplicateName(name)) => assert_eq!(name, "redBlock"),
            _ => panic!("duplicate names must be rejected"),
        }
    }

    #[test]
    fn default_options_create_three_blocks() {
        let demo = DisassemblyDemo::from_options(&DemoOptions::default()).unwrap();
        assert_eq!(demo.registry().len(), 3);
        assert_eq!(demo.registry().removed_count(), 0);
    }
}
