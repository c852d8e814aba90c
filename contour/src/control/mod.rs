//! Custom-painted interactive controls.
//!
//! Push buttons, checkboxes and radio buttons share one interaction model:
//!
//! - **Hover** tracking from pointer enter/leave
//! - **Pointer capture** from press to release, so a press that wanders off
//!   the control still ends on it
//! - **Focus** moving to a control when it is pressed
//! - **Activation** on release: click, toggle, or radio selection
//!
//! Controls live in a [`ControlTree`] owned by the window. The window-scoped
//! capture and focus slots live in [`Interaction`]; both only ever hold a
//! [`ControlId`], never the control itself.

mod interaction;
mod paint;
mod theme;
mod tree;

pub use interaction::Interaction;
pub use paint::{DisplayList, DrawCommand, Painter, paint};
pub use theme::{Metrics, NativeTheme, ThemePart};
pub use tree::ControlTree;

use crate::primitives::{Color, IntRect, Size};

/// Index of a node in a [`ControlTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControlId(pub usize);

/// What activating a control does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    /// Emits a click.
    Push,
    /// Toggles its checked flag, then emits a click.
    Checkbox,
    /// Becomes the only checked radio among its siblings, then emits a click.
    Radio,
}

/// Visual interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ControlState {
    #[default]
    Normal,
    Hovered,
    Pressed,
    Disabled,
}

/// Pointer buttons. Only the primary button interacts with controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Notifications produced by the interaction state machine, in the order
/// they happened. Every state change a notification depends on is already
/// applied when it is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    /// Keyboard focus moved.
    FocusChanged {
        from: Option<ControlId>,
        to: Option<ControlId>,
    },
    /// The control lost pointer capture before its press completed.
    CaptureLost { id: ControlId },
    /// The control was activated.
    Clicked { id: ControlId },
}

/// An image shown in place of the checkbox/radio indicator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageRef {
    /// Painter-side image handle.
    pub handle: u32,
    /// Size in DIP.
    pub size: Size,
}

/// One interactive control.
#[derive(Debug, Clone)]
pub struct Control {
    kind: ControlKind,
    state: ControlState,
    checked: bool,
    hovering: bool,
    capturing: bool,
    title: String,
    image: Option<ImageRef>,
    background: Color,
    text_color: Color,
    bounds: IntRect,
    metrics: Metrics,
    dirty: bool,
}

impl Control {
    pub fn new(kind: ControlKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            state: ControlState::Normal,
            checked: false,
            hovering: false,
            capturing: false,
            title: title.into(),
            image: None,
            background: Color::TRANSPARENT,
            text_color: Color::BLACK,
            bounds: IntRect::ZERO,
            metrics: Metrics::default(),
            dirty: true,
        }
    }

    pub fn push(title: impl Into<String>) -> Self {
        Self::new(ControlKind::Push, title)
    }

    pub fn checkbox(title: impl Into<String>) -> Self {
        Self::new(ControlKind::Checkbox, title)
    }

    pub fn radio(title: impl Into<String>) -> Self {
        Self::new(ControlKind::Radio, title)
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn with_image(mut self, image: ImageRef) -> Self {
        self.image = Some(image);
        self
    }

    pub fn kind(&self) -> ControlKind {
        self.kind
    }

    pub fn state(&self) -> ControlState {
        self.state
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    pub fn is_capturing(&self) -> bool {
        self.capturing
    }

    pub fn is_enabled(&self) -> bool {
        self.state != ControlState::Disabled
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn image(&self) -> Option<&ImageRef> {
        self.image.as_ref()
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn text_color(&self) -> Color {
        self.text_color
    }

    /// Allocated bounds in window device pixels.
    pub fn bounds(&self) -> IntRect {
        self.bounds
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Whether the control changed since the last [`take_repaint`](Self::take_repaint).
    pub fn needs_repaint(&self) -> bool {
        self.dirty
    }

    /// Clear the repaint flag, returning its previous value.
    pub fn take_repaint(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn invalidate(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_state(&mut self, state: ControlState) {
        if self.state != state {
            tracing::trace!(from = ?self.state, to = ?state, "control state");
            self.state = state;
            self.dirty = true;
        }
    }

    /// Normal or Hovered, whichever matches the pointer.
    pub(crate) fn resting_state(&self) -> ControlState {
        if self.hovering {
            ControlState::Hovered
        } else {
            ControlState::Normal
        }
    }

    pub(crate) fn set_hovering(&mut self, hovering: bool) {
        self.hovering = hovering;
    }

    pub(crate) fn set_capturing(&mut self, capturing: bool) {
        self.capturing = capturing;
    }

    pub(crate) fn set_checked_flag(&mut self, checked: bool) {
        if self.checked != checked {
            self.checked = checked;
            self.dirty = true;
        }
    }

    pub(crate) fn set_title(&mut self, title: String) {
        self.title = title;
        self.dirty = true;
    }

    pub(crate) fn set_image(&mut self, image: Option<ImageRef>) {
        self.image = image;
        self.dirty = true;
    }

    pub(crate) fn set_bounds(&mut self, bounds: IntRect) {
        if self.bounds != bounds {
            self.bounds = bounds;
            self.dirty = true;
        }
    }

    pub(crate) fn metrics_mut(&mut self) -> &mut Metrics {
        &mut self.metrics
    }
}
