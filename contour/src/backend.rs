//! The window-system boundary.
//!
//! `WindowBackend` is everything the engine needs from the native window and
//! its content container. Implementations wrap a real toolkit window;
//! [`HeadlessWindow`](crate::headless::HeadlessWindow) simulates one in memory.
//!
//! Unless stated otherwise, positions and sizes are logical (DIP) integers,
//! the same units the window manager uses for window geometry.

use crate::primitives::{IntRect, IntSize};

/// Raw value of the window manager's frame-extents property.
///
/// On X11 this is `_NET_FRAME_EXTENTS`: four cardinals in the order
/// left, right, top, bottom, in physical pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameProperty {
    /// The display backend has no such property.
    Unsupported,
    /// The property exists on this backend but is not set on the window.
    Absent,
    /// The property as reported.
    Cardinals(Vec<i64>),
}

/// Content placed in the window's title bar slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Titlebar {
    /// An empty label that keeps the OS from drawing its own title content.
    Placeholder { label: String },
}

/// An owned CSS-like style rule attached to a window.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleRule {
    pub css: String,
}

impl StyleRule {
    pub fn new(css: impl Into<String>) -> Self {
        Self { css: css.into() }
    }

    /// Rule overriding the corner radius of client-side decorations.
    pub fn decoration_corner_radius(radius: f32) -> Self {
        Self::new(format!("decoration {{ border-radius: {radius}px; }}"))
    }
}

/// Backend-issued handle to an attached style rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StyleHandle(pub u64);

/// Which widget a size request applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeTarget {
    /// The toplevel window.
    Window,
    /// The window's direct content container.
    Content,
}

/// Style classes a toolkit puts on windows that draw their own chrome.
pub const CLIENT_DECORATION_CLASSES: [&str; 2] = ["csd", "csd-solid"];

/// Native window operations consumed by the engine.
pub trait WindowBackend {
    /// Whether the window exists on screen. Geometry queries require it.
    fn is_realized(&self) -> bool;

    /// Physical pixels per logical pixel.
    fn scale_factor(&self) -> f32;

    /// Read the frame-extents property.
    fn frame_extents(&self) -> FrameProperty;

    /// Position of the content area on screen.
    fn position(&self) -> (i32, i32);

    /// Size of the content area, excluding decorations and shadow.
    fn size(&self) -> IntSize;

    /// On-screen bounds of the native surface, including any client shadow.
    fn surface_geometry(&self) -> IntRect;

    /// Toggle whether the window manager decorates the window.
    fn set_decorated(&mut self, decorated: bool);

    fn is_decorated(&self) -> bool;

    /// Replace the title bar slot. `None` restores the default title bar.
    fn set_titlebar(&mut self, titlebar: Option<Titlebar>);

    /// Whether the window's current visual style carries `class`.
    fn has_style_class(&self, class: &str) -> bool;

    /// Attach a style rule at the highest priority.
    fn add_style_rule(&mut self, rule: &StyleRule) -> StyleHandle;

    /// Detach a previously attached style rule.
    fn remove_style_rule(&mut self, handle: StyleHandle);

    /// Set or clear (`None`) a fixed size request.
    fn set_size_request(&mut self, target: SizeTarget, size: Option<IntSize>);

    /// Ask the window manager to resize a resizable window.
    fn resize(&mut self, size: IntSize);

    /// Size used when the window is first shown or restored.
    fn set_default_size(&mut self, size: IntSize);

    /// Query the content container's preferred size.
    ///
    /// Must precede [`allocate_content`](Self::allocate_content).
    fn content_preferred_size(&mut self) -> IntSize;

    /// Allocate `rect` to the content container and lay it out.
    fn allocate_content(&mut self, rect: IntRect);
}
