//! Contour: interaction and shape engine for custom-painted native controls
//!
//! Contour keeps what a window reacts to consistent with what it draws:
//! - Pixel-exact hit regions extracted from rendered alpha content
//! - Frame inset and client shadow measurement in logical units
//! - Client-side decoration toggling with a square-corner shadow fix
//! - A shared hover / press / capture / focus state machine for push
//!   buttons, checkboxes and radio groups
//! - Resizing that keeps size requests and layout in step
//!
//! # Architecture
//!
//! Everything platform-specific sits behind [`WindowBackend`] (the window and
//! compositor), [`NativeTheme`] (control metrics) and [`Painter`] (drawing).
//! [`Window`] ties one backend to its control tree, capture and focus slots,
//! style rules and shaped region. [`HeadlessWindow`] and [`FixedTheme`] are
//! complete in-memory implementations for tests and offscreen use.
//!
//! All of it runs on the thread that owns the event loop; nothing here locks.
//!
//! # Usage
//!
//! ```ignore
//! use contour::{Control, FixedTheme, HeadlessWindow, IntSize, Window};
//!
//! let mut window = Window::new(
//!     HeadlessWindow::new(IntSize::new(300, 200)),
//!     Box::new(FixedTheme::default()),
//! );
//! let ok = window.add_control(None, Control::push("OK"))?;
//! ```

// Core primitives
pub mod primitives;
pub mod error;
pub mod config;

// Shapes from pixels
pub mod surface;
pub mod region;

// Platform seam
pub mod backend;
pub mod headless;

// Window-level behavior
pub mod geometry;
pub mod decoration;
pub mod resize;
pub mod window;

// Controls
pub mod control;

pub use backend::{FrameProperty, SizeTarget, StyleHandle, StyleRule, Titlebar, WindowBackend};
pub use config::Config;
pub use control::{
    Control, ControlEvent, ControlId, ControlKind, ControlState, ControlTree, DisplayList,
    DrawCommand, ImageRef, Metrics, NativeTheme, Painter, PointerButton, ThemePart,
};
pub use decoration::{DecorationMode, StyleRules};
pub use error::{ContourError, Result, Unavailable};
pub use headless::{FixedTheme, HeadlessWindow};
pub use primitives::{Color, Insets, IntRect, IntSize, Point, Rect, Size};
pub use region::{Region, extract_region};
pub use surface::{Content, PixelFormat, PixelSurface};
pub use window::{PointerEvent, Window};
