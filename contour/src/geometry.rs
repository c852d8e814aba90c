//! Window geometry reconciliation.
//!
//! A window has three rectangles that matter here:
//!
//! - the **content bounds** the application lays out into,
//! - the **surface geometry**, which adds invisible shadow padding when the
//!   client draws its own chrome,
//! - the **frame bounds**, which add the window manager's decorations.
//!
//! The queries below measure the gaps between them in logical units. Both
//! require a realized window; asking earlier is a usage-order bug and panics.

use tracing::debug;

use crate::backend::{FrameProperty, WindowBackend};
use crate::error::Unavailable;
use crate::primitives::{Insets, IntSize, Rect, Size, scale_size, to_ceiled_size};

/// Extents of the OS-drawn frame around the content, in logical units.
///
/// Returns [`Unavailable`] when the backend does not expose frame extents or
/// the window manager has not published them; callers keep their default
/// behavior in that case.
///
/// # Panics
///
/// Panics if the window is not realized.
pub fn frame_insets<B: WindowBackend + ?Sized>(window: &B) -> Result<Insets, Unavailable> {
    assert!(
        window.is_realized(),
        "frame insets can only be read from a realized window"
    );

    let values = match window.frame_extents() {
        FrameProperty::Unsupported => return Err(Unavailable::Unsupported),
        FrameProperty::Absent => return Err(Unavailable::NotReported),
        FrameProperty::Cardinals(values) => values,
    };
    let &[left, right, top, bottom] = values.as_slice() else {
        return Err(Unavailable::Malformed {
            items: values.len(),
        });
    };

    let scale = window.scale_factor();
    let insets = Insets::new(
        top as f32 / scale,
        left as f32 / scale,
        bottom as f32 / scale,
        right as f32 / scale,
    );
    debug!(?insets, scale, "frame insets");
    Ok(insets)
}

/// Shadow padding between the content bounds and the surface geometry.
///
/// Zero on every side unless the client draws its own decorations.
///
/// # Panics
///
/// Panics if the window is not realized.
pub fn client_shadow<B: WindowBackend + ?Sized>(window: &B) -> Insets {
    assert!(
        window.is_realized(),
        "client shadow can only be read from a realized window"
    );

    let (x, y) = window.position();
    let size = window.size();
    let surface = window.surface_geometry();

    Insets::new(
        (y - surface.y) as f32,
        (x - surface.x) as f32,
        (surface.bottom() - (y + size.height)) as f32,
        (surface.right() - (x + size.width)) as f32,
    )
}

/// Content bounds in logical units.
pub fn content_bounds<B: WindowBackend + ?Sized>(window: &B) -> Rect {
    let (x, y) = window.position();
    let size = window.size();
    Rect::new(x as f32, y as f32, size.width as f32, size.height as f32)
}

/// Outer bounds including the OS frame.
///
/// # Panics
///
/// Panics if the window is not realized.
pub fn frame_bounds<B: WindowBackend + ?Sized>(window: &B) -> Result<Rect, Unavailable> {
    frame_insets(window).map(|insets| insets.expand(content_bounds(window)))
}

/// Convert a logical size into whole device pixels.
pub fn to_physical_size(size: Size, scale_factor: f32) -> IntSize {
    debug_assert!(scale_factor > 0.0, "non-positive scale factor");
    to_ceiled_size(scale_size(size, scale_factor))
}

/// Convert a device-pixel size into logical units.
pub fn to_logical_size(size: IntSize, scale_factor: f32) -> Size {
    debug_assert!(scale_factor > 0.0, "non-positive scale factor");
    scale_size(
        Size::new(size.width as f32, size.height as f32),
        1.0 / scale_factor,
    )
}
