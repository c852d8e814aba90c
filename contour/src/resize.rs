//! Window resizing.
//!
//! Size requests are sticky in most toolkits, so every resize starts by
//! clearing the ones left by the previous resize; otherwise the constraint
//! solver keeps working from stale sizes.

use tracing::debug;

use crate::backend::{SizeTarget, WindowBackend};
use crate::decoration::is_client_decorated;
use crate::primitives::{IntRect, IntSize};

/// Resize a window's content area to `width` x `height` logical pixels.
///
/// Resizable windows are resized through the window manager. Fixed-size
/// windows get a size request: on the window itself when the OS draws the
/// chrome, on the content container when the client does (a request on the
/// window would include the shadow padding). The size also becomes the
/// window's default size, and the content is laid out immediately.
pub fn resize_window<B: WindowBackend + ?Sized>(
    window: &mut B,
    resizable: bool,
    width: i32,
    height: i32,
) {
    let size = IntSize::new(width, height);

    window.set_size_request(SizeTarget::Window, None);
    window.set_size_request(SizeTarget::Content, None);

    let client_decorated = is_client_decorated(window);
    if resizable {
        window.resize(size);
    } else if !client_decorated {
        window.set_size_request(SizeTarget::Window, Some(size));
    } else {
        window.set_size_request(SizeTarget::Content, Some(size));
    }

    window.set_default_size(size);
    debug!(width, height, resizable, client_decorated, "window resized");

    force_size_allocation(window);
}

/// Lay out the content container at the window's current size right now.
///
/// The preferred size is queried first; allocating without it is a protocol
/// error for the constraint solver.
pub fn force_size_allocation<B: WindowBackend + ?Sized>(window: &mut B) {
    let _ = window.content_preferred_size();
    let rect = IntRect::from_size(window.size());
    window.allocate_content(rect);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::Titlebar;
    use crate::headless::{BackendCall, HeadlessWindow};

    fn client_decorated(mut window: HeadlessWindow) -> HeadlessWindow {
        window.set_titlebar(Some(Titlebar::Placeholder {
            label: String::new(),
        }));
        window.clear_calls();
        window
    }

    #[test]
    fn test_fixed_csd_window_constrains_content() {
        let mut window = client_decorated(HeadlessWindow::new(IntSize::new(100, 100)));
        resize_window(&mut window, false, 300, 200);

        let size = IntSize::new(300, 200);
        assert_eq!(window.size_request(SizeTarget::Content), Some(size));
        assert_eq!(window.size_request(SizeTarget::Window), None);
        assert_eq!(window.default_size(), Some(size));
        assert_eq!(window.allocation(), Some(IntRect::new(0, 0, 300, 200)));
    }

    #[test]
    fn test_fixed_os_window_constrains_window() {
        let mut window = HeadlessWindow::new(IntSize::new(100, 100));
        resize_window(&mut window, false, 300, 200);

        assert_eq!(
            window.size_request(SizeTarget::Window),
            Some(IntSize::new(300, 200))
        );
        assert_eq!(window.size_request(SizeTarget::Content), None);
    }

    #[test]
    fn test_resizable_window_uses_wm_resize() {
        let mut window = client_decorated(HeadlessWindow::new(IntSize::new(100, 100)));
        resize_window(&mut window, true, 640, 480);

        let size = IntSize::new(640, 480);
        assert!(window.calls().contains(&BackendCall::Resize(size)));
        assert_eq!(window.size_request(SizeTarget::Window), None);
        assert_eq!(window.size_request(SizeTarget::Content), None);
        assert_eq!(window.size(), size);
    }

    #[test]
    fn test_call_order() {
        let mut window = client_decorated(HeadlessWindow::new(IntSize::new(100, 100)));
        resize_window(&mut window, false, 300, 200);

        let size = IntSize::new(300, 200);
        assert_eq!(
            window.calls(),
            &[
                BackendCall::SetSizeRequest(SizeTarget::Window, None),
                BackendCall::SetSizeRequest(SizeTarget::Content, None),
                BackendCall::SetSizeRequest(SizeTarget::Content, Some(size)),
                BackendCall::SetDefaultSize(size),
                BackendCall::MeasureContent,
                BackendCall::AllocateContent(IntRect::new(0, 0, 300, 200)),
            ]
        );
        assert_eq!(window.allocation_warnings(), 0);
    }

    #[test]
    fn test_previous_requests_are_cleared() {
        let mut window = HeadlessWindow::new(IntSize::new(100, 100));
        resize_window(&mut window, false, 500, 500);
        resize_window(&mut window, true, 200, 150);

        assert_eq!(window.size_request(SizeTarget::Window), None);
        assert_eq!(window.size(), IntSize::new(200, 150));
    }
}
