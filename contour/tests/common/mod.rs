//! Shared helpers for integration tests.

use contour::{FixedTheme, HeadlessWindow, IntSize, Window};
use tracing_subscriber::EnvFilter;

/// Install a subscriber driven by `RUST_LOG`. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A 300x200 headless window at scale 1 with the fixed test theme.
#[allow(dead_code)]
pub fn headless_window() -> Window<HeadlessWindow> {
    init_tracing();
    Window::new(
        HeadlessWindow::new(IntSize::new(300, 200)),
        Box::new(FixedTheme::default()),
    )
}
