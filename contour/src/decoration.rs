//! Client-side decoration control.
//!
//! Switches a window between chrome drawn by the window manager and chrome
//! drawn by the toolkit itself. The current mode is always read back from the
//! window's style classes, so it stays correct when other code toggles it.

use std::collections::HashMap;

use tracing::debug;

use crate::backend::{CLIENT_DECORATION_CLASSES, StyleHandle, StyleRule, Titlebar, WindowBackend};
use crate::config::Config;

/// Key of the corner-radius correction in a window's [`StyleRules`].
pub const RECTANGLE_DECORATION: &str = "rectangle-decoration";

/// Who draws a window's chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecorationMode {
    OsDecorated,
    ClientDecorated,
}

/// Style rules attached to one window, keyed by a fixed name.
///
/// Applying a rule under a key that is already taken detaches the old rule
/// first, so rules are replaced and never stacked.
#[derive(Debug, Default)]
pub struct StyleRules {
    rules: HashMap<&'static str, StyleHandle>,
}

impl StyleRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.rules.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<StyleHandle> {
        self.rules.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Attach `rule` under `key`, replacing whatever was there.
    pub fn apply<B: WindowBackend + ?Sized>(
        &mut self,
        window: &mut B,
        key: &'static str,
        rule: &StyleRule,
    ) -> StyleHandle {
        if let Some(old) = self.rules.remove(key) {
            window.remove_style_rule(old);
        }
        let handle = window.add_style_rule(rule);
        self.rules.insert(key, handle);
        handle
    }

    /// Detach the rule under `key`. Returns whether there was one.
    pub fn remove<B: WindowBackend + ?Sized>(&mut self, window: &mut B, key: &str) -> bool {
        match self.rules.remove(key) {
            Some(handle) => {
                window.remove_style_rule(handle);
                true
            }
            None => false,
        }
    }
}

/// Whether the window currently draws its own chrome.
pub fn is_client_decorated<B: WindowBackend + ?Sized>(window: &B) -> bool {
    CLIENT_DECORATION_CLASSES
        .iter()
        .any(|class| window.has_style_class(class))
}

pub fn decoration_mode<B: WindowBackend + ?Sized>(window: &B) -> DecorationMode {
    if is_client_decorated(window) {
        DecorationMode::ClientDecorated
    } else {
        DecorationMode::OsDecorated
    }
}

/// Switch the window to client-drawn chrome.
///
/// The window is marked decorated (client chrome is only rendered for
/// decorated windows), its title bar is replaced by an empty placeholder, and
/// the corner radius is overridden with a tiny positive value so the shadow
/// of the now rectangular window is rendered square. The override is applied
/// once per window.
pub fn enable_client_decoration<B: WindowBackend + ?Sized>(
    window: &mut B,
    styles: &mut StyleRules,
    config: &Config,
) {
    window.set_decorated(true);
    window.set_titlebar(Some(Titlebar::Placeholder {
        label: config.titlebar_placeholder.clone(),
    }));

    if !styles.contains(RECTANGLE_DECORATION) {
        // Zero radius breaks shadow rendering on some compositors.
        let rule = StyleRule::decoration_corner_radius(config.corner_radius());
        styles.apply(window, RECTANGLE_DECORATION, &rule);
    }
    debug!(rules = styles.len(), "client decoration enabled");
}

/// Remove all chrome: no placeholder title bar and no OS decorations.
///
/// The corner-radius override is detached as well so that a later
/// [`enable_client_decoration`] applies it fresh.
pub fn disable_client_decoration<B: WindowBackend + ?Sized>(
    window: &mut B,
    styles: &mut StyleRules,
) {
    window.set_titlebar(None);
    window.set_decorated(false);
    styles.remove(window, RECTANGLE_DECORATION);
    debug!("client decoration disabled");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::{BackendCall, HeadlessWindow};
    use crate::primitives::IntSize;

    fn window() -> HeadlessWindow {
        HeadlessWindow::new(IntSize::new(320, 240))
    }

    #[test]
    fn test_enable_sets_up_client_chrome() {
        let mut window = window();
        let mut styles = StyleRules::new();
        enable_client_decoration(&mut window, &mut styles, &Config::default());

        assert!(window.is_decorated());
        assert!(is_client_decorated(&window));
        assert_eq!(decoration_mode(&window), DecorationMode::ClientDecorated);
        assert_eq!(
            window.titlebar(),
            Some(&Titlebar::Placeholder {
                label: "you should not see me".into()
            })
        );
        let rules: Vec<_> = window.style_rules().collect();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].css, "decoration { border-radius: 0.01px; }");
    }

    #[test]
    fn test_repeated_enable_does_not_stack_rules() {
        let mut window = window();
        let mut styles = StyleRules::new();
        let config = Config::default();
        enable_client_decoration(&mut window, &mut styles, &config);
        enable_client_decoration(&mut window, &mut styles, &config);
        enable_client_decoration(&mut window, &mut styles, &config);

        assert_eq!(window.style_rules().count(), 1);
        assert_eq!(styles.len(), 1);
    }

    #[test]
    fn test_disable_removes_chrome_and_rule() {
        let mut window = window();
        let mut styles = StyleRules::new();
        let config = Config::default();
        enable_client_decoration(&mut window, &mut styles, &config);
        let first = styles.get(RECTANGLE_DECORATION).unwrap();

        disable_client_decoration(&mut window, &mut styles);
        assert!(!is_client_decorated(&window));
        assert!(!window.is_decorated());
        assert!(window.titlebar().is_none());
        assert_eq!(window.style_rules().count(), 0);
        assert!(!styles.contains(RECTANGLE_DECORATION));

        enable_client_decoration(&mut window, &mut styles, &config);
        let second = styles.get(RECTANGLE_DECORATION).unwrap();
        assert_ne!(first, second);
        assert!(window.calls().contains(&BackendCall::AddStyleRule(second)));
    }

    #[test]
    fn test_disable_when_never_enabled_is_safe() {
        let mut window = window();
        let mut styles = StyleRules::new();
        disable_client_decoration(&mut window, &mut styles);
        assert!(!window.is_decorated());
        assert!(
            !window
                .calls()
                .iter()
                .any(|c| matches!(c, BackendCall::RemoveStyleRule(_)))
        );
    }

    #[test]
    fn test_detection_follows_external_classes() {
        let mut window = window();
        assert_eq!(decoration_mode(&window), DecorationMode::OsDecorated);
        window.add_style_class("csd-solid");
        assert!(is_client_decorated(&window));
    }

    #[test]
    fn test_apply_replaces_existing_rule() {
        let mut window = window();
        let mut styles = StyleRules::new();
        let a = styles.apply(&mut window, "k", &StyleRule::new("a {}"));
        let b = styles.apply(&mut window, "k", &StyleRule::new("b {}"));
        assert_ne!(a, b);
        let css: Vec<_> = window.style_rules().map(|r| r.css.as_str()).collect();
        assert_eq!(css, vec!["b {}"]);
    }
}
