//! A window and the controls it hosts.
//!
//! [`Window`] owns a platform backend plus everything this crate keeps per
//! window:
//! - the control tree with its capture and focus slots
//! - the keyed style rules attached by the decoration controller
//! - an optional shaped hit region
//!
//! Pointer input arrives either as low-level [`PointerEvent`]s, which are
//! hit-tested and routed here, or as per-control notifications from a
//! platform that already did its own routing. Both produce the same ordered
//! [`ControlEvent`]s.

use tracing::debug;

use crate::backend::WindowBackend;
use crate::config::Config;
use crate::control::{
    Control, ControlEvent, ControlId, ControlTree, ImageRef, Interaction, NativeTheme, Painter,
    PointerButton,
};
use crate::decoration::{self, DecorationMode, StyleRules};
use crate::error::{Result, Unavailable};
use crate::geometry;
use crate::primitives::{Insets, IntRect, Point, Size, scale_point};
use crate::region::{Region, extract_region};
use crate::resize;
use crate::surface::PixelSurface;

/// Low-level pointer input in logical window coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Moved {
        position: Point,
    },
    Pressed {
        position: Point,
        button: PointerButton,
    },
    Released {
        position: Point,
        button: PointerButton,
    },
    /// The pointer left the window.
    Left,
}

pub struct Window<B: WindowBackend> {
    backend: B,
    config: Config,
    theme: Box<dyn NativeTheme>,
    tree: ControlTree,
    interaction: Interaction,
    styles: StyleRules,
    shape: Option<Region>,
    hovered: Option<ControlId>,
}

impl<B: WindowBackend> Window<B> {
    pub fn new(backend: B, theme: Box<dyn NativeTheme>) -> Self {
        Self::with_config(backend, theme, Config::default())
    }

    pub fn with_config(backend: B, theme: Box<dyn NativeTheme>, config: Config) -> Self {
        Self {
            backend,
            config,
            theme,
            tree: ControlTree::new(),
            interaction: Interaction::new(),
            styles: StyleRules::new(),
            shape: None,
            hovered: None,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn tree(&self) -> &ControlTree {
        &self.tree
    }

    pub fn control(&self, id: ControlId) -> Result<&Control> {
        self.tree.get(id)
    }

    pub fn capture_owner(&self) -> Option<ControlId> {
        self.interaction.capture_owner()
    }

    pub fn focused(&self) -> Option<ControlId> {
        self.interaction.focused()
    }

    pub fn hovered(&self) -> Option<ControlId> {
        self.hovered
    }

    // =========================================================================
    // Controls
    // =========================================================================

    pub fn add_container(&mut self, parent: Option<ControlId>) -> Result<ControlId> {
        self.tree.add_container(parent)
    }

    /// Add a control, measuring it at the window's current scale.
    pub fn add_control(
        &mut self,
        parent: Option<ControlId>,
        mut control: Control,
    ) -> Result<ControlId> {
        control.update_metrics(self.theme.as_ref(), self.backend.scale_factor());
        self.tree.add_control(parent, control)
    }

    /// Remove a control or container and everything inside it.
    pub fn remove(&mut self, id: ControlId) -> Result<Vec<ControlId>> {
        let removed = self.tree.remove(id)?;
        self.interaction.forget(&removed);
        if self.hovered.is_some_and(|id| removed.contains(&id)) {
            self.hovered = None;
        }
        Ok(removed)
    }

    /// Place a control, in window device pixels.
    pub fn set_bounds(&mut self, id: ControlId, bounds: IntRect) -> Result<()> {
        self.tree.get_mut(id)?.set_bounds(bounds);
        Ok(())
    }

    pub fn set_title(&mut self, id: ControlId, title: impl Into<String>) -> Result<()> {
        let scale = self.backend.scale_factor();
        let control = self.tree.get_mut(id)?;
        control.set_title(title.into());
        control.update_metrics(self.theme.as_ref(), scale);
        Ok(())
    }

    pub fn set_image(&mut self, id: ControlId, image: Option<ImageRef>) -> Result<()> {
        let scale = self.backend.scale_factor();
        let control = self.tree.get_mut(id)?;
        control.set_image(image);
        control.update_metrics(self.theme.as_ref(), scale);
        Ok(())
    }

    /// Set the checked flag without activating. Returns whether it changed.
    pub fn set_checked(&mut self, id: ControlId, checked: bool) -> Result<bool> {
        self.tree.set_checked(id, checked)
    }

    pub fn set_enabled(&mut self, id: ControlId, enabled: bool) -> Result<Vec<ControlEvent>> {
        let mut events = Vec::new();
        self.interaction.set_enabled(&mut self.tree, id, enabled, &mut events)?;
        Ok(events)
    }

    pub fn focus(&mut self, id: ControlId) -> Result<Vec<ControlEvent>> {
        let mut events = Vec::new();
        self.interaction.take_focus(&mut self.tree, id, &mut events)?;
        Ok(events)
    }

    /// Preferred size of a control, in DIP.
    pub fn preferred_size(&self, id: ControlId) -> Result<Size> {
        Ok(self.tree.get(id)?.preferred_size(&self.config))
    }

    /// Paint one control and clear its repaint flag.
    pub fn paint(&mut self, id: ControlId, painter: &mut dyn Painter) -> Result<()> {
        let has_focus = self.interaction.focused() == Some(id);
        let control = self.tree.get_mut(id)?;
        crate::control::paint(control, has_focus, &self.config, painter);
        control.take_repaint();
        Ok(())
    }

    /// Re-derive every control's cached metrics at the new scale factor.
    pub fn on_dpi_changed(&mut self) {
        let scale = self.backend.scale_factor();
        let theme = self.theme.as_ref();
        let mut count = 0usize;
        for (_, control) in self.tree.controls_mut() {
            control.update_metrics(theme, scale);
            count += 1;
        }
        debug!(scale, controls = count, "metrics updated for new scale");
    }

    // =========================================================================
    // Per-control pointer notifications
    // =========================================================================

    pub fn pointer_enter(&mut self, id: ControlId) -> Result<()> {
        self.interaction.pointer_enter(&mut self.tree, id)
    }

    pub fn pointer_leave(&mut self, id: ControlId) -> Result<()> {
        self.interaction.pointer_leave(&mut self.tree, id)
    }

    pub fn pointer_press(
        &mut self,
        id: ControlId,
        button: PointerButton,
    ) -> Result<Vec<ControlEvent>> {
        let mut events = Vec::new();
        self.interaction.pointer_press(&mut self.tree, id, button, &mut events)?;
        Ok(events)
    }

    pub fn pointer_release(
        &mut self,
        id: ControlId,
        button: PointerButton,
    ) -> Result<Vec<ControlEvent>> {
        let mut events = Vec::new();
        self.interaction.pointer_release(&mut self.tree, id, button, &mut events)?;
        Ok(events)
    }

    pub fn capture_lost(&mut self, id: ControlId) -> Result<Vec<ControlEvent>> {
        let mut events = Vec::new();
        self.interaction.capture_lost(&mut self.tree, id, &mut events)?;
        Ok(events)
    }

    // =========================================================================
    // Pointer routing
    // =========================================================================

    /// Topmost control under a logical window position.
    ///
    /// Points outside the shaped region hit nothing. Later controls are
    /// above earlier ones.
    pub fn hit_test(&self, position: Point) -> Option<ControlId> {
        let (x, y) = self.device_point(position)?;
        self.tree
            .controls()
            .filter(|(_, control)| control.bounds().contains(x, y))
            .map(|(id, _)| id)
            .last()
    }

    /// Device pixel under a logical position, `None` outside the shape.
    fn device_point(&self, position: Point) -> Option<(i32, i32)> {
        let physical = scale_point(position, self.backend.scale_factor());
        let (x, y) = (physical.x.floor() as i32, physical.y.floor() as i32);
        match &self.shape {
            Some(shape) if !shape.contains(x, y) => None,
            _ => Some((x, y)),
        }
    }

    /// The control the pointer hovers at `position`.
    ///
    /// While a control holds capture no other control sees the pointer: the
    /// owner is hovered when the pointer is inside its bounds, nothing
    /// otherwise.
    fn hover_target(&self, position: Point) -> Option<ControlId> {
        let Some(owner) = self.interaction.capture_owner() else {
            return self.hit_test(position);
        };
        let (x, y) = self.device_point(position)?;
        let bounds = self.tree.control(owner)?.bounds();
        bounds.contains(x, y).then_some(owner)
    }

    /// Route raw pointer input to controls.
    ///
    /// Enter and leave are synthesized as the pointer crosses controls.
    /// While a control holds capture, every pointer event goes to it.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Result<Vec<ControlEvent>> {
        let mut events = Vec::new();
        match event {
            PointerEvent::Moved { position } => {
                self.update_hover(self.hover_target(position))?;
            }
            PointerEvent::Pressed { position, button } => {
                self.update_hover(self.hover_target(position))?;
                let target = self.interaction.capture_owner().or_else(|| self.hit_test(position));
                if let Some(id) = target {
                    self.interaction.pointer_press(&mut self.tree, id, button, &mut events)?;
                }
            }
            PointerEvent::Released { position, button } => {
                self.update_hover(self.hover_target(position))?;
                let target = self.interaction.capture_owner().or_else(|| self.hit_test(position));
                if let Some(id) = target {
                    self.interaction.pointer_release(&mut self.tree, id, button, &mut events)?;
                }
                // Hover follows the pointer again once capture has ended.
                self.update_hover(self.hover_target(position))?;
            }
            PointerEvent::Left => {
                self.update_hover(None)?;
            }
        }
        Ok(events)
    }

    fn update_hover(&mut self, target: Option<ControlId>) -> Result<()> {
        if self.hovered == target {
            return Ok(());
        }
        if let Some(previous) = self.hovered.take()
            && self.tree.contains(previous)
        {
            self.interaction.pointer_leave(&mut self.tree, previous)?;
        }
        if let Some(id) = target {
            self.interaction.pointer_enter(&mut self.tree, id)?;
        }
        self.hovered = target;
        Ok(())
    }

    // =========================================================================
    // Shape
    // =========================================================================

    /// Restrict hit testing to `shape`, in window device pixels. `None`
    /// makes the whole window interactive again.
    pub fn set_shape(&mut self, shape: Option<Region>) {
        self.shape = shape;
    }

    pub fn shape(&self) -> Option<&Region> {
        self.shape.as_ref()
    }

    /// Derive the shape from rendered window content.
    pub fn update_shape_from_surface(&mut self, surface: &PixelSurface<'_>) -> &Region {
        let region = extract_region(surface);
        debug!(rects = region.len(), area = region.area(), "window shape updated");
        self.shape.insert(region)
    }

    // =========================================================================
    // Geometry, decoration and resize
    // =========================================================================

    /// See [`geometry::frame_insets`].
    pub fn frame_insets(&self) -> std::result::Result<Insets, Unavailable> {
        geometry::frame_insets(&self.backend)
    }

    /// See [`geometry::client_shadow`].
    pub fn client_shadow(&self) -> Insets {
        geometry::client_shadow(&self.backend)
    }

    pub fn enable_client_decoration(&mut self) {
        decoration::enable_client_decoration(&mut self.backend, &mut self.styles, &self.config);
    }

    pub fn disable_client_decoration(&mut self) {
        decoration::disable_client_decoration(&mut self.backend, &mut self.styles);
    }

    pub fn is_client_decorated(&self) -> bool {
        decoration::is_client_decorated(&self.backend)
    }

    pub fn decoration_mode(&self) -> DecorationMode {
        decoration::decoration_mode(&self.backend)
    }

    pub fn style_rules(&self) -> &StyleRules {
        &self.styles
    }

    /// See [`resize::resize_window`].
    pub fn resize(&mut self, resizable: bool, width: i32, height: i32) {
        resize::resize_window(&mut self.backend, resizable, width, height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::{FixedTheme, HeadlessWindow};
    use crate::primitives::IntSize;

    fn window() -> Window<HeadlessWindow> {
        Window::new(
            HeadlessWindow::new(IntSize::new(200, 100)),
            Box::new(FixedTheme::default()),
        )
    }

    #[test]
    fn test_hit_test_prefers_topmost() {
        let mut window = window();
        let below = window.add_control(None, Control::push("a")).unwrap();
        let above = window.add_control(None, Control::push("b")).unwrap();
        window.set_bounds(below, IntRect::new(0, 0, 100, 50)).unwrap();
        window.set_bounds(above, IntRect::new(50, 0, 100, 50)).unwrap();

        assert_eq!(window.hit_test(Point::new(10.0, 10.0)), Some(below));
        assert_eq!(window.hit_test(Point::new(60.0, 10.0)), Some(above));
        assert_eq!(window.hit_test(Point::new(10.0, 80.0)), None);
    }

    #[test]
    fn test_hit_test_respects_shape() {
        let mut window = window();
        let id = window.add_control(None, Control::push("a")).unwrap();
        window.set_bounds(id, IntRect::new(0, 0, 100, 100)).unwrap();
        window.set_shape(Some(Region::from_rect(IntRect::new(0, 0, 20, 20))));

        assert_eq!(window.hit_test(Point::new(5.0, 5.0)), Some(id));
        assert_eq!(window.hit_test(Point::new(50.0, 50.0)), None);
    }

    #[test]
    fn test_hit_test_scales_to_device_pixels() {
        let mut window = Window::new(
            HeadlessWindow::new(IntSize::new(200, 100)).with_scale_factor(2.0),
            Box::new(FixedTheme::default()),
        );
        let id = window.add_control(None, Control::push("a")).unwrap();
        window.set_bounds(id, IntRect::new(100, 0, 20, 20)).unwrap();

        assert_eq!(window.hit_test(Point::new(55.0, 5.0)), Some(id));
        assert_eq!(window.hit_test(Point::new(45.0, 5.0)), None);
    }

    #[test]
    fn test_add_control_measures_at_window_scale() {
        let mut window = Window::new(
            HeadlessWindow::new(IntSize::new(200, 100)).with_scale_factor(2.0),
            Box::new(FixedTheme::default()),
        );
        let id = window.add_control(None, Control::checkbox("a")).unwrap();
        let metrics = window.control(id).unwrap().metrics();
        assert_eq!(metrics.scale, 2.0);
        assert_eq!(metrics.box_size, IntSize::new(26, 26));
    }

    #[test]
    fn test_remove_forgets_hover_and_capture() {
        let mut window = window();
        let id = window.add_control(None, Control::push("a")).unwrap();
        window.set_bounds(id, IntRect::new(0, 0, 50, 50)).unwrap();
        window
            .handle_pointer(PointerEvent::Pressed {
                position: Point::new(10.0, 10.0),
                button: PointerButton::Primary,
            })
            .unwrap();
        assert_eq!(window.hovered(), Some(id));

        window.remove(id).unwrap();
        assert_eq!(window.hovered(), None);
        assert_eq!(window.capture_owner(), None);
        assert_eq!(window.focused(), None);
        assert!(window.handle_pointer(PointerEvent::Left).unwrap().is_empty());
    }

    #[test]
    fn test_set_title_remeasures() {
        let mut window = window();
        let id = window.add_control(None, Control::push("a")).unwrap();
        let before = window.preferred_size(id).unwrap();
        window.set_title(id, "abc").unwrap();
        let after = window.preferred_size(id).unwrap();
        assert_eq!(after.width - before.width, 14.0);
    }
}
