//! Pointer capture, focus and the press/release state machine.

use tracing::debug;

use crate::error::Result;

use super::{ControlEvent, ControlId, ControlKind, ControlState, ControlTree, PointerButton};

/// Window-scoped capture and focus slots.
///
/// At most one control holds pointer capture and at most one holds focus.
/// Both slots store ids only; a control that disappears is forgotten with
/// [`forget`](Self::forget).
///
/// Every method that can notify appends to `events` in the order things
/// happen, after the state they describe has been applied.
#[derive(Debug, Clone, Default)]
pub struct Interaction {
    capture: Option<ControlId>,
    focus: Option<ControlId>,
}

impl Interaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn capture_owner(&self) -> Option<ControlId> {
        self.capture
    }

    pub fn focused(&self) -> Option<ControlId> {
        self.focus
    }

    // =========================================================================
    // Pointer events
    // =========================================================================

    pub fn pointer_enter(&mut self, tree: &mut ControlTree, id: ControlId) -> Result<()> {
        let control = tree.get_mut(id)?;
        control.set_hovering(true);
        if control.is_enabled() && !control.is_capturing() {
            control.set_state(ControlState::Hovered);
        }
        Ok(())
    }

    pub fn pointer_leave(&mut self, tree: &mut ControlTree, id: ControlId) -> Result<()> {
        let control = tree.get_mut(id)?;
        control.set_hovering(false);
        if control.is_enabled() && !control.is_capturing() {
            control.set_state(ControlState::Normal);
        }
        Ok(())
    }

    /// A button went down over `id`.
    ///
    /// The primary button moves focus to the control first, then takes
    /// pointer capture and enters Pressed.
    pub fn pointer_press(
        &mut self,
        tree: &mut ControlTree,
        id: ControlId,
        button: PointerButton,
        events: &mut Vec<ControlEvent>,
    ) -> Result<()> {
        let control = tree.get(id)?;
        if button != PointerButton::Primary || !control.is_enabled() {
            return Ok(());
        }

        self.take_focus(tree, id, events)?;
        self.set_capture(tree, id, events)?;
        tree.get_mut(id)?.set_state(ControlState::Pressed);
        Ok(())
    }

    /// A button went up while `id` was the release target.
    ///
    /// Only the capture owner reacts. A release that completes a press
    /// activates the control wherever the pointer is.
    pub fn pointer_release(
        &mut self,
        tree: &mut ControlTree,
        id: ControlId,
        button: PointerButton,
        events: &mut Vec<ControlEvent>,
    ) -> Result<()> {
        let control = tree.get(id)?;
        if button != PointerButton::Primary || self.capture != Some(id) {
            return Ok(());
        }

        let clicked = control.state() == ControlState::Pressed && activate(tree, id)?;

        let control = tree.get_mut(id)?;
        if control.is_enabled() {
            let resting = control.resting_state();
            control.set_state(resting);
        }
        self.release_capture(tree, id);

        if clicked {
            debug!(?id, "control clicked");
            events.push(ControlEvent::Clicked { id });
        }
        Ok(())
    }

    /// The platform took capture away from `id`.
    ///
    /// Cancels a press in progress without activating.
    pub fn capture_lost(
        &mut self,
        tree: &mut ControlTree,
        id: ControlId,
        events: &mut Vec<ControlEvent>,
    ) -> Result<()> {
        let control = tree.get_mut(id)?;
        if !control.is_capturing() && self.capture != Some(id) {
            return Ok(());
        }

        control.set_capturing(false);
        if control.is_enabled() {
            let resting = control.resting_state();
            control.set_state(resting);
        }
        if self.capture == Some(id) {
            self.capture = None;
        }
        debug!(?id, "capture lost");
        events.push(ControlEvent::CaptureLost { id });
        Ok(())
    }

    // =========================================================================
    // Capture and focus
    // =========================================================================

    /// Give pointer capture to `id`, revoking the previous holder first.
    pub fn set_capture(
        &mut self,
        tree: &mut ControlTree,
        id: ControlId,
        events: &mut Vec<ControlEvent>,
    ) -> Result<()> {
        tree.get(id)?;
        if self.capture == Some(id) {
            return Ok(());
        }
        if let Some(previous) = self.capture {
            if tree.contains(previous) {
                self.capture_lost(tree, previous, events)?;
            } else {
                self.capture = None;
            }
        }

        self.capture = Some(id);
        tree.get_mut(id)?.set_capturing(true);
        Ok(())
    }

    /// End capture held by `id` without notifying it. Returns whether it
    /// held capture.
    pub fn release_capture(&mut self, tree: &mut ControlTree, id: ControlId) -> bool {
        if self.capture != Some(id) {
            return false;
        }
        self.capture = None;
        if let Some(control) = tree.control_mut(id) {
            control.set_capturing(false);
        }
        true
    }

    /// Move keyboard focus to `id`.
    pub fn take_focus(
        &mut self,
        tree: &mut ControlTree,
        id: ControlId,
        events: &mut Vec<ControlEvent>,
    ) -> Result<()> {
        tree.get(id)?;
        self.set_focus(tree, Some(id), events);
        Ok(())
    }

    pub fn clear_focus(&mut self, tree: &mut ControlTree, events: &mut Vec<ControlEvent>) {
        self.set_focus(tree, None, events);
    }

    fn set_focus(
        &mut self,
        tree: &mut ControlTree,
        to: Option<ControlId>,
        events: &mut Vec<ControlEvent>,
    ) {
        let from = self.focus;
        if from == to {
            return;
        }
        self.focus = to;
        // The focus ring moves with it.
        for id in [from, to].into_iter().flatten() {
            if let Some(control) = tree.control_mut(id) {
                control.invalidate();
            }
        }
        debug!(?from, ?to, "focus changed");
        events.push(ControlEvent::FocusChanged { from, to });
    }

    /// Enable or disable `id`.
    ///
    /// Disabling ends any capture the control holds, cancelling its press,
    /// and takes focus away from it. Enabling returns it to the state that
    /// matches the pointer.
    pub fn set_enabled(
        &mut self,
        tree: &mut ControlTree,
        id: ControlId,
        enabled: bool,
        events: &mut Vec<ControlEvent>,
    ) -> Result<()> {
        let control = tree.get_mut(id)?;
        if control.is_enabled() == enabled {
            return Ok(());
        }

        if enabled {
            let resting = control.resting_state();
            control.set_state(resting);
            return Ok(());
        }

        control.set_state(ControlState::Disabled);
        if self.capture == Some(id) {
            self.capture_lost(tree, id, events)?;
        }
        if self.focus == Some(id) {
            self.clear_focus(tree, events);
        }
        Ok(())
    }

    /// Drop any reference to controls that no longer exist.
    pub fn forget(&mut self, removed: &[ControlId]) {
        if self.capture.is_some_and(|id| removed.contains(&id)) {
            self.capture = None;
        }
        if self.focus.is_some_and(|id| removed.contains(&id)) {
            self.focus = None;
        }
    }
}

/// Apply the control's activation effect. Returns whether a click should be
/// reported.
fn activate(tree: &mut ControlTree, id: ControlId) -> Result<bool> {
    let control = tree.get(id)?;
    match control.kind() {
        ControlKind::Push => Ok(true),
        ControlKind::Checkbox => {
            let checked = !control.is_checked();
            tree.set_checked(id, checked)?;
            Ok(true)
        }
        ControlKind::Radio => {
            if control.is_checked() {
                return Ok(false);
            }
            tree.set_checked(id, true)?;
            Ok(true)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::Control;

    fn setup(control: Control) -> (ControlTree, Interaction, ControlId) {
        let mut tree = ControlTree::new();
        let id = tree.add_control(None, control).unwrap();
        (tree, Interaction::new(), id)
    }

    fn click(
        interaction: &mut Interaction,
        tree: &mut ControlTree,
        id: ControlId,
    ) -> Vec<ControlEvent> {
        let mut events = Vec::new();
        interaction
            .pointer_press(tree, id, PointerButton::Primary, &mut events)
            .unwrap();
        interaction
            .pointer_release(tree, id, PointerButton::Primary, &mut events)
            .unwrap();
        events
    }

    // =========================================================================
    // Hover
    // =========================================================================

    #[test]
    fn test_hover_enter_leave() {
        let (mut tree, mut interaction, id) = setup(Control::push("ok"));
        interaction.pointer_enter(&mut tree, id).unwrap();
        assert_eq!(tree.get(id).unwrap().state(), ControlState::Hovered);
        interaction.pointer_leave(&mut tree, id).unwrap();
        assert_eq!(tree.get(id).unwrap().state(), ControlState::Normal);
    }

    #[test]
    fn test_leave_while_pressed_keeps_pressed() {
        let (mut tree, mut interaction, id) = setup(Control::push("ok"));
        let mut events = Vec::new();
        interaction.pointer_enter(&mut tree, id).unwrap();
        interaction
            .pointer_press(&mut tree, id, PointerButton::Primary, &mut events)
            .unwrap();
        interaction.pointer_leave(&mut tree, id).unwrap();

        let control = tree.get(id).unwrap();
        assert_eq!(control.state(), ControlState::Pressed);
        assert!(!control.is_hovering());
    }

    // =========================================================================
    // Press and release
    // =========================================================================

    #[test]
    fn test_press_takes_focus_then_capture() {
        let (mut tree, mut interaction, id) = setup(Control::push("ok"));
        let mut events = Vec::new();
        interaction
            .pointer_press(&mut tree, id, PointerButton::Primary, &mut events)
            .unwrap();

        assert_eq!(interaction.focused(), Some(id));
        assert_eq!(interaction.capture_owner(), Some(id));
        assert!(tree.get(id).unwrap().is_capturing());
        assert_eq!(
            events,
            vec![ControlEvent::FocusChanged {
                from: None,
                to: Some(id)
            }]
        );
    }

    #[test]
    fn test_secondary_button_is_ignored() {
        let (mut tree, mut interaction, id) = setup(Control::push("ok"));
        let mut events = Vec::new();
        interaction
            .pointer_press(&mut tree, id, PointerButton::Secondary, &mut events)
            .unwrap();
        assert!(events.is_empty());
        assert_eq!(interaction.capture_owner(), None);
        assert_eq!(tree.get(id).unwrap().state(), ControlState::Normal);
    }

    #[test]
    fn test_click_outside_still_activates() {
        let (mut tree, mut interaction, id) = setup(Control::push("ok"));
        let events = click(&mut interaction, &mut tree, id);

        assert_eq!(events.last(), Some(&ControlEvent::Clicked { id }));
        assert_eq!(tree.get(id).unwrap().state(), ControlState::Normal);
        assert_eq!(interaction.capture_owner(), None);
        assert!(!tree.get(id).unwrap().is_capturing());
    }

    #[test]
    fn test_release_without_capture_is_ignored() {
        let (mut tree, mut interaction, id) = setup(Control::checkbox("c"));
        let mut events = Vec::new();
        interaction
            .pointer_release(&mut tree, id, PointerButton::Primary, &mut events)
            .unwrap();
        assert!(events.is_empty());
        assert!(!tree.get(id).unwrap().is_checked());
    }

    #[test]
    fn test_checkbox_toggles_each_click() {
        let (mut tree, mut interaction, id) = setup(Control::checkbox("c"));
        click(&mut interaction, &mut tree, id);
        assert!(tree.get(id).unwrap().is_checked());
        click(&mut interaction, &mut tree, id);
        assert!(!tree.get(id).unwrap().is_checked());
    }

    #[test]
    fn test_checked_radio_reclick_is_silent() {
        let (mut tree, mut interaction, id) = setup(Control::radio("r"));
        let first = click(&mut interaction, &mut tree, id);
        assert!(first.contains(&ControlEvent::Clicked { id }));

        let second = click(&mut interaction, &mut tree, id);
        assert!(second.is_empty());
        assert!(tree.get(id).unwrap().is_checked());
    }

    // =========================================================================
    // Capture loss
    // =========================================================================

    #[test]
    fn test_capture_lost_cancels_press() {
        let (mut tree, mut interaction, id) = setup(Control::checkbox("c"));
        let mut events = Vec::new();
        interaction.pointer_enter(&mut tree, id).unwrap();
        interaction
            .pointer_press(&mut tree, id, PointerButton::Primary, &mut events)
            .unwrap();
        interaction.capture_lost(&mut tree, id, &mut events).unwrap();
        interaction
            .pointer_release(&mut tree, id, PointerButton::Primary, &mut events)
            .unwrap();

        let control = tree.get(id).unwrap();
        assert_eq!(control.state(), ControlState::Hovered);
        assert!(!control.is_checked());
        assert!(!events.iter().any(|e| matches!(e, ControlEvent::Clicked { .. })));
        assert_eq!(events.last(), Some(&ControlEvent::CaptureLost { id }));
    }

    #[test]
    fn test_new_capture_revokes_previous_holder() {
        let mut tree = ControlTree::new();
        let a = tree.add_control(None, Control::push("a")).unwrap();
        let b = tree.add_control(None, Control::push("b")).unwrap();
        let mut interaction = Interaction::new();
        let mut events = Vec::new();

        interaction
            .pointer_press(&mut tree, a, PointerButton::Primary, &mut events)
            .unwrap();
        events.clear();
        interaction.set_capture(&mut tree, b, &mut events).unwrap();

        assert_eq!(events, vec![ControlEvent::CaptureLost { id: a }]);
        assert_eq!(interaction.capture_owner(), Some(b));
        assert!(!tree.get(a).unwrap().is_capturing());
        assert_eq!(tree.get(a).unwrap().state(), ControlState::Normal);
        assert!(tree.get(b).unwrap().is_capturing());
    }

    // =========================================================================
    // Disabled
    // =========================================================================

    #[test]
    fn test_disabled_ignores_pointer() {
        let (mut tree, mut interaction, id) = setup(Control::push("ok"));
        let mut events = Vec::new();
        interaction
            .set_enabled(&mut tree, id, false, &mut events)
            .unwrap();
        interaction.pointer_enter(&mut tree, id).unwrap();
        let events = click(&mut interaction, &mut tree, id);

        assert!(events.is_empty());
        assert_eq!(tree.get(id).unwrap().state(), ControlState::Disabled);
        assert_eq!(interaction.focused(), None);

        let mut events = Vec::new();
        interaction.set_enabled(&mut tree, id, true, &mut events).unwrap();
        assert_eq!(tree.get(id).unwrap().state(), ControlState::Hovered);
    }

    #[test]
    fn test_disable_while_pressed_releases_capture_and_focus() {
        let (mut tree, mut interaction, id) = setup(Control::push("ok"));
        let mut events = Vec::new();
        interaction
            .pointer_press(&mut tree, id, PointerButton::Primary, &mut events)
            .unwrap();
        events.clear();
        interaction
            .set_enabled(&mut tree, id, false, &mut events)
            .unwrap();

        assert_eq!(
            events,
            vec![
                ControlEvent::CaptureLost { id },
                ControlEvent::FocusChanged {
                    from: Some(id),
                    to: None
                },
            ]
        );
        assert_eq!(interaction.capture_owner(), None);
        assert_eq!(tree.get(id).unwrap().state(), ControlState::Disabled);
    }

    #[test]
    fn test_forget_clears_slots() {
        let (mut tree, mut interaction, id) = setup(Control::push("ok"));
        let mut events = Vec::new();
        interaction
            .pointer_press(&mut tree, id, PointerButton::Primary, &mut events)
            .unwrap();
        interaction.forget(&[id]);
        assert_eq!(interaction.capture_owner(), None);
        assert_eq!(interaction.focused(), None);
    }
}
