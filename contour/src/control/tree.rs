//! Arena of containers and controls.

use crate::error::{ContourError, Result};

use super::{Control, ControlId, ControlKind};

#[derive(Debug, Clone)]
enum Node {
    Container { children: Vec<ControlId> },
    Control(Control),
}

#[derive(Debug, Clone)]
struct Slot {
    parent: Option<ControlId>,
    node: Node,
}

/// Containers and controls of one window.
///
/// Ids are never reused: a removed node leaves an empty slot, so stale ids
/// held elsewhere resolve to nothing instead of to a different control.
#[derive(Debug, Clone, Default)]
pub struct ControlTree {
    slots: Vec<Option<Slot>>,
}

impl ControlTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an empty container, at the top level when `parent` is `None`.
    pub fn add_container(&mut self, parent: Option<ControlId>) -> Result<ControlId> {
        self.insert(
            parent,
            Node::Container {
                children: Vec::new(),
            },
        )
    }

    /// Add a control, at the top level when `parent` is `None`.
    pub fn add_control(
        &mut self,
        parent: Option<ControlId>,
        control: Control,
    ) -> Result<ControlId> {
        self.insert(parent, Node::Control(control))
    }

    fn insert(&mut self, parent: Option<ControlId>, node: Node) -> Result<ControlId> {
        if let Some(parent) = parent {
            self.children(parent)?;
        }
        let id = ControlId(self.slots.len());
        self.slots.push(Some(Slot { parent, node }));
        if let Some(parent) = parent
            && let Some(Slot {
                node: Node::Container { children },
                ..
            }) = self.slots[parent.0].as_mut()
        {
            children.push(id);
        }
        Ok(id)
    }

    /// Remove a node and, for containers, everything below it.
    ///
    /// Returns the removed ids, the node itself first.
    pub fn remove(&mut self, id: ControlId) -> Result<Vec<ControlId>> {
        let parent = self.slot(id)?.parent;
        if let Some(parent) = parent
            && let Some(Slot {
                node: Node::Container { children },
                ..
            }) = self.slots[parent.0].as_mut()
        {
            children.retain(|child| *child != id);
        }

        let mut removed = Vec::new();
        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            if let Some(slot) = self.slots.get_mut(next.0).and_then(Option::take) {
                if let Node::Container { children } = slot.node {
                    pending.extend(children.into_iter().rev());
                }
                removed.push(next);
            }
        }
        Ok(removed)
    }

    pub fn contains(&self, id: ControlId) -> bool {
        matches!(self.slots.get(id.0), Some(Some(_)))
    }

    pub fn parent(&self, id: ControlId) -> Option<ControlId> {
        self.slots.get(id.0)?.as_ref()?.parent
    }

    pub fn is_container(&self, id: ControlId) -> bool {
        matches!(
            self.slots.get(id.0),
            Some(Some(Slot {
                node: Node::Container { .. },
                ..
            }))
        )
    }

    /// Children of a container, in insertion order.
    pub fn children(&self, id: ControlId) -> Result<&[ControlId]> {
        match &self.slot(id)?.node {
            Node::Container { children } => Ok(children),
            Node::Control(_) => Err(ContourError::NotAContainer(id)),
        }
    }

    /// Other children of this node's parent. Empty for top-level nodes.
    pub fn siblings(&self, id: ControlId) -> impl Iterator<Item = ControlId> + '_ {
        self.parent(id)
            .and_then(|parent| self.children(parent).ok())
            .unwrap_or(&[])
            .iter()
            .copied()
            .filter(move |sibling| *sibling != id)
    }

    pub fn control(&self, id: ControlId) -> Option<&Control> {
        match &self.slots.get(id.0)?.as_ref()?.node {
            Node::Control(control) => Some(control),
            Node::Container { .. } => None,
        }
    }

    pub fn control_mut(&mut self, id: ControlId) -> Option<&mut Control> {
        match &mut self.slots.get_mut(id.0)?.as_mut()?.node {
            Node::Control(control) => Some(control),
            Node::Container { .. } => None,
        }
    }

    /// Like [`control`](Self::control) but with a typed error.
    pub fn get(&self, id: ControlId) -> Result<&Control> {
        self.control(id).ok_or(ContourError::UnknownControl(id))
    }

    pub fn get_mut(&mut self, id: ControlId) -> Result<&mut Control> {
        self.control_mut(id).ok_or(ContourError::UnknownControl(id))
    }

    /// All live controls in id order.
    pub fn controls(&self) -> impl Iterator<Item = (ControlId, &Control)> {
        self.slots.iter().enumerate().filter_map(|(i, slot)| match slot {
            Some(Slot {
                node: Node::Control(control),
                ..
            }) => Some((ControlId(i), control)),
            _ => None,
        })
    }

    pub fn controls_mut(&mut self) -> impl Iterator<Item = (ControlId, &mut Control)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(i, slot)| match slot {
                Some(Slot {
                    node: Node::Control(control),
                    ..
                }) => Some((ControlId(i), control)),
                _ => None,
            })
    }

    /// Set a control's checked flag. Returns whether it changed.
    ///
    /// Checking a radio button unchecks every other radio button directly
    /// inside the same container. Other control kinds and nested containers
    /// are left alone.
    pub fn set_checked(&mut self, id: ControlId, checked: bool) -> Result<bool> {
        let control = self.get_mut(id)?;
        if control.is_checked() == checked {
            return Ok(false);
        }
        control.set_checked_flag(checked);

        if checked && control.kind() == ControlKind::Radio {
            let siblings: Vec<ControlId> = self.siblings(id).collect();
            for sibling in siblings {
                if let Some(other) = self.control_mut(sibling)
                    && other.kind() == ControlKind::Radio
                {
                    other.set_checked_flag(false);
                }
            }
        }
        Ok(true)
    }

    fn slot(&self, id: ControlId) -> Result<&Slot> {
        self.slots
            .get(id.0)
            .and_then(Option::as_ref)
            .ok_or(ContourError::UnknownControl(id))
    }
}
