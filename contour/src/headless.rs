//! In-memory window backend.
//!
//! `HeadlessWindow` behaves like a toolkit window under a compositing window
//! manager, without a display: client-drawn chrome adds shadow padding to the
//! surface geometry, the "csd" style class follows the decorated flag and
//! title bar slot, and content allocation without a preceding preferred-size
//! query is reported the way a constraint solver would complain about it.
//! Every mutating call is recorded for inspection.

use std::collections::{BTreeMap, BTreeSet};

use tracing::warn;

use crate::backend::{FrameProperty, SizeTarget, StyleHandle, StyleRule, Titlebar, WindowBackend};
use crate::control::{ControlState, NativeTheme, ThemePart};
use crate::primitives::{IntRect, IntSize, Size};

/// A mutating call received by a [`HeadlessWindow`].
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    SetDecorated(bool),
    SetTitlebar(Option<Titlebar>),
    AddStyleRule(StyleHandle),
    RemoveStyleRule(StyleHandle),
    SetSizeRequest(SizeTarget, Option<IntSize>),
    Resize(IntSize),
    SetDefaultSize(IntSize),
    MeasureContent,
    AllocateContent(IntRect),
}

/// Shadow padding drawn around client-decorated windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShadowExtents {
    pub top: i32,
    pub left: i32,
    pub bottom: i32,
    pub right: i32,
}

impl ShadowExtents {
    pub const fn new(top: i32, left: i32, bottom: i32, right: i32) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HeadlessWindow {
    realized: bool,
    scale_factor: f32,
    frame: FrameProperty,
    position: (i32, i32),
    size: IntSize,
    shadow: ShadowExtents,
    decorated: bool,
    titlebar: Option<Titlebar>,
    extra_classes: BTreeSet<String>,
    style_rules: BTreeMap<StyleHandle, StyleRule>,
    next_style: u64,
    window_request: Option<IntSize>,
    content_request: Option<IntSize>,
    default_size: Option<IntSize>,
    content_natural: IntSize,
    measured: bool,
    allocation: Option<IntRect>,
    allocation_warnings: usize,
    calls: Vec<BackendCall>,
}

impl HeadlessWindow {
    /// A realized, OS-decorated window at scale 1 on a backend without
    /// frame extents.
    pub fn new(size: IntSize) -> Self {
        Self {
            realized: true,
            scale_factor: 1.0,
            frame: FrameProperty::Unsupported,
            position: (0, 0),
            size,
            shadow: ShadowExtents::default(),
            decorated: true,
            titlebar: None,
            extra_classes: BTreeSet::new(),
            style_rules: BTreeMap::new(),
            next_style: 1,
            window_request: None,
            content_request: None,
            default_size: None,
            content_natural: IntSize::ZERO,
            measured: false,
            allocation: None,
            allocation_warnings: 0,
            calls: Vec::new(),
        }
    }

    pub fn with_scale_factor(mut self, scale_factor: f32) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    pub fn with_frame_extents(mut self, frame: FrameProperty) -> Self {
        self.frame = frame;
        self
    }

    pub fn with_position(mut self, x: i32, y: i32) -> Self {
        self.position = (x, y);
        self
    }

    pub fn with_client_shadow(mut self, shadow: ShadowExtents) -> Self {
        self.shadow = shadow;
        self
    }

    /// Natural size of the content container.
    pub fn with_content_size(mut self, size: IntSize) -> Self {
        self.content_natural = size;
        self
    }

    /// A window that has not been mapped yet.
    pub fn unrealized(mut self) -> Self {
        self.realized = false;
        self
    }

    pub fn set_realized(&mut self, realized: bool) {
        self.realized = realized;
    }

    pub fn set_scale_factor(&mut self, scale_factor: f32) {
        self.scale_factor = scale_factor;
    }

    /// Add a style class the way third-party code would.
    pub fn add_style_class(&mut self, class: &str) {
        self.extra_classes.insert(class.to_string());
    }

    pub fn remove_style_class(&mut self, class: &str) {
        self.extra_classes.remove(class);
    }

    pub fn titlebar(&self) -> Option<&Titlebar> {
        self.titlebar.as_ref()
    }

    /// Attached style rules in attachment order.
    pub fn style_rules(&self) -> impl Iterator<Item = &StyleRule> {
        self.style_rules.values()
    }

    pub fn size_request(&self, target: SizeTarget) -> Option<IntSize> {
        match target {
            SizeTarget::Window => self.window_request,
            SizeTarget::Content => self.content_request,
        }
    }

    pub fn default_size(&self) -> Option<IntSize> {
        self.default_size
    }

    /// Last rectangle allocated to the content container.
    pub fn allocation(&self) -> Option<IntRect> {
        self.allocation
    }

    /// Allocations that were not preceded by a preferred-size query.
    pub fn allocation_warnings(&self) -> usize {
        self.allocation_warnings
    }

    pub fn calls(&self) -> &[BackendCall] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    fn draws_own_chrome(&self) -> bool {
        self.decorated && self.titlebar.is_some()
    }
}

impl WindowBackend for HeadlessWindow {
    fn is_realized(&self) -> bool {
        self.realized
    }

    fn scale_factor(&self) -> f32 {
        self.scale_factor
    }

    fn frame_extents(&self) -> FrameProperty {
        self.frame.clone()
    }

    fn position(&self) -> (i32, i32) {
        self.position
    }

    fn size(&self) -> IntSize {
        self.size
    }

    fn surface_geometry(&self) -> IntRect {
        let (x, y) = self.position;
        let bounds = IntRect::new(x, y, self.size.width, self.size.height);
        if !self.draws_own_chrome() {
            return bounds;
        }
        let s = self.shadow;
        IntRect::new(
            bounds.x - s.left,
            bounds.y - s.top,
            bounds.width + s.left + s.right,
            bounds.height + s.top + s.bottom,
        )
    }

    fn set_decorated(&mut self, decorated: bool) {
        self.calls.push(BackendCall::SetDecorated(decorated));
        self.decorated = decorated;
    }

    fn is_decorated(&self) -> bool {
        self.decorated
    }

    fn set_titlebar(&mut self, titlebar: Option<Titlebar>) {
        self.calls.push(BackendCall::SetTitlebar(titlebar.clone()));
        self.titlebar = titlebar;
    }

    fn has_style_class(&self, class: &str) -> bool {
        (class == "csd" && self.draws_own_chrome()) || self.extra_classes.contains(class)
    }

    fn add_style_rule(&mut self, rule: &StyleRule) -> StyleHandle {
        let handle = StyleHandle(self.next_style);
        self.next_style += 1;
        self.style_rules.insert(handle, rule.clone());
        self.calls.push(BackendCall::AddStyleRule(handle));
        handle
    }

    fn remove_style_rule(&mut self, handle: StyleHandle) {
        self.style_rules.remove(&handle);
        self.calls.push(BackendCall::RemoveStyleRule(handle));
    }

    fn set_size_request(&mut self, target: SizeTarget, size: Option<IntSize>) {
        self.calls.push(BackendCall::SetSizeRequest(target, size));
        match target {
            SizeTarget::Window => self.window_request = size,
            SizeTarget::Content => self.content_request = size,
        }
        if let Some(size) = size {
            self.size = size;
        }
    }

    fn resize(&mut self, size: IntSize) {
        self.calls.push(BackendCall::Resize(size));
        let min = self.window_request.unwrap_or(IntSize::ZERO);
        self.size = IntSize::new(size.width.max(min.width), size.height.max(min.height));
    }

    fn set_default_size(&mut self, size: IntSize) {
        self.calls.push(BackendCall::SetDefaultSize(size));
        self.default_size = Some(size);
    }

    fn content_preferred_size(&mut self) -> IntSize {
        self.calls.push(BackendCall::MeasureContent);
        self.measured = true;
        let request = self.content_request.unwrap_or(IntSize::ZERO);
        IntSize::new(
            self.content_natural.width.max(request.width),
            self.content_natural.height.max(request.height),
        )
    }

    fn allocate_content(&mut self, rect: IntRect) {
        self.calls.push(BackendCall::AllocateContent(rect));
        if !self.measured {
            warn!(?rect, "content allocated without a preferred size query");
            self.allocation_warnings += 1;
        }
        self.measured = false;
        self.allocation = Some(rect);
    }
}

/// A theme with fixed metrics, scaled by the window's scale factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedTheme {
    /// Edge of the checkbox/radio indicator, in DIP.
    pub indicator: f32,
    /// Advance of every character, in DIP.
    pub glyph_width: f32,
    /// Height of a line of text, in DIP.
    pub line_height: f32,
}

impl Default for FixedTheme {
    fn default() -> Self {
        Self {
            indicator: 13.0,
            glyph_width: 7.0,
            line_height: 15.0,
        }
    }
}

impl NativeTheme for FixedTheme {
    fn part_size(&self, part: ThemePart, _state: ControlState, scale: f32) -> IntSize {
        match part {
            ThemePart::Button => IntSize::ZERO,
            ThemePart::Checkbox | ThemePart::Radio => {
                let edge = (self.indicator * scale).ceil() as i32;
                IntSize::new(edge, edge)
            }
        }
    }

    fn measure_text(&self, text: &str, scale: f32) -> Size {
        if text.is_empty() {
            return Size::ZERO;
        }
        let chars = text.chars().count() as f32;
        Size::new(chars * self.glyph_width * scale, self.line_height * scale)
    }
}
