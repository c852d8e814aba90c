//! Control painting.
//!
//! [`paint`] lays a control out inside its allocated bounds and issues draw
//! calls through a [`Painter`]. Coordinates are device pixels relative to the
//! control's top-left corner, except image destinations which are in DIP.

use crate::config::Config;
use crate::primitives::{Color, IntRect, Point, Rect, scale_point, scale_size, to_ceiled_size};

use super::{Control, ControlKind, ControlState, ImageRef, ThemePart};

/// Drawing backend used by [`paint`].
pub trait Painter {
    fn draw_theme_part(
        &mut self,
        part: ThemePart,
        state: ControlState,
        checked: bool,
        rect: IntRect,
    );
    fn fill_rect(&mut self, rect: IntRect, color: Color);
    fn draw_image(&mut self, image: &ImageRef, rect: Rect);
    /// Draw `text` centered in `rect`.
    fn draw_text(&mut self, text: &str, rect: IntRect, color: Color);
    fn draw_focus_rect(&mut self, rect: IntRect);
}

/// A recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    ThemePart {
        part: ThemePart,
        state: ControlState,
        checked: bool,
        rect: IntRect,
    },
    FillRect {
        rect: IntRect,
        color: Color,
    },
    Image {
        image: ImageRef,
        rect: Rect,
    },
    Text {
        text: String,
        rect: IntRect,
        color: Color,
    },
    FocusRect {
        rect: IntRect,
    },
}

/// Painter that records draw calls in order.
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Painter for DisplayList {
    fn draw_theme_part(
        &mut self,
        part: ThemePart,
        state: ControlState,
        checked: bool,
        rect: IntRect,
    ) {
        self.commands.push(DrawCommand::ThemePart {
            part,
            state,
            checked,
            rect,
        });
    }

    fn fill_rect(&mut self, rect: IntRect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn draw_image(&mut self, image: &ImageRef, rect: Rect) {
        self.commands.push(DrawCommand::Image {
            image: *image,
            rect,
        });
    }

    fn draw_text(&mut self, text: &str, rect: IntRect, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_owned(),
            rect,
            color,
        });
    }

    fn draw_focus_rect(&mut self, rect: IntRect) {
        self.commands.push(DrawCommand::FocusRect { rect });
    }
}

/// Paint `control` at its current bounds and metrics.
///
/// Push buttons are centered and drawn over a themed button face. Checkboxes
/// and radio buttons are left aligned with their indicator (or image) ahead
/// of the title.
pub fn paint(control: &Control, has_focus: bool, config: &Config, painter: &mut dyn Painter) {
    let metrics = control.metrics();
    let scale = metrics.scale;
    let size = control.bounds().size();
    let full = IntRect::from_size(size);
    let preferred = to_ceiled_size(scale_size(control.preferred_size(config), scale));
    let push = control.kind() == ControlKind::Push;

    if push {
        painter.draw_theme_part(ThemePart::Button, control.state(), control.is_checked(), full);
    }
    if !control.background().is_transparent() {
        painter.fill_rect(full, control.background());
    }

    let origin_x = if push {
        (size.width - preferred.width) / 2
    } else {
        0
    };
    let origin_y = (size.height - preferred.height) / 2;

    if let Some(image) = control.image() {
        let image_y = (size.height as f32 - metrics.image_size.height) / 2.0;
        let origin = scale_point(Point::new(origin_x as f32, image_y), 1.0 / scale)
            + Point::new(config.button_padding, 0.0);
        painter.draw_image(image, Rect::from_origin_size(origin, image.size));
    } else if let Some(part) = ThemePart::indicator(control.kind()) {
        let box_size = metrics.box_size;
        let box_y = origin_y + (preferred.height - box_size.height) / 2;
        painter.draw_theme_part(
            part,
            control.state(),
            control.is_checked(),
            IntRect::new(origin_x, box_y, box_size.width, box_size.height),
        );
    }

    let padding = (control.padding(config) * scale).ceil() as i32;
    let lead = if push || control.image().is_some() {
        metrics.image_size.width as i32
    } else {
        metrics.box_size.width
    };
    let text_bounds = IntRect::new(origin_x, origin_y, preferred.width, preferred.height)
        .inset_all(padding)
        .inset(lead, 0, 0, 0);
    painter.draw_text(control.title(), text_bounds, control.text_color());

    if has_focus {
        let ring = if push {
            full.inset_all(scale.ceil() as i32)
        } else {
            text_bounds.inset_all(padding)
        };
        painter.draw_focus_rect(ring);
    }
}
