//! Native theme seam and cached control metrics.

use crate::config::Config;
use crate::primitives::{IntSize, Size, scale_size};

use super::{Control, ControlKind, ControlState};

/// Theme-drawn parts of a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemePart {
    Button,
    Checkbox,
    Radio,
}

impl ThemePart {
    /// The indicator part drawn for a control kind, if any.
    pub fn indicator(kind: ControlKind) -> Option<ThemePart> {
        match kind {
            ControlKind::Push => None,
            ControlKind::Checkbox => Some(ThemePart::Checkbox),
            ControlKind::Radio => Some(ThemePart::Radio),
        }
    }
}

/// Metrics supplied by the platform theme engine.
///
/// All sizes are in device pixels for the given scale factor.
pub trait NativeTheme {
    fn part_size(&self, part: ThemePart, state: ControlState, scale: f32) -> IntSize;

    fn measure_text(&self, text: &str, scale: f32) -> Size;
}

/// Sizes cached on a control, valid for one scale factor.
#[derive(Debug, Clone, PartialEq)]
pub struct Metrics {
    pub scale: f32,
    /// Indicator box, device pixels. Zero for push buttons.
    pub box_size: IntSize,
    /// Title, device pixels.
    pub text_size: Size,
    /// Image, device pixels. Zero without an image.
    pub image_size: Size,
}

impl Default for Metrics {
    fn default() -> Self {
        Self {
            scale: 1.0,
            box_size: IntSize::ZERO,
            text_size: Size::ZERO,
            image_size: Size::ZERO,
        }
    }
}

impl Control {
    /// Re-query the theme for this control at `scale`.
    pub fn update_metrics(&mut self, theme: &dyn NativeTheme, scale: f32) {
        let box_size = match ThemePart::indicator(self.kind()) {
            Some(part) => theme.part_size(part, self.state(), scale),
            None => IntSize::ZERO,
        };
        let text_size = theme.measure_text(self.title(), scale);
        let image_size = self
            .image()
            .map_or(Size::ZERO, |image| scale_size(image.size, scale));

        let metrics = self.metrics_mut();
        *metrics = Metrics {
            scale,
            box_size,
            text_size,
            image_size,
        };
        self.invalidate();
    }

    /// Interior padding in DIP.
    pub fn padding(&self, config: &Config) -> f32 {
        match self.kind() {
            ControlKind::Push => config.button_padding,
            ControlKind::Checkbox | ControlKind::Radio => config.checkbox_padding,
        }
    }

    /// Size the control would like, in DIP.
    ///
    /// The title plus either the image or the indicator box beside it, then
    /// padding on every side. The box height does not contribute.
    pub fn preferred_size(&self, config: &Config) -> Size {
        let metrics = self.metrics();
        let mut size = metrics.text_size;
        if self.image().is_some() {
            size.enlarge(metrics.image_size.width, 0.0);
            size.height = size.height.max(metrics.image_size.height);
        } else if self.kind() != ControlKind::Push {
            size.enlarge(metrics.box_size.width as f32, 0.0);
        }

        let mut size = scale_size(size, 1.0 / metrics.scale);
        let padding = self.padding(config) * 2.0;
        size.enlarge(padding, padding);
        size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::ImageRef;
    use crate::headless::FixedTheme;

    #[test]
    fn test_indicator_parts() {
        assert_eq!(ThemePart::indicator(ControlKind::Push), None);
        assert_eq!(
            ThemePart::indicator(ControlKind::Radio),
            Some(ThemePart::Radio)
        );
    }

    #[test]
    fn test_push_preferred_size() {
        let mut button = Control::push("OK");
        button.update_metrics(&FixedTheme::default(), 1.0);
        // 2 glyphs x 7, line 15, padding 3 each side
        assert_eq!(
            button.preferred_size(&Config::default()),
            Size::new(20.0, 21.0)
        );
    }

    #[test]
    fn test_checkbox_adds_box_width_only() {
        let mut check = Control::checkbox("ab");
        check.update_metrics(&FixedTheme::default(), 2.0);
        assert_eq!(check.metrics().box_size, IntSize::new(26, 26));
        assert_eq!(check.metrics().text_size, Size::new(28.0, 30.0));
        // (28 + 26) / 2 + 2, 30 / 2 + 2
        assert_eq!(
            check.preferred_size(&Config::default()),
            Size::new(29.0, 17.0)
        );
    }

    #[test]
    fn test_image_replaces_box() {
        let image = ImageRef {
            handle: 1,
            size: Size::new(16.0, 24.0),
        };
        let mut radio = Control::radio("x").with_image(image);
        radio.update_metrics(&FixedTheme::default(), 1.0);
        assert_eq!(radio.metrics().image_size, Size::new(16.0, 24.0));
        // 7 + 16 wide, image taller than text
        assert_eq!(
            radio.preferred_size(&Config::default()),
            Size::new(25.0, 26.0)
        );
    }

    #[test]
    fn test_update_metrics_marks_dirty() {
        let mut button = Control::push("x");
        button.take_repaint();
        button.update_metrics(&FixedTheme::default(), 1.5);
        assert!(button.needs_repaint());
        assert_eq!(button.metrics().scale, 1.5);
    }
}
