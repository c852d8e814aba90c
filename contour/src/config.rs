//! Engine configuration.
//!
//! Every field has a default, so an empty JSON object (or no file at all)
//! gives the stock behavior.

use std::path::Path;

use serde::Deserialize;

use crate::error::Result;

/// Corner radius used when the configured one would be zero or invalid.
pub const DEFAULT_DECORATION_CORNER_RADIUS: f32 = 0.01;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Corner radius (logical px) of client-drawn decorations.
    ///
    /// Must stay above zero: a radius of exactly zero makes some compositors
    /// render the client shadow incorrectly.
    pub decoration_corner_radius: f32,

    /// Label of the hidden title bar placeholder.
    pub titlebar_placeholder: String,

    /// Interior padding of push buttons, in DIP.
    pub button_padding: f32,

    /// Interior padding of checkboxes and radio buttons, in DIP.
    pub checkbox_padding: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            decoration_corner_radius: DEFAULT_DECORATION_CORNER_RADIUS,
            titlebar_placeholder: String::from("you should not see me"),
            button_padding: 3.0,
            checkbox_padding: 1.0,
        }
    }
}

impl Config {
    /// Parse a JSON document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// The corner radius to apply, clamped to a positive value.
    pub fn corner_radius(&self) -> f32 {
        if self.decoration_corner_radius.is_finite() && self.decoration_corner_radius > 0.0 {
            self.decoration_corner_radius
        } else {
            DEFAULT_DECORATION_CORNER_RADIUS
        }
    }
}
