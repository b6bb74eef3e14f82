//! Configuration types for Kindred layout and rendering.
//!
//! This module provides configuration structures that control how family
//! trees are laid out and styled. All types implement [`serde::Deserialize`]
//! so they can be loaded from external sources; every field has a default.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and style settings.
//! - [`LayoutConfig`] - Card metrics and spacing used by the layout engine.
//! - [`StyleConfig`] - Colors used by the SVG exporter.
//!
//! # Example
//!
//! ```
//! # use kindred::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().level_step(), 200.0);
//! assert!(config.style().background_color().is_ok());
//! ```

use serde::Deserialize;

use kindred_core::{
    color::Color,
    geometry::{Point, Size},
    member::Gender,
};

/// Top-level application configuration combining layout and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and style configurations.
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Card metrics and spacing for the tree layout.
///
/// Placements are the top-left corners of member cards. All distances are in
/// the same unit as the resulting coordinates (pixels for the SVG exporter).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Left edge of the first root family.
    origin_x: f32,
    /// Top edge of the root generation.
    origin_y: f32,
    card_width: f32,
    card_height: f32,
    /// Horizontal distance between a member's left edge and their spouse's.
    spouse_offset: f32,
    /// Horizontal gap between sibling families.
    sibling_gap: f32,
    /// Horizontal gap between root families.
    root_gap: f32,
    /// Vertical distance between generations.
    level_step: f32,
    /// Height of the horizontal rail above a child's card.
    rail_offset: f32,
    margin_x: f32,
    margin_y: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            origin_x: 100.0,
            origin_y: 50.0,
            card_width: 100.0,
            card_height: 100.0,
            spouse_offset: 150.0,
            sibling_gap: 50.0,
            root_gap: 100.0,
            level_step: 200.0,
            rail_offset: 25.0,
            margin_x: 200.0,
            margin_y: 150.0,
        }
    }
}

impl LayoutConfig {
    /// Returns the top-left corner of the first root family.
    pub fn origin(&self) -> Point {
        Point::new(self.origin_x, self.origin_y)
    }

    /// Returns the size of a single member card.
    pub fn card_size(&self) -> Size {
        Size::new(self.card_width, self.card_height)
    }

    pub fn spouse_offset(&self) -> f32 {
        self.spouse_offset
    }

    pub fn sibling_gap(&self) -> f32 {
        self.sibling_gap
    }

    pub fn root_gap(&self) -> f32 {
        self.root_gap
    }

    pub fn level_step(&self) -> f32 {
        self.level_step
    }

    pub fn rail_offset(&self) -> f32 {
        self.rail_offset
    }

    /// Returns the margin added past the furthest placement.
    pub fn margin(&self) -> Size {
        Size::new(self.margin_x, self.margin_y)
    }

    /// Sets the spouse offset (builder style).
    pub fn with_spouse_offset(mut self, spouse_offset: f32) -> Self {
        self.spouse_offset = spouse_offset;
        self
    }

    /// Sets the gap between sibling families (builder style).
    pub fn with_sibling_gap(mut self, sibling_gap: f32) -> Self {
        self.sibling_gap = sibling_gap;
        self
    }

    /// Sets the vertical distance between generations (builder style).
    pub fn with_level_step(mut self, level_step: f32) -> Self {
        self.level_step = level_step;
        self
    }

    /// Checks that all distances are finite and non-negative, and that
    /// cards have a positive size.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first offending field.
    pub fn validate(&self) -> Result<(), String> {
        let fields = [
            ("origin_x", self.origin_x),
            ("origin_y", self.origin_y),
            ("card_width", self.card_width),
            ("card_height", self.card_height),
            ("spouse_offset", self.spouse_offset),
            ("sibling_gap", self.sibling_gap),
            ("root_gap", self.root_gap),
            ("level_step", self.level_step),
            ("rail_offset", self.rail_offset),
            ("margin_x", self.margin_x),
            ("margin_y", self.margin_y),
        ];
        if let Some((name, value)) = fields
            .iter()
            .find(|(_, value)| !value.is_finite() || *value < 0.0)
        {
            return Err(format!("layout.{name} must be a non-negative number, got {value}"));
        }
        if self.card_width == 0.0 || self.card_height == 0.0 {
            return Err("layout card size must be positive".to_string());
        }
        Ok(())
    }
}

/// Visual styling configuration for rendered trees.
///
/// Colors are CSS color strings, validated when read.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Background color; transparent when unset.
    background_color: Option<String>,
    connector_color: String,
    male_color: String,
    female_color: String,
    other_color: String,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: None,
            connector_color: "#e5e7eb".to_string(),
            male_color: "#3b82f6".to_string(),
            female_color: "#ec4899".to_string(),
            other_color: "#8b5cf6".to_string(),
        }
    }
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    /// Returns the stroke [`Color`] for connector lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn connector_color(&self) -> Result<Color, String> {
        Color::new(&self.connector_color)
            .map_err(|err| format!("Invalid connector color in config: {err}"))
    }

    /// Returns the card fill [`Color`] for members of the given gender.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn card_color(&self, gender: Gender) -> Result<Color, String> {
        let color = match gender {
            Gender::Male => &self.male_color,
            Gender::Female => &self.female_color,
            Gender::Other => &self.other_color,
        };
        Color::new(color).map_err(|err| format!("Invalid card color in config: {err}"))
    }
}
