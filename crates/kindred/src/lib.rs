//! Kindred - Family tree layout.
//!
//! Decoding of member documents, tree layout, and rendering of family trees.
//! The layout assigns every reachable member a card position on a 2D surface
//! and derives the spouse and parent-child connectors between the cards.

pub mod config;
pub mod export;
pub mod forest;
pub mod layout;

mod error;

pub use kindred_core::{color, geometry, identifier, member};

pub use error::KindredError;

use log::{debug, info, trace};

use config::AppConfig;
use export::Exporter;
use forest::{ExpansionState, FamilyForest};
use layout::{Engine, FamilyLayout};
use member::FamilyMember;

/// Builder for decoding, laying out and rendering family trees.
///
/// # Examples
///
/// ```rust,no_run
/// use kindred::{FamilyTreeBuilder, config::AppConfig};
///
/// let source = r#"[{ "id": "ada", "name": "Ada" }]"#;
///
/// let builder = FamilyTreeBuilder::new(AppConfig::default());
///
/// let members = builder.parse(source).expect("Failed to parse");
/// let svg = builder.render_svg(&members).expect("Failed to render");
/// ```
#[derive(Debug, Default)]
pub struct FamilyTreeBuilder {
    config: AppConfig,
}

impl FamilyTreeBuilder {
    /// Create a new builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Decode a JSON array of member records.
    ///
    /// # Errors
    ///
    /// Returns [`KindredError::Parse`] if the document is not a valid member
    /// array.
    pub fn parse(&self, source: &str) -> Result<Vec<FamilyMember>, KindredError> {
        info!("Parsing member document");

        let members = export::json::members_from_str(source)
            .map_err(|err| KindredError::new_parse_error(err, source))?;

        debug!(members_count = members.len(); "Member document parsed successfully");
        trace!(members:?; "Parsed members");

        Ok(members)
    }

    /// Calculate the layout of `members`.
    ///
    /// # Errors
    ///
    /// Returns [`KindredError::Config`] if the layout configuration is invalid.
    pub fn layout<'a>(
        &self,
        members: &'a [FamilyMember],
    ) -> Result<FamilyLayout<'a>, KindredError> {
        self.config.layout().validate().map_err(KindredError::Config)?;

        let engine = Engine::new(*self.config.layout());
        Ok(engine.calculate(members))
    }

    /// Lay out `members` and render the result as an SVG document.
    ///
    /// # Errors
    ///
    /// Returns `KindredError` for invalid configuration or rendering errors.
    pub fn render_svg(&self, members: &[FamilyMember]) -> Result<String, KindredError> {
        let layout = self.layout(members)?;

        let exporter = export::svg::SvgBuilder::new()
            .with_style(self.config.style())
            .build()?;
        let svg = exporter.render_to_string(&layout)?;

        info!("SVG rendered successfully");
        Ok(svg)
    }

    /// Lay out `members` and render the layout itself as a JSON document.
    ///
    /// # Errors
    ///
    /// Returns `KindredError` for invalid configuration or serialization errors.
    pub fn render_layout_json(&self, members: &[FamilyMember]) -> Result<String, KindredError> {
        let layout = self.layout(members)?;
        let json = export::json::JsonExporter::new()
            .pretty()
            .render_to_string(&layout)?;
        Ok(json)
    }

    /// Encode `members` back into a pretty-printed JSON array.
    ///
    /// # Errors
    ///
    /// Returns [`KindredError::Export`] if serialization fails.
    pub fn export_members(&self, members: &[FamilyMember]) -> Result<String, KindredError> {
        Ok(export::json::members_to_string(members)?)
    }

    /// Build the expand/collapse view of `members`.
    pub fn forest<'a>(
        &self,
        members: &'a [FamilyMember],
        expansion: &ExpansionState,
    ) -> FamilyForest<'a> {
        FamilyForest::build(members, expansion)
    }
}
