//! SVG preview of a family layout.
//!
//! Cards are drawn as rounded rectangles at their placements, colored by
//! gender, with the member's name and life span. Connectors are drawn
//! underneath as plain polylines.

use std::io;

use log::{debug, info};
use svg::{Document, node::element as svg_element};

use kindred_core::{
    color::Color,
    member::{FamilyMember, Gender},
};

use super::{Error, Exporter};
use crate::{
    config::StyleConfig,
    layout::{Connector, FamilyLayout, Placement},
};

const CARD_CORNER_RADIUS: f32 = 8.0;
const NAME_FONT_SIZE: f32 = 12.0;
const DETAIL_FONT_SIZE: f32 = 10.0;
const CONNECTOR_WIDTH: f32 = 2.0;

/// Builder for the SVG exporter.
///
/// Style colors are validated in [`SvgBuilder::build`], so rendering itself
/// cannot fail on bad configuration.
#[derive(Debug, Default)]
pub struct SvgBuilder<'a> {
    style: Option<&'a StyleConfig>,
}

impl<'a> SvgBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the given style instead of the default one.
    pub fn with_style(mut self, style: &'a StyleConfig) -> Self {
        self.style = Some(style);
        self
    }

    /// Resolve all style colors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if a configured color cannot be parsed.
    pub fn build(self) -> Result<Svg, Error> {
        let default_style = StyleConfig::default();
        let style = self.style.unwrap_or(&default_style);

        Ok(Svg {
            background_color: style.background_color().map_err(Error::Render)?,
            connector_color: style.connector_color().map_err(Error::Render)?,
            male_color: style.card_color(Gender::Male).map_err(Error::Render)?,
            female_color: style.card_color(Gender::Female).map_err(Error::Render)?,
            other_color: style.card_color(Gender::Other).map_err(Error::Render)?,
        })
    }
}

/// SVG exporter with resolved colors.
#[derive(Debug, Clone)]
pub struct Svg {
    background_color: Option<Color>,
    connector_color: Color,
    male_color: Color,
    female_color: Color,
    other_color: Color,
}

impl Svg {
    /// Render the layout to an SVG document sized to the layout's surface.
    pub fn render_document(&self, layout: &FamilyLayout) -> Document {
        let size = layout.size();
        debug!(width = size.width(), height = size.height(); "Rendering SVG document");

        let mut doc = Document::new()
            .set("viewBox", format!("0 0 {} {}", size.width(), size.height()))
            .set("width", size.width())
            .set("height", size.height());

        if let Some(background) = &self.background_color {
            doc = doc.add(
                svg_element::Rectangle::new()
                    .set("width", "100%")
                    .set("height", "100%")
                    .set("fill", background),
            );
        }

        let connectors = layout
            .connectors()
            .iter()
            .fold(svg_element::Group::new().set("class", "connectors"), |group, connector| {
                group.add(self.render_connector(connector))
            });
        let cards = layout
            .placements()
            .iter()
            .fold(svg_element::Group::new().set("class", "members"), |group, placement| {
                group.add(self.render_card(placement))
            });

        doc.add(connectors).add(cards)
    }

    fn render_connector(&self, connector: &Connector) -> svg_element::Path {
        let path_data = connector
            .path()
            .iter()
            .enumerate()
            .map(|(idx, point)| {
                let command = if idx == 0 { "M" } else { "L" };
                format!("{command} {} {}", point.x(), point.y())
            })
            .collect::<Vec<_>>()
            .join(" ");

        svg_element::Path::new()
            .set("d", path_data)
            .set("fill", "none")
            .set("stroke", &self.connector_color)
            .set("stroke-width", CONNECTOR_WIDTH)
            .set("data-from", connector.from().to_string())
            .set("data-to", connector.to().to_string())
    }

    fn render_card(&self, placement: &Placement) -> svg_element::Group {
        let member = placement.member();
        let bounds = placement.bounds();
        let center_x = bounds.center().x();

        let card = svg_element::Rectangle::new()
            .set("x", bounds.min_x())
            .set("y", bounds.min_y())
            .set("width", bounds.width())
            .set("height", bounds.height())
            .set("rx", CARD_CORNER_RADIUS)
            .set("fill", self.card_color(member))
            .set("stroke", "white")
            .set("stroke-width", CONNECTOR_WIDTH);

        let name = svg_element::Text::new(member.name())
            .set("x", center_x)
            .set("y", bounds.center().y())
            .set("text-anchor", "middle")
            .set("dominant-baseline", "central")
            .set("font-family", "sans-serif")
            .set("font-size", NAME_FONT_SIZE)
            .set("fill", "white");

        let mut group = svg_element::Group::new()
            .set("data-id", member.id().to_string())
            .add(card)
            .add(name);

        if let Some(years) = life_span(member) {
            group = group.add(
                svg_element::Text::new(years)
                    .set("x", center_x)
                    .set("y", bounds.max_y() - DETAIL_FONT_SIZE)
                    .set("text-anchor", "middle")
                    .set("font-family", "sans-serif")
                    .set("font-size", DETAIL_FONT_SIZE)
                    .set("fill", "white"),
            );
        }

        group
    }

    fn card_color(&self, member: &FamilyMember) -> &Color {
        match member.gender() {
            Gender::Male => &self.male_color,
            Gender::Female => &self.female_color,
            Gender::Other => &self.other_color,
        }
    }
}

impl Exporter for Svg {
    fn export_layout<W: io::Write>(
        &self,
        layout: &FamilyLayout,
        mut writer: W,
    ) -> Result<(), Error> {
        let doc = self.render_document(layout);
        write!(writer, "{doc}")?;
        info!("SVG document written");
        Ok(())
    }
}

/// "1920–1995", "b. 1985", or nothing when no year is known.
fn life_span(member: &FamilyMember) -> Option<String> {
    let year = |date: &str| date.get(..4).map(str::to_owned);
    let birth = member.birth_date().and_then(year);
    let death = member.death_date().and_then(year);
    match (birth, death) {
        (Some(birth), Some(death)) => Some(format!("{birth}–{death}")),
        (Some(birth), None) => Some(format!("b. {birth}")),
        (None, Some(death)) => Some(format!("d. {death}")),
        (None, None) => None,
    }
}
