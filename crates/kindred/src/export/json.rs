//! JSON documents: the member collection and the render model.
//!
//! The member collection is written as a plain pretty-printed array of
//! records with no envelope or schema version, and read back the same way.

use std::io;

use log::info;
use serde::Serialize;

use kindred_core::{
    geometry::{Point, Size},
    identifier::Id,
    member::FamilyMember,
};

use super::{Error, Exporter};
use crate::layout::{ConnectorKind, FamilyLayout};

/// Decode a JSON array of member records.
///
/// # Errors
///
/// Returns the decoder error, which carries the line and column of the
/// failure.
pub fn members_from_str(src: &str) -> Result<Vec<FamilyMember>, serde_json::Error> {
    serde_json::from_str(src)
}

/// Encode members as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns [`Error::Render`] if serialization fails.
pub fn members_to_string(members: &[FamilyMember]) -> Result<String, Error> {
    serde_json::to_string_pretty(members).map_err(|err| Error::Render(err.to_string()))
}

/// Writes the render model of a layout as JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonExporter {
    pretty: bool,
}

impl JsonExporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indent the output.
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }
}

impl Exporter for JsonExporter {
    fn export_layout<W: io::Write>(&self, layout: &FamilyLayout, writer: W) -> Result<(), Error> {
        let document = LayoutDocument::from_layout(layout);
        let result = if self.pretty {
            serde_json::to_writer_pretty(writer, &document)
        } else {
            serde_json::to_writer(writer, &document)
        };
        result.map_err(|err| match err.io_error_kind() {
            Some(kind) => Error::Io(io::Error::new(kind, err)),
            None => Error::Render(err.to_string()),
        })?;

        info!("Layout JSON written");
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct LayoutDocument<'l> {
    placements: Vec<PlacementRecord<'l>>,
    connectors: Vec<ConnectorRecord<'l>>,
    bounds: Size,
    skipped: &'l [Id],
}

#[derive(Debug, Serialize)]
struct PlacementRecord<'l> {
    id: Id,
    name: &'l str,
    x: f32,
    y: f32,
    generation: usize,
}

#[derive(Debug, Serialize)]
struct ConnectorRecord<'l> {
    kind: ConnectorKind,
    from: Id,
    to: Id,
    path: &'l [Point],
}

impl<'l> LayoutDocument<'l> {
    fn from_layout(layout: &'l FamilyLayout) -> Self {
        Self {
            placements: layout
                .placements()
                .iter()
                .map(|placement| PlacementRecord {
                    id: placement.id(),
                    name: placement.member().name(),
                    x: placement.x(),
                    y: placement.y(),
                    generation: placement.generation(),
                })
                .collect(),
            connectors: layout
                .connectors()
                .iter()
                .map(|connector| ConnectorRecord {
                    kind: connector.kind(),
                    from: connector.from(),
                    to: connector.to(),
                    path: connector.path(),
                })
                .collect(),
            bounds: layout.size(),
            skipped: layout.skipped(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;
    use crate::layout::Engine;

    const FAMILY: &str = r#"[
        { "id": "a", "name": "Alice", "gender": "female", "spouse": "b", "children": ["c"] },
        { "id": "b", "name": "Bob", "gender": "male", "spouse": "a", "children": ["c"] },
        { "id": "c", "name": "Carol", "parents": ["a", "b"], "birthDate": "1980-01-01" },
        { "id": "lost", "name": "Lost", "parents": ["nobody"] }
    ]"#;

    #[test]
    fn test_members_round_trip_preserves_relationships() {
        let members = members_from_str(FAMILY).unwrap();
        let encoded = members_to_string(&members).unwrap();
        let decoded = members_from_str(&encoded).unwrap();

        assert_eq!(decoded, members);
        assert!(encoded.contains("\n  {"));
    }

    #[test]
    fn test_members_from_str_reports_position() {
        let err = members_from_str("[\n  { \"id\": \"a\", }\n]").unwrap_err();
        assert_eq!(err.line(), 2);
    }

    #[test]
    fn test_layout_document_shape() {
        let members = members_from_str(FAMILY).unwrap();
        let layout = Engine::default().calculate(&members);
        let json = JsonExporter::new().render_to_string(&layout).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["placements"].as_array().unwrap().len(), 3);
        assert_eq!(value["placements"][0]["id"], "a");
        assert_eq!(value["placements"][0]["name"], "Alice");
        assert_eq!(value["placements"][2]["generation"], 1);
        assert_eq!(value["connectors"][0]["kind"], "spouse");
        assert_eq!(value["connectors"][1]["kind"], "parent-child");
        assert_eq!(value["connectors"][1]["path"].as_array().unwrap().len(), 4);
        assert_eq!(value["skipped"], serde_json::json!(["lost"]));
        assert!(value["bounds"]["width"].as_f64().unwrap() > 0.0);
    }
}
