//! Integration tests for the FamilyTreeBuilder API

use kindred::{
    FamilyTreeBuilder, KindredError,
    config::{AppConfig, LayoutConfig, StyleConfig},
    forest::ExpansionState,
    identifier::Id,
};

const FAMILY: &str = r#"[
    {
        "id": "john",
        "name": "John Smith",
        "gender": "male",
        "birthDate": "1920-03-15",
        "deathDate": "1995-08-22",
        "isAlive": false,
        "spouse": "mary",
        "children": ["robert", "linda"]
    },
    {
        "id": "mary",
        "name": "Mary Smith",
        "gender": "female",
        "spouse": "john",
        "children": ["robert", "linda"]
    },
    { "id": "robert", "name": "Robert Smith", "gender": "male", "parents": ["john", "mary"] },
    { "id": "linda", "name": "Linda Smith", "gender": "female", "parents": ["john", "mary"] }
]"#;

#[test]
fn test_parse_family_document() {
    let builder = FamilyTreeBuilder::default();
    let members = builder.parse(FAMILY).expect("Failed to parse family");

    assert_eq!(members.len(), 4);
    assert_eq!(members[0].spouse(), Some(Id::new("mary")));
    assert!(!members[0].is_alive());
    assert!(members[2].is_alive(), "isAlive should default to true");
}

#[test]
fn test_parse_invalid_document_returns_error() {
    let builder = FamilyTreeBuilder::default();

    let result = builder.parse("[{ \"id\": \"a\" ");
    match result {
        Err(KindredError::Parse { src, .. }) => assert!(src.starts_with("[{")),
        other => panic!("Expected a parse error, got {other:?}"),
    }

    assert!(builder.parse(r#"{ "id": "a", "name": "A" }"#).is_err());
}

#[test]
fn test_render_svg() {
    let builder = FamilyTreeBuilder::default();
    let members = builder.parse(FAMILY).expect("Failed to parse family");
    let svg = builder.render_svg(&members).expect("Failed to render");

    assert!(svg.contains("<svg"), "Output should contain SVG tag");
    assert!(svg.contains("</svg>"), "Output should be complete SVG");
    assert!(svg.contains("Linda Smith"));
}

#[test]
fn test_render_layout_json() {
    let builder = FamilyTreeBuilder::default();
    let members = builder.parse(FAMILY).expect("Failed to parse family");
    let json = builder
        .render_layout_json(&members)
        .expect("Failed to render layout");

    let value: serde_json::Value = serde_json::from_str(&json).expect("Invalid JSON");
    assert_eq!(value["placements"].as_array().map(Vec::len), Some(4));
    // One spouse link plus one elbow per child.
    assert_eq!(value["connectors"].as_array().map(Vec::len), Some(3));
}

#[test]
fn test_export_members_round_trip() {
    let builder = FamilyTreeBuilder::default();
    let members = builder.parse(FAMILY).expect("Failed to parse family");

    let exported = builder.export_members(&members).expect("Failed to export");
    let reparsed = builder.parse(&exported).expect("Failed to reparse");
    assert_eq!(reparsed, members);
}

#[test]
fn test_invalid_layout_config_is_rejected() {
    let layout: LayoutConfig = toml::from_str("level_step = -1.0").expect("Valid TOML");
    let builder = FamilyTreeBuilder::new(AppConfig::new(layout, StyleConfig::default()));
    let members = builder.parse(FAMILY).expect("Failed to parse family");

    let result = builder.render_svg(&members);
    assert!(matches!(result, Err(KindredError::Config(_))));
}

#[test]
fn test_custom_spacing_changes_layout() {
    let layout = LayoutConfig::default().with_spouse_offset(200.0);
    let builder = FamilyTreeBuilder::new(AppConfig::new(layout, StyleConfig::default()));
    let members = builder.parse(FAMILY).expect("Failed to parse family");

    let layout = builder.layout(&members).expect("Failed to lay out");
    let john = layout.placement(Id::new("john")).expect("john placed");
    let mary = layout.placement(Id::new("mary")).expect("mary placed");
    assert!((mary.x() - john.x() - 200.0).abs() < f32::EPSILON);
}

#[test]
fn test_forest_view() {
    let builder = FamilyTreeBuilder::default();
    let members = builder.parse(FAMILY).expect("Failed to parse family");

    let expansion: ExpansionState = [Id::new("john")].into_iter().collect();
    let forest = builder.forest(&members, &expansion);
    assert_eq!(forest.roots().count(), 2);
    assert_eq!(forest.visible().len(), 4);
}

#[test]
fn test_builder_reusability() {
    let builder = FamilyTreeBuilder::default();

    let first = builder.parse(FAMILY).expect("Failed to parse first");
    let second = builder
        .parse(r#"[{ "id": "solo", "name": "Solo" }]"#)
        .expect("Failed to parse second");

    let svg1 = builder.render_svg(&first).expect("Failed to render first");
    let svg2 = builder.render_svg(&second).expect("Failed to render second");

    assert!(svg1.contains("<svg"), "First SVG should be valid");
    assert!(svg2.contains("<svg"), "Second SVG should be valid");
}
