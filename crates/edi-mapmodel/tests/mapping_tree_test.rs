//! Building mapping trees the way a grammar parser does

use edi_mapmodel::{
    Component, Delimiters, Description, Field, MappingDocument, MappingNode, MaxOccurs, Segment,
    SegmentGroup, ValueNode,
};

/// Parsers append children one by one while reading the grammar
fn parsed_root() -> anyhow::Result<SegmentGroup> {
    let mut root = SegmentGroup::new("Invoic");
    root.add_child(Segment::new("beginningOfMessage", "BGM")?.with_child(Field::new("number")));

    let mut lines = SegmentGroup::new("segmentGroup25").with_occurs(0, MaxOccurs::Unbounded);
    lines.add_child(
        Segment::new("lineItem", "LIN")?.with_child(
            Field::new("C212")
                .with_component(Component::new("itemNumber").required(true))
                .with_component(
                    Component::new("itemType")
                        .with_value(ValueNode::default().with_type_class("string")),
                ),
        ),
    );
    root.add_child(lines);
    Ok(root)
}

#[test]
fn test_document_from_parser_output() -> anyhow::Result<()> {
    let delimiters = Delimiters::new("'", ":", "+")
        .with_field_repeat("*")
        .with_escape("?");
    let doc = MappingDocument::new(Description::new("INVOIC", "D01B").with_namespace("urn:invoic"))
        .with_delimiters(delimiters)
        .with_src("invoic.xml")
        .with_root(parsed_root()?);

    assert_eq!(doc.delimiters, Delimiters::default());
    assert_eq!(doc.description.namespace.as_deref(), Some("urn:invoic"));

    let root = doc.root.as_ref().ok_or_else(|| anyhow::anyhow!("no root"))?;
    let tags: Vec<&str> = root.children.iter().map(MappingNode::tag).collect();
    assert_eq!(tags, vec!["beginningOfMessage", "segmentGroup25"]);
    assert_eq!(root.segcode(), Some("BGM"));
    Ok(())
}

#[test]
fn test_nested_group_keeps_occurs_and_fields() -> anyhow::Result<()> {
    let root = parsed_root()?;

    let Some(MappingNode::Group(lines)) = root.children.get(1) else {
        anyhow::bail!("expected a nested group");
    };
    assert_eq!(lines.min_occurs, 0);
    assert!(lines.max_occurs.is_unbounded());
    assert_eq!(lines.segcode(), Some("LIN"));

    let Some(MappingNode::Segment(line)) = lines.children.first() else {
        anyhow::bail!("expected a segment");
    };
    assert!(line.segcode_pattern.is_match("LIN+1++4000862141404:SRS"));

    let Some(MappingNode::Field(item)) = line.group.children.first() else {
        anyhow::bail!("expected a field");
    };
    assert!(item.is_composite());
    assert!(item.components[0].required);
    assert_eq!(item.components[1].value.type_class.as_deref(), Some("string"));
    Ok(())
}
