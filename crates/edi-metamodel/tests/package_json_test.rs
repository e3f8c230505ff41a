//! Packages handed to JSON tooling and read back

use edi_metamodel::annotation::{EXTENDED_METADATA_SOURCE, SMOOKS_SOURCE, extended, keys};
use edi_metamodel::{
    Annotated, AttributeDescriptor, ClassDescriptor, ContentKind, Cursor, PackageDescriptor,
    PrimitiveType, ReferenceDescriptor, UpperBound, annotate, set_extended,
};

/// DocumentRoot -> Message -> segment (unbounded)
fn message_package() -> PackageDescriptor {
    let mut package = PackageDescriptor::new("invoic");
    package.ns_uri = Some("urn:invoic".to_string());
    annotate(&mut package, keys::DESCRIPTION_NAME, Some("INVOIC"));

    let mut segment = ClassDescriptor::new("Moa", ContentKind::ElementOnly);
    annotate(&mut segment, keys::SEGCODE, Some("MOA"));
    annotate(&mut segment, keys::SEGCODE_PATTERN, Some("^MOA"));
    annotate(&mut segment, keys::TRUNCABLE, Some("false"));
    let mut amount = AttributeDescriptor::new("amount", 1, PrimitiveType::Decimal);
    annotate(&mut amount, keys::TYPE, Some("component"));
    set_extended(&mut amount, extended::NAME, "amount");
    segment.add_feature(amount);
    let segment_id = package.add_class(segment);

    let mut message = ClassDescriptor::new("Message", ContentKind::ElementOnly);
    let mut reference =
        ReferenceDescriptor::containment("MOA", segment_id, 0, UpperBound::Unbounded);
    annotate(&mut reference, keys::MAX_OCCURS, Some("-1"));
    message.add_feature(reference);
    let message_id = package.add_class(message);

    let mut document_root = ClassDescriptor::new("DocumentRoot", ContentKind::Mixed);
    set_extended(&mut document_root, extended::NAME, "");
    document_root.add_feature(ReferenceDescriptor::containment(
        "Message",
        message_id,
        0,
        UpperBound::Bounded(1),
    ));
    let document_root_id = package.add_class(document_root);

    package.set_root(message_id);
    package.set_document_root(document_root_id);
    package
}

#[test]
fn test_json_round_trip_keeps_structure() -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&message_package())?;
    let package: PackageDescriptor = serde_json::from_str(&json)?;

    assert_eq!(package.name, "invoic");
    assert_eq!(package.ns_uri.as_deref(), Some("urn:invoic"));
    assert_eq!(package.smooks(keys::DESCRIPTION_NAME), Some("INVOIC"));
    assert_eq!(package.root().map(|c| c.name.as_str()), Some("Message"));

    let segment = Cursor::document_root(&package)?.navigate("Message/MOA")?;
    assert_eq!(segment.class().name, "Moa");
    let amount = segment.attribute("amount")?;
    assert_eq!(amount.data_type, PrimitiveType::Decimal);
    assert_eq!(amount.extended(extended::NAME), Some("amount"));
    Ok(())
}

#[test]
fn test_json_round_trip_keeps_annotation_order() -> anyhow::Result<()> {
    let json = serde_json::to_string(&message_package())?;
    let package: PackageDescriptor = serde_json::from_str(&json)?;

    let segment = package
        .class_by_name("Moa")
        .ok_or_else(|| anyhow::anyhow!("Moa class missing"))?;
    let details = segment
        .annotations()
        .source(SMOOKS_SOURCE)
        .ok_or_else(|| anyhow::anyhow!("no domain annotations"))?;
    let names: Vec<&str> = details.iter().map(|(key, _)| key).collect();
    assert_eq!(names, vec!["segcode", "segcodePattern", "truncable"]);
    Ok(())
}

#[test]
fn test_unbounded_reference_survives_round_trip() -> anyhow::Result<()> {
    let json = serde_json::to_string(&message_package())?;
    let package: PackageDescriptor = serde_json::from_str(&json)?;

    let message = package.root().ok_or_else(|| anyhow::anyhow!("no root"))?;
    let reference = message
        .references()
        .next()
        .ok_or_else(|| anyhow::anyhow!("no reference"))?;
    assert_eq!(reference.upper_bound, UpperBound::Unbounded);
    assert_eq!(reference.smooks(keys::MAX_OCCURS), Some("-1"));
    Ok(())
}

#[test]
fn test_document_root_keeps_empty_binding_name() -> anyhow::Result<()> {
    let json = serde_json::to_string(&message_package())?;
    let package: PackageDescriptor = serde_json::from_str(&json)?;

    let document_root = package
        .document_root()
        .ok_or_else(|| anyhow::anyhow!("no document root"))?;
    assert_eq!(document_root.content_kind, ContentKind::Mixed);
    assert_eq!(
        document_root.annotation(EXTENDED_METADATA_SOURCE, extended::NAME),
        Some("")
    );
    assert!(document_root.annotations().source(SMOOKS_SOURCE).is_none());
    Ok(())
}
