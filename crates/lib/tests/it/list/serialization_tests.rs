//! Serde form of PropertyList

use headerlist::{PropertyList, PropertySet};

use crate::helpers::*;

#[test]
fn test_json_preserves_order_and_comments() {
    let mut header = setup_header();
    header.add("HISTORY", "one").unwrap();
    header.add("HISTORY", "two").unwrap();

    let json = serde_json::to_string(&header).unwrap();
    let restored: PropertyList = serde_json::from_str(&json).unwrap();

    assert_eq!(restored, header);
    assert_order(&restored, &["SIMPLE", "BITPIX", "NAXIS", "HISTORY"]);
    assert_eq!(restored.comment("BITPIX").unwrap(), Some("bits per pixel"));
}

#[test]
fn test_card_layout() {
    let mut header = PropertyList::new();
    header.set_with_comment("NAXIS", 2, "axes").unwrap();
    header.set("OBJECT", "M31").unwrap();

    let json = serde_json::to_value(&header).unwrap();
    assert_eq!(
        json,
        serde_json::json!([
            { "name": "NAXIS", "values": [{ "int": 2 }], "comment": "axes" },
            { "name": "OBJECT", "values": [{ "text": "M31" }] },
        ])
    );
}

#[test]
fn test_invalid_cards_are_rejected() {
    let duplicate = r#"[
        { "name": "A", "values": [{ "int": 1 }] },
        { "name": "A", "values": [{ "int": 2 }] }
    ]"#;
    assert!(serde_json::from_str::<PropertyList>(duplicate).is_err());

    let mixed = r#"[{ "name": "A", "values": [{ "int": 1 }, { "text": "x" }] }]"#;
    assert!(serde_json::from_str::<PropertyList>(mixed).is_err());

    let empty = r#"[{ "name": "A", "values": [] }]"#;
    assert!(serde_json::from_str::<PropertyList>(empty).is_err());

    let nested = r#"[{ "name": "A", "values": [{ "set": { "B": [{ "int": 1 }] } }] }]"#;
    assert!(serde_json::from_str::<PropertyList>(nested).is_err());
}

#[test]
fn test_set_json_roundtrip_keeps_nesting() {
    let set = setup_nested_set();
    let json = serde_json::to_string(&set).unwrap();
    let restored: PropertySet = serde_json::from_str(&json).unwrap();

    assert_eq!(restored, set);
    assert!(restored.is_set("TEL").unwrap());
}
