//! Ordering, comment and read/write behavior of PropertyList

use headerlist::{PropertyList, Value, ValueType};

use crate::helpers::*;

#[test]
fn test_exposure_history_scenario() {
    let mut header = PropertyList::new();
    header
        .set_with_comment("EXPTIME", 30.0, "exposure seconds")
        .unwrap();
    header.add("HISTORY", "frame1").unwrap();
    header.add("HISTORY", "frame2").unwrap();

    assert_order(&header, &["EXPTIME", "HISTORY"]);
    assert_eq!(
        header.get_array::<String>("HISTORY").unwrap(),
        vec!["frame1", "frame2"]
    );
    assert_eq!(header.comment("EXPTIME").unwrap(), Some("exposure seconds"));
    assert_eq!(header.comment("HISTORY").unwrap(), None);
}

#[test]
fn test_get_returns_last_value() {
    let mut header = PropertyList::new();
    for n in [1, 2, 3] {
        header.add("H", n).unwrap();
    }

    assert_eq!(header.get_array::<i32>("H").unwrap(), vec![1, 2, 3]);
    assert_eq!(header.get::<i32>("H").unwrap(), 3);
    assert!(header.is_array("H").unwrap());
    assert_eq!(header.value_count("H").unwrap(), 3);
}

#[test]
fn test_get_errors() {
    let header = setup_header();

    let err = header.get::<i32>("MISSING").unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.name(), Some("MISSING"));

    let err = header.get::<String>("NAXIS").unwrap_err();
    assert!(err.is_type_error());
    assert!(header.get_array::<f64>("NAXIS").unwrap_err().is_type_error());
    assert!(header.comment("MISSING").unwrap_err().is_not_found());
}

#[test]
fn test_get_or_default() {
    let header = setup_header();

    assert_eq!(header.get_or("GAIN", 1.5).unwrap(), 1.5);
    assert_eq!(header.get_or("NAXIS", 0).unwrap(), 2);
    // A default does not hide a type mismatch
    assert!(header.get_or("NAXIS", "two").unwrap_err().is_type_error());
}

#[test]
fn test_position_stability() {
    let mut header = setup_header();
    header.set("BITPIX", -32).unwrap();
    header.add("SIMPLE", false).unwrap();
    header.set_comment("NAXIS", "number of axes").unwrap();

    assert_order(&header, &["SIMPLE", "BITPIX", "NAXIS"]);
    assert_eq!(header.comment("BITPIX").unwrap(), Some("bits per pixel"));
}

#[test]
fn test_new_names_go_to_tail() {
    let mut header = setup_header();
    header.add("HISTORY", "created").unwrap();
    header.set("EXTEND", true).unwrap();
    header.set_array("NAXISN", [512, 512]).unwrap();

    assert_order(
        &header,
        &["SIMPLE", "BITPIX", "NAXIS", "HISTORY", "EXTEND", "NAXISN"],
    );
}

#[test]
fn test_ordered_names_is_a_snapshot() {
    let mut header = setup_header();
    let snapshot = header.ordered_names();

    header.set("EXTEND", true).unwrap();
    header.remove("SIMPLE").unwrap();

    assert_eq!(snapshot, vec!["SIMPLE", "BITPIX", "NAXIS"]);
}

#[test]
fn test_comment_replace_semantics() {
    let mut header = setup_header();

    header.add_with_comment("BITPIX", 8, "replaced").unwrap();
    assert_eq!(header.comment("BITPIX").unwrap(), Some("replaced"));
    assert_eq!(header.get_array::<i32>("BITPIX").unwrap(), vec![16, 8]);

    // Empty comment is a comment
    header.set_with_comment("NAXIS", 3, "").unwrap();
    assert_eq!(header.comment("NAXIS").unwrap(), Some(""));
    assert_eq!(header.comment("SIMPLE").unwrap(), None);
}

#[test]
fn test_remove_existing_and_missing() {
    let mut header = setup_header();

    let removed = header.remove("BITPIX").unwrap();
    assert_eq!(removed, vec![Value::Int(16)]);
    assert_order(&header, &["SIMPLE", "NAXIS"]);
    assert!(header.get::<i32>("BITPIX").unwrap_err().is_not_found());
    assert!(header.comment("BITPIX").unwrap_err().is_not_found());

    let err = header.remove("BITPIX").unwrap_err();
    assert!(err.is_not_found());
    assert_order(&header, &["SIMPLE", "NAXIS"]);
    assert_consistent(&header);
}

#[test]
fn test_failed_mutations_change_nothing() {
    let mut header = setup_header();
    let before = header.clone();

    assert!(header.add("NAXIS", "two").is_err());
    assert!(header.add_array("NAXIS", [Value::Int(3), Value::Bool(true)]).is_err());
    assert!(header.set("", 1).is_err());
    assert!(header.set_array("EMPTY", Vec::<f64>::new()).is_err());
    assert!(header.set_comment("MISSING", "x").is_err());

    assert_eq!(header, before);
}

#[test]
fn test_exact_typed_reads() {
    let mut header = PropertyList::new();
    header.set("INT", 1).unwrap();
    header.set("LONG", 1i64).unwrap();
    header.set("FLOAT", 1.0f32).unwrap();
    header.set("DOUBLE", 1.0).unwrap();

    assert_eq!(header.type_of("INT").unwrap(), ValueType::Int);
    assert_eq!(header.type_of("LONG").unwrap(), ValueType::Long);
    assert!(header.get::<i64>("INT").is_err());
    assert!(header.get::<f64>("FLOAT").is_err());

    assert_eq!(header.get_as_long("INT").unwrap(), 1);
    assert_eq!(header.get_as_double("FLOAT").unwrap(), 1.0);
    assert_eq!(header.get_as_int("LONG").unwrap_err().name(), Some("LONG"));
}

#[test]
fn test_datetime_values() {
    use chrono::{TimeZone, Utc};

    let observed = Utc.with_ymd_and_hms(2024, 3, 1, 22, 15, 0).unwrap();
    let mut header = PropertyList::new();
    header
        .set_with_comment("DATE-OBS", observed, "start of exposure")
        .unwrap();

    assert_eq!(header.get::<chrono::DateTime<Utc>>("DATE-OBS").unwrap(), observed);
    assert_eq!(
        header.to_string(),
        "DATE-OBS = 2024-03-01T22:15:00Z // start of exposure\n"
    );
}

#[test]
fn test_move_to_end() {
    let mut header = setup_header();
    header.move_to_end("SIMPLE").unwrap();
    assert_order(&header, &["BITPIX", "NAXIS", "SIMPLE"]);
    assert!(header.move_to_end("MISSING").unwrap_err().is_not_found());
}

#[test]
fn test_deep_copy_independence() {
    let mut header = setup_header();
    header.add("X", 1).unwrap();

    let mut copy = header.deep_copy();
    copy.add("X", 2).unwrap();
    copy.add("Y", 3).unwrap();
    copy.set_comment("SIMPLE", "changed").unwrap();

    assert_eq!(header.get_array::<i32>("X").unwrap(), vec![1]);
    assert!(!header.exists("Y"));
    assert_eq!(header.comment("SIMPLE").unwrap(), None);

    // Returned arrays are owned copies
    let mut values = header.get_array::<i32>("X").unwrap();
    values.push(99);
    assert_eq!(header.value_count("X").unwrap(), 1);
}

#[test]
fn test_clone_has_same_guarantee() {
    let header = setup_header();
    let mut assigned = header.clone();
    assigned.set("BITPIX", 8).unwrap();

    assert_eq!(header.get::<i32>("BITPIX").unwrap(), 16);
    assert_ne!(header, assigned);
}

#[test]
fn test_order_store_consistency_under_mixed_operations() {
    let mut header = PropertyList::new();
    for i in 0..20 {
        let name = format!("KEY{}", i % 7);
        match i % 4 {
            0 => header.set(&name, i).unwrap(),
            1 => header.add(&name, i).unwrap_or(()),
            2 => {
                let _ = header.remove(&name);
            }
            _ => header.set_with_comment(&name, i, "note").unwrap(),
        }
        assert_consistent(&header);
    }
}

#[test]
fn test_render_options() {
    let mut header = setup_header();
    header.set("TEL.ALT", 45.5).unwrap();

    assert_eq!(
        header.to_string(),
        "SIMPLE = true\nBITPIX = 16 // bits per pixel\nNAXIS = 2\nTEL.ALT = 45.5\n"
    );
    let options = headerlist::RenderOptions::default()
        .top_level_only()
        .with_indent("> ");
    assert_eq!(
        header.render(&options),
        "> SIMPLE = true\n> BITPIX = 16 // bits per pixel\n> NAXIS = 2\n"
    );
}

#[test]
fn test_value_map_view() {
    use headerlist::ValueMap;

    fn fill(map: &mut impl ValueMap) -> headerlist::Result<()> {
        map.replace_values("NAXISN", vec![Value::Int(10), Value::Int(20)])?;
        map.append_value("NAXISN", Value::Int(30))?;
        map.append_value("OBJECT", Value::from("M31"))
    }

    let mut header = setup_header();
    fill(&mut header).unwrap();

    assert_order(&header, &["SIMPLE", "BITPIX", "NAXIS", "NAXISN", "OBJECT"]);
    assert_eq!(header.get_array::<i32>("NAXISN").unwrap(), vec![10, 20, 30]);
    assert!(header.append_value("OBJECT", Value::Int(1)).is_err());
    assert_eq!(header.remove_values("OBJECT"), Some(vec![Value::from("M31")]));
    assert_eq!(header.remove_values("OBJECT"), None);
    assert_consistent(&header);
}
