//! External formatters walking a PropertyList

use std::fmt::Write;

use headerlist::{Entry, HeaderVisitor, PropertyList, Value};

use crate::helpers::*;

/// Writes fixed-width header cards, one per value
#[derive(Default)]
struct CardWriter {
    cards: Vec<String>,
}

impl HeaderVisitor for CardWriter {
    type Error = std::fmt::Error;

    fn visit_entry(&mut self, entry: Entry<'_>) -> Result<(), Self::Error> {
        for value in entry.values {
            let mut card = String::new();
            write!(card, "{:<8}= {:>20}", entry.name, value.to_string())?;
            if let Some(comment) = entry.comment {
                write!(card, " / {comment}")?;
            }
            self.cards.push(card);
        }
        Ok(())
    }
}

#[test]
fn test_visitor_sees_entries_in_order() {
    let mut header = setup_header();
    header.add("HISTORY", "a").unwrap();
    header.add("HISTORY", "b").unwrap();

    let mut writer = CardWriter::default();
    header.accept(&mut writer).unwrap();

    assert_eq!(writer.cards.len(), 5);
    assert_eq!(
        writer.cards[1],
        "BITPIX  =                   16 / bits per pixel"
    );
    assert!(writer.cards[3].starts_with("HISTORY = "));
    assert!(writer.cards[4].ends_with('b'));
}

#[test]
fn test_closure_visitor_can_stop_early() {
    let header = setup_header();
    let mut seen = Vec::new();

    let result = header.accept(&mut |entry: Entry<'_>| {
        seen.push(entry.name.to_string());
        if entry.name == "BITPIX" {
            return Err("stop");
        }
        Ok(())
    });

    assert_eq!(result, Err("stop"));
    assert_eq!(seen, vec!["SIMPLE", "BITPIX"]);
}

#[test]
fn test_formatter_contract_via_names() {
    let header = setup_header();

    let mut rendered = Vec::new();
    for name in header.ordered_names() {
        let values = header.values(&name).unwrap();
        let comment = header.comment(&name).unwrap();
        rendered.push((name, values.to_vec(), comment.map(str::to_string)));
    }

    assert_eq!(
        rendered,
        vec![
            ("SIMPLE".to_string(), vec![Value::Bool(true)], None),
            (
                "BITPIX".to_string(),
                vec![Value::Int(16)],
                Some("bits per pixel".to_string())
            ),
            ("NAXIS".to_string(), vec![Value::Int(2)], None),
        ]
    );
}

#[test]
fn test_iterating_a_reference() {
    let mut header = PropertyList::new();
    header.set_array("NAXISN", [100, 200]).unwrap();

    for entry in &header {
        assert!(entry.is_array());
        assert_eq!(entry.last(), Some(&Value::Int(200)));
    }
}
