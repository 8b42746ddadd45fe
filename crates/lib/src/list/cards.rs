//! Serde form of a [`PropertyList`]: an ordered sequence of cards.
//!
//! Deserialization goes through the normal mutation API, so every list
//! invariant is re-checked on the way in.

use serde::{Deserialize, Serialize};

use super::PropertyList;
use crate::{Error, Value};

/// One serialized entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Card {
    name: String,
    values: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    comment: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub(crate) struct Cards(Vec<Card>);

impl From<PropertyList> for Cards {
    fn from(list: PropertyList) -> Self {
        Cards(
            list.iter()
                .map(|entry| Card {
                    name: entry.name.to_string(),
                    values: entry.values.to_vec(),
                    comment: entry.comment.map(str::to_string),
                })
                .collect(),
        )
    }
}

impl TryFrom<Cards> for PropertyList {
    type Error = Error;

    fn try_from(cards: Cards) -> Result<Self, Error> {
        let mut list = PropertyList::new();
        for card in cards.0 {
            if list.exists(&card.name) {
                return Err(Error::invalid(format!("duplicate card {}", card.name)));
            }
            if card.values.iter().any(Value::is_set) {
                return Err(Error::invalid(format!(
                    "card {} holds a nested set",
                    card.name
                )));
            }
            match card.comment {
                Some(comment) => list.set_array_with_comment(&card.name, card.values, comment)?,
                None => list.set_array(&card.name, card.values)?,
            }
        }
        Ok(list)
    }
}
