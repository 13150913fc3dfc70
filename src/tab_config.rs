//! Pure tab-set model: the edit step of a rebuild, free of any widget
use crate::types::{Item, Key};
use log::trace;
use serde::Serialize;

/// A structural change to a tab set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabEdit {
    /// Append tabs after the existing ones. No merging or de-duplication.
    Append(Vec<Item>),
    /// Drop every tab whose value matches any of these keys.
    Remove(Vec<Key>),
}

/// Apply `edit` to a tab list.
///
/// Removal runs one key at a time against the shrinking list, so every tab equal to any
/// listed key goes, duplicates included.
pub fn apply_edit(mut items: Vec<Item>, edit: &TabEdit) -> Vec<Item> {
    match edit {
        TabEdit::Append(extra) => {
            items.extend(extra.iter().cloned());
        }
        TabEdit::Remove(values) => {
            for value in values {
                let before = items.len();
                items.retain(|item| &item.value != value);
                trace!("apply_edit: '{}' removed {} tab(s)", value, before - items.len());
            }
        }
    }
    items
}

/// Everything needed to initialize one tab selector instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabSetConfig {
    /// Identity token the initializer registers the new instance under.
    pub id: String,
    pub widget_type: String,
    pub items: Vec<Item>,
    pub default_value: Option<Key>,
}

impl TabSetConfig {
    pub fn new(id: impl Into<String>, widget_type: impl Into<String>, items: Vec<Item>) -> Self {
        TabSetConfig {
            id: id.into(),
            widget_type: widget_type.into(),
            items,
            default_value: None,
        }
    }

    pub fn with_default_value(mut self, value: Option<Key>) -> Self {
        self.default_value = value;
        self
    }

    pub fn contains(&self, value: &Key) -> bool {
        self.items.iter().any(|item| &item.value == value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tabs() -> Vec<Item> {
        vec![Item::new("A", "a"), Item::new("Five", 5), Item::new("B", "b"), Item::new("Again", "a")]
    }

    #[test]
    fn append_keeps_duplicates_and_order() {
        let out = apply_edit(tabs(), &TabEdit::Append(vec![Item::new("A", "a"), Item::new("C", "c")]));
        let values: Vec<_> = out.iter().map(|i| i.value.as_str()).collect();
        assert_eq!(values, vec!["a", "5", "b", "a", "a", "c"]);
    }

    #[test]
    fn remove_drops_every_match_including_coerced_numbers() {
        let out = apply_edit(tabs(), &TabEdit::Remove(vec![Key::from("a"), Key::from(5)]));
        assert_eq!(out, vec![Item::new("B", "b")]);
    }

    #[test]
    fn remove_of_unknown_value_is_a_no_op() {
        assert_eq!(apply_edit(tabs(), &TabEdit::Remove(vec![Key::from("zzz")])), tabs());
    }

    #[test]
    fn append_then_remove_restores_the_set() {
        let added = apply_edit(tabs(), &TabEdit::Append(vec![Item::new("New", "n")]));
        let restored = apply_edit(added, &TabEdit::Remove(vec![Key::from("n")]));
        assert_eq!(restored, tabs());
    }
}
