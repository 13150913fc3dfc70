//! Key → display value projection of arbitrary record lists
use crate::converters::records;
use crate::types::{DataModel, Key};
use indexmap::IndexMap;
use log::debug;
use serde_json::Value;

/// Project `data_list` into a key → value mapping using the field names from `data_model`
/// (`value`/`text` when absent).
///
/// A later record with the same key overwrites the earlier one. A record without the
/// value field maps to `None`; a record without the key field is dropped.
pub fn data_list_to_map(
    data_list: &Value,
    data_model: Option<&DataModel>,
) -> IndexMap<Key, Option<Value>> {
    let default_model = DataModel::default();
    let model = data_model.unwrap_or(&default_model);

    let mut map = IndexMap::new();
    for (index, record) in records(data_list).iter().enumerate() {
        let Some(raw_key) = record.get(&model.field_key) else {
            debug!(
                "data_list_to_map: record {} has no '{}' field, dropped",
                index, model.field_key
            );
            continue;
        };
        let value = record.get(&model.field_value).cloned();
        map.insert(Key::from_json(raw_key), value);
    }
    map
}
