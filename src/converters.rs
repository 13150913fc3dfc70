//! Lenient normalization of loosely-shaped data sources into items
use crate::types::{DisplayContent, Item, Key, TreeItem};
use serde_json::Value;

#[cfg(feature = "python")]
use crate::errors::SyncError;
#[cfg(feature = "python")]
use pyo3::prelude::*;
#[cfg(feature = "python")]
use pyo3::types::PyModule;

/// Anything that is not an array reads as an empty list.
pub fn records(data_list: &Value) -> &[Value] {
    match data_list {
        Value::Array(items) => items.as_slice(),
        _ => &[],
    }
}

fn field<'a>(record: &'a Value, name: &str) -> &'a Value {
    record.get(name).unwrap_or(&Value::Null)
}

pub fn item_from_json(record: &Value) -> Item {
    Item {
        text: DisplayContent::from_json(field(record, "text")),
        value: Key::from_json(field(record, "value")),
    }
}

pub fn tree_item_from_json(record: &Value) -> TreeItem {
    TreeItem {
        text: DisplayContent::from_json(field(record, "text")),
        value: Key::from_json(field(record, "value")),
        children: tree_items_from_json(field(record, "children")),
    }
}

pub fn items_from_json(data_list: &Value) -> Vec<Item> {
    records(data_list).iter().map(item_from_json).collect()
}

pub fn tree_items_from_json(data_list: &Value) -> Vec<TreeItem> {
    records(data_list).iter().map(tree_item_from_json).collect()
}

pub fn item_to_json(item: &Item) -> Value {
    serde_json::json!({
        "text": item.text.as_str(),
        "value": item.value.as_str(),
    })
}

/// Convert Python object to JSON with full type support
#[cfg(feature = "python")]
pub fn python_to_json<'py>(
    py: Python<'py>,
    obj: &Bound<'py, PyAny>,
) -> Result<Value, SyncError> {
    if obj.is_none() {
        return Ok(Value::Null);
    }
    let json_mod = PyModule::import(py, "json")?;
    let dumped = json_mod.getattr("dumps")?.call1((obj,))?;
    let s: String = dumped
        .extract()
        .map_err(|e: PyErr| SyncError::PythonError(e.to_string()))?;
    Ok(serde_json::from_str(&s)?)
}

/// Inverse of [`python_to_json`], through `json.loads`.
#[cfg(feature = "python")]
pub fn json_to_pyobject<'py>(py: Python<'py>, value: &Value) -> Result<Bound<'py, PyAny>, SyncError> {
    if value.is_null() {
        return Ok(py.None().into_bound(py));
    }
    let encoded = serde_json::to_string(value)?;
    let json_mod = PyModule::import(py, "json")?;
    Ok(json_mod.getattr("loads")?.call1((encoded,))?)
}
