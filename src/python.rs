//! Python entry points. Host widgets are duck-typed Python objects.
use crate::binder::{BindingOptions, ListWidget, bind_json};
use crate::converters::{item_from_json, item_to_json, json_to_pyobject, python_to_json};
use crate::date::quarter_start;
use crate::errors::SyncError;
use crate::keyed_map::data_list_to_map;
use crate::tree::{TreeNode, populate_json};
use crate::types::{DataModel, DisplayContent, Item, Key, NodeLabel, TreeItem};
use chrono::NaiveDate;
use log::warn;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyBool, PyDict, PyString};

/// Select control exposing `clear()`, `add(label, icon, options)` and `setValue(value)`.
struct PyListWidget<'py>(Bound<'py, PyAny>);

impl ListWidget for PyListWidget<'_> {
    fn clear(&mut self) -> Result<(), SyncError> {
        self.0.call_method0("clear")?;
        Ok(())
    }

    fn add(&mut self, label: &DisplayContent, icon: Option<&str>, value: &Key) -> Result<(), SyncError> {
        let options = PyDict::new(self.0.py());
        options.set_item("value", value.as_str())?;
        self.0.call_method1("add", (label.as_str(), icon, options))?;
        Ok(())
    }

    fn set_value(&mut self, value: &Key) -> Result<(), SyncError> {
        self.0.call_method1("setValue", (value.as_str(),))?;
        Ok(())
    }
}

/// Tree node exposing `add(label)`, which returns the child node.
struct PyTreeNode<'py>(Bound<'py, PyAny>);

impl TreeNode for PyTreeNode<'_> {
    fn add(&mut self, label: &DisplayContent) -> Result<Self, SyncError> {
        let child = self.0.call_method1("add", (label.as_str(),))?;
        Ok(PyTreeNode(child))
    }
}

fn is_false(result: &Bound<'_, PyAny>) -> bool {
    result.cast::<PyBool>().map(|b| !b.is_true()).unwrap_or(false)
}

/// Run a Python filter on a dict copy of `item`; edits to the dict flow back into the item.
fn run_filter<'py>(py: Python<'py>, filter: &Bound<'py, PyAny>, item: &mut Item) -> Result<bool, SyncError> {
    let record = json_to_pyobject(py, &item_to_json(item))?;
    let result = filter.call1((&record,))?;
    *item = item_from_json(&python_to_json(py, &record)?);
    Ok(!is_false(&result))
}

fn run_transform<'py>(py: Python<'py>, transform: &Bound<'py, PyAny>, item: &TreeItem) -> Result<NodeLabel, SyncError> {
    let record = serde_json::json!({ "text": item.text.as_str(), "value": item.value.as_str() });
    let result = transform.call1((json_to_pyobject(py, &record)?,))?;
    if is_false(&result) {
        return Ok(NodeLabel::Skip);
    }
    if result.is_none() {
        return Ok(NodeLabel::Default);
    }
    let content = match result.cast::<PyString>() {
        Ok(s) => s.to_str()?.to_string(),
        Err(_) => result.str()?.to_str()?.to_string(),
    };
    Ok(NodeLabel::Content(DisplayContent::Markup(content)))
}

#[pyfunction(name = "data_list_to_map")]
#[pyo3(signature = (data_list, field_key="value", field_value="text"))]
fn py_data_list_to_map<'py>(
    py: Python<'py>,
    data_list: &Bound<'py, PyAny>,
    field_key: &str,
    field_value: &str,
) -> PyResult<Bound<'py, PyDict>> {
    let model = DataModel {
        field_key: field_key.to_string(),
        field_value: field_value.to_string(),
    };
    let data = python_to_json(py, data_list)?;
    let result = PyDict::new(py);
    for (key, value) in data_list_to_map(&data, Some(&model)) {
        let value = value.unwrap_or(serde_json::Value::Null);
        result.set_item(key.as_str(), json_to_pyobject(py, &value)?)?;
    }
    Ok(result)
}

#[pyfunction(name = "bind_select")]
#[pyo3(signature = (widget, data_list, filter=None, set_default_value=true, default_value=None, default_index=None))]
fn py_bind_select<'py>(
    py: Python<'py>,
    widget: Bound<'py, PyAny>,
    data_list: &Bound<'py, PyAny>,
    filter: Option<Bound<'py, PyAny>>,
    set_default_value: bool,
    default_value: Option<&Bound<'py, PyAny>>,
    default_index: Option<usize>,
) -> PyResult<()> {
    let data = python_to_json(py, data_list)?;
    let mut failure: Option<SyncError> = None;
    {
        let mut options = BindingOptions::new();
        if let Some(filter) = filter.as_ref() {
            let failure = &mut failure;
            options = options.with_filter(move |item| {
                if failure.is_some() {
                    return false;
                }
                match run_filter(py, filter, item) {
                    Ok(keep) => keep,
                    Err(err) => {
                        *failure = Some(err);
                        false
                    }
                }
            });
        }
        if let Some(value) = default_value {
            options = options.with_default_value(Key::from_json(&python_to_json(py, value)?));
        }
        if let Some(index) = default_index {
            options = options.with_default_index(index);
        }
        if !set_default_value {
            options = options.without_default_value();
        }
        bind_json(&mut PyListWidget(widget), &data, &mut options)?;
    }
    match failure {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}

#[pyfunction(name = "populate_tree")]
#[pyo3(signature = (node, data_list, transform=None))]
fn py_populate_tree<'py>(
    py: Python<'py>,
    node: Bound<'py, PyAny>,
    data_list: &Bound<'py, PyAny>,
    transform: Option<Bound<'py, PyAny>>,
) -> PyResult<()> {
    let data = python_to_json(py, data_list)?;
    let mut root = PyTreeNode(node);
    let mut failure: Option<SyncError> = None;
    match transform.as_ref() {
        Some(transform) => {
            let failure = &mut failure;
            let callback = move |item: &TreeItem| {
                if failure.is_some() {
                    return NodeLabel::Skip;
                }
                run_transform(py, transform, item).unwrap_or_else(|err| {
                    warn!("populate_tree: transform raised, stopping: {}", err);
                    *failure = Some(err);
                    NodeLabel::Skip
                })
            };
            populate_json(&mut root, &data, Some(callback))?;
        }
        None => populate_json(&mut root, &data, None::<fn(&TreeItem) -> NodeLabel>)?,
    }
    match failure {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}

#[pyfunction(name = "quarter_start")]
fn py_quarter_start(year: i32, month: u32, day: u32) -> PyResult<String> {
    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| PyValueError::new_err(format!("invalid date {}-{}-{}", year, month, day)))?;
    Ok(quarter_start(Some(date)))
}

pub(crate) fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(py_data_list_to_map, m)?)?;
    m.add_function(wrap_pyfunction!(py_bind_select, m)?)?;
    m.add_function(wrap_pyfunction!(py_populate_tree, m)?)?;
    m.add_function(wrap_pyfunction!(py_quarter_start, m)?)?;
    Ok(())
}
