//! Keeps in-memory item lists in sync with host selection widgets: a flat select list,
//! a tabbed selector and a tree.
//!
//! The host toolkit is reached only through the capability traits declared here
//! ([`ListWidget`], [`TreeNode`], [`TabSelector`], [`TabInitializer`], [`VisualTree`]).
//! Structural tab edits are done by rebuilding the selector from declarative markup and
//! swapping it in; see [`tabs`].
pub mod binder;
pub mod converters;
pub mod date;
pub mod errors;
pub mod html_generator;
pub mod keyed_map;
pub mod replacer;
pub mod tab_config;
pub mod tabs;
pub mod tree;
pub mod types;

#[cfg(feature = "python")]
mod python;

pub use binder::{BindingOptions, ListWidget, bind, bind_json};
pub use date::quarter_start;
pub use errors::{SwapError, SyncError};
pub use html_generator::{TabSetMarkup, decode_token, encode_token, overflow_tip, render_tab_set};
pub use keyed_map::data_list_to_map;
pub use replacer::{Composite, VisualTree, replace};
pub use tab_config::{TabEdit, TabSetConfig, apply_edit};
pub use tabs::{TabHandle, TabInitializer, TabSelector, TabSetEditor};
pub use tree::{TreeNode, populate, populate_json};
pub use types::{ChangeHandler, DataModel, DisplayContent, EditorConfig, Item, Key, NodeLabel, TreeItem, next_id};

#[cfg(feature = "python")]
#[pyo3::pymodule]
fn select_sync(m: &pyo3::Bound<'_, pyo3::types::PyModule>) -> pyo3::PyResult<()> {
    python::register(m)
}
