//! Recursive population of hierarchical widgets from nested items
use crate::converters::tree_items_from_json;
use crate::errors::SyncError;
use crate::types::{DisplayContent, NodeLabel, TreeItem};
use log::trace;
use serde_json::Value;

/// A node of a host tree widget. Adding a child returns a handle that accepts further children.
pub trait TreeNode: Sized {
    fn add(&mut self, label: &DisplayContent) -> Result<Self, SyncError>;
}

/// Append `data_list` under `parent`, depth first, in order.
///
/// `transform` may replace a node's label or prune it; a pruned node takes its whole subtree
/// with it. Recursion depth follows the data, so deeply nested input is the caller's concern.
pub fn populate<N, F>(parent: &mut N, data_list: &[TreeItem], transform: Option<F>) -> Result<(), SyncError>
where
    N: TreeNode,
    F: FnMut(&TreeItem) -> NodeLabel,
{
    match transform {
        Some(mut transform) => populate_with(parent, data_list, &mut transform),
        None => populate_with(parent, data_list, &mut |_: &TreeItem| NodeLabel::Default),
    }
}

/// Same as [`populate`] for an untyped source.
pub fn populate_json<N, F>(parent: &mut N, data_list: &Value, transform: Option<F>) -> Result<(), SyncError>
where
    N: TreeNode,
    F: FnMut(&TreeItem) -> NodeLabel,
{
    populate(parent, &tree_items_from_json(data_list), transform)
}

fn populate_with<N, F>(parent: &mut N, data_list: &[TreeItem], transform: &mut F) -> Result<(), SyncError>
where
    N: TreeNode,
    F: FnMut(&TreeItem) -> NodeLabel,
{
    for item in data_list {
        let label = match transform(item) {
            NodeLabel::Skip => {
                trace!("populate: pruned subtree at value '{}'", item.value);
                continue;
            }
            NodeLabel::Default => item.text.clone(),
            NodeLabel::Content(content) => content,
        };

        let mut node = parent.add(&label)?;
        if !item.children.is_empty() {
            populate_with(&mut node, &item.children, transform)?;
        }
    }
    Ok(())
}
