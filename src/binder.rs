//! Fills a flat single-choice list widget from a data source
use crate::converters::items_from_json;
use crate::errors::SyncError;
use crate::types::{DisplayContent, Item, Key};
use log::{debug, trace};
use serde_json::Value;

/// What the binder needs from a host list widget.
pub trait ListWidget {
    fn clear(&mut self) -> Result<(), SyncError>;
    fn add(&mut self, label: &DisplayContent, icon: Option<&str>, value: &Key) -> Result<(), SyncError>;
    fn set_value(&mut self, value: &Key) -> Result<(), SyncError>;
}

type ItemFilter<'a> = Box<dyn FnMut(&mut Item) -> bool + 'a>;

/// Per-call binding configuration.
///
/// The filter sees a private copy of each item and may rewrite it before it is added;
/// returning `false` leaves the item out.
pub struct BindingOptions<'a> {
    filter: Option<ItemFilter<'a>>,
    set_default_value: bool,
    default_value: Option<Key>,
    default_index: Option<usize>,
}

impl Default for BindingOptions<'_> {
    fn default() -> Self {
        BindingOptions {
            filter: None,
            set_default_value: true,
            default_value: None,
            default_index: None,
        }
    }
}

impl<'a> BindingOptions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(mut self, filter: impl FnMut(&mut Item) -> bool + 'a) -> Self {
        self.filter = Some(Box::new(filter));
        self
    }

    /// Set even when no surviving item carries this key.
    pub fn with_default_value(mut self, value: impl Into<Key>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn with_default_index(mut self, index: usize) -> Self {
        self.default_index = Some(index);
        self
    }

    /// Leave the widget's selection alone after filling it.
    pub fn without_default_value(mut self) -> Self {
        self.set_default_value = false;
        self
    }
}

/// Replace the widget's items with `data_list`, then resolve the default selection.
pub fn bind<W: ListWidget + ?Sized>(
    widget: &mut W,
    data_list: &[Item],
    options: &mut BindingOptions<'_>,
) -> Result<(), SyncError> {
    bind_owned(widget, data_list.to_vec(), options)
}

/// Same as [`bind`] for an untyped source; a non-array source clears the widget.
pub fn bind_json<W: ListWidget + ?Sized>(
    widget: &mut W,
    data_list: &Value,
    options: &mut BindingOptions<'_>,
) -> Result<(), SyncError> {
    bind_owned(widget, items_from_json(data_list), options)
}

fn bind_owned<W: ListWidget + ?Sized>(
    widget: &mut W,
    data_list: Vec<Item>,
    options: &mut BindingOptions<'_>,
) -> Result<(), SyncError> {
    widget.clear()?;

    // Dense index over survivors only.
    let mut surviving: Vec<Key> = Vec::with_capacity(data_list.len());
    for mut item in data_list {
        if let Some(filter) = options.filter.as_mut() {
            if !filter(&mut item) {
                trace!("bind: filter skipped value '{}'", item.value);
                continue;
            }
        }
        widget.add(&item.text, None, &item.value)?;
        surviving.push(item.value);
    }

    if !options.set_default_value {
        return Ok(());
    }

    if let Some(value) = &options.default_value {
        debug!("bind: applying explicit default value '{}'", value);
        return widget.set_value(value);
    }

    let index = options.default_index.unwrap_or(0);
    match surviving.get(index) {
        Some(value) => {
            debug!("bind: default index {} resolved to '{}'", index, value);
            widget.set_value(value)
        }
        None => {
            debug!(
                "bind: default index {} out of range ({} items), selection untouched",
                index,
                surviving.len()
            );
            Ok(())
        }
    }
}
