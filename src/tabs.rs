//! Tab selector editing by rebuild-and-swap
//!
//! The host toolkit cannot insert or remove tabs on a live selector, so every edit
//! reads the current tabs back, computes the new list ([`apply_edit`]), initializes a
//! fresh selector from declarative markup ([`TabSetEditor::materialize`]) and swaps it
//! in for the old one ([`TabSetEditor::swap`]). The old handle is consumed; callers must
//! continue with the returned one. On failure the live handle travels back inside
//! [`SwapError`].
use crate::errors::{SwapError, SyncError};
use crate::html_generator::{TabSetMarkup, render_tab_set};
use crate::replacer::{Composite, VisualTree, replace};
use crate::tab_config::{TabEdit, TabSetConfig, apply_edit};
use crate::types::{ChangeHandler, DisplayContent, EditorConfig, Item, Key, next_id};
use indexmap::IndexMap;
use log::{debug, warn};

/// One tab of a live selector.
pub trait TabHandle {
    type Element;

    fn value(&self) -> Key;
    /// Root element of the tab; its first child holds the rendered label.
    fn main(&self) -> Self::Element;
}

/// A live tabbed selector.
pub trait TabSelector: Composite {
    type Tab: TabHandle<Element = Self::Element>;

    fn items(&self) -> Vec<Self::Tab>;
    fn value(&self) -> Option<Key>;
    /// Unknown values are handled by the toolkit's own fallback.
    fn set_value(&mut self, value: &Key);
    fn on_change(&self) -> Option<ChangeHandler>;
    fn set_on_change(&mut self, handler: Option<ChangeHandler>);
}

/// The toolkit's declarative initializer, injected instead of reached globally.
pub trait TabInitializer {
    type Widget: TabSelector;

    /// Initialize every widget described by `markup`, keyed by assigned id.
    fn initialize(&mut self, markup: &TabSetMarkup) -> Result<IndexMap<String, Self::Widget>, SyncError>;
}

type ElementOf<W> = <W as Composite>::Element;

pub struct TabSetEditor<T, I> {
    tree: T,
    initializer: I,
    config: EditorConfig,
}

impl<T, I> TabSetEditor<T, I> {
    pub fn new(tree: T, initializer: I) -> Self {
        TabSetEditor {
            tree,
            initializer,
            config: EditorConfig::default(),
        }
    }

    pub fn with_config(mut self, config: EditorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn tree(&self) -> &T {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut T {
        &mut self.tree
    }

    pub fn initializer_mut(&mut self) -> &mut I {
        &mut self.initializer
    }

    pub fn into_parts(self) -> (T, I) {
        (self.tree, self.initializer)
    }
}

impl<T, I> TabSetEditor<T, I>
where
    I: TabInitializer,
    T: VisualTree<ElementOf<I::Widget>>,
{
    /// Current tabs in order, labels as rich as the host can serialize them.
    pub fn extract(&self, widget: &I::Widget) -> Vec<Item> {
        widget
            .items()
            .iter()
            .map(|tab| {
                let root = tab.main();
                let text = match self.tree.first_child_markup(&root) {
                    Some(markup) => DisplayContent::Markup(markup),
                    None => DisplayContent::Text(self.tree.text_content(&root)),
                };
                Item { text, value: tab.value() }
            })
            .collect()
    }

    pub fn has_tab(&self, widget: &I::Widget, value: impl Into<Key>) -> bool {
        let value = value.into();
        self.extract(widget).iter().any(|item| item.value == value)
    }

    /// Append `items` and return the replacement selector.
    pub fn add(
        &mut self,
        widget: I::Widget,
        items: impl IntoIterator<Item = Item>,
        default_value: Option<Key>,
    ) -> Result<I::Widget, SwapError<I::Widget>> {
        let edit = TabEdit::Append(items.into_iter().collect());
        self.rebuild(widget, &edit, default_value)
    }

    /// Drop every tab matching any of `values` and return the replacement selector.
    pub fn remove<K: Into<Key>>(
        &mut self,
        widget: I::Widget,
        values: impl IntoIterator<Item = K>,
        default_value: Option<Key>,
    ) -> Result<I::Widget, SwapError<I::Widget>> {
        let edit = TabEdit::Remove(values.into_iter().map(Into::into).collect());
        self.rebuild(widget, &edit, default_value)
    }

    /// Full edit cycle: extract, edit, materialize, transfer state, swap.
    ///
    /// If initialization fails the untouched `widget` comes back in the error.
    pub fn rebuild(
        &mut self,
        widget: I::Widget,
        edit: &TabEdit,
        default_value: Option<Key>,
    ) -> Result<I::Widget, SwapError<I::Widget>> {
        let items = apply_edit(self.extract(&widget), edit);
        let config = TabSetConfig::new(next_id(&self.config.id_prefix), self.config.widget_type.as_str(), items)
            .with_default_value(default_value.clone());
        debug!(
            "rebuild: '{}' with {} tab(s), explicit default {:?}",
            config.id,
            config.items.len(),
            default_value
        );

        let mut fresh = match self.materialize(&config) {
            Ok(fresh) => fresh,
            Err(err) => return Err(SwapError::new(widget, err)),
        };
        transfer_state(&widget, &mut fresh, default_value);
        if let Some(value) = fresh.value() {
            if !config.contains(&value) {
                warn!("rebuild: selection '{}' has no tab in '{}'", value, config.id);
            }
        }
        self.swap(widget, fresh)
    }

    /// Initialize a new selector from `config`.
    pub fn materialize(&mut self, config: &TabSetConfig) -> Result<I::Widget, SyncError> {
        let markup = render_tab_set(config);
        let mut instances = self.initializer.initialize(&markup)?;
        instances
            .shift_remove(&markup.id)
            .ok_or_else(|| SyncError::MissingInstance { id: markup.id.clone() })
    }

    /// Carry identity attributes over to `new`, put it in place of `old` and return it.
    ///
    /// See [`replace`] for which instance the error carries.
    pub fn swap(&mut self, old: I::Widget, mut new: I::Widget) -> Result<I::Widget, SwapError<I::Widget>> {
        let old_root = old.main();
        let new_root = new.main();
        for name in &self.config.identity_attributes {
            if let Some(value) = self.tree.attribute(&old_root, name) {
                if let Err(err) = self.tree.set_attribute(&new_root, name, &value) {
                    new.dispose();
                    return Err(SwapError::new(old, err));
                }
            }
        }
        replace(&mut self.tree, old, new)
    }
}

/// Move the change handler and restore the selection on the new instance.
///
/// An explicit default wins; otherwise the old selection is re-applied as-is.
fn transfer_state<W: TabSelector>(old: &W, new: &mut W, default_value: Option<Key>) {
    new.set_on_change(old.on_change());
    if let Some(value) = default_value.or_else(|| old.value()) {
        new.set_value(&value);
    }
}
