//! In-place swap of one live widget instance for another
use crate::errors::{SwapError, SyncError};
use log::{debug, warn};

/// A live composite widget with a single root element.
pub trait Composite {
    type Element: Clone;

    /// Root visual element.
    fn main(&self) -> Self::Element;
    /// Release internal resources and listeners. The root element stays in place.
    fn dispose(&mut self);
}

/// Visual-tree primitives of the hosting page.
pub trait VisualTree<E> {
    fn insert_after(&mut self, element: &E, anchor: &E) -> Result<(), SyncError>;
    fn remove(&mut self, element: &E) -> Result<(), SyncError>;
    fn attribute(&self, element: &E, name: &str) -> Option<String>;
    fn set_attribute(&mut self, element: &E, name: &str, value: &str) -> Result<(), SyncError>;
    /// Serialized markup of the element's first child node, when the host can produce it.
    fn first_child_markup(&self, element: &E) -> Option<String>;
    fn text_content(&self, element: &E) -> String;
}

/// Put `new` where `old` is and tear `old` down, returning `new`.
///
/// `new` must be fully initialized. The sequence is insert, dispose, remove: the new root
/// is in the tree before the old one disappears, and the toolkit lets go of the old root
/// before it is detached.
///
/// On failure the error carries the instance that is still live. If the insert fails,
/// `new` is disposed and `old` comes back untouched. If removing the old root fails,
/// `old` is already disposed and `new` comes back.
pub fn replace<W, T>(tree: &mut T, mut old: W, mut new: W) -> Result<W, SwapError<W>>
where
    W: Composite,
    T: VisualTree<W::Element> + ?Sized,
{
    let old_root = old.main();
    let new_root = new.main();

    if let Err(err) = tree.insert_after(&new_root, &old_root) {
        warn!("replace: insert failed, keeping old instance: {}", err);
        new.dispose();
        return Err(SwapError::new(old, err));
    }
    debug!("replace: new root inserted after old root");

    old.dispose();
    debug!("replace: old instance disposed");

    if let Err(err) = tree.remove(&old_root) {
        warn!("replace: old root left in place: {}", err);
        return Err(SwapError::new(new, err));
    }
    debug!("replace: old root removed");
    Ok(new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    struct Page {
        children: Vec<&'static str>,
        log: Log,
        locked: bool,
    }

    impl VisualTree<&'static str> for Page {
        fn insert_after(&mut self, element: &&'static str, anchor: &&'static str) -> Result<(), SyncError> {
            let pos = self
                .children
                .iter()
                .position(|c| c == anchor)
                .ok_or_else(|| SyncError::toolkit("insert_after", "anchor detached"))?;
            self.children.insert(pos + 1, *element);
            self.log.borrow_mut().push(format!("insert {}", element));
            Ok(())
        }

        fn remove(&mut self, element: &&'static str) -> Result<(), SyncError> {
            if self.locked {
                return Err(SyncError::toolkit("remove", "element is locked"));
            }
            self.children.retain(|c| c != element);
            self.log.borrow_mut().push(format!("remove {}", element));
            Ok(())
        }

        fn attribute(&self, _element: &&'static str, _name: &str) -> Option<String> {
            None
        }

        fn set_attribute(&mut self, _element: &&'static str, _name: &str, _value: &str) -> Result<(), SyncError> {
            Ok(())
        }

        fn first_child_markup(&self, _element: &&'static str) -> Option<String> {
            None
        }

        fn text_content(&self, _element: &&'static str) -> String {
            String::new()
        }
    }

    #[derive(Debug)]
    struct Widget {
        root: &'static str,
        log: Log,
    }

    impl Composite for Widget {
        type Element = &'static str;

        fn main(&self) -> &'static str {
            self.root
        }

        fn dispose(&mut self) {
            self.log.borrow_mut().push(format!("dispose {}", self.root));
        }
    }

    #[test]
    fn inserts_then_disposes_then_removes_in_place() {
        let log: Log = Rc::default();
        let mut page = Page {
            children: vec!["before", "old", "after"],
            log: Rc::clone(&log),
            locked: false,
        };
        let old = Widget { root: "old", log: Rc::clone(&log) };
        let new = Widget { root: "new", log: Rc::clone(&log) };

        let live = replace(&mut page, old, new).unwrap();

        assert_eq!(live.root, "new");
        assert_eq!(page.children, vec!["before", "new", "after"]);
        assert_eq!(*log.borrow(), vec!["insert new", "dispose old", "remove old"]);
    }

    #[test]
    fn detached_old_root_returns_old_and_disposes_new() {
        let log: Log = Rc::default();
        let mut page = Page {
            children: vec!["other"],
            log: Rc::clone(&log),
            locked: false,
        };
        let old = Widget { root: "old", log: Rc::clone(&log) };
        let new = Widget { root: "new", log: Rc::clone(&log) };

        let err = replace(&mut page, old, new).unwrap_err();

        assert_eq!(err.widget.root, "old");
        assert_eq!(page.children, vec!["other"]);
        assert_eq!(*log.borrow(), vec!["dispose new"]);
    }

    #[test]
    fn failed_removal_hands_back_the_new_instance() {
        let log: Log = Rc::default();
        let mut page = Page {
            children: vec!["old"],
            log: Rc::clone(&log),
            locked: true,
        };
        let old = Widget { root: "old", log: Rc::clone(&log) };
        let new = Widget { root: "new", log: Rc::clone(&log) };

        let (live, err) = replace(&mut page, old, new).unwrap_err().into_parts();

        assert_eq!(live.root, "new");
        assert!(matches!(err, SyncError::Toolkit { .. }));
        assert_eq!(page.children, vec!["old", "new"]);
        assert_eq!(*log.borrow(), vec!["insert new", "dispose old"]);
    }
}
