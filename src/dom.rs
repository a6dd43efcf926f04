//! The slice of a page the counter needs, and an in-memory page to test against.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use crate::counter::CounterBinder;
use crate::error::Result;

/// A document the binder can query and mutate.
///
/// Lookups that find nothing return `Ok(None)`; `Err` is kept for a broken host.
pub trait Document {
    type Element;

    fn element_by_id(&self, id: &str) -> Result<Option<Self::Element>>;

    /// Replace the visible text of `element`.
    fn set_text(&self, element: &Self::Element, text: &str) -> Result<()>;

    /// Route clicks on `element` to the binder's `on_click`.
    fn add_click_listener(&self, element: &Self::Element) -> Result<()>;

    /// Whether the page is still being parsed, so its elements may not exist yet.
    fn is_loading(&self) -> Result<bool>;

    /// Route the page's ready event to the binder's `on_ready`.
    fn add_ready_listener(&self) -> Result<()>;
}

#[derive(Debug, Default, Clone)]
struct MemoryElement {
    text: String,
    click_listeners: usize,
}

/// Elements keyed by id, each with its text and the number of click listeners on it.
///
/// A new page counts as already parsed; `set_loading(true)` puts it back before its ready event.
#[derive(Debug, Default)]
pub struct MemoryDocument {
    elements: RefCell<HashMap<String, MemoryElement>>,
    loading: Cell<bool>,
    ready_listeners: Cell<usize>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a page holding the given element ids, all with empty text.
    pub fn with_elements<'a>(ids: impl IntoIterator<Item = &'a str>) -> Self {
        let doc = Self::new();
        for id in ids {
            doc.insert(id);
        }
        doc
    }

    /// Add an empty element. An existing element with the same id is left untouched.
    pub fn insert(&self, id: &str) {
        self.elements
            .borrow_mut()
            .entry(id.to_string())
            .or_default();
    }

    pub fn remove(&self, id: &str) -> bool {
        self.elements.borrow_mut().remove(id).is_some()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.elements.borrow().contains_key(id)
    }

    pub fn text(&self, id: &str) -> Option<String> {
        self.elements.borrow().get(id).map(|e| e.text.clone())
    }

    pub fn listener_count(&self, id: &str) -> usize {
        self.elements
            .borrow()
            .get(id)
            .map_or(0, |e| e.click_listeners)
    }

    pub fn set_loading(&self, loading: bool) {
        self.loading.set(loading);
    }

    pub fn ready_listener_count(&self) -> usize {
        self.ready_listeners.get()
    }

    /// Finish parsing and dispatch the ready event: one `on_ready` per attached listener.
    /// Returns the number of listeners that ran.
    pub fn fire_ready(&self, binder: &mut CounterBinder) -> Result<usize> {
        self.loading.set(false);
        let listeners = self.ready_listeners.get();
        for _ in 0..listeners {
            binder.on_ready(self)?;
        }
        Ok(listeners)
    }

    /// Dispatch a click on `id`: one `on_click` per attached listener.
    /// Returns the number of listeners that ran.
    pub fn click(&self, id: &str, binder: &mut CounterBinder) -> Result<usize> {
        let listeners = self.listener_count(id);
        for _ in 0..listeners {
            binder.on_click(self)?;
        }
        Ok(listeners)
    }
}

impl Document for MemoryDocument {
    type Element = String;

    fn element_by_id(&self, id: &str) -> Result<Option<String>> {
        Ok(self
            .elements
            .borrow()
            .contains_key(id)
            .then(|| id.to_string()))
    }

    fn set_text(&self, element: &String, text: &str) -> Result<()> {
        if let Some(e) = self.elements.borrow_mut().get_mut(element) {
            e.text = text.to_string();
        }
        Ok(())
    }

    fn add_click_listener(&self, element: &String) -> Result<()> {
        if let Some(e) = self.elements.borrow_mut().get_mut(element) {
            e.click_listeners += 1;
        }
        Ok(())
    }

    fn is_loading(&self) -> Result<bool> {
        Ok(self.loading.get())
    }

    fn add_ready_listener(&self) -> Result<()> {
        self.ready_listeners.set(self.ready_listeners.get() + 1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_reflect_inserts_and_removals() {
        let doc = MemoryDocument::with_elements(vec!["a"]);
        assert_eq!(doc.element_by_id("a").unwrap(), Some("a".to_string()));
        assert_eq!(doc.element_by_id("b").unwrap(), None);

        doc.insert("b");
        assert!(doc.contains("b"));
        assert!(doc.remove("a"));
        assert!(!doc.remove("a"));
        assert_eq!(doc.element_by_id("a").unwrap(), None);
    }

    #[test]
    fn insert_keeps_existing_text() {
        let doc = MemoryDocument::with_elements(vec!["a"]);
        doc.set_text(&"a".to_string(), "7").unwrap();
        doc.insert("a");
        assert_eq!(doc.text("a").as_deref(), Some("7"));
    }

    #[test]
    fn fire_ready_ends_loading_and_runs_listeners() {
        let doc = MemoryDocument::with_elements(vec!["btnCount"]);
        doc.set_loading(true);
        let mut binder = CounterBinder::new(Default::default());
        assert_eq!(doc.fire_ready(&mut binder).unwrap(), 0);
        assert!(!doc.is_loading().unwrap());
        assert!(!binder.is_bound());

        doc.add_ready_listener().unwrap();
        assert_eq!(doc.fire_ready(&mut binder).unwrap(), 1);
        assert!(binder.is_bound());
    }

    #[test]
    fn click_without_listeners_runs_nothing() {
        let doc = MemoryDocument::with_elements(vec!["btnCount", "ctr"]);
        let mut binder = CounterBinder::new(Default::default());
        assert_eq!(doc.click("btnCount", &mut binder).unwrap(), 0);
        assert_eq!(doc.click("missing", &mut binder).unwrap(), 0);
        assert_eq!(binder.count(), 0);
        assert_eq!(doc.text("ctr").as_deref(), Some(""));
    }
}
