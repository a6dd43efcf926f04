//! The click counter and the state object that binds it to a page.
//!
//! [`CounterBinder`] owns everything the page script would otherwise capture in a closure:
//! the count, the element ids and whether the button has been bound yet. Hosts feed it the
//! two page events, ready and click, together with the [`Document`] to act on.

use tracing::{debug, info, warn};

use crate::config::CounterConfig;
use crate::dom::Document;
use crate::error::Result;

/// Number of clicks seen so far.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Counter(u64);

impl Counter {
    pub fn new() -> Self {
        Counter(0)
    }

    /// Add one click and return the new value.
    pub fn increment(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(1);
        self.0
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindState {
    Unbound,
    Bound,
}

/// What a ready event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// A click listener was attached to the button.
    Bound,
    /// No button on the page; nothing attached.
    MissingButton,
    /// An earlier ready already attached the listener.
    AlreadyBound,
    /// The page is still loading; binding waits for its ready event.
    Waiting,
}

#[derive(Debug)]
pub struct CounterBinder {
    config: CounterConfig,
    counter: Counter,
    state: BindState,
}

impl CounterBinder {
    pub fn new(config: CounterConfig) -> Self {
        CounterBinder {
            config,
            counter: Counter::new(),
            state: BindState::Unbound,
        }
    }

    pub fn config(&self) -> &CounterConfig {
        &self.config
    }

    pub fn count(&self) -> u64 {
        self.counter.value()
    }

    pub fn state(&self) -> BindState {
        self.state
    }

    pub fn is_bound(&self) -> bool {
        self.state == BindState::Bound
    }

    /// Hook the binder up to a freshly loaded module's page: bind now if the page is already
    /// parsed, otherwise wait for its ready event, which would never arrive if it had fired.
    pub fn attach<D: Document>(&mut self, doc: &D) -> Result<Binding> {
        if doc.is_loading()? {
            doc.add_ready_listener()?;
            debug!("waiting for page ready");
            return Ok(Binding::Waiting);
        }
        self.on_ready(doc)
    }

    /// Handle the page's ready event: attach the click listener to the button, once.
    pub fn on_ready<D: Document>(&mut self, doc: &D) -> Result<Binding> {
        if self.is_bound() {
            warn!(button = %self.config.button_id, "ready fired again, keeping existing listener");
            return Ok(Binding::AlreadyBound);
        }

        let button = match doc.element_by_id(&self.config.button_id)? {
            Some(button) => button,
            None => {
                debug!(button = %self.config.button_id, "no button on page, counter stays unbound");
                return Ok(Binding::MissingButton);
            }
        };

        doc.add_click_listener(&button)?;
        self.state = BindState::Bound;
        info!(button = %self.config.button_id, "counter bound");
        Ok(Binding::Bound)
    }

    /// Handle one click: count it and show the total if the display is on the page.
    ///
    /// The display is looked up on every click, so one added after ready still picks up
    /// the current value.
    pub fn on_click<D: Document>(&mut self, doc: &D) -> Result<u64> {
        let count = self.counter.increment();
        match doc.element_by_id(&self.config.display_id)? {
            Some(display) => doc.set_text(&display, &count.to_string())?,
            None => debug!(display = %self.config.display_id, count, "no display on page"),
        }
        debug!(count, "click");
        Ok(count)
    }
}
