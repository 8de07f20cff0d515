//! Titled panels embedded in a dialog.

use crate::model::events::Validity;
use serde_json::Value;
use std::cell::RefCell;

/// Mutable tab fields. `content` is passed through untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct TabState {
    pub title: String,
    pub content: Value,
}

#[derive(Debug)]
pub struct DialogTab {
    state: RefCell<TabState>,
    validity: Validity,
}

impl DialogTab {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            state: RefCell::new(TabState {
                title: title.into(),
                content: Value::Null,
            }),
            validity: Validity::default(),
        }
    }

    pub fn state(&self) -> TabState {
        self.state.borrow().clone()
    }

    pub fn title(&self) -> String {
        self.state.borrow().title.clone()
    }

    pub fn update(&self, f: impl FnOnce(&mut TabState)) {
        f(&mut self.state.borrow_mut());
    }

    pub fn validity(&self) -> &Validity {
        &self.validity
    }
}
