//! Footer buttons shared between dialogs and wizards.

use crate::model::events::Emitter;
use crate::model::ButtonPosition;
use std::cell::RefCell;

/// Mutable button fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonState {
    pub label: String,
    pub enabled: bool,
    pub hidden: bool,
    pub focused: bool,
    pub secondary: bool,
    pub position: ButtonPosition,
}

/// One authoritative button instance. Every container referencing the
/// handle holds a clone of the same `Rc<DialogButton>`.
#[derive(Debug)]
pub struct DialogButton {
    state: RefCell<ButtonState>,
    click: Emitter<()>,
}

impl DialogButton {
    pub fn new(label: impl Into<String>, enabled: bool) -> Self {
        Self {
            state: RefCell::new(ButtonState {
                label: label.into(),
                enabled,
                hidden: false,
                focused: false,
                secondary: false,
                position: ButtonPosition::default(),
            }),
            click: Emitter::new(),
        }
    }

    pub fn state(&self) -> ButtonState {
        self.state.borrow().clone()
    }

    pub fn label(&self) -> String {
        self.state.borrow().label.clone()
    }

    pub fn enabled(&self) -> bool {
        self.state.borrow().enabled
    }

    pub fn hidden(&self) -> bool {
        self.state.borrow().hidden
    }

    pub fn update(&self, f: impl FnOnce(&mut ButtonState)) {
        f(&mut self.state.borrow_mut());
    }

    /// A user click. Ignored while the button is disabled or hidden.
    pub fn click(&self) -> bool {
        let clickable = {
            let state = self.state.borrow();
            state.enabled && !state.hidden
        };
        if clickable {
            self.click.emit(&());
        }
        clickable
    }

    pub fn on_click(&self) -> &Emitter<()> {
        &self.click
    }
}
