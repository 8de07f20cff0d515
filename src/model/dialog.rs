//! Modal dialogs with either text or tabbed content.

use crate::error::Result;
use crate::model::button::DialogButton;
use crate::model::events::{Emitter, Validity};
use crate::model::tab::DialogTab;
use crate::model::{CloseValidator, DialogMessage, DialogWidth};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Dialog body. The two modes are mutually exclusive.
#[derive(Clone)]
pub enum DialogContent {
    Text(String),
    Tabs(Vec<Rc<DialogTab>>),
}

impl Default for DialogContent {
    fn default() -> Self {
        DialogContent::Text(String::new())
    }
}

impl fmt::Debug for DialogContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DialogContent::Text(text) => f.debug_tuple("Text").field(text).finish(),
            DialogContent::Tabs(tabs) => f
                .debug_tuple("Tabs")
                .field(&tabs.iter().map(|t| t.title()).collect::<Vec<_>>())
                .finish(),
        }
    }
}

/// Mutable dialog fields
#[derive(Debug, Clone, Default)]
pub struct DialogState {
    pub title: String,
    pub name: Option<String>,
    pub width: DialogWidth,
    pub content: DialogContent,
    pub message: Option<DialogMessage>,
    pub custom_buttons: Vec<Rc<DialogButton>>,
}

pub struct Dialog {
    ok_button: Rc<DialogButton>,
    cancel_button: Rc<DialogButton>,
    state: RefCell<DialogState>,
    validity: Validity,
    close_validator: RefCell<Option<CloseValidator>>,
    updated: Emitter<()>,
}

impl Dialog {
    /// The ok and cancel buttons are fixed for the lifetime of the dialog.
    pub fn new(
        title: impl Into<String>,
        ok_button: Rc<DialogButton>,
        cancel_button: Rc<DialogButton>,
    ) -> Self {
        Self {
            ok_button,
            cancel_button,
            state: RefCell::new(DialogState {
                title: title.into(),
                ..DialogState::default()
            }),
            validity: Validity::default(),
            close_validator: RefCell::new(None),
            updated: Emitter::new(),
        }
    }

    pub fn ok_button(&self) -> &Rc<DialogButton> {
        &self.ok_button
    }

    pub fn cancel_button(&self) -> &Rc<DialogButton> {
        &self.cancel_button
    }

    pub fn state(&self) -> DialogState {
        self.state.borrow().clone()
    }

    pub fn title(&self) -> String {
        self.state.borrow().title.clone()
    }

    pub fn content(&self) -> DialogContent {
        self.state.borrow().content.clone()
    }

    pub fn custom_buttons(&self) -> Vec<Rc<DialogButton>> {
        self.state.borrow().custom_buttons.clone()
    }

    pub fn update(&self, f: impl FnOnce(&mut DialogState)) {
        f(&mut self.state.borrow_mut());
        self.updated.emit(&());
    }

    pub fn validity(&self) -> &Validity {
        &self.validity
    }

    /// Fires after every [`update`](Self::update); presenters re-render on it.
    pub fn on_updated(&self) -> &Emitter<()> {
        &self.updated
    }

    /// Install the close validator, replacing any previous one.
    pub fn register_close_validator(&self, validator: CloseValidator) {
        *self.close_validator.borrow_mut() = Some(validator);
    }

    pub fn has_close_validator(&self) -> bool {
        self.close_validator.borrow().is_some()
    }

    /// Ask whether the dialog may close. Without a validator the answer is yes.
    pub async fn request_close(&self) -> Result<bool> {
        let validator = self.close_validator.borrow().clone();
        match validator {
            Some(validator) => validator().await,
            None => Ok(true),
        }
    }
}

impl fmt::Debug for Dialog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dialog")
            .field("state", &self.state.borrow())
            .field("valid", &self.validity.is_valid())
            .field("has_close_validator", &self.has_close_validator())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ValidationFuture;

    fn dialog() -> Dialog {
        Dialog::new(
            "Connect",
            Rc::new(DialogButton::new("OK", true)),
            Rc::new(DialogButton::new("Cancel", true)),
        )
    }

    #[tokio::test]
    async fn test_close_allowed_without_validator() {
        assert!(dialog().request_close().await.unwrap());
    }

    #[tokio::test]
    async fn test_close_validator_decides() {
        let dialog = dialog();
        dialog.register_close_validator(Rc::new(|| -> ValidationFuture {
            Box::pin(async { Ok(false) })
        }));
        assert!(!dialog.request_close().await.unwrap());
    }

    #[test]
    fn test_content_mode_replaced() {
        let dialog = dialog();
        dialog.update(|s| s.content = DialogContent::Text("hello".to_string()));
        let tab = Rc::new(DialogTab::new("General"));
        dialog.update(|s| s.content = DialogContent::Tabs(vec![tab.clone()]));

        match dialog.content() {
            DialogContent::Tabs(tabs) => assert!(Rc::ptr_eq(&tabs[0], &tab)),
            other => panic!("expected tabs, got {other:?}"),
        }
    }
}
