//! Live model objects mirrored from the remote caller.
//!
//! Each model kind holds its mutable fields behind interior mutability and
//! exposes explicit [`Emitter`]s for the events the host relays back:
//!
//! - [`Dialog`] - title, content (text or tabs), message, ok/cancel and custom buttons
//! - [`DialogTab`] - a titled panel with opaque content
//! - [`DialogButton`] - label and flags, shared by any number of containers
//! - [`WizardPage`] - a panel with its own custom buttons
//! - [`Wizard`] - ordered pages, current page and navigation buttons
//!
//! Objects are always held as `Rc` and only touched from the dispatch thread.
//! No `RefCell` borrow is held while an emitter fires or a validator is awaited.

pub mod button;
pub mod dialog;
pub mod events;
pub mod tab;
pub mod wizard;
pub mod wizard_page;

pub use button::{ButtonState, DialogButton};
pub use dialog::{Dialog, DialogContent, DialogState};
pub use events::{Emitter, Subscription, Validity};
pub use tab::{DialogTab, TabState};
pub use wizard::{Wizard, WizardButtons, WizardState};
pub use wizard_page::{PageId, WizardPage, WizardPageState};

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

/// Severity of a dialog or wizard message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Error,
    Warning,
    #[default]
    Information,
}

/// Banner message shown at the top of a dialog or wizard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogMessage {
    pub text: String,
    #[serde(default)]
    pub level: MessageLevel,
    #[serde(default)]
    pub description: Option<String>,
}

impl DialogMessage {
    pub fn new(text: impl Into<String>, level: MessageLevel) -> Self {
        Self {
            text: text.into(),
            level,
            description: None,
        }
    }
}

impl From<&str> for DialogMessage {
    fn from(text: &str) -> Self {
        DialogMessage::new(text, MessageLevel::Information)
    }
}

/// Requested width of a dialog or wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialogWidth {
    Narrow,
    #[default]
    Medium,
    Wide,
    Custom(u32),
}

/// Which side of the footer a button is placed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonPosition {
    Left,
    #[default]
    Right,
}

/// Describes a wizard page transition.
///
/// `new_page` is `None` when the wizard is being finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageChangeInfo {
    pub last_page: Option<usize>,
    pub new_page: Option<usize>,
}

/// Pending answer to a close or navigation question
pub type ValidationFuture = Pin<Box<dyn Future<Output = Result<bool>>>>;

/// Decides whether a dialog may close
pub type CloseValidator = Rc<dyn Fn() -> ValidationFuture>;

/// Decides whether a wizard may move between pages
pub type NavigationValidator = Rc<dyn Fn(PageChangeInfo) -> ValidationFuture>;
