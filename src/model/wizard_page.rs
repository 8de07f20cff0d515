//! Pages hosted by a wizard.

use crate::model::button::DialogButton;
use crate::model::events::Validity;
use serde_json::Value;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_PAGE_ID: AtomicU64 = AtomicU64::new(0);

/// Process-unique identity of a page object, assigned at construction.
///
/// Wizards store page objects, not handles; this id is the key of the
/// registry's reverse index.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageId(u64);

impl PageId {
    fn next() -> Self {
        PageId(NEXT_PAGE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Debug for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PageId({})", self.0)
    }
}

/// Mutable page fields
#[derive(Debug, Clone)]
pub struct WizardPageState {
    pub title: String,
    pub page_name: Option<String>,
    pub content: Value,
    pub enabled: bool,
    pub description: Option<String>,
    pub custom_buttons: Vec<Rc<DialogButton>>,
}

pub struct WizardPage {
    id: PageId,
    state: RefCell<WizardPageState>,
    validity: Validity,
}

impl WizardPage {
    pub fn new(title: impl Into<String>, content: Value) -> Self {
        Self {
            id: PageId::next(),
            state: RefCell::new(WizardPageState {
                title: title.into(),
                page_name: None,
                content,
                enabled: true,
                description: None,
                custom_buttons: Vec::new(),
            }),
            validity: Validity::default(),
        }
    }

    pub fn id(&self) -> PageId {
        self.id
    }

    pub fn state(&self) -> WizardPageState {
        self.state.borrow().clone()
    }

    pub fn title(&self) -> String {
        self.state.borrow().title.clone()
    }

    pub fn enabled(&self) -> bool {
        self.state.borrow().enabled
    }

    pub fn update(&self, f: impl FnOnce(&mut WizardPageState)) {
        f(&mut self.state.borrow_mut());
    }

    pub fn validity(&self) -> &Validity {
        &self.validity
    }
}

impl fmt::Debug for WizardPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WizardPage")
            .field("id", &self.id)
            .field("title", &self.title())
            .finish()
    }
}
