//! Handle-to-object tables.
//!
//! Handles are chosen by the remote caller and never reused for a different
//! object, so a table only ever grows. Each kind has its own table; wizard
//! pages additionally have a reverse index from [`PageId`] to handle, written
//! together with the forward entry and never touched afterwards.

use crate::error::{HostError, Result};
use crate::model::{Dialog, DialogButton, DialogTab, PageId, Wizard, WizardPage};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Caller-assigned identifier of one logical UI object.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Handle(pub u32);

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({})", self.0)
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Handle {
    fn from(value: u32) -> Self {
        Handle(value)
    }
}

/// The five object kinds addressed by handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleKind {
    Dialog,
    Tab,
    Button,
    WizardPage,
    Wizard,
}

impl fmt::Display for HandleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HandleKind::Dialog => "dialog",
            HandleKind::Tab => "tab",
            HandleKind::Button => "button",
            HandleKind::WizardPage => "wizard page",
            HandleKind::Wizard => "wizard",
        };
        f.write_str(name)
    }
}

/// Forward map for one kind.
pub struct HandleTable<T> {
    kind: HandleKind,
    entries: RefCell<HashMap<Handle, Rc<T>>>,
}

impl<T> HandleTable<T> {
    pub fn new(kind: HandleKind) -> Self {
        Self {
            kind,
            entries: RefCell::new(HashMap::new()),
        }
    }

    pub fn kind(&self) -> HandleKind {
        self.kind
    }

    pub fn get(&self, handle: Handle) -> Option<Rc<T>> {
        self.entries.borrow().get(&handle).cloned()
    }

    pub fn contains(&self, handle: Handle) -> bool {
        self.entries.borrow().contains_key(&handle)
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Every registered entry, in no particular order.
    pub fn snapshot(&self) -> Vec<(Handle, Rc<T>)> {
        self.entries
            .borrow()
            .iter()
            .map(|(handle, object)| (*handle, object.clone()))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Look up a handle that must already exist.
    pub fn resolve(&self, handle: Handle) -> Result<Rc<T>> {
        self.get(handle).ok_or(HostError::HandleNotFound {
            kind: self.kind,
            handle,
        })
    }

    /// Resolve every handle in order, failing on the first missing one.
    pub fn resolve_all(&self, handles: &[Handle]) -> Result<Vec<Rc<T>>> {
        handles.iter().map(|h| self.resolve(*h)).collect()
    }

    /// Add a new entry. Existing entries are never overwritten.
    pub fn register(&self, handle: Handle, object: Rc<T>) -> Result<()> {
        let mut entries = self.entries.borrow_mut();
        if entries.contains_key(&handle) {
            return Err(HostError::AlreadyRegistered {
                kind: self.kind,
                handle,
            });
        }
        entries.insert(handle, object);
        Ok(())
    }

    /// Create-if-absent, then update.
    ///
    /// `construct` and `wire` run only when `handle` is new; `wire` attaches
    /// event subscriptions and runs before the object is registered. `update`
    /// runs on every call. A failing `construct` leaves the table untouched.
    pub fn upsert<C, W, U>(&self, handle: Handle, construct: C, wire: W, update: U) -> Result<Rc<T>>
    where
        C: FnOnce() -> Result<T>,
        W: FnOnce(&Rc<T>),
        U: FnOnce(&T),
    {
        let object = match self.get(handle) {
            Some(existing) => existing,
            None => {
                let created = Rc::new(construct()?);
                wire(&created);
                self.register(handle, created.clone())?;
                tracing::debug!("Created {} {}", self.kind, handle);
                created
            }
        };
        update(&object);
        Ok(object)
    }
}

impl<T> fmt::Debug for HandleTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandleTable")
            .field("kind", &self.kind)
            .field("len", &self.len())
            .finish()
    }
}

/// All handle tables of one host session.
#[derive(Debug)]
pub struct HandleRegistry {
    pub dialogs: HandleTable<Dialog>,
    pub tabs: HandleTable<DialogTab>,
    pub buttons: HandleTable<DialogButton>,
    pub pages: HandleTable<WizardPage>,
    pub wizards: HandleTable<Wizard>,
    page_handles: RefCell<HashMap<PageId, Handle>>,
}

impl Default for HandleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl HandleRegistry {
    pub fn new() -> Self {
        Self {
            dialogs: HandleTable::new(HandleKind::Dialog),
            tabs: HandleTable::new(HandleKind::Tab),
            buttons: HandleTable::new(HandleKind::Button),
            pages: HandleTable::new(HandleKind::WizardPage),
            wizards: HandleTable::new(HandleKind::Wizard),
            page_handles: RefCell::new(HashMap::new()),
        }
    }

    /// Register a page in both the forward table and the reverse index.
    pub fn register_page(&self, handle: Handle, page: Rc<WizardPage>) -> Result<()> {
        let id = page.id();
        self.pages.register(handle, page)?;
        self.page_handles.borrow_mut().insert(id, handle);
        Ok(())
    }

    /// Page upsert that keeps the reverse index in step with the forward table.
    pub fn upsert_page<C, W, U>(
        &self,
        handle: Handle,
        construct: C,
        wire: W,
        update: U,
    ) -> Result<Rc<WizardPage>>
    where
        C: FnOnce() -> Result<WizardPage>,
        W: FnOnce(&Rc<WizardPage>),
        U: FnOnce(&WizardPage),
    {
        let page = match self.pages.get(handle) {
            Some(existing) => existing,
            None => {
                let created = Rc::new(construct()?);
                wire(&created);
                self.register_page(handle, created.clone())?;
                tracing::debug!("Created {} {}", HandleKind::WizardPage, handle);
                created
            }
        };
        update(&page);
        Ok(page)
    }

    /// Reverse lookup from a page object to the handle it was created for.
    pub fn handle_of(&self, page: &WizardPage) -> Result<Handle> {
        self.page_handles
            .borrow()
            .get(&page.id())
            .copied()
            .ok_or_else(|| HostError::UnregisteredPage(format!("{:?}", page.id())))
    }

    /// The wizard currently holding `page`. A page has at most one owner.
    pub fn owner_of(&self, page: &WizardPage) -> Option<(Handle, Rc<Wizard>)> {
        self.wizards
            .snapshot()
            .into_iter()
            .find(|(_, wizard)| wizard.position_of(page).is_some())
    }

    /// Handles of the wizard's pages in order.
    pub fn page_handles(&self, wizard: &Wizard) -> Result<Vec<Handle>> {
        wizard.pages().iter().map(|p| self.handle_of(p)).collect()
    }
}
