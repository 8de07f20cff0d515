//! Boundary to the components that actually display dialogs and editors.
//!
//! The host never draws anything. It hands live model objects to a
//! [`PresentationDriver`] and editor inputs to an [`EditorService`]. The
//! user-facing close and finish paths live here because they must consult
//! the model's validators before the driver may hide anything.
//!
//! [`HeadlessDriver`] and [`HeadlessEditorService`] record what they were asked
//! to do; the binary and the tests use them in place of a real UI.

use crate::error::Result;
use crate::model::{Dialog, Subscription, Wizard};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Shows and hides dialogs and wizards.
pub trait PresentationDriver {
    fn show_dialog(&self, dialog: &Rc<Dialog>);
    fn close_dialog(&self, dialog: &Rc<Dialog>);
    fn show_wizard(&self, wizard: &Rc<Wizard>);
    fn close_wizard(&self, wizard: &Rc<Wizard>);
}

/// Options the caller passes through to an editor-hosted model view
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelViewEditorOptions {
    #[serde(default)]
    pub retain_context_when_hidden: bool,
    #[serde(default)]
    pub supports_save: bool,
    #[serde(default)]
    pub resource_name: Option<String>,
}

/// Where an editor should open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EditorPosition {
    Active,
    Beside,
    Column(u32),
}

/// Editor input bound to a model view identifier.
///
/// `model_view_id` belongs to the caller's model-view namespace, not to the
/// dialog handle registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelViewInput {
    pub title: String,
    pub model_view_id: String,
    pub options: ModelViewEditorOptions,
}

/// Presentation options applied when opening a model view editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorOpenOptions {
    pub preserve_focus: bool,
    pub pinned: bool,
}

impl EditorOpenOptions {
    /// Open in the background and keep the tab pinned.
    pub const MODEL_VIEW: EditorOpenOptions = EditorOpenOptions {
        preserve_focus: true,
        pinned: true,
    };
}

/// Hosts editor tabs.
#[async_trait(?Send)]
pub trait EditorService {
    async fn open_editor(
        &self,
        input: ModelViewInput,
        options: EditorOpenOptions,
        position: Option<EditorPosition>,
    ) -> Result<()>;
}

/// User-initiated dialog close. The driver only hides the dialog when the
/// close validator allows it.
pub async fn attempt_close_dialog(
    driver: &dyn PresentationDriver,
    dialog: &Rc<Dialog>,
) -> Result<bool> {
    if !dialog.request_close().await? {
        tracing::debug!("Close of dialog '{}' rejected", dialog.title());
        return Ok(false);
    }
    driver.close_dialog(dialog);
    Ok(true)
}

/// User clicked "done". The wizard closes only when the navigation validator
/// allows finishing from the current page.
pub async fn attempt_finish_wizard(
    driver: &dyn PresentationDriver,
    wizard: &Rc<Wizard>,
) -> Result<bool> {
    if !wizard.done().await? {
        tracing::debug!("Finish of wizard '{}' rejected", wizard.title());
        return Ok(false);
    }
    driver.close_wizard(wizard);
    Ok(true)
}

/// Something a [`HeadlessDriver`] was asked to do or observed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresentationEvent {
    DialogShown(String),
    DialogUpdated(String),
    DialogClosed(String),
    WizardShown(String),
    WizardUpdated(String),
    WizardClosed(String),
}

type Watches<T> = RefCell<Vec<(Weak<T>, Subscription)>>;

/// Driver without a UI: logs and records every request.
///
/// While a dialog or wizard is shown, the driver also watches its updates,
/// the way a real presenter re-renders on mutation.
#[derive(Debug, Default)]
pub struct HeadlessDriver {
    events: Rc<RefCell<Vec<PresentationEvent>>>,
    dialogs: Watches<Dialog>,
    wizards: Watches<Wizard>,
}

impl HeadlessDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<PresentationEvent> {
        self.events.borrow().clone()
    }

    fn record(&self, event: PresentationEvent) {
        record(&self.events, event);
    }
}

fn record(events: &RefCell<Vec<PresentationEvent>>, event: PresentationEvent) {
    tracing::info!("{:?}", event);
    events.borrow_mut().push(event);
}

fn is_watched<T>(watches: &Watches<T>, target: &Rc<T>) -> bool {
    watches
        .borrow()
        .iter()
        .any(|(watched, _)| watched.as_ptr() == Rc::as_ptr(target))
}

fn take_watch<T>(watches: &Watches<T>, target: &Rc<T>) -> Option<Subscription> {
    let mut watches = watches.borrow_mut();
    let index = watches
        .iter()
        .position(|(watched, _)| watched.as_ptr() == Rc::as_ptr(target))?;
    Some(watches.remove(index).1)
}

impl PresentationDriver for HeadlessDriver {
    fn show_dialog(&self, dialog: &Rc<Dialog>) {
        self.record(PresentationEvent::DialogShown(dialog.title()));
        if is_watched(&self.dialogs, dialog) {
            return;
        }
        let events = self.events.clone();
        let target = Rc::downgrade(dialog);
        let token = dialog.on_updated().subscribe(move |_| {
            if let Some(dialog) = target.upgrade() {
                record(&events, PresentationEvent::DialogUpdated(dialog.title()));
            }
        });
        self.dialogs.borrow_mut().push((Rc::downgrade(dialog), token));
    }

    fn close_dialog(&self, dialog: &Rc<Dialog>) {
        if let Some(token) = take_watch(&self.dialogs, dialog) {
            dialog.on_updated().unsubscribe(token);
        }
        self.record(PresentationEvent::DialogClosed(dialog.title()));
    }

    fn show_wizard(&self, wizard: &Rc<Wizard>) {
        self.record(PresentationEvent::WizardShown(wizard.title()));
        if is_watched(&self.wizards, wizard) {
            return;
        }
        let events = self.events.clone();
        let target = Rc::downgrade(wizard);
        let token = wizard.on_updated().subscribe(move |_| {
            if let Some(wizard) = target.upgrade() {
                record(&events, PresentationEvent::WizardUpdated(wizard.title()));
            }
        });
        self.wizards.borrow_mut().push((Rc::downgrade(wizard), token));
    }

    fn close_wizard(&self, wizard: &Rc<Wizard>) {
        if let Some(token) = take_watch(&self.wizards, wizard) {
            wizard.on_updated().unsubscribe(token);
        }
        self.record(PresentationEvent::WizardClosed(wizard.title()));
    }
}

/// Editor service without a UI: records every opened input.
#[derive(Debug, Default)]
pub struct HeadlessEditorService {
    opened: RefCell<Vec<(ModelViewInput, EditorOpenOptions, Option<EditorPosition>)>>,
}

impl HeadlessEditorService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opened(&self) -> Vec<(ModelViewInput, EditorOpenOptions, Option<EditorPosition>)> {
        self.opened.borrow().clone()
    }
}

#[async_trait(?Send)]
impl EditorService for HeadlessEditorService {
    async fn open_editor(
        &self,
        input: ModelViewInput,
        options: EditorOpenOptions,
        position: Option<EditorPosition>,
    ) -> Result<()> {
        tracing::info!("Opening editor '{}' for {}", input.title, input.model_view_id);
        self.opened.borrow_mut().push((input, options, position));
        Ok(())
    }
}
