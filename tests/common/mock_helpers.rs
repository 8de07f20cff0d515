//! Mock construction helpers

use async_trait::async_trait;
use dialog_host::model::{Dialog, PageChangeInfo, Wizard};
use dialog_host::presentation::{EditorOpenOptions, EditorPosition, ModelViewInput};
use dialog_host::{EditorService, Handle, HostError, PresentationDriver, RemoteProxy, Result};
use mockall::mock;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// One call the host made on its proxy
#[derive(Debug, Clone, PartialEq)]
pub enum ProxyCall {
    Validity(Handle, bool),
    Click(Handle),
    PageChanged(Handle, PageChangeInfo),
    PageInfo(Handle, Vec<Handle>, Option<usize>),
    ValidateNavigation(Handle, PageChangeInfo),
    ValidateClose(Handle),
}

/// Proxy that records every call and answers questions from fixed settings.
pub struct RecordingProxy {
    calls: RefCell<Vec<ProxyCall>>,
    allow_navigation: Cell<bool>,
    allow_close: Cell<bool>,
}

impl RecordingProxy {
    pub fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            allow_navigation: Cell::new(true),
            allow_close: Cell::new(true),
        }
    }

    pub fn allow_navigation(&self, allow: bool) {
        self.allow_navigation.set(allow);
    }

    pub fn allow_close(&self, allow: bool) {
        self.allow_close.set(allow);
    }

    pub fn calls(&self) -> Vec<ProxyCall> {
        self.calls.borrow().clone()
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }

    /// Number of recorded calls matching `pred`
    pub fn count(&self, pred: impl Fn(&ProxyCall) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: ProxyCall) {
        self.calls.borrow_mut().push(call);
    }
}

#[async_trait(?Send)]
impl RemoteProxy for RecordingProxy {
    fn on_panel_validity_changed(&self, handle: Handle, valid: bool) {
        self.record(ProxyCall::Validity(handle, valid));
    }

    fn on_button_click(&self, handle: Handle) {
        self.record(ProxyCall::Click(handle));
    }

    fn on_wizard_page_changed(&self, handle: Handle, info: PageChangeInfo) {
        self.record(ProxyCall::PageChanged(handle, info));
    }

    fn update_wizard_page_info(&self, handle: Handle, pages: Vec<Handle>, current_page: Option<usize>) {
        self.record(ProxyCall::PageInfo(handle, pages, current_page));
    }

    async fn validate_navigation(&self, handle: Handle, info: PageChangeInfo) -> Result<bool> {
        self.record(ProxyCall::ValidateNavigation(handle, info));
        Ok(self.allow_navigation.get())
    }

    async fn validate_close(&self, handle: Handle) -> Result<bool> {
        self.record(ProxyCall::ValidateClose(handle));
        Ok(self.allow_close.get())
    }
}

mock! {
    pub Driver {}

    impl PresentationDriver for Driver {
        fn show_dialog(&self, dialog: &Rc<Dialog>);
        fn close_dialog(&self, dialog: &Rc<Dialog>);
        fn show_wizard(&self, wizard: &Rc<Wizard>);
        fn close_wizard(&self, wizard: &Rc<Wizard>);
    }
}

/// Editor service whose every open fails
pub struct FailingEditors;

#[async_trait(?Send)]
impl EditorService for FailingEditors {
    async fn open_editor(
        &self,
        input: ModelViewInput,
        _options: EditorOpenOptions,
        _position: Option<EditorPosition>,
    ) -> Result<()> {
        Err(HostError::Remote(format!(
            "no editor available for {}",
            input.model_view_id
        )))
    }
}
