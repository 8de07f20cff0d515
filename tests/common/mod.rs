//! Common test utilities and helpers

#![allow(dead_code)] // Test utilities may not all be used in every test file

pub mod builders;
pub mod mock_helpers;

use dialog_host::{DialogHost, Handle, HeadlessDriver, HeadlessEditorService, RemoteProxy};
use std::rc::Rc;
use std::time::Duration;

pub use builders::{ButtonBuilder, DialogBuilder, PageBuilder, WizardBuilder};
pub use mock_helpers::{ProxyCall, RecordingProxy};

/// Create a test timeout duration
pub fn test_timeout() -> Duration {
    Duration::from_millis(100)
}

/// Host wired to a recording proxy and headless presentation.
pub struct TestHost {
    pub host: DialogHost,
    pub proxy: Rc<RecordingProxy>,
    pub driver: Rc<HeadlessDriver>,
    pub editors: Rc<HeadlessEditorService>,
}

pub fn test_host() -> TestHost {
    test_host_with(RecordingProxy::new())
}

pub fn test_host_with(proxy: RecordingProxy) -> TestHost {
    let proxy = Rc::new(proxy);
    let driver = Rc::new(HeadlessDriver::new());
    let editors = Rc::new(HeadlessEditorService::new());
    let host = DialogHost::new(
        proxy.clone() as Rc<dyn RemoteProxy>,
        driver.clone(),
        editors.clone(),
    );
    TestHost {
        host,
        proxy,
        driver,
        editors,
    }
}

/// Register buttons with the given handles, labelled "button N".
pub async fn add_buttons(host: &DialogHost, handles: &[u32]) {
    for &h in handles {
        host.set_button_details(Handle(h), ButtonBuilder::new(&format!("button {h}")).build())
            .await
            .unwrap();
    }
}

/// Register wizard pages with the given handles, titled "page N".
pub async fn add_pages(host: &DialogHost, handles: &[u32]) {
    for &h in handles {
        host.set_wizard_page_details(Handle(h), PageBuilder::new(&format!("page {h}")).build())
            .await
            .unwrap();
    }
}
