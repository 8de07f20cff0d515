//! # dialog-host: authoritative side of a remote dialog protocol
//!
//! A remote caller describes dialogs, tabs, buttons, wizard pages and wizards
//! by integer handle. This crate keeps the live objects those handles refer
//! to, applies the caller's create-or-update commands, and relays user events
//! (clicks, validity, page navigation, close attempts) back to the caller.
//!
//! ## Architecture
//!
//! - **Registry**: one handle table per object kind plus a page → handle reverse index
//! - **Model**: `Rc` objects with explicit event emitters and async validators
//! - **Host**: the `set_*_details` upserts and page management, wired to the proxy once per object
//! - **Proxy**: outbound notifications and yes/no questions to the remote caller
//! - **Presentation**: traits for whatever actually shows dialogs and editors
//!
//! Everything runs on one dispatch thread; nothing here is `Send`.
//!
//! ## Example
//!
//! ```ignore
//! use dialog_host::{ChannelProxy, DialogHost, HeadlessDriver, HeadlessEditorService, InboundCommand};
//! use std::rc::Rc;
//!
//! let (proxy, outbound) = ChannelProxy::new(1024, None);
//! let host = DialogHost::new(
//!     Rc::new(proxy),
//!     Rc::new(HeadlessDriver::new()),
//!     Rc::new(HeadlessEditorService::new()),
//! );
//!
//! // The transport decodes commands and feeds them in order
//! let command: InboundCommand = serde_json::from_slice(&frame)?;
//! host.dispatch(command).await?;
//!
//! // ...and drains `outbound`, answering validation questions via their responder
//! ```

pub mod config;
pub mod error;
pub mod host;
pub mod logging;
pub mod model;
pub mod presentation;
pub mod protocol;
pub mod proxy;
pub mod registry;

// Re-export commonly used types
pub use config::HostConfig;
pub use error::{HostError, Result};
pub use host::DialogHost;
pub use model::{Dialog, DialogButton, DialogTab, PageChangeInfo, Wizard, WizardPage};
pub use presentation::{
    EditorService, HeadlessDriver, HeadlessEditorService, PresentationDriver,
};
pub use protocol::{InboundCommand, OutboundMessage};
pub use proxy::{ChannelProxy, RemoteProxy};
pub use registry::{Handle, HandleKind, HandleRegistry};
