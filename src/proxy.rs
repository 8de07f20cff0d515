//! Outbound relay to the remote caller.
//!
//! [`RemoteProxy`] is the seam the host wires model events into. Four calls
//! are fire-and-forget notifications; `validate_navigation` and
//! `validate_close` are questions whose boolean answer comes back later.
//!
//! [`ChannelProxy`] implements the trait on top of a bounded crossbeam
//! channel of [`OutboundMessage`]s. The transport drains the receiver and
//! answers questions through the `oneshot` responder carried in the message.
//! Sends never block the dispatch thread: a full queue drops notifications
//! and fails questions.

use crate::error::{HostError, Result};
use crate::model::PageChangeInfo;
use crate::protocol::OutboundMessage;
use crate::registry::Handle;
use async_trait::async_trait;
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use std::time::Duration;
use tokio::sync::oneshot;

/// Default capacity of the outbound message queue.
pub const DEFAULT_OUTBOUND_CAPACITY: usize = 1024;

/// Calls from the host to the remote caller.
#[async_trait(?Send)]
pub trait RemoteProxy {
    fn on_panel_validity_changed(&self, handle: Handle, valid: bool);

    fn on_button_click(&self, handle: Handle);

    fn on_wizard_page_changed(&self, handle: Handle, info: PageChangeInfo);

    /// Full page list of a wizard, in order, plus its current page.
    fn update_wizard_page_info(&self, handle: Handle, pages: Vec<Handle>, current_page: Option<usize>);

    /// May the wizard move as described by `info`?
    async fn validate_navigation(&self, handle: Handle, info: PageChangeInfo) -> Result<bool>;

    /// May the dialog close?
    async fn validate_close(&self, handle: Handle) -> Result<bool>;
}

/// [`RemoteProxy`] that queues [`OutboundMessage`]s for a transport.
pub struct ChannelProxy {
    tx: Sender<OutboundMessage>,
    reply_timeout: Option<Duration>,
}

impl ChannelProxy {
    /// Create the proxy and the receiver the transport drains.
    ///
    /// With `reply_timeout` unset, a question waits for its answer forever.
    pub fn new(
        capacity: usize,
        reply_timeout: Option<Duration>,
    ) -> (Self, Receiver<OutboundMessage>) {
        let (tx, rx) = bounded(capacity);
        (Self { tx, reply_timeout }, rx)
    }

    fn notify(&self, message: OutboundMessage) {
        let handle = message.handle();
        match self.tx.try_send(message) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                tracing::warn!("Outbound queue full; dropped notification for handle {}", handle);
            }
            Err(TrySendError::Disconnected(_)) => {
                tracing::warn!("Remote disconnected; dropped notification for handle {}", handle);
            }
        }
    }

    async fn ask(&self, message: OutboundMessage, rx: oneshot::Receiver<bool>) -> Result<bool> {
        let handle = message.handle();
        self.tx.try_send(message).map_err(|e| match e {
            TrySendError::Full(_) => {
                HostError::Channel(format!("outbound queue full; query for handle {handle} not sent"))
            }
            TrySendError::Disconnected(_) => {
                HostError::Channel(format!("remote disconnected before query for handle {handle}"))
            }
        })?;

        let reply = match self.reply_timeout {
            Some(limit) => tokio::time::timeout(limit, rx).await.map_err(|_| {
                HostError::Timeout(format!("no reply for handle {handle} within {limit:?}"))
            })?,
            None => rx.await,
        };

        reply.map_err(|_| HostError::Remote(format!("remote dropped the reply for handle {handle}")))
    }
}

#[async_trait(?Send)]
impl RemoteProxy for ChannelProxy {
    fn on_panel_validity_changed(&self, handle: Handle, valid: bool) {
        self.notify(OutboundMessage::PanelValidityChanged { handle, valid });
    }

    fn on_button_click(&self, handle: Handle) {
        self.notify(OutboundMessage::ButtonClick { handle });
    }

    fn on_wizard_page_changed(&self, handle: Handle, info: PageChangeInfo) {
        self.notify(OutboundMessage::WizardPageChanged { handle, info });
    }

    fn update_wizard_page_info(&self, handle: Handle, pages: Vec<Handle>, current_page: Option<usize>) {
        self.notify(OutboundMessage::WizardPageInfoUpdated {
            handle,
            pages,
            current_page,
        });
    }

    async fn validate_navigation(&self, handle: Handle, info: PageChangeInfo) -> Result<bool> {
        let (responder, rx) = oneshot::channel();
        self.ask(
            OutboundMessage::ValidateNavigation {
                handle,
                info,
                responder,
            },
            rx,
        )
        .await
    }

    async fn validate_close(&self, handle: Handle) -> Result<bool> {
        let (responder, rx) = oneshot::channel();
        self.ask(OutboundMessage::ValidateClose { handle, responder }, rx)
            .await
    }
}
