//! Dialog Host - headless demo session
//!
//! Drives a scripted dialog and wizard session through the host, with a
//! background thread playing the remote caller: it logs every outbound
//! message and approves every close or navigation question.
//!
//! Usage: `dialog-host [config.toml]`

use anyhow::Context;
use crossbeam_channel::Receiver;
use dialog_host::{
    config::HostConfig,
    logging::init_logging,
    presentation::{attempt_close_dialog, attempt_finish_wizard},
    ChannelProxy, DialogHost, Handle, HeadlessDriver, HeadlessEditorService, InboundCommand,
    OutboundMessage,
};
use serde_json::json;
use std::rc::Rc;
use std::thread;

fn main() -> anyhow::Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => HostConfig::load(&path).with_context(|| format!("loading {path}"))?,
        None => HostConfig::load_or_default(),
    };
    let _log_guard = init_logging(&config);

    tracing::info!("Starting dialog host demo session");

    let (proxy, outbound) =
        ChannelProxy::new(config.outbound_queue_capacity, config.validator_timeout());
    let remote = thread::spawn(move || remote_loop(outbound));

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("building runtime")?;
    let result = runtime.block_on(run_session(proxy));

    // Dropping the proxy (inside the host) closes the channel and ends the remote loop.
    tracing::info!("Shutting down...");
    if remote.join().is_err() {
        tracing::warn!("Remote loop panicked");
    }

    result
}

async fn run_session(proxy: ChannelProxy) -> anyhow::Result<()> {
    let driver = Rc::new(HeadlessDriver::new());
    let host = DialogHost::new(
        Rc::new(proxy),
        driver.clone(),
        Rc::new(HeadlessEditorService::new()),
    );

    for command in script()? {
        host.dispatch(command).await?;
    }

    let dialog = host.registry().dialogs.resolve(Handle(100))?;
    if let Some(apply) = dialog.custom_buttons().first() {
        apply.click();
    }
    host.registry().tabs.resolve(Handle(10))?.validity().set(false);
    attempt_close_dialog(driver.as_ref(), &dialog).await?;

    let wizard = host.registry().wizards.resolve(Handle(200))?;
    wizard.next().await?;
    wizard.next().await?;
    wizard.back().await?;
    attempt_finish_wizard(driver.as_ref(), &wizard).await?;

    tracing::info!("Presentation events: {:?}", driver.events());
    Ok(())
}

fn remote_loop(outbound: Receiver<OutboundMessage>) {
    for message in outbound {
        match message {
            OutboundMessage::ValidateNavigation {
                handle,
                info,
                responder,
            } => {
                tracing::info!("remote: approve navigation of {} {:?}", handle, info);
                let _ = responder.send(true);
            }
            OutboundMessage::ValidateClose { handle, responder } => {
                tracing::info!("remote: approve close of {}", handle);
                let _ = responder.send(true);
            }
            other => tracing::info!("remote: {:?}", other),
        }
    }
}

/// Commands a remote caller would send to build one dialog and one wizard.
fn script() -> serde_json::Result<Vec<InboundCommand>> {
    let buttons = ["OK", "Cancel", "Apply", "Back", "Next", "Script", "Done"]
        .iter()
        .enumerate()
        .map(|(i, label)| {
            json!({
                "command": "setButtonDetails",
                "handle": i + 1,
                "details": { "label": label }
            })
        });

    let rest = vec![
        json!({
            "command": "setTabDetails",
            "handle": 10,
            "details": { "title": "General", "content": { "view": "general-form" } }
        }),
        json!({
            "command": "setTabDetails",
            "handle": 11,
            "details": { "title": "Advanced", "content": { "view": "advanced-form" } }
        }),
        json!({
            "command": "setDialogDetails",
            "handle": 100,
            "details": {
                "title": "Connection",
                "content": [10, 11],
                "okButton": 1,
                "cancelButton": 2,
                "customButtons": [3]
            }
        }),
        json!({ "command": "openDialog", "handle": 100 }),
        json!({
            "command": "setWizardPageDetails",
            "handle": 20,
            "details": { "title": "Source" }
        }),
        json!({
            "command": "setWizardPageDetails",
            "handle": 21,
            "details": { "title": "Target" }
        }),
        json!({
            "command": "setWizardPageDetails",
            "handle": 22,
            "details": { "title": "Summary", "description": "Review and finish" }
        }),
        json!({
            "command": "setWizardDetails",
            "handle": 200,
            "details": {
                "title": "Migration",
                "displayPageTitles": true,
                "pages": [20, 22],
                "currentPage": 0,
                "backButton": 4,
                "cancelButton": 2,
                "generateScriptButton": 6,
                "doneButton": 7,
                "nextButton": 5
            }
        }),
        json!({ "command": "addWizardPage", "wizard": 200, "page": 21, "index": 1 }),
        json!({ "command": "openWizard", "handle": 200 }),
        json!({
            "command": "openEditor",
            "modelViewId": "dashboard-1",
            "title": "Dashboard",
            "position": "beside"
        }),
    ];

    buttons.chain(rest).map(serde_json::from_value).collect()
}
