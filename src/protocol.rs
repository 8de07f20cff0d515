//! Command and notification shapes exchanged with the remote caller.
//!
//! Decoding these from the wire is the transport's job; this module only
//! defines the structured records.
//!
//! - [`InboundCommand`] - remote → host, routed by [`crate::DialogHost::dispatch`]
//! - [`OutboundMessage`] - host → remote, produced by [`crate::proxy::ChannelProxy`]

use crate::model::{ButtonPosition, DialogMessage, DialogWidth, PageChangeInfo};
use crate::presentation::{EditorPosition, ModelViewEditorOptions};
use crate::registry::Handle;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::oneshot;

/// Dialog body as sent by the caller: literal text or tab handles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DialogContentDetails {
    Text(String),
    Tabs(Vec<Handle>),
}

impl Default for DialogContentDetails {
    fn default() -> Self {
        DialogContentDetails::Text(String::new())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogDetails {
    pub title: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub width: DialogWidth,
    #[serde(default)]
    pub content: DialogContentDetails,
    #[serde(default)]
    pub message: Option<DialogMessage>,
    /// Only read when the dialog is created
    pub ok_button: Handle,
    /// Only read when the dialog is created
    pub cancel_button: Handle,
    #[serde(default)]
    pub custom_buttons: Vec<Handle>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabDetails {
    pub title: String,
    #[serde(default)]
    pub content: Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonDetails {
    pub label: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub focused: bool,
    #[serde(default)]
    pub secondary: bool,
    #[serde(default)]
    pub position: ButtonPosition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardPageDetails {
    pub title: String,
    #[serde(default)]
    pub content: Value,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub page_name: Option<String>,
    #[serde(default)]
    pub custom_buttons: Vec<Handle>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardDetails {
    pub title: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub width: DialogWidth,
    #[serde(default)]
    pub display_page_titles: bool,
    #[serde(default)]
    pub pages: Vec<Handle>,
    #[serde(default)]
    pub current_page: Option<usize>,
    #[serde(default)]
    pub message: Option<DialogMessage>,
    pub back_button: Handle,
    pub cancel_button: Handle,
    pub generate_script_button: Handle,
    pub done_button: Handle,
    pub next_button: Handle,
    #[serde(default)]
    pub custom_buttons: Vec<Handle>,
}

fn default_true() -> bool {
    true
}

/// Commands sent from the remote caller to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum InboundCommand {
    OpenDialog {
        handle: Handle,
    },
    CloseDialog {
        handle: Handle,
    },
    OpenWizard {
        handle: Handle,
    },
    CloseWizard {
        handle: Handle,
    },
    #[serde(rename_all = "camelCase")]
    OpenEditor {
        model_view_id: String,
        title: String,
        #[serde(default)]
        options: ModelViewEditorOptions,
        #[serde(default)]
        position: Option<EditorPosition>,
    },
    SetDialogDetails {
        handle: Handle,
        details: DialogDetails,
    },
    SetTabDetails {
        handle: Handle,
        details: TabDetails,
    },
    SetButtonDetails {
        handle: Handle,
        details: ButtonDetails,
    },
    SetWizardPageDetails {
        handle: Handle,
        details: WizardPageDetails,
    },
    SetWizardDetails {
        handle: Handle,
        details: WizardDetails,
    },
    AddWizardPage {
        wizard: Handle,
        page: Handle,
        #[serde(default)]
        index: Option<usize>,
    },
    RemoveWizardPage {
        wizard: Handle,
        index: usize,
    },
    SetWizardPage {
        wizard: Handle,
        index: usize,
    },
}

/// Messages sent from the host to the remote caller.
///
/// The two `Validate*` variants are questions: the remote answers through
/// `responder`, and the triggering user action waits for that answer.
#[derive(Debug)]
pub enum OutboundMessage {
    PanelValidityChanged {
        handle: Handle,
        valid: bool,
    },
    ButtonClick {
        handle: Handle,
    },
    WizardPageChanged {
        handle: Handle,
        info: PageChangeInfo,
    },
    /// Full resync of a wizard's page list after an add or remove.
    WizardPageInfoUpdated {
        handle: Handle,
        pages: Vec<Handle>,
        current_page: Option<usize>,
    },
    ValidateNavigation {
        handle: Handle,
        info: PageChangeInfo,
        responder: oneshot::Sender<bool>,
    },
    ValidateClose {
        handle: Handle,
        responder: oneshot::Sender<bool>,
    },
}

impl OutboundMessage {
    /// Handle of the object this message is about.
    pub fn handle(&self) -> Handle {
        match self {
            OutboundMessage::PanelValidityChanged { handle, .. }
            | OutboundMessage::ButtonClick { handle }
            | OutboundMessage::WizardPageChanged { handle, .. }
            | OutboundMessage::WizardPageInfoUpdated { handle, .. }
            | OutboundMessage::ValidateNavigation { handle, .. }
            | OutboundMessage::ValidateClose { handle, .. } => *handle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MessageLevel;
    use serde_json::json;

    #[test]
    fn test_decodes_dialog_details_with_tab_content() {
        let command: InboundCommand = serde_json::from_value(json!({
            "command": "setDialogDetails",
            "handle": 1,
            "details": {
                "title": "Connect",
                "content": [5, 6],
                "okButton": 2,
                "cancelButton": 3
            }
        }))
        .expect("decode command");

        match command {
            InboundCommand::SetDialogDetails { handle, details } => {
                assert_eq!(handle, Handle(1));
                assert_eq!(
                    details.content,
                    DialogContentDetails::Tabs(vec![Handle(5), Handle(6)])
                );
                assert!(details.custom_buttons.is_empty());
                assert_eq!(details.width, DialogWidth::Medium);
            }
            other => panic!("expected setDialogDetails, got {other:?}"),
        }
    }

    #[test]
    fn test_decodes_text_content_and_message() {
        let details: DialogDetails = serde_json::from_value(json!({
            "title": "Warn",
            "content": "plain text",
            "message": { "text": "careful", "level": "warning" },
            "okButton": 1,
            "cancelButton": 2
        }))
        .expect("decode details");

        assert_eq!(
            details.content,
            DialogContentDetails::Text("plain text".to_string())
        );
        assert_eq!(details.message.unwrap().level, MessageLevel::Warning);
    }

    #[test]
    fn test_button_defaults() {
        let details: ButtonDetails =
            serde_json::from_value(json!({ "label": "Apply" })).expect("decode button");
        assert!(details.enabled);
        assert!(!details.hidden);
        assert_eq!(details.position, ButtonPosition::Right);
    }

    #[test]
    fn test_add_page_index_optional() {
        let command: InboundCommand = serde_json::from_value(json!({
            "command": "addWizardPage",
            "wizard": 4,
            "page": 9
        }))
        .expect("decode addWizardPage");

        assert_eq!(
            command,
            InboundCommand::AddWizardPage {
                wizard: Handle(4),
                page: Handle(9),
                index: None
            }
        );
    }
}
