//! Test data builders for details payloads

use dialog_host::protocol::{
    ButtonDetails, DialogContentDetails, DialogDetails, WizardDetails, WizardPageDetails,
};
use dialog_host::Handle;
use serde_json::json;

/// Builder for button details
pub struct ButtonBuilder {
    details: ButtonDetails,
}

impl ButtonBuilder {
    pub fn new(label: &str) -> Self {
        Self {
            details: ButtonDetails {
                label: label.to_string(),
                enabled: true,
                hidden: false,
                focused: false,
                secondary: false,
                position: Default::default(),
            },
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.details.enabled = enabled;
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.details.hidden = hidden;
        self
    }

    pub fn build(self) -> ButtonDetails {
        self.details
    }
}

/// Builder for dialog details. Defaults to OK = 1, Cancel = 2 and empty text.
pub struct DialogBuilder {
    details: DialogDetails,
}

impl DialogBuilder {
    pub fn new(title: &str) -> Self {
        Self {
            details: DialogDetails {
                title: title.to_string(),
                name: None,
                width: Default::default(),
                content: DialogContentDetails::Text(String::new()),
                message: None,
                ok_button: Handle(1),
                cancel_button: Handle(2),
                custom_buttons: Vec::new(),
            },
        }
    }

    pub fn text(mut self, text: &str) -> Self {
        self.details.content = DialogContentDetails::Text(text.to_string());
        self
    }

    pub fn tabs(mut self, tabs: &[u32]) -> Self {
        self.details.content = DialogContentDetails::Tabs(tabs.iter().copied().map(Handle).collect());
        self
    }

    pub fn buttons(mut self, ok: u32, cancel: u32) -> Self {
        self.details.ok_button = Handle(ok);
        self.details.cancel_button = Handle(cancel);
        self
    }

    pub fn custom_buttons(mut self, buttons: &[u32]) -> Self {
        self.details.custom_buttons = buttons.iter().copied().map(Handle).collect();
        self
    }

    pub fn build(self) -> DialogDetails {
        self.details
    }
}

pub struct PageBuilder {
    details: WizardPageDetails,
}

impl PageBuilder {
    pub fn new(title: &str) -> Self {
        Self {
            details: WizardPageDetails {
                title: title.to_string(),
                content: json!({ "component": title }),
                enabled: true,
                description: None,
                page_name: None,
                custom_buttons: Vec::new(),
            },
        }
    }

    pub fn description(mut self, description: &str) -> Self {
        self.details.description = Some(description.to_string());
        self
    }

    pub fn build(self) -> WizardPageDetails {
        self.details
    }
}

/// Builder for wizard details. Navigation buttons default to handles 1..=5.
pub struct WizardBuilder {
    details: WizardDetails,
}

impl WizardBuilder {
    pub fn new(title: &str) -> Self {
        Self {
            details: WizardDetails {
                title: title.to_string(),
                name: None,
                width: Default::default(),
                display_page_titles: false,
                pages: Vec::new(),
                current_page: None,
                message: None,
                back_button: Handle(1),
                cancel_button: Handle(2),
                generate_script_button: Handle(3),
                done_button: Handle(4),
                next_button: Handle(5),
                custom_buttons: Vec::new(),
            },
        }
    }

    pub fn pages(mut self, pages: &[u32]) -> Self {
        self.details.pages = pages.iter().copied().map(Handle).collect();
        self
    }

    pub fn current_page(mut self, index: usize) -> Self {
        self.details.current_page = Some(index);
        self
    }

    pub fn build(self) -> WizardDetails {
        self.details
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialog_builder() {
        let details = DialogBuilder::new("Login").tabs(&[7, 8]).buttons(3, 4).build();

        assert_eq!(details.title, "Login");
        assert_eq!(
            details.content,
            DialogContentDetails::Tabs(vec![Handle(7), Handle(8)])
        );
        assert_eq!(details.ok_button, Handle(3));
    }
}
