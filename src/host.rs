//! Host-side synchronization service.
//!
//! [`DialogHost`] receives handle-addressed commands from the remote caller,
//! upserts the matching live model objects in the [`HandleRegistry`], and
//! wires each new object's events to the [`RemoteProxy`] exactly once.
//!
//! # Create or update
//!
//! Every `set_*_details` call follows the same steps:
//!
//! 1. Resolve every handle the payload references. A missing handle fails the
//!    call before anything is created or changed.
//! 2. If the handle is new, construct the object from its construction-only
//!    fields, wire its events, and register it.
//! 3. Apply all mutable fields, whether the object is new or not.
//!
//! Re-wiring on every call would duplicate relay notifications, so wiring
//! lives in step 2 only.
//!
//! # Example
//!
//! ```ignore
//! use dialog_host::{DialogHost, HeadlessDriver, HeadlessEditorService, ChannelProxy};
//!
//! let (proxy, outbound) = ChannelProxy::new(1024, None);
//! let host = DialogHost::new(
//!     Rc::new(proxy),
//!     Rc::new(HeadlessDriver::new()),
//!     Rc::new(HeadlessEditorService::new()),
//! );
//!
//! host.set_button_details(Handle(1), ok_details).await?;
//! host.set_button_details(Handle(2), cancel_details).await?;
//! host.set_dialog_details(Handle(3), dialog_details).await?;
//! host.open_dialog(Handle(3)).await?;
//! ```

use crate::error::{HostError, Result, ResultExt};
use crate::model::{
    Dialog, DialogButton, DialogContent, DialogTab, ValidationFuture, Wizard, WizardButtons,
    WizardPage,
};
use crate::presentation::{
    EditorOpenOptions, EditorPosition, EditorService, ModelViewEditorOptions, ModelViewInput,
    PresentationDriver,
};
use crate::protocol::{
    ButtonDetails, DialogContentDetails, DialogDetails, InboundCommand, TabDetails,
    WizardDetails, WizardPageDetails,
};
use crate::proxy::RemoteProxy;
use crate::registry::{Handle, HandleRegistry};
use std::collections::HashSet;
use std::rc::{Rc, Weak};

/// Authoritative side of the dialog protocol for one session.
pub struct DialogHost {
    registry: Rc<HandleRegistry>,
    proxy: Rc<dyn RemoteProxy>,
    driver: Rc<dyn PresentationDriver>,
    editors: Rc<dyn EditorService>,
}

impl DialogHost {
    pub fn new(
        proxy: Rc<dyn RemoteProxy>,
        driver: Rc<dyn PresentationDriver>,
        editors: Rc<dyn EditorService>,
    ) -> Self {
        Self {
            registry: Rc::new(HandleRegistry::new()),
            proxy,
            driver,
            editors,
        }
    }

    pub fn registry(&self) -> &HandleRegistry {
        &self.registry
    }

    // ==================== Dispatch ====================

    /// Route one inbound command to its operation.
    pub async fn dispatch(&self, command: InboundCommand) -> Result<()> {
        match command {
            InboundCommand::OpenDialog { handle } => self.open_dialog(handle).await,
            InboundCommand::CloseDialog { handle } => self.close_dialog(handle).await,
            InboundCommand::OpenWizard { handle } => self.open_wizard(handle).await,
            InboundCommand::CloseWizard { handle } => self.close_wizard(handle).await,
            InboundCommand::OpenEditor {
                model_view_id,
                title,
                options,
                position,
            } => {
                self.open_editor(model_view_id, title, options, position)
                    .await
            }
            InboundCommand::SetDialogDetails { handle, details } => {
                self.set_dialog_details(handle, details).await
            }
            InboundCommand::SetTabDetails { handle, details } => {
                self.set_tab_details(handle, details).await
            }
            InboundCommand::SetButtonDetails { handle, details } => {
                self.set_button_details(handle, details).await
            }
            InboundCommand::SetWizardPageDetails { handle, details } => {
                self.set_wizard_page_details(handle, details).await
            }
            InboundCommand::SetWizardDetails { handle, details } => {
                self.set_wizard_details(handle, details).await
            }
            InboundCommand::AddWizardPage {
                wizard,
                page,
                index,
            } => self.add_wizard_page(wizard, page, index).await,
            InboundCommand::RemoveWizardPage { wizard, index } => {
                self.remove_wizard_page(wizard, index).await
            }
            InboundCommand::SetWizardPage { wizard, index } => {
                self.set_wizard_page(wizard, index).await
            }
        }
    }

    // ==================== Open / Close ====================

    pub async fn open_dialog(&self, handle: Handle) -> Result<()> {
        let dialog = self.registry.dialogs.resolve(handle)?;
        tracing::info!("Opening dialog {} '{}'", handle, dialog.title());
        self.driver.show_dialog(&dialog);
        Ok(())
    }

    pub async fn close_dialog(&self, handle: Handle) -> Result<()> {
        let dialog = self.registry.dialogs.resolve(handle)?;
        tracing::info!("Closing dialog {}", handle);
        self.driver.close_dialog(&dialog);
        Ok(())
    }

    pub async fn open_wizard(&self, handle: Handle) -> Result<()> {
        let wizard = self.registry.wizards.resolve(handle)?;
        tracing::info!("Opening wizard {} '{}'", handle, wizard.title());
        self.driver.show_wizard(&wizard);
        Ok(())
    }

    pub async fn close_wizard(&self, handle: Handle) -> Result<()> {
        let wizard = self.registry.wizards.resolve(handle)?;
        tracing::info!("Closing wizard {}", handle);
        self.driver.close_wizard(&wizard);
        Ok(())
    }

    /// Open a model view in an editor tab. Independent of the dialog registry.
    pub async fn open_editor(
        &self,
        model_view_id: String,
        title: String,
        options: ModelViewEditorOptions,
        position: Option<EditorPosition>,
    ) -> Result<()> {
        let input = ModelViewInput {
            title,
            model_view_id,
            options,
        };
        tracing::info!("Opening editor for model view {}", input.model_view_id);
        self.editors
            .open_editor(input, EditorOpenOptions::MODEL_VIEW, position)
            .await
    }

    /// Tearing a host down is not supported; callers must not rely on it.
    pub fn dispose(&self) -> Result<()> {
        Err(HostError::Unimplemented("dialog host disposal"))
    }

    // ==================== Set details ====================

    pub async fn set_dialog_details(&self, handle: Handle, details: DialogDetails) -> Result<()> {
        let registry = &self.registry;
        let content = match &details.content {
            DialogContentDetails::Text(text) => DialogContent::Text(text.clone()),
            DialogContentDetails::Tabs(tabs) => DialogContent::Tabs(
                registry
                    .tabs
                    .resolve_all(tabs)
                    .with_context(|| format!("dialog {handle} content"))?,
            ),
        };
        let custom_buttons = registry
            .buttons
            .resolve_all(&details.custom_buttons)
            .with_context(|| format!("dialog {handle} custom buttons"))?;

        registry.dialogs.upsert(
            handle,
            || {
                let ok = registry.buttons.resolve(details.ok_button)?;
                let cancel = registry.buttons.resolve(details.cancel_button)?;
                Ok(Dialog::new(details.title.clone(), ok, cancel))
            },
            |dialog| self.wire_dialog(handle, dialog),
            |dialog| {
                dialog.update(|state| {
                    state.title = details.title.clone();
                    state.name = details.name.clone();
                    state.width = details.width;
                    state.content = content;
                    state.message = details.message.clone();
                    state.custom_buttons = custom_buttons;
                })
            },
        )?;
        Ok(())
    }

    pub async fn set_tab_details(&self, handle: Handle, details: TabDetails) -> Result<()> {
        self.registry.tabs.upsert(
            handle,
            || Ok(DialogTab::new(details.title.clone())),
            |tab| {
                let proxy = self.proxy.clone();
                tab.validity()
                    .on_changed()
                    .subscribe(move |valid| proxy.on_panel_validity_changed(handle, *valid));
            },
            |tab| {
                tab.update(|state| {
                    state.title = details.title.clone();
                    state.content = details.content.clone();
                })
            },
        )?;
        Ok(())
    }

    pub async fn set_button_details(&self, handle: Handle, details: ButtonDetails) -> Result<()> {
        self.registry.buttons.upsert(
            handle,
            || Ok(DialogButton::new(details.label.clone(), details.enabled)),
            |button| {
                let proxy = self.proxy.clone();
                button
                    .on_click()
                    .subscribe(move |_| proxy.on_button_click(handle));
            },
            |button| {
                button.update(|state| {
                    state.label = details.label.clone();
                    state.enabled = details.enabled;
                    state.hidden = details.hidden;
                    state.focused = details.focused;
                    state.secondary = details.secondary;
                    state.position = details.position;
                })
            },
        )?;
        Ok(())
    }

    pub async fn set_wizard_page_details(
        &self,
        handle: Handle,
        details: WizardPageDetails,
    ) -> Result<()> {
        let custom_buttons = self
            .registry
            .buttons
            .resolve_all(&details.custom_buttons)
            .with_context(|| format!("wizard page {handle} custom buttons"))?;

        self.registry.upsert_page(
            handle,
            || {
                Ok(WizardPage::new(
                    details.title.clone(),
                    details.content.clone(),
                ))
            },
            |page| {
                let proxy = self.proxy.clone();
                page.validity()
                    .on_changed()
                    .subscribe(move |valid| proxy.on_panel_validity_changed(handle, *valid));
            },
            |page| {
                page.update(|state| {
                    state.title = details.title.clone();
                    state.content = details.content.clone();
                    state.enabled = details.enabled;
                    state.description = details.description.clone();
                    state.page_name = details.page_name.clone();
                    state.custom_buttons = custom_buttons;
                })
            },
        )?;
        Ok(())
    }

    pub async fn set_wizard_details(&self, handle: Handle, details: WizardDetails) -> Result<()> {
        let registry = &self.registry;
        if let Some(index) = details.current_page {
            if index >= details.pages.len() {
                return Err(HostError::PageIndexOutOfRange {
                    index,
                    len: details.pages.len(),
                });
            }
        }
        let mut listed = HashSet::new();
        if let Some(&page) = details.pages.iter().find(|&&page| !listed.insert(page)) {
            return Err(HostError::PageAlreadyAttached {
                page,
                wizard: handle,
            });
        }
        let pages = registry
            .pages
            .resolve_all(&details.pages)
            .with_context(|| format!("wizard {handle} pages"))?;
        let buttons = self
            .resolve_wizard_buttons(&details)
            .context(format!("wizard {handle} navigation buttons"))?;
        let custom_buttons = registry
            .buttons
            .resolve_all(&details.custom_buttons)
            .with_context(|| format!("wizard {handle} custom buttons"))?;

        self.detach_from_other_wizards(handle, &pages)?;

        let wizard = registry.wizards.upsert(
            handle,
            || Ok(Wizard::new(details.title.clone(), buttons.clone())),
            |wizard| self.wire_wizard(handle, wizard),
            |wizard| {
                wizard.update(|state| {
                    state.title = details.title.clone();
                    state.name = details.name.clone();
                    state.width = details.width;
                    state.display_page_titles = details.display_page_titles;
                    state.message = details.message.clone();
                    state.buttons = buttons.clone();
                    state.custom_buttons = custom_buttons;
                });
                wizard.set_pages(pages);
            },
        )?;

        if let Some(index) = details.current_page {
            wizard.set_current_page(index)?;
        }
        Ok(())
    }

    // ==================== Wizard pages ====================

    /// Attach `page` to `wizard`. A page held by another wizard moves here.
    pub async fn add_wizard_page(
        &self,
        wizard: Handle,
        page: Handle,
        index: Option<usize>,
    ) -> Result<()> {
        let target = self.registry.wizards.resolve(wizard)?;
        let page_object = self.registry.pages.resolve(page)?;
        let len = target.page_count();
        if let Some(index) = index.filter(|&index| index > len) {
            return Err(HostError::PageIndexOutOfRange { index, len });
        }
        if target.position_of(&page_object).is_some() {
            return Err(HostError::PageAlreadyAttached { page, wizard });
        }

        self.detach_from_other_wizards(wizard, std::slice::from_ref(&page_object))?;
        target.add_page(page_object, index)?;
        Ok(())
    }

    pub async fn remove_wizard_page(&self, wizard: Handle, index: usize) -> Result<()> {
        let target = self.registry.wizards.resolve(wizard)?;
        target.remove_page(index)?;
        Ok(())
    }

    /// Programmatic page change. The navigation validator is not consulted.
    pub async fn set_wizard_page(&self, wizard: Handle, index: usize) -> Result<()> {
        let target = self.registry.wizards.resolve(wizard)?;
        target.set_current_page(index)
    }

    fn resolve_wizard_buttons(&self, details: &WizardDetails) -> Result<WizardButtons> {
        let buttons = &self.registry.buttons;
        Ok(WizardButtons {
            back: buttons.resolve(details.back_button)?,
            cancel: buttons.resolve(details.cancel_button)?,
            generate_script: buttons.resolve(details.generate_script_button)?,
            done: buttons.resolve(details.done_button)?,
            next: buttons.resolve(details.next_button)?,
        })
    }

    /// Remove `pages` from whichever other wizard currently holds them.
    fn detach_from_other_wizards(&self, wizard: Handle, pages: &[Rc<WizardPage>]) -> Result<()> {
        for page in pages {
            let Some((owner, previous)) = self.registry.owner_of(page) else {
                continue;
            };
            if owner == wizard {
                continue;
            }
            if let Some(position) = previous.position_of(page) {
                previous.remove_page(position)?;
                tracing::debug!("Moved wizard page from wizard {} to {}", owner, wizard);
            }
        }
        Ok(())
    }

    // ==================== Wiring ====================

    fn wire_dialog(&self, handle: Handle, dialog: &Rc<Dialog>) {
        let proxy = self.proxy.clone();
        dialog
            .validity()
            .on_changed()
            .subscribe(move |valid| proxy.on_panel_validity_changed(handle, *valid));

        let proxy = self.proxy.clone();
        dialog.register_close_validator(Rc::new(move || -> ValidationFuture {
            let proxy = proxy.clone();
            Box::pin(async move { proxy.validate_close(handle).await })
        }));
    }

    fn wire_wizard(&self, handle: Handle, wizard: &Rc<Wizard>) {
        let proxy = self.proxy.clone();
        wizard
            .on_page_changed()
            .subscribe(move |info| proxy.on_wizard_page_changed(handle, *info));

        let resync = self.page_info_relay(handle, wizard);
        wizard.on_page_added().subscribe({
            let resync = resync.clone();
            move |_| resync()
        });
        wizard.on_page_removed().subscribe(move |_| resync());

        let proxy = self.proxy.clone();
        wizard.register_navigation_validator(Rc::new(move |info| -> ValidationFuture {
            let proxy = proxy.clone();
            Box::pin(async move { proxy.validate_navigation(handle, info).await })
        }));
    }

    /// Builds the full-resync relay fired after a page is added or removed.
    fn page_info_relay(&self, handle: Handle, wizard: &Rc<Wizard>) -> Rc<dyn Fn()> {
        let proxy = self.proxy.clone();
        let registry: Weak<HandleRegistry> = Rc::downgrade(&self.registry);
        let wizard: Weak<Wizard> = Rc::downgrade(wizard);
        Rc::new(move || {
            let (Some(registry), Some(wizard)) = (registry.upgrade(), wizard.upgrade()) else {
                return;
            };
            match registry.page_handles(&wizard) {
                Ok(pages) => proxy.update_wizard_page_info(handle, pages, wizard.current_page()),
                Err(err) => tracing::warn!("Cannot report pages of wizard {}: {}", handle, err),
            }
        })
    }
}
