//! Multi-page wizards.
//!
//! A wizard owns an ordered list of [`WizardPage`]s and a current page index.
//! Programmatic changes ([`Wizard::set_current_page`]) apply directly; user
//! navigation ([`Wizard::navigate_to`], [`Wizard::next`], [`Wizard::back`],
//! [`Wizard::done`]) first asks the navigation validator.

use crate::error::{HostError, Result};
use crate::model::button::DialogButton;
use crate::model::events::Emitter;
use crate::model::wizard_page::WizardPage;
use crate::model::{DialogMessage, DialogWidth, NavigationValidator, PageChangeInfo};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Navigation buttons of a wizard
#[derive(Debug, Clone)]
pub struct WizardButtons {
    pub back: Rc<DialogButton>,
    pub cancel: Rc<DialogButton>,
    pub generate_script: Rc<DialogButton>,
    pub done: Rc<DialogButton>,
    pub next: Rc<DialogButton>,
}

/// Mutable wizard fields
#[derive(Debug, Clone)]
pub struct WizardState {
    pub title: String,
    pub name: Option<String>,
    pub width: DialogWidth,
    pub display_page_titles: bool,
    pub message: Option<DialogMessage>,
    pub buttons: WizardButtons,
    pub custom_buttons: Vec<Rc<DialogButton>>,
}

pub struct Wizard {
    state: RefCell<WizardState>,
    pages: RefCell<Vec<Rc<WizardPage>>>,
    current_page: RefCell<Option<usize>>,
    navigation_validator: RefCell<Option<NavigationValidator>>,
    page_changed: Emitter<PageChangeInfo>,
    page_added: Emitter<usize>,
    page_removed: Emitter<usize>,
    updated: Emitter<()>,
}

impl Wizard {
    pub fn new(title: impl Into<String>, buttons: WizardButtons) -> Self {
        Self {
            state: RefCell::new(WizardState {
                title: title.into(),
                name: None,
                width: DialogWidth::default(),
                display_page_titles: false,
                message: None,
                buttons,
                custom_buttons: Vec::new(),
            }),
            pages: RefCell::new(Vec::new()),
            current_page: RefCell::new(None),
            navigation_validator: RefCell::new(None),
            page_changed: Emitter::new(),
            page_added: Emitter::new(),
            page_removed: Emitter::new(),
            updated: Emitter::new(),
        }
    }

    pub fn state(&self) -> WizardState {
        self.state.borrow().clone()
    }

    pub fn title(&self) -> String {
        self.state.borrow().title.clone()
    }

    pub fn update(&self, f: impl FnOnce(&mut WizardState)) {
        f(&mut self.state.borrow_mut());
        self.updated.emit(&());
    }

    pub fn pages(&self) -> Vec<Rc<WizardPage>> {
        self.pages.borrow().clone()
    }

    pub fn page_count(&self) -> usize {
        self.pages.borrow().len()
    }

    pub fn current_page(&self) -> Option<usize> {
        *self.current_page.borrow()
    }

    /// Position of `page` in this wizard, if attached.
    pub fn position_of(&self, page: &WizardPage) -> Option<usize> {
        self.pages.borrow().iter().position(|p| p.id() == page.id())
    }

    /// Replace the whole page list. The current page is clamped to the new list.
    ///
    /// This mirrors a list the caller already holds, so no add/remove events fire.
    pub fn set_pages(&self, pages: Vec<Rc<WizardPage>>) {
        let len = pages.len();
        *self.pages.borrow_mut() = pages;
        {
            let mut current = self.current_page.borrow_mut();
            *current = match *current {
                _ if len == 0 => None,
                Some(index) if index >= len => Some(len - 1),
                other => other,
            };
        }
        self.updated.emit(&());
    }

    /// Insert `page` at `index`, or append when `index` is `None`.
    pub fn add_page(&self, page: Rc<WizardPage>, index: Option<usize>) -> Result<usize> {
        let position = {
            let mut pages = self.pages.borrow_mut();
            let len = pages.len();
            let position = index.unwrap_or(len);
            if position > len {
                return Err(HostError::PageIndexOutOfRange {
                    index: position,
                    len,
                });
            }
            pages.insert(position, page);
            position
        };
        {
            let mut current = self.current_page.borrow_mut();
            if let Some(cur) = *current {
                if position <= cur {
                    *current = Some(cur + 1);
                }
            }
        }
        self.page_added.emit(&position);
        Ok(position)
    }

    /// Remove the page at `index` and return it.
    pub fn remove_page(&self, index: usize) -> Result<Rc<WizardPage>> {
        let (removed, remaining) = {
            let mut pages = self.pages.borrow_mut();
            let len = pages.len();
            if index >= len {
                return Err(HostError::PageIndexOutOfRange { index, len });
            }
            (pages.remove(index), pages.len())
        };
        {
            let mut current = self.current_page.borrow_mut();
            *current = match *current {
                _ if remaining == 0 => None,
                Some(cur) if index < cur => Some(cur - 1),
                Some(cur) if cur >= remaining => Some(remaining - 1),
                other => other,
            };
        }
        self.page_removed.emit(&index);
        Ok(removed)
    }

    /// Set the current page without consulting the navigation validator.
    pub fn set_current_page(&self, index: usize) -> Result<()> {
        let len = self.page_count();
        if index >= len {
            return Err(HostError::PageIndexOutOfRange { index, len });
        }
        let last_page = self.current_page.replace(Some(index));
        if last_page != Some(index) {
            self.page_changed.emit(&PageChangeInfo {
                last_page,
                new_page: Some(index),
            });
        }
        Ok(())
    }

    /// Install the navigation validator, replacing any previous one.
    pub fn register_navigation_validator(&self, validator: NavigationValidator) {
        *self.navigation_validator.borrow_mut() = Some(validator);
    }

    pub fn has_navigation_validator(&self) -> bool {
        self.navigation_validator.borrow().is_some()
    }

    /// Ask the navigation validator about a transition. Without a validator
    /// every transition is allowed.
    pub async fn validate_navigation(&self, info: PageChangeInfo) -> Result<bool> {
        let validator = self.navigation_validator.borrow().clone();
        match validator {
            Some(validator) => validator(info).await,
            None => Ok(true),
        }
    }

    /// User navigation to `index`. The current page only changes when the
    /// validator allows it.
    pub async fn navigate_to(&self, index: usize) -> Result<bool> {
        let len = self.page_count();
        if index >= len {
            return Err(HostError::PageIndexOutOfRange { index, len });
        }
        let info = PageChangeInfo {
            last_page: self.current_page(),
            new_page: Some(index),
        };
        if !self.validate_navigation(info).await? {
            tracing::debug!("Navigation {:?} rejected", info);
            return Ok(false);
        }
        self.set_current_page(index)?;
        Ok(true)
    }

    /// Move to the following page. Returns false at the last page.
    pub async fn next(&self) -> Result<bool> {
        let target = match self.current_page() {
            Some(cur) => cur + 1,
            None => 0,
        };
        if target >= self.page_count() {
            return Ok(false);
        }
        self.navigate_to(target).await
    }

    /// Move to the preceding page. Returns false at the first page.
    pub async fn back(&self) -> Result<bool> {
        match self.current_page() {
            Some(cur) if cur > 0 => self.navigate_to(cur - 1).await,
            _ => Ok(false),
        }
    }

    /// Ask whether the wizard may finish from its current page.
    pub async fn done(&self) -> Result<bool> {
        self.validate_navigation(PageChangeInfo {
            last_page: self.current_page(),
            new_page: None,
        })
        .await
    }

    pub fn on_page_changed(&self) -> &Emitter<PageChangeInfo> {
        &self.page_changed
    }

    pub fn on_page_added(&self) -> &Emitter<usize> {
        &self.page_added
    }

    pub fn on_page_removed(&self) -> &Emitter<usize> {
        &self.page_removed
    }

    /// Fires after every [`update`](Self::update) and [`set_pages`](Self::set_pages).
    pub fn on_updated(&self) -> &Emitter<()> {
        &self.updated
    }
}

impl fmt::Debug for Wizard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wizard")
            .field("title", &self.title())
            .field("pages", &self.page_count())
            .field("current_page", &self.current_page())
            .field("has_navigation_validator", &self.has_navigation_validator())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ValidationFuture;
    use serde_json::Value;
    use std::cell::Cell;

    fn button(label: &str) -> Rc<DialogButton> {
        Rc::new(DialogButton::new(label, true))
    }

    fn wizard_with_pages(count: usize) -> Wizard {
        let wizard = Wizard::new(
            "Setup",
            WizardButtons {
                back: button("Back"),
                cancel: button("Cancel"),
                generate_script: button("Script"),
                done: button("Done"),
                next: button("Next"),
            },
        );
        let pages = (0..count)
            .map(|i| Rc::new(WizardPage::new(format!("Page {i}"), Value::Null)))
            .collect();
        wizard.set_pages(pages);
        wizard
    }

    fn reject_all() -> NavigationValidator {
        Rc::new(|_| -> ValidationFuture { Box::pin(async { Ok(false) }) })
    }

    #[test]
    fn test_add_page_shifts_current() {
        let wizard = wizard_with_pages(2);
        wizard.set_current_page(1).unwrap();
        let page = Rc::new(WizardPage::new("Inserted", Value::Null));

        assert_eq!(wizard.add_page(page.clone(), Some(0)).unwrap(), 0);
        assert_eq!(wizard.current_page(), Some(2));
        assert!(Rc::ptr_eq(&wizard.pages()[0], &page));
    }

    #[test]
    fn test_add_page_out_of_range() {
        let wizard = wizard_with_pages(1);
        let page = Rc::new(WizardPage::new("Late", Value::Null));
        let err = wizard.add_page(page, Some(5)).unwrap_err();
        assert!(matches!(err, HostError::PageIndexOutOfRange { index: 5, len: 1 }));
        assert_eq!(wizard.page_count(), 1);
    }

    #[test]
    fn test_remove_page_adjusts_current() {
        let wizard = wizard_with_pages(3);
        wizard.set_current_page(2).unwrap();

        wizard.remove_page(2).unwrap();
        assert_eq!(wizard.current_page(), Some(1));

        wizard.remove_page(0).unwrap();
        assert_eq!(wizard.current_page(), Some(0));

        wizard.remove_page(0).unwrap();
        assert_eq!(wizard.current_page(), None);
        assert!(wizard.remove_page(0).is_err());
    }

    #[test]
    fn test_set_current_page_fires_only_on_change() {
        let wizard = wizard_with_pages(2);
        let fired = Rc::new(Cell::new(0));
        let f = fired.clone();
        wizard.on_page_changed().subscribe(move |_| f.set(f.get() + 1));

        wizard.set_current_page(1).unwrap();
        wizard.set_current_page(1).unwrap();
        assert_eq!(fired.get(), 1);
        assert!(wizard.set_current_page(2).is_err());
    }

    #[tokio::test]
    async fn test_rejected_navigation_keeps_page() {
        let wizard = wizard_with_pages(3);
        wizard.set_current_page(1).unwrap();
        wizard.register_navigation_validator(reject_all());

        assert!(!wizard.next().await.unwrap());
        assert!(!wizard.back().await.unwrap());
        assert_eq!(wizard.current_page(), Some(1));
    }

    #[tokio::test]
    async fn test_navigation_without_validator() {
        let wizard = wizard_with_pages(2);
        assert!(wizard.next().await.unwrap());
        assert_eq!(wizard.current_page(), Some(0));
        assert!(wizard.next().await.unwrap());
        assert!(!wizard.next().await.unwrap());
        assert!(wizard.back().await.unwrap());
        assert_eq!(wizard.current_page(), Some(0));
    }

    #[tokio::test]
    async fn test_done_validates_with_no_new_page() {
        let wizard = wizard_with_pages(1);
        wizard.set_current_page(0).unwrap();
        let seen = Rc::new(RefCell::new(None));
        let s = seen.clone();
        wizard.register_navigation_validator(Rc::new(move |info| -> ValidationFuture {
            *s.borrow_mut() = Some(info);
            Box::pin(async { Ok(true) })
        }));

        assert!(wizard.done().await.unwrap());
        assert_eq!(
            *seen.borrow(),
            Some(PageChangeInfo {
                last_page: Some(0),
                new_page: None
            })
        );
    }
}
