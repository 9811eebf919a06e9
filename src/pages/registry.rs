//! Page registry: shows exactly one registered page at a time.
//!
//! # Transitions
//!
//! ```text
//!   Uninitialized --navigate_to(a)--> Showing(a)
//!                                       |
//!   Showing(x) --navigate_to(b)--> on_hide(x), render(b), on_display(b) --> Showing(b)
//!   Showing(x) --navigate_back---> on_hide(x) --> Showing(previous)
//! ```
//!
//! History is a single slot. Going back clears it, so a second consecutive
//! `navigate_back` fails with [`NavigationError::NoPreviousPage`].

use super::page::Page;
use super::template::{Renderer, TemplateRenderer};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, error, info};

/// Recoverable navigation failures. The registry state is unchanged when
/// one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("Page with id {0} is already registered")]
    DuplicatePage(String),

    #[error("Cannot open page with unknown page id: {0}")]
    UnknownPage(String),

    #[error("No previous page to go back to")]
    NoPreviousPage,
}

/// Holds every page of the application and switches between them.
pub struct PageRegistry<S> {
    pages: HashMap<String, Page<S>>,
    current: Option<String>,
    previous: Option<String>,
    renderer: Box<dyn Renderer>,
    epoch: u64,
}

impl<S> Default for PageRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> PageRegistry<S> {
    pub fn new() -> Self {
        Self::with_renderer(TemplateRenderer)
    }

    pub fn with_renderer(renderer: impl Renderer + 'static) -> Self {
        Self {
            pages: HashMap::new(),
            current: None,
            previous: None,
            renderer: Box::new(renderer),
            epoch: 0,
        }
    }

    /// Add a page. The registry takes over its visibility and hides it.
    pub fn register(&mut self, mut page: Page<S>) -> Result<(), NavigationError> {
        if self.pages.contains_key(page.id()) {
            let err = NavigationError::DuplicatePage(page.id().to_string());
            error!("{}", err);
            return Err(err);
        }

        page.surface_mut().hide();
        info!("Added page {} to page list", page.id());
        self.pages.insert(page.id().to_string(), page);
        Ok(())
    }

    /// Show the page `id`, rendering `context` into it and running hooks.
    pub fn navigate_to(
        &mut self,
        state: &mut S,
        id: &str,
        context: &Value,
    ) -> Result<(), NavigationError> {
        if !self.pages.contains_key(id) {
            let err = NavigationError::UnknownPage(id.to_string());
            error!("{}", err);
            return Err(err);
        }

        info!("Opening page with id {}", id);

        // No current page when the first page is opened
        if let Some(current_id) = self.current.as_deref() {
            if let Some(current) = self.pages.get_mut(current_id) {
                current.hooks_mut().on_hide(state, current_id);
            }
        }

        if let Some(target) = self.pages.get_mut(id) {
            let (surface, template, hooks) = target.parts_mut();
            if let Some(template) = template {
                self.renderer.render(surface, template, context);
            }
            hooks.on_display(state, context);
        }

        let old = self.current.take();
        self.change_display(old.as_deref(), id);
        self.previous = old;
        self.current = Some(id.to_string());
        self.epoch += 1;
        Ok(())
    }

    /// Show the page that was visible before the current one.
    ///
    /// The previous page is neither re-rendered nor sent `on_display`; it is
    /// expected to still be in the state it was hidden in.
    pub fn navigate_back(&mut self, state: &mut S) -> Result<(), NavigationError> {
        let (Some(previous_id), Some(current_id)) = (self.previous.clone(), self.current.clone())
        else {
            let err = NavigationError::NoPreviousPage;
            error!("{}", err);
            return Err(err);
        };

        info!("Going back to page with id {}", previous_id);
        self.previous = None;

        if let Some(current) = self.pages.get_mut(&current_id) {
            current.hooks_mut().on_hide(state, &current_id);
        }

        self.change_display(Some(&current_id), &previous_id);
        self.current = Some(previous_id);
        self.epoch += 1;
        Ok(())
    }

    fn change_display(&mut self, old: Option<&str>, new: &str) {
        if let Some(old) = old.and_then(|id| self.pages.get_mut(id)) {
            old.surface_mut().hide();
        }
        if let Some(new) = self.pages.get_mut(new) {
            new.surface_mut().show();
        }
        debug!("Visible pages: {:?}", self.visible_ids());
    }

    pub fn current_id(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn previous_id(&self) -> Option<&str> {
        self.previous.as_deref()
    }

    pub fn current(&self) -> Option<&Page<S>> {
        self.current.as_deref().and_then(|id| self.pages.get(id))
    }

    pub fn page(&self, id: &str) -> Option<&Page<S>> {
        self.pages.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.pages.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Ids of every page whose surface is visible, sorted
    pub fn visible_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self
            .pages
            .values()
            .filter(|p| p.surface().is_visible())
            .map(Page::id)
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Number of completed transitions so far.
    ///
    /// Callers capture this before starting asynchronous work to find out
    /// later whether the user has navigated in the meantime.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}
