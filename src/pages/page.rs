//! A single page of the application.

use super::template::{Content, Template};
use serde_json::Value;
use std::fmt;

/// The on-screen area a page controls.
///
/// Holds the visibility flag and whatever content the page template last
/// rendered into it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Surface {
    visible: bool,
    content: Content,
}

impl Surface {
    /// New hidden, empty surface
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn set_content(&mut self, content: Content) {
        self.content = content;
    }
}

/// Lifecycle handlers of a page.
///
/// `S` is the application state the handlers may read and update. Both
/// methods default to no-ops.
pub trait PageHooks<S> {
    /// Called after the page content has been rendered, with the
    /// navigation context.
    fn on_display(&mut self, state: &mut S, context: &Value) {
        let _ = (state, context);
    }

    /// Called when the page is about to be hidden, with its own id.
    fn on_hide(&mut self, state: &mut S, id: &str) {
        let _ = (state, id);
    }
}

/// Hooks that do nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHooks;

impl<S> PageHooks<S> for NoHooks {}

/// A named, independently show/hideable unit of UI.
pub struct Page<S> {
    id: String,
    surface: Surface,
    template: Option<Template>,
    hooks: Box<dyn PageHooks<S>>,
}

impl<S> Page<S> {
    /// Page without template and with no-op hooks
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            surface: Surface::new(),
            template: None,
            hooks: Box::new(NoHooks),
        }
    }

    pub fn with_template(mut self, template: Template) -> Self {
        self.template = Some(template);
        self
    }

    pub fn with_hooks(mut self, hooks: impl PageHooks<S> + 'static) -> Self {
        self.hooks = Box::new(hooks);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn template(&self) -> Option<&Template> {
        self.template.as_ref()
    }

    pub(crate) fn parts_mut(
        &mut self,
    ) -> (&mut Surface, Option<&Template>, &mut dyn PageHooks<S>) {
        (&mut self.surface, self.template.as_ref(), self.hooks.as_mut())
    }

    pub(crate) fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }

    pub(crate) fn hooks_mut(&mut self) -> &mut dyn PageHooks<S> {
        self.hooks.as_mut()
    }
}

impl<S> fmt::Debug for Page<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Page")
            .field("id", &self.id)
            .field("surface", &self.surface)
            .field("template", &self.template)
            .finish_non_exhaustive()
    }
}
