//! Pages and the registry that switches between them.
//!
//! A page is a single view presented to the user. Every page is registered
//! with a [`PageRegistry`], which shows one page at a time. When a page with
//! a [`Template`] is opened, the navigation context is rendered into the
//! page's [`Surface`]; the page's [`PageHooks`] then get a chance to prepare
//! application state for it.

pub mod page;
pub mod registry;
pub mod template;

pub use page::{NoHooks, Page, PageHooks, Surface};
pub use registry::{NavigationError, PageRegistry};
pub use template::{lookup, lookup_text, Content, Renderer, Row, Template, TemplateRenderer};
