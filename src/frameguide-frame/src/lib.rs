//! Frameguide frame core - page catalog, navigation and frame rendering
//!
//! Stateless: every request names the page it came from, and every rendered
//! frame names the page it shows, so nothing is kept between requests.

pub mod catalog;
pub mod error;
pub mod navigation;
pub mod render;
pub mod request;

pub use catalog::{Button, ButtonAction, Catalog, Page};
pub use error::{FrameError, Result};
pub use navigation::{navigate, resolve, NavigationRequest, NavigationResult, PagePosition};
pub use render::{render, Document, Renderer, FRAME_VERSION};
pub use request::{previous_page_from_url, FrameRequest};
