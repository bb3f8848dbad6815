//! Navigation resolver
//!
//! Button 1 means different things depending on where the viewer is: it
//! starts the guide on the first page, goes back on interior pages and
//! restarts from the terminal page. Every other button index moves forward.

use crate::catalog::Catalog;
use crate::error::{FrameError, Result};

/// Where a page sits in the sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagePosition {
    First,
    Interior,
    Terminal,
}

impl PagePosition {
    /// Position of `page` in a catalog of `size` pages
    ///
    /// A single page catalog reports `Terminal` so that its only button
    /// restarts. Numbers past the end count as `Interior` and are clamped
    /// after resolution.
    pub fn of(page: u32, size: u32) -> Self {
        if page == size {
            PagePosition::Terminal
        } else if page <= 1 {
            PagePosition::First
        } else {
            PagePosition::Interior
        }
    }
}

/// One button press, decoded from a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationRequest {
    pub previous_page: u32,
    pub pressed_button: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationResult {
    pub resolved_page: u32,
}

impl NavigationRequest {
    pub fn new(previous_page: u32, pressed_button: u32) -> Self {
        Self {
            previous_page,
            pressed_button,
        }
    }

    /// Check that the pressed button exists on the previous page
    pub fn validate(&self, catalog: &Catalog) -> Result<()> {
        let page = catalog.page_at(self.previous_page)?;
        if page.button(self.pressed_button).is_none() {
            return Err(FrameError::InvalidInput(format!(
                "button {} is out of range for page {} (1..={})",
                self.pressed_button,
                page.number,
                page.buttons.len()
            )));
        }
        Ok(())
    }
}

/// Resolve the next page number, clamped into `[1, catalog_size]`
pub fn resolve(previous_page: u32, pressed_button: u32, catalog_size: u32) -> u32 {
    let previous = i64::from(previous_page);

    let next = match (PagePosition::of(previous_page, catalog_size), pressed_button) {
        (PagePosition::Terminal, 1) => 1,
        (PagePosition::Interior, 1) => previous - 1,
        // start on the first page, forward everywhere else
        _ => previous + 1,
    };

    next.clamp(1, i64::from(catalog_size.max(1))) as u32
}

/// Validate a request against the catalog and resolve it
pub fn navigate(catalog: &Catalog, request: NavigationRequest) -> Result<NavigationResult> {
    request.validate(catalog)?;
    Ok(NavigationResult {
        resolved_page: resolve(request.previous_page, request.pressed_button, catalog.size()),
    })
}
