//! Page catalog
//!
//! The ordered, read-only table of guide pages. Page numbers run from 1 to N
//! without gaps and each page owns its buttons; a button's 1-based position is
//! the identifier the client sends back when it is pressed.

use crate::error::{FrameError, Result};

/// What the client does when a button is pressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    /// POST back to the frame's callback URL
    Post,
}

impl ButtonAction {
    /// Value of the `fc:frame:button:N:action` property
    pub fn as_str(&self) -> &'static str {
        match self {
            ButtonAction::Post => "post",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Button {
    pub label: &'static str,
    pub action: ButtonAction,
}

impl Button {
    pub const fn post(label: &'static str) -> Self {
        Self {
            label,
            action: ButtonAction::Post,
        }
    }
}

/// A single page of the guide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// 1-based page number
    pub number: u32,

    /// Image path relative to the base URL, or an absolute URL
    pub image: &'static str,

    /// Buttons in display order
    pub buttons: &'static [Button],
}

impl Page {
    /// Button at a 1-based position
    pub fn button(&self, index: u32) -> Option<&Button> {
        let index = usize::try_from(index).ok()?.checked_sub(1)?;
        self.buttons.get(index)
    }
}

const START: &[Button] = &[Button::post("Start Guide ➡️")];
const BACK_NEXT: &[Button] = &[Button::post("⬅️ Back"), Button::post("Next ➡️")];
const RESTART: &[Button] = &[Button::post("Restart Guide")];

const GUIDE_PAGES: &[Page] = &[
    Page { number: 1, image: "images/1.png", buttons: START },
    Page { number: 2, image: "images/2.png", buttons: BACK_NEXT },
    Page { number: 3, image: "images/3.png", buttons: BACK_NEXT },
    Page { number: 4, image: "images/4.png", buttons: BACK_NEXT },
    Page { number: 5, image: "images/5.png", buttons: BACK_NEXT },
    Page { number: 6, image: "images/6.png", buttons: BACK_NEXT },
    Page { number: 7, image: "images/7.png", buttons: RESTART },
];

/// Immutable, ordered page table
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    pages: &'static [Page],
}

impl Catalog {
    /// Build a catalog, checking that pages are numbered `1..=N` in order
    /// and that every page has at least one button
    pub fn new(pages: &'static [Page]) -> Result<Self> {
        let catalog = Self { pages };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Check the catalog invariants
    pub fn validate(&self) -> Result<()> {
        if self.pages.is_empty() {
            return Err(FrameError::InvalidCatalog("catalog has no pages".to_string()));
        }
        if u32::try_from(self.pages.len()).is_err() {
            return Err(FrameError::InvalidCatalog("too many pages".to_string()));
        }

        for (position, page) in self.pages.iter().enumerate() {
            let expected = position as u32 + 1;
            if page.number != expected {
                return Err(FrameError::InvalidCatalog(format!(
                    "expected page {} at position {}, found page {}",
                    expected, position, page.number
                )));
            }
            if page.buttons.is_empty() {
                return Err(FrameError::InvalidCatalog(format!(
                    "page {} has no buttons",
                    page.number
                )));
            }
        }

        Ok(())
    }

    /// The built-in seven page guide
    ///
    /// Checked by `validate` when the server starts.
    pub fn builtin() -> &'static Catalog {
        static BUILTIN: Catalog = Catalog { pages: GUIDE_PAGES };
        &BUILTIN
    }

    /// Number of pages (N)
    pub fn size(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Look up a page by number
    pub fn page_at(&self, number: u32) -> Result<&Page> {
        let index = number.checked_sub(1).ok_or(FrameError::NotFound(number))?;
        self.pages
            .get(index as usize)
            .ok_or(FrameError::NotFound(number))
    }

    /// Look up a page, falling back to the first page when it is missing
    pub fn page_or_first(&self, number: u32) -> &Page {
        self.page_at(number).unwrap_or(&self.pages[0])
    }

    /// Clamp an arbitrary page number into `[1, N]`
    pub fn clamp(&self, number: i64) -> u32 {
        number.clamp(1, i64::from(self.size())) as u32
    }

    /// The last page
    pub fn terminal(&self) -> &Page {
        &self.pages[self.pages.len() - 1]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Page> {
        self.pages.iter()
    }
}
