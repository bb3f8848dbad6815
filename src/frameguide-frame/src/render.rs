//! Frame document rendering
//!
//! A frame is an ordinary HTML page whose `<meta property="fc:frame:*">` tags
//! tell the client which image to show, which buttons to draw and where to
//! POST when one is pressed. The callback URL carries the rendered page number,
//! which is all the state the next request needs.

use crate::catalog::{Button, Page};
use crate::request::PAGE_PARAM;
use maud::{html, DOCTYPE};
use url::Url;

/// Frame protocol version
pub const FRAME_VERSION: &str = "vNext";

pub const DEFAULT_TITLE: &str = "Halal Farcaster Mini-App Market";
pub const DEFAULT_POST_PATH: &str = "/api";
pub const DEFAULT_INFOGRAPHIC_PATH: &str = "/infographic.html";

const ERROR_IMAGE: &str = "images/error.png";
const ERROR_BUTTONS: &[Button] = &[Button::post("Restart Guide")];

/// A rendered frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document(String);

impl Document {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Renders frame documents against a base URL
#[derive(Debug, Clone)]
pub struct Renderer {
    pub title: String,
    /// Path the buttons POST to
    pub post_path: String,
    pub infographic_path: String,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            post_path: DEFAULT_POST_PATH.to_string(),
            infographic_path: DEFAULT_INFOGRAPHIC_PATH.to_string(),
        }
    }
}

impl Renderer {
    /// Render the frame for `page`
    pub fn render(&self, page: &Page, base_url: &str) -> Document {
        self.document(page.image, page.buttons, page.number, base_url)
    }

    /// Degraded frame shown when a request cannot be handled
    ///
    /// Its callback names the terminal page, so the single button goes back
    /// to page 1 through the restart rule.
    pub fn render_error(&self, base_url: &str, catalog_size: u32) -> Document {
        self.document(ERROR_IMAGE, ERROR_BUTTONS, catalog_size, base_url)
    }

    /// Callback URL for a rendered page
    pub fn post_url(&self, base_url: &str, page: u32) -> String {
        self.callback(parse_base(base_url).as_ref(), page)
    }

    fn callback(&self, base: Option<&Url>, page: u32) -> String {
        match base.and_then(|base| base.join(self.post_path.trim_start_matches('/')).ok()) {
            Some(mut url) => {
                url.query_pairs_mut().append_pair(PAGE_PARAM, &page.to_string());
                url.into()
            }
            None => format!("{}?{}={}", self.post_path, PAGE_PARAM, page),
        }
    }

    fn document(&self, image: &str, buttons: &[Button], page: u32, base_url: &str) -> Document {
        let base = parse_base(base_url);
        let image = join_url(base.as_ref(), image);
        let post_url = self.callback(base.as_ref(), page);
        let infographic = join_url(base.as_ref(), &self.infographic_path);

        let markup = html! {
            (DOCTYPE)
            html {
                head {
                    meta charset="utf-8";
                    title { (self.title) }
                    meta property="og:title" content=(self.title);
                    meta property="og:image" content=(image);
                    meta property="fc:frame" content=(FRAME_VERSION);
                    meta property="fc:frame:image" content=(image);
                    meta property="fc:frame:post_url" content=(post_url);
                    @for (i, button) in buttons.iter().enumerate() {
                        meta property=(format!("fc:frame:button:{}", i + 1)) content=(button.label);
                        meta property=(format!("fc:frame:button:{}:action", i + 1)) content=(button.action.as_str());
                    }
                }
                body {
                    p {
                        "You can view the full infographic "
                        a href=(infographic) { "here" }
                        "."
                    }
                }
            }
        };

        Document(markup.into_string())
    }
}

/// Render `page` with the default title and paths
pub fn render(page: &Page, base_url: &str) -> Document {
    Renderer::default().render(page, base_url)
}

/// Parse the base URL as a directory so that joins keep any path prefix
///
/// Configuration rejects bad base URLs before the server starts; if one gets
/// here anyway, links fall back to the bare paths.
fn parse_base(base_url: &str) -> Option<Url> {
    Url::parse(&format!("{}/", base_url.trim_end_matches('/'))).ok()
}

/// Resolve a path against the base; absolute URLs pass through
fn join_url(base: Option<&Url>, path: &str) -> String {
    match base.and_then(|base| base.join(path.trim_start_matches('/')).ok()) {
        Some(url) => url.into(),
        None => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::navigation::resolve;
    use crate::request::previous_page_from_url;

    const BASE: &str = "https://guide.example";

    /// Pull the `content` of a `<meta property=...>` tag out of a document
    fn meta<'a>(doc: &'a Document, property: &str) -> Option<&'a str> {
        let needle = format!(r#"property="{}" content=""#, property);
        let start = doc.as_str().find(&needle)? + needle.len();
        let rest = &doc.as_str()[start..];
        Some(&rest[..rest.find('"')?])
    }

    #[test]
    fn test_render_interior_page() {
        let page = Catalog::builtin().page_at(4).unwrap();
        let doc = render(page, BASE);

        assert!(doc.as_str().starts_with("<!DOCTYPE html>"));
        assert_eq!(meta(&doc, "fc:frame"), Some("vNext"));
        assert_eq!(meta(&doc, "fc:frame:image"), Some("https://guide.example/images/4.png"));
        assert_eq!(meta(&doc, "og:image"), Some("https://guide.example/images/4.png"));
        assert_eq!(meta(&doc, "fc:frame:post_url"), Some("https://guide.example/api?page=4"));
        assert_eq!(meta(&doc, "fc:frame:button:1"), Some("⬅️ Back"));
        assert_eq!(meta(&doc, "fc:frame:button:1:action"), Some("post"));
        assert_eq!(meta(&doc, "fc:frame:button:2"), Some("Next ➡️"));
        assert_eq!(meta(&doc, "fc:frame:button:2:action"), Some("post"));
        assert_eq!(meta(&doc, "fc:frame:button:3"), None);
        assert!(doc.as_str().contains(r#"href="https://guide.example/infographic.html""#));
    }

    #[test]
    fn test_render_first_and_last_pages() {
        let catalog = Catalog::builtin();
        let first = render(catalog.page_at(1).unwrap(), BASE);
        assert_eq!(meta(&first, "fc:frame:button:1"), Some("Start Guide ➡️"));
        assert_eq!(meta(&first, "fc:frame:button:2"), None);

        let last = render(catalog.terminal(), BASE);
        assert_eq!(meta(&last, "fc:frame:button:1"), Some("Restart Guide"));
        assert_eq!(meta(&last, "fc:frame:post_url"), Some("https://guide.example/api?page=7"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let page = Catalog::builtin().page_at(2).unwrap();
        assert_eq!(render(page, BASE), render(page, BASE));
    }

    #[test]
    fn test_trailing_slash_in_base_url() {
        let page = Catalog::builtin().page_at(2).unwrap();
        assert_eq!(render(page, "https://guide.example/"), render(page, BASE));
    }

    #[test]
    fn test_post_url_round_trips() {
        let catalog = Catalog::builtin();
        let renderer = Renderer::default();
        for page in catalog.iter() {
            let doc = renderer.render(page, BASE);
            let post_url = meta(&doc, "fc:frame:post_url").unwrap();
            assert_eq!(previous_page_from_url(post_url).unwrap(), i64::from(page.number));
        }
    }

    #[test]
    fn test_error_document_restarts() {
        let catalog = Catalog::builtin();
        let doc = Renderer::default().render_error(BASE, catalog.size());

        assert_eq!(meta(&doc, "fc:frame:image"), Some("https://guide.example/images/error.png"));
        assert_eq!(meta(&doc, "fc:frame:button:1"), Some("Restart Guide"));
        assert_eq!(meta(&doc, "fc:frame:button:2"), None);

        let previous = previous_page_from_url(meta(&doc, "fc:frame:post_url").unwrap()).unwrap();
        assert_eq!(resolve(catalog.clamp(previous), 1, catalog.size()), 1);
    }

    #[test]
    fn test_title_is_escaped() {
        let renderer = Renderer {
            title: r#"Guide "one" & <two>"#.to_string(),
            ..Renderer::default()
        };
        let doc = renderer.render(Catalog::builtin().page_at(1).unwrap(), BASE);
        assert!(doc.as_str().contains("Guide &quot;one&quot; &amp; &lt;two&gt;"));
        assert!(!doc.as_str().contains("<two>"));
    }

    #[test]
    fn test_join_url() {
        let base = parse_base("https://a.example/");
        assert_eq!(join_url(base.as_ref(), "/images/1.png"), "https://a.example/images/1.png");
        assert_eq!(join_url(base.as_ref(), "images/1.png"), "https://a.example/images/1.png");
        assert_eq!(
            join_url(base.as_ref(), "https://cdn.example/x.png"),
            "https://cdn.example/x.png"
        );
        assert_eq!(join_url(None, "images/1.png"), "images/1.png");
    }

    #[test]
    fn test_base_url_with_path_prefix() {
        let page = Catalog::builtin().page_at(5).unwrap();
        let doc = render(page, "https://host.example/guide");
        assert_eq!(meta(&doc, "fc:frame:image"), Some("https://host.example/guide/images/5.png"));
        assert_eq!(meta(&doc, "fc:frame:post_url"), Some("https://host.example/guide/api?page=5"));
        assert!(doc.as_str().contains(r#"href="https://host.example/guide/infographic.html""#));
    }

    #[test]
    fn test_unparsable_base_url_renders_bare_paths() {
        let page = Catalog::builtin().page_at(2).unwrap();
        let doc = render(page, "not a url");
        assert_eq!(meta(&doc, "fc:frame:image"), Some("images/2.png"));
        assert_eq!(meta(&doc, "fc:frame:post_url"), Some("/api?page=2"));
    }
}
