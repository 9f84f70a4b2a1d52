use std::{fs, path::Path};

use tracing::{debug, error};

/// Returned in place of a page whose layout or content could not be read.
pub const ERROR_FRAGMENT: &str = "<h1>Error Loading Page</h1>";

const LAYOUT_FILE: &str = "layout.html";
const TITLE_PLACEHOLDER: &str = "<%= title %>";
const CONTENT_PLACEHOLDER: &str = "<%= content %>";

/// Static pages the server knows about. Only these files are ever read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Landing,
    About,
}

impl Page {
    pub fn title(&self) -> &'static str {
        match self {
            Page::Landing => "Landing Page",
            Page::About => "About Page",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            Page::Landing => "landing.html",
            Page::About => "about.html",
        }
    }
}

/// Page templates read once at startup.
#[derive(Debug, Clone)]
pub struct PageRenderer {
    layout: Option<String>,
    landing: Option<String>,
    about: Option<String>,
}

impl PageRenderer {
    /// Read the layout and every page fragment from `dir`. Unreadable files
    /// are logged and later rendered as [`ERROR_FRAGMENT`].
    pub fn load(dir: &Path) -> Self {
        Self {
            layout: read_template(dir, LAYOUT_FILE),
            landing: read_template(dir, Page::Landing.file_name()),
            about: read_template(dir, Page::About.file_name()),
        }
    }

    pub fn render(&self, page: Page) -> String {
        let content = match page {
            Page::Landing => self.landing.as_deref(),
            Page::About => self.about.as_deref(),
        };

        match (self.layout.as_deref(), content) {
            (Some(layout), Some(content)) => fill(layout, page.title(), content),
            _ => {
                error!(page = page.file_name(), "page template unavailable");
                ERROR_FRAGMENT.to_string()
            }
        }
    }
}

/// Replace the first title and content placeholders.
fn fill(layout: &str, title: &str, content: &str) -> String {
    layout
        .replacen(TITLE_PLACEHOLDER, title, 1)
        .replacen(CONTENT_PLACEHOLDER, content, 1)
}

fn read_template(dir: &Path, name: &str) -> Option<String> {
    let path = dir.join(name);
    match fs::read_to_string(&path) {
        Ok(contents) => {
            debug!(path = %path.display(), "loaded page template");
            Some(contents)
        }
        Err(e) => {
            error!(path = %path.display(), error = %e, "error loading page");
            None
        }
    }
}
