//! # Page Table
//!
//! The fixed set of literal pages served from the static root.

use std::path::{Path, PathBuf};

/// A literal page served on a fixed route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Home,
    Success,
    Cancel,
    Workshop1,
    Workshop2,
    Workshop3,
}

impl Page {
    /// Every page, in registration order
    pub const ALL: [Page; 6] = [
        Page::Home,
        Page::Success,
        Page::Cancel,
        Page::Workshop1,
        Page::Workshop2,
        Page::Workshop3,
    ];

    /// Route path the page is mounted on
    pub fn route(self) -> &'static str {
        match self {
            Page::Home => "/",
            Page::Success => "/success",
            Page::Cancel => "/cancel",
            Page::Workshop1 => "/workshop1",
            Page::Workshop2 => "/workshop2",
            Page::Workshop3 => "/workshop3",
        }
    }

    /// File path relative to the static root
    pub fn file(self) -> &'static str {
        match self {
            Page::Home => "index.html",
            Page::Success => "success.html",
            Page::Cancel => "cancel.html",
            Page::Workshop1 => "workshops/workshop1.html",
            Page::Workshop2 => "workshops/workshop2.html",
            Page::Workshop3 => "workshops/workshop3.html",
        }
    }

    /// Resolve the page file under a static root
    pub fn resolve(self, static_root: &Path) -> PathBuf {
        static_root.join(self.file())
    }
}
