//! Document loading utilities
//!
//! Convenience entry points over the read and write paths, plus [HostsDocument], which
//! keeps a document's text together with its classified lines so the write path always
//! has the right template at hand.
//!
//! # Example
//!
//! ```rust
//! use hed_parser::hosts::loader::HostsDocument;
//! use hed_parser::hosts::model::Host;
//!
//! let doc = HostsDocument::from_string("127.0.0.1 localhost\n");
//! let mut items = doc.items();
//! items[0].hosts.push(Host::enabled("local"));
//! let doc = doc.apply(&items);
//! assert_eq!(doc.text(), "127.0.0.1 localhost local\n");
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::hosts::folding::fold;
use crate::hosts::formats::render;
use crate::hosts::grouping::split_groups;
use crate::hosts::lexing::classify;
use crate::hosts::line::Line;
use crate::hosts::model::{Group, Item};
use crate::hosts::synthesis::{synthesize_with, SynthesisOptions};

/// Error that can occur when loading documents
#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Classify and fold `text`. With `group`, `text` is that group's private text.
pub fn parse_text(text: &str, group: Option<&str>) -> Vec<Item> {
    fold(&classify(text), group)
}

/// Write `items` back over `old_text` with default options.
pub fn synthesize_text(items: &[Item], old_text: &str, group: Option<&str>) -> String {
    synthesize_text_with(items, old_text, group, &SynthesisOptions::default())
}

/// Write `items` back over `old_text`.
///
/// With `group`, `old_text` is taken to be that group's private text: it is wrapped in a
/// pair of markers for the synthesis and every marker is stripped from the result.
pub fn synthesize_text_with(
    items: &[Item],
    old_text: &str,
    group: Option<&str>,
    options: &SynthesisOptions,
) -> String {
    let mut template = classify(old_text);
    if let Some(group) = group {
        template.insert(0, Line::group_marker(group));
        template.push(Line::group_marker(group));
    }

    let mut lines = synthesize_with(items, &template, options);
    if group.is_some() {
        lines.retain(|line| !line.is_group_marker());
    }

    render(&lines)
}

/// An immutable hosts document: its text and the classified lines used as the template
/// for the next write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostsDocument {
    text: String,
    lines: Vec<Line>,
    options: SynthesisOptions,
}

impl HostsDocument {
    pub fn from_string(text: impl Into<String>) -> Self {
        let text = text.into();
        let lines = classify(&text);
        Self {
            text,
            lines,
            options: SynthesisOptions::default(),
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoaderError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| LoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), bytes = text.len(), "loaded hosts file");
        Ok(Self::from_string(text))
    }

    /// Use `options` for every subsequent write.
    pub fn with_options(mut self, options: SynthesisOptions) -> Self {
        self.options = options;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn options(&self) -> &SynthesisOptions {
        &self.options
    }

    /// Every item in the document, named groups included.
    pub fn items(&self) -> Vec<Item> {
        fold(&self.lines, None)
    }

    pub fn groups(&self) -> Vec<Group> {
        split_groups(&self.text)
    }

    /// A new document with `items` written over this one.
    pub fn apply(&self, items: &[Item]) -> HostsDocument {
        let lines = synthesize_with(items, &self.lines, &self.options);
        HostsDocument::from_string(render(&lines)).with_options(self.options)
    }

    /// New private text for `group` with `items` written over its current text. A group
    /// not present in the document starts from empty text.
    pub fn apply_to_group(&self, group: &str, items: &[Item]) -> String {
        let old_text = self
            .groups()
            .into_iter()
            .find(|candidate| candidate.name == group)
            .map(|found| found.text)
            .unwrap_or_default();
        synthesize_text_with(items, &old_text, Some(group), &self.options)
    }
}
