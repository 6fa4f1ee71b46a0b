//! Typed lines
//!
//!     Every physical line of a hosts file is classified into exactly one [Line]. The
//!     classification is what both directions of the converter work with: the read path
//!     folds lines into items, and the write path uses the previous lines as a template
//!     to splice regenerated entries into.
//!
//! Line Types
//!
//!         - Empty: no tokens at all
//!         - GroupMarker: a single `#[name]` token, opening or closing a named block
//!         - HostEntry: `[# ]ip host...[#comment]`, the leading `#` token disables it
//!         - Other: anything else, kept verbatim (trimmed)
//!
//!     See [classify_line](crate::hosts::lexing::line_classification::classify_line) for
//!     the classification rules and their ordering.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One classified line of a hosts file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Line {
    /// Blank line (empty or whitespace only)
    Empty,

    /// `#[name]` marker; a pair of identical markers delimits a group block
    GroupMarker { name: String },

    /// Address mapping line. `enabled = false` when commented out with a standalone `#`
    HostEntry {
        ip: String,
        hosts: Vec<String>,
        enabled: bool,
    },

    /// Any other line, trimmed
    Other { raw: String },
}

impl Line {
    pub fn group_marker(name: impl Into<String>) -> Self {
        Line::GroupMarker { name: name.into() }
    }

    pub fn host_entry<I, S>(ip: impl Into<String>, hosts: I, enabled: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Line::HostEntry {
            ip: ip.into(),
            hosts: hosts.into_iter().map(Into::into).collect(),
            enabled,
        }
    }

    pub fn other(raw: impl Into<String>) -> Self {
        Line::Other { raw: raw.into() }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Line::Empty)
    }

    pub fn is_group_marker(&self) -> bool {
        matches!(self, Line::GroupMarker { .. })
    }
}

/// Renders the line exactly as it is written back to the file (without a terminator).
impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Line::Empty => Ok(()),
            Line::GroupMarker { name } => write!(f, "#[{}]", name),
            Line::HostEntry { ip, hosts, enabled } => {
                if !enabled {
                    f.write_str("# ")?;
                }
                f.write_str(ip)?;
                for host in hosts {
                    write!(f, " {}", host)?;
                }
                Ok(())
            }
            Line::Other { raw } => f.write_str(raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_disabled_entry() {
        let line = Line::host_entry("5.6.7.8", ["y.com"], false);
        assert_eq!(line.to_string(), "# 5.6.7.8 y.com");
    }

    #[test]
    fn test_display_marker_and_other() {
        assert_eq!(Line::group_marker("dev").to_string(), "#[dev]");
        assert_eq!(Line::other("# just a comment").to_string(), "# just a comment");
        assert_eq!(Line::Empty.to_string(), "");
    }

    #[test]
    fn test_serde_shape() {
        let line = Line::host_entry("1.1.1.1", ["a.com"], true);
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["type"], "hostEntry");
        assert_eq!(json["ip"], "1.1.1.1");
        assert_eq!(json["hosts"][0], "a.com");

        let back: Line = serde_json::from_value(json).unwrap();
        assert_eq!(back, line);
    }
}
