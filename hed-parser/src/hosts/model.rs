//! Semantic model: hosts, items and groups
//!
//! An [Item] is everything mapped to one IP within one group. A [Group] carries the
//! private text it owns in the document plus the items folded out of it. The reserved
//! [SYSTEM_GROUP] always exists; its text is the whole document and its list holds
//! every item, including those that belong to named groups.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Name of the implicit group covering ungrouped entries. Never written as a marker.
pub const SYSTEM_GROUP: &str = "System";

/// A single hostname and whether its mapping is active.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Host {
    pub content: String,
    pub enabled: bool,
}

impl Host {
    pub fn new(content: impl Into<String>, enabled: bool) -> Self {
        Self {
            content: content.into(),
            enabled,
        }
    }

    pub fn enabled(content: impl Into<String>) -> Self {
        Self::new(content, true)
    }

    pub fn disabled(content: impl Into<String>) -> Self {
        Self::new(content, false)
    }
}

/// All hostnames mapped to one IP within one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub ip: String,
    pub hosts: Vec<Host>,
    pub group: String,
}

impl Item {
    pub fn new(ip: impl Into<String>, hosts: Vec<Host>, group: impl Into<String>) -> Self {
        Self {
            ip: ip.into(),
            hosts,
            group: group.into(),
        }
    }

    pub fn is_system(&self) -> bool {
        self.group == SYSTEM_GROUP
    }
}

/// Drops hosts whose content was already seen, keeping the first occurrence and its
/// enabled flag. Identity is the content string only.
pub fn dedup_hosts(hosts: Vec<Host>) -> Vec<Host> {
    let mut seen: IndexSet<String> = IndexSet::with_capacity(hosts.len());
    hosts
        .into_iter()
        .filter(|host| seen.insert(host.content.clone()))
        .collect()
}

/// A named group: its private raw text and the items it owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub name: String,
    pub text: String,
    pub list: Vec<Item>,
}

impl Group {
    pub fn is_system(&self) -> bool {
        self.name == SYSTEM_GROUP
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_keeps_first_enabled_flag() {
        let hosts = vec![
            Host::disabled("a.com"),
            Host::enabled("b.com"),
            Host::enabled("a.com"),
            Host::disabled("b.com"),
        ];

        assert_eq!(
            dedup_hosts(hosts),
            vec![Host::disabled("a.com"), Host::enabled("b.com")]
        );
    }

    #[test]
    fn test_item_serde_field_names() {
        let item = Item::new("1.1.1.1", vec![Host::enabled("a.com")], SYSTEM_GROUP);
        let json = serde_json::to_string(&item).unwrap();
        assert_eq!(
            json,
            r#"{"ip":"1.1.1.1","hosts":[{"content":"a.com","enabled":true}],"group":"System"}"#
        );
    }
}
