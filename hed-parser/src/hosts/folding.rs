//! Entry Folding
//!
//!     Folds a line sequence into a flat list of [Item]s, one per `(group, ip)` pair.
//!
//! Group Scoping
//!
//!     Marker handling is a two-state machine, see [GroupScope]. Outside any block, a
//!     `#[name]` marker opens `name`. Inside a block, only a marker with the same name
//!     closes it; markers naming a different group are ignored, so blocks never nest. The
//!     reserved [SYSTEM_GROUP] name is never a delimiter.
//!
//!     Entries are collected in a pending buffer that is flushed into the finalized map on
//!     every effective marker. A block left open at the end of the document is not a
//!     group: its entries are flushed under the reserved group instead.
//!
//!     When folding the private text of a single group (a scope is given) markers are
//!     ignored entirely and every entry belongs to the scope.
//!
//! Merging
//!
//!     Entries for the same `(group, ip)` are merged into one item, concatenating host
//!     lists in encounter order. Hosts are then deduplicated by content, first one wins.

use indexmap::map::Entry;
use indexmap::IndexMap;

use crate::hosts::line::Line;
use crate::hosts::model::{dedup_hosts, Host, Item, SYSTEM_GROUP};

/// Where the scan currently is relative to marker blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupScope {
    Outside,
    InsideGroup(String),
}

type ItemKey = (String, String);

/// Single-pass folder over a line sequence.
struct Folder<'a> {
    scope: Option<&'a str>,
    state: GroupScope,
    pending: IndexMap<ItemKey, Item>,
    finalized: IndexMap<ItemKey, Item>,
}

impl<'a> Folder<'a> {
    fn new(scope: Option<&'a str>) -> Self {
        Self {
            scope,
            state: GroupScope::Outside,
            pending: IndexMap::new(),
            finalized: IndexMap::new(),
        }
    }

    fn current_group(&self) -> &str {
        match (self.scope, &self.state) {
            (Some(scope), _) => scope,
            (None, GroupScope::Outside) => SYSTEM_GROUP,
            (None, GroupScope::InsideGroup(name)) => name,
        }
    }

    fn process_line(&mut self, line: &Line) {
        match line {
            Line::HostEntry { ip, hosts, enabled } => self.push_entry(ip, hosts, *enabled),
            Line::GroupMarker { name } => self.process_marker(name),
            Line::Empty | Line::Other { .. } => {}
        }
    }

    fn push_entry(&mut self, ip: &str, hosts: &[String], enabled: bool) {
        let group = self.current_group().to_string();
        let hosts = hosts.iter().map(|content| Host::new(content.as_str(), enabled));
        match self.pending.entry((group.clone(), ip.to_string())) {
            Entry::Occupied(mut entry) => entry.get_mut().hosts.extend(hosts),
            Entry::Vacant(entry) => {
                entry.insert(Item::new(ip, hosts.collect(), group));
            }
        }
    }

    fn process_marker(&mut self, name: &str) {
        if self.scope.is_some() || name == SYSTEM_GROUP {
            return;
        }
        let next = match &self.state {
            GroupScope::Outside => GroupScope::InsideGroup(name.to_string()),
            GroupScope::InsideGroup(open) if open == name => GroupScope::Outside,
            GroupScope::InsideGroup(_) => return,
        };
        self.flush_pending();
        self.state = next;
    }

    fn flush_pending(&mut self) {
        for (key, item) in self.pending.drain(..) {
            merge_into(&mut self.finalized, key, item);
        }
    }

    fn finish(mut self) -> Vec<Item> {
        if self.scope.is_none() {
            if let GroupScope::InsideGroup(name) = &self.state {
                tracing::debug!(
                    group = %name,
                    "unterminated group block, folding its entries into {}",
                    SYSTEM_GROUP
                );
            }
            for (_, mut item) in self.pending.drain(..) {
                item.group = SYSTEM_GROUP.to_string();
                let key = (item.group.clone(), item.ip.clone());
                merge_into(&mut self.finalized, key, item);
            }
        } else {
            self.flush_pending();
        }

        self.finalized
            .into_values()
            .map(|mut item| {
                item.hosts = dedup_hosts(item.hosts);
                item
            })
            .collect()
    }
}

fn merge_into(map: &mut IndexMap<ItemKey, Item>, key: ItemKey, item: Item) {
    match map.entry(key) {
        Entry::Occupied(mut entry) => entry.get_mut().hosts.extend(item.hosts),
        Entry::Vacant(entry) => {
            entry.insert(item);
        }
    }
}

/// Fold `lines` into items. With `scope_group`, the lines are taken to be the private text
/// of that group: markers are ignored and every item is tagged with the scope.
pub fn fold(lines: &[Line], scope_group: Option<&str>) -> Vec<Item> {
    let mut folder = Folder::new(scope_group);
    for line in lines {
        folder.process_line(line);
    }
    folder.finish()
}
