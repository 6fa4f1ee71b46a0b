//! Line Synthesis
//!
//!     Regenerates a line sequence from an edited item list, using the previous parse of
//!     the document as a positional template. Untouched lines (comments, blanks, anything
//!     unrecognized) are passed through; only data lines are replaced.
//!
//! The Splice
//!
//!     The new items are partitioned first:
//!         - reserved-group items, merged by IP into one host list per IP (host lists are
//!           concatenated as given, duplicates included)
//!         - named-group items, collected per group name in input order
//!
//!     Then the template is walked:
//!         1. A host entry outside any block is replaced by the chunked lines of its IP's
//!            current host list, the first time that IP is seen. The IP is then marked
//!            consumed, so later template lines for it (and IPs no longer present) become
//!            blank lines.
//!         2. A marker block is replaced as a whole when its closing marker is found: the
//!            group's items are written out between a fresh pair of markers, or the block
//!            disappears if the group has no items left. Nothing inside the old block is
//!            kept.
//!         3. Markers with the reserved name are dropped. An opening marker that is never
//!            closed is dropped as well, but its block stays open to the end of the
//!            template: nothing in it is regenerated, markers inside it are ignored and
//!            its comments and blanks pass through. Its host entries belong to the
//!            reserved group (see [fold](crate::hosts::folding::fold)) and are written in
//!            place like any other ungrouped entry.
//!
//!     Whatever wasn't consumed is appended: new reserved-group IPs first, then new groups,
//!     each preceded by a blank line.
//!
//! Chunking
//!
//!     Host lists are written enabled-first, then disabled, each split into lines of at most
//!     [SynthesisOptions::hosts_per_line] hosts. See [hosts_chunk].

use indexmap::IndexMap;

use crate::hosts::folding::GroupScope;
use crate::hosts::line::Line;
use crate::hosts::model::{Host, Item, SYSTEM_GROUP};

/// Default number of hosts written on one generated line.
pub const DEFAULT_HOSTS_PER_LINE: usize = 10;

/// Knobs for generated lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SynthesisOptions {
    /// Maximum hosts per generated line. Zero is treated as one.
    pub hosts_per_line: usize,
}

impl SynthesisOptions {
    pub fn new(hosts_per_line: usize) -> Self {
        Self { hosts_per_line }
    }

    fn chunk_size(&self) -> usize {
        self.hosts_per_line.max(1)
    }
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        Self::new(DEFAULT_HOSTS_PER_LINE)
    }
}

/// Chunk `hosts` into entry lines for `ip` with the default line width.
pub fn hosts_chunk(hosts: &[Host], ip: &str) -> Vec<Line> {
    hosts_chunk_with(hosts, ip, &SynthesisOptions::default())
}

/// Enabled hosts first, then disabled ones, each in chunks of at most
/// `options.hosts_per_line`, preserving order within each half.
pub fn hosts_chunk_with(hosts: &[Host], ip: &str, options: &SynthesisOptions) -> Vec<Line> {
    let (enabled, disabled): (Vec<&Host>, Vec<&Host>) = hosts.iter().partition(|h| h.enabled);
    let size = options.chunk_size();

    let to_line = |chunk: &[&Host], enabled: bool| Line::HostEntry {
        ip: ip.to_string(),
        hosts: chunk.iter().map(|host| host.content.clone()).collect(),
        enabled,
    };

    enabled
        .chunks(size)
        .map(|chunk| to_line(chunk, true))
        .chain(disabled.chunks(size).map(|chunk| to_line(chunk, false)))
        .collect()
}

/// Regenerate lines for `items` over `template` with default options.
pub fn synthesize(items: &[Item], template: &[Line]) -> Vec<Line> {
    synthesize_with(items, template, &SynthesisOptions::default())
}

/// Regenerate lines for `items` over `template`.
pub fn synthesize_with(items: &[Item], template: &[Line], options: &SynthesisOptions) -> Vec<Line> {
    let mut synthesizer = Synthesizer::new(items, options);
    synthesizer.walk(template);
    synthesizer.finish()
}

struct Synthesizer<'a> {
    options: &'a SynthesisOptions,
    /// Reserved-group host lists by IP; emptied once written
    system: IndexMap<String, Vec<Host>>,
    /// Named-group items by group name; emptied once written
    groups: IndexMap<String, Vec<Item>>,
    out: Vec<Line>,
}

impl<'a> Synthesizer<'a> {
    fn new(items: &[Item], options: &'a SynthesisOptions) -> Self {
        let mut system: IndexMap<String, Vec<Host>> = IndexMap::new();
        let mut groups: IndexMap<String, Vec<Item>> = IndexMap::new();

        for item in items {
            if item.is_system() {
                system
                    .entry(item.ip.clone())
                    .or_default()
                    .extend(item.hosts.iter().cloned());
            } else {
                groups
                    .entry(item.group.clone())
                    .or_default()
                    .push(item.clone());
            }
        }

        Self {
            options,
            system,
            groups,
            out: Vec::new(),
        }
    }

    fn walk(&mut self, template: &[Line]) {
        let mut scope = GroupScope::Outside;
        let mut idx = 0;
        while idx < template.len() {
            let line = &template[idx];
            match line {
                Line::HostEntry { ip, .. } => self.emit_system_entry(ip),
                Line::GroupMarker { name } if name == SYSTEM_GROUP => {}
                Line::GroupMarker { name } => {
                    if scope == GroupScope::Outside {
                        match find_close(template, idx + 1, name) {
                            Some(close) => {
                                self.emit_group_block(name);
                                idx = close;
                            }
                            None => {
                                tracing::debug!(
                                    group = %name,
                                    "unterminated group marker, passing the rest through"
                                );
                                scope = GroupScope::InsideGroup(name.clone());
                            }
                        }
                    }
                }
                Line::Empty | Line::Other { .. } => self.out.push(line.clone()),
            }
            idx += 1;
        }
    }

    fn emit_system_entry(&mut self, ip: &str) {
        match self.system.get_mut(ip) {
            Some(hosts) if !hosts.is_empty() => {
                let hosts = std::mem::take(hosts);
                let lines = hosts_chunk_with(&hosts, ip, self.options);
                self.out.extend(lines);
            }
            _ => self.out.push(Line::Empty),
        }
    }

    fn emit_group_block(&mut self, name: &str) {
        let items = match self.groups.get_mut(name) {
            Some(items) if !items.is_empty() => std::mem::take(items),
            _ => {
                tracing::debug!(group = %name, "group has no items, removing its block");
                return;
            }
        };
        tracing::trace!(group = %name, items = items.len(), "regenerating group block");
        self.push_block(name, &items);
    }

    fn push_block(&mut self, name: &str, items: &[Item]) {
        self.out.push(Line::group_marker(name));
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.out.push(Line::Empty);
            }
            let lines = hosts_chunk_with(&item.hosts, &item.ip, self.options);
            self.out.extend(lines);
        }
        self.out.push(Line::group_marker(name));
    }

    fn finish(mut self) -> Vec<Line> {
        let system = std::mem::take(&mut self.system);
        for (ip, hosts) in system {
            if hosts.is_empty() {
                continue;
            }
            tracing::trace!(%ip, "appending new entry");
            self.out.push(Line::Empty);
            let lines = hosts_chunk_with(&hosts, &ip, self.options);
            self.out.extend(lines);
        }

        let groups = std::mem::take(&mut self.groups);
        for (name, items) in groups {
            if items.is_empty() {
                continue;
            }
            tracing::debug!(group = %name, "appending new group block");
            self.out.push(Line::Empty);
            self.push_block(&name, &items);
        }

        self.out
    }
}

/// Index of the marker closing the block `name` opened just before `from`, if any.
fn find_close(lines: &[Line], from: usize, name: &str) -> Option<usize> {
    lines[from..]
        .iter()
        .position(|line| matches!(line, Line::GroupMarker { name: n } if n == name))
        .map(|offset| from + offset)
}
