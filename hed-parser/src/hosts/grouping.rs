//! Group Splitting
//!
//!     Builds the top-level list of [Group]s for a document: the reserved group first,
//!     whose text is the whole document and whose list holds every folded item, followed
//!     by each named group in the order its first block closes.
//!
//!     Marker positions are only used to recover each group's private raw text, the lines
//!     strictly between an opening and its closing marker. A name used for several blocks
//!     gets all of their lines, joined by newline. List membership comes from each item's
//!     own group tag.

use std::ops::Range;

use indexmap::IndexMap;

use crate::hosts::folding::{fold, GroupScope};
use crate::hosts::lexing::{classify, split_lines};
use crate::hosts::line::Line;
use crate::hosts::model::{Group, SYSTEM_GROUP};

/// Line-index ranges of the content of every complete marker block, keyed by group name.
///
/// Pairing follows the folding rules: the reserved name is skipped, and a marker naming a
/// different group while a block is open is ignored. An unterminated block yields nothing.
pub fn group_ranges(lines: &[Line]) -> IndexMap<String, Vec<Range<usize>>> {
    let mut ranges: IndexMap<String, Vec<Range<usize>>> = IndexMap::new();
    let mut state = GroupScope::Outside;
    let mut opened_at = 0;

    for (idx, line) in lines.iter().enumerate() {
        let Line::GroupMarker { name } = line else {
            continue;
        };
        if name == SYSTEM_GROUP {
            continue;
        }
        let closes = match &state {
            GroupScope::Outside => false,
            GroupScope::InsideGroup(open) if open == name => true,
            GroupScope::InsideGroup(_) => continue,
        };
        if closes {
            ranges
                .entry(name.clone())
                .or_default()
                .push(opened_at + 1..idx);
            state = GroupScope::Outside;
        } else {
            state = GroupScope::InsideGroup(name.clone());
            opened_at = idx;
        }
    }

    ranges
}

/// Split `text` into the reserved group followed by every named group.
pub fn split_groups(text: &str) -> Vec<Group> {
    let lines = classify(text);
    let raw_lines = split_lines(text);

    let mut groups: IndexMap<String, Group> = group_ranges(&lines)
        .into_iter()
        .map(|(name, ranges)| {
            let text = ranges
                .into_iter()
                .flat_map(|range| raw_lines[range].iter().copied())
                .collect::<Vec<_>>()
                .join("\n");
            let group = Group {
                name: name.clone(),
                text,
                list: Vec::new(),
            };
            (name, group)
        })
        .collect();

    let system = Group {
        name: SYSTEM_GROUP.to_string(),
        text: text.to_string(),
        list: fold(&lines, None),
    };

    for item in &system.list {
        if let Some(group) = groups.get_mut(&item.group) {
            group.list.push(item.clone());
        }
    }

    std::iter::once(system).chain(groups.into_values()).collect()
}
