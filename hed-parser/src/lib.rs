//! # hed-parser
//!
//! Reads and writes operating-system hosts files without losing what the plain
//! format cannot express: comments, blank-line layout, and named groups.
//!
//! File Layout
//!
//! The read path and the write path share one line model:
//!
//! src/hosts
//!   ├── lexing      raw text -> typed lines
//!   ├── folding     typed lines -> items (ip, hosts, group)
//!   ├── grouping    raw text -> groups, each with its own text and items
//!   ├── synthesis   edited items + previous lines -> new lines
//!   └── formats     lines -> raw text
//!
//! Writing is a splice over a positional template: the previous parse of the
//! document is threaded through [synthesize](hosts::synthesis::synthesize) so
//! that untouched regions survive unchanged. [HostsDocument](hosts::loader::HostsDocument)
//! bundles the text and its template for callers that don't want to carry both.

pub mod hosts;

pub use hosts::{
    classify, fold, hosts_chunk, is_ip, parse_text, render, split_groups, synthesize,
    synthesize_text, Group, Host, HostsDocument, Item, Line, SynthesisOptions, SYSTEM_GROUP,
};
