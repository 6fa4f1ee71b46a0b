//! Line Classification
//!
//! Core classification logic for determining line types based on token patterns.
//! The order of the checks matters: a comment-prefixed entry (`# 1.2.3.4 a.com`) has to be
//! recognized as a disabled host entry before falling back to an opaque comment.
use crate::hosts::address::is_ip;
use crate::hosts::line::Line;

/// The standalone token that disables a host entry.
const DISABLE_TOKEN: &str = "#";

/// Determine the type of a single physical line.
pub fn classify_line(line: &str) -> Line {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.is_empty() {
        return Line::Empty;
    }
    if let [token] = tokens.as_slice() {
        if let Some(name) = group_marker_name(token) {
            return Line::GroupMarker { name };
        }
    }
    if let Some(entry) = host_entry(&tokens) {
        return entry;
    }
    Line::other(line.trim())
}

/// Extract the group name from a `#[name]` token.
fn group_marker_name(token: &str) -> Option<String> {
    if token.len() <= 3 {
        return None;
    }
    let name = token.strip_prefix("#[")?.strip_suffix(']')?.trim();
    if name.is_empty() {
        return None;
    }
    Some(name.to_string())
}

/// Match `[#] ip host... [#comment]`; `None` when there's no valid IP or no host survives.
fn host_entry(tokens: &[&str]) -> Option<Line> {
    if tokens.len() < 2 {
        return None;
    }
    let enabled = tokens[0] != DISABLE_TOKEN;
    let skip = if enabled { 1 } else { 2 };
    let candidate = tokens[skip - 1];
    if !is_ip(candidate) {
        return None;
    }
    let hosts = collect_hosts(&tokens[skip..]);
    if hosts.is_empty() {
        return None;
    }
    Some(Line::HostEntry {
        ip: candidate.to_string(),
        hosts,
        enabled,
    })
}

/// Take host tokens up to the first `#`; the part of that token left of the `#` is kept
/// when non-empty, everything after it is a trailing comment.
fn collect_hosts(tokens: &[&str]) -> Vec<String> {
    let mut hosts = Vec::with_capacity(tokens.len());
    for token in tokens {
        match token.split_once('#') {
            Some((head, _comment)) => {
                if !head.is_empty() {
                    hosts.push(head.to_string());
                }
                break;
            }
            None => hosts.push(token.to_string()),
        }
    }
    hosts
}
