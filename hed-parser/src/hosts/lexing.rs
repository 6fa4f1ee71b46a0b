//! Lexer
//!
//!     Turns raw hosts-file text into an ordered sequence of typed [Line]s. CRLF and LF are
//!     treated alike, the text is split into physical lines, and each line is classified on
//!     its own by whitespace-delimited tokens. No merging happens here; that is folding's job.
//!
//!     Classification is total: every physical line maps to exactly one [Line], and text
//!     ending in a newline yields a final [Line::Empty]. Nothing here can fail.

pub mod line_classification;

use crate::hosts::line::Line;

pub use line_classification::classify_line;

/// Splits `text` into physical lines, treating `\r\n` the same as `\n`.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

/// Classifies every physical line of `text`.
pub fn classify(text: &str) -> Vec<Line> {
    split_lines(text).into_iter().map(classify_line).collect()
}
