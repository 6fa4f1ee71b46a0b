//! Text rendering
//!
//! Converts a line sequence back into hosts-file text. Each line renders through its
//! `Display` impl; runs of blank lines (a leading run included) collapse into one, and the
//! output always ends with a single newline unless there is nothing to write.

use crate::hosts::line::Line;

/// Render `lines` as hosts-file text.
pub fn render(lines: &[Line]) -> String {
    let mut text_lines: Vec<String> = Vec::with_capacity(lines.len() + 1);
    let mut previous_empty = false;

    for line in lines {
        let empty = line.is_empty();
        if !(empty && previous_empty) {
            text_lines.push(line.to_string());
        }
        previous_empty = empty;
    }

    if !previous_empty {
        text_lines.push(String::new());
    }

    text_lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_runs_collapse() {
        let lines = vec![
            Line::other("# a"),
            Line::Empty,
            Line::Empty,
            Line::Empty,
            Line::other("# b"),
        ];
        assert_eq!(render(&lines), "# a\n\n# b\n");
    }

    #[test]
    fn test_leading_run_collapses_to_one() {
        let lines = vec![Line::Empty, Line::Empty, Line::other("# a")];
        assert_eq!(render(&lines), "\n# a\n");
    }

    #[test]
    fn test_trailing_blank_is_the_newline() {
        let lines = vec![Line::other("# a"), Line::Empty, Line::Empty];
        assert_eq!(render(&lines), "# a\n");
    }

    #[test]
    fn test_disabled_entry() {
        let lines = vec![Line::host_entry("5.6.7.8", ["y.com"], false)];
        assert_eq!(render(&lines), "# 5.6.7.8 y.com\n");
    }

    #[test]
    fn test_nothing_to_render() {
        assert_eq!(render(&[]), "");
        assert_eq!(render(&[Line::Empty]), "");
    }

    #[test]
    fn test_markers() {
        let lines = vec![
            Line::group_marker("dev"),
            Line::host_entry("::1", ["a", "b"], true),
            Line::group_marker("dev"),
        ];
        assert_eq!(render(&lines), "#[dev]\n::1 a b\n#[dev]\n");
    }
}
