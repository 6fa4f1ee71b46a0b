//! Structured output for the inspection subcommands.

use hed_config::{OutputConfig, OutputFormat};
use serde::Serialize;

pub fn to_structured<T>(value: &T, output: &OutputConfig) -> anyhow::Result<String>
where
    T: Serialize + ?Sized,
{
    let mut text = match (output.format, output.pretty) {
        (OutputFormat::Json, true) => serde_json::to_string_pretty(value)?,
        (OutputFormat::Json, false) => serde_json::to_string(value)?,
        (OutputFormat::Yaml, _) => serde_yaml::to_string(value)?,
    };
    if !text.ends_with('\n') {
        text.push('\n');
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hed_parser::Line;

    fn output(format: OutputFormat, pretty: bool) -> OutputConfig {
        OutputConfig { format, pretty }
    }

    #[test]
    fn test_compact_json() {
        let lines = vec![Line::Empty, Line::group_marker("dev")];
        let text = to_structured(&lines, &output(OutputFormat::Json, false)).unwrap();
        assert_eq!(text, "[{\"type\":\"empty\"},{\"type\":\"groupMarker\",\"name\":\"dev\"}]\n");
    }

    #[test]
    fn test_yaml() {
        let lines = vec![Line::other("# note")];
        let text = to_structured(&lines, &output(OutputFormat::Yaml, true)).unwrap();
        assert!(text.starts_with("- type: other\n"));
        let back: Vec<Line> = serde_yaml::from_str(&text).unwrap();
        assert_eq!(back, lines);
    }
}
