//! Subcommand handlers
//!
//! Each handler loads the hosts file, runs one operation of the converter and returns the
//! text to print.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use hed_config::HedConfig;
use hed_parser::hosts::loader::{parse_text, synthesize_text_with, HostsDocument};
use hed_parser::Item;

use crate::output::to_structured;

fn load(config: &HedConfig, path: Option<&PathBuf>) -> anyhow::Result<HostsDocument> {
    let path = path.cloned().unwrap_or_else(|| config.hosts_path());
    let doc = HostsDocument::from_path(&path)?.with_options(config.synthesis_options());
    Ok(doc)
}

pub fn lines(config: &HedConfig, path: Option<&PathBuf>) -> anyhow::Result<String> {
    let doc = load(config, path)?;
    to_structured(doc.lines(), &config.output)
}

pub fn list(
    config: &HedConfig,
    path: Option<&PathBuf>,
    group: Option<&str>,
) -> anyhow::Result<String> {
    let doc = load(config, path)?;
    to_structured(&parse_text(doc.text(), group), &config.output)
}

pub fn groups(config: &HedConfig, path: Option<&PathBuf>) -> anyhow::Result<String> {
    let doc = load(config, path)?;
    to_structured(&doc.groups(), &config.output)
}

pub fn format(config: &HedConfig, path: Option<&PathBuf>) -> anyhow::Result<String> {
    let doc = load(config, path)?;
    let formatted = doc.apply(&doc.items());
    Ok(formatted.text().to_string())
}

pub fn apply(
    config: &HedConfig,
    path: Option<&PathBuf>,
    items_source: &str,
    group: Option<&str>,
) -> anyhow::Result<String> {
    let doc = load(config, path)?;
    let items = read_items(items_source)?;
    tracing::debug!(items = items.len(), group = ?group, "applying entry list");
    Ok(synthesize_text_with(
        &items,
        doc.text(),
        group,
        &config.synthesis_options(),
    ))
}

fn read_items(source: &str) -> anyhow::Result<Vec<Item>> {
    let raw = if source == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read entries from stdin")?;
        buf
    } else {
        std::fs::read_to_string(Path::new(source))
            .with_context(|| format!("failed to read entries from {}", source))?
    };
    serde_json::from_str(&raw).context("entries must be a JSON array of {ip, hosts, group}")
}
