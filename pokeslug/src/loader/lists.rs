//! module `loader::lists`
//!
//! Plain-text slug lists: one slug per line, or one comma-separated group
//! of slugs per line. Slugs are trimmed and lowercased; blank lines and
//! `#` comments are skipped.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use log::{info, warn};

use pokeslug_data::Slug;

/// Parse a one-slug-per-line list.
pub fn parse_slug_list(text: &str) -> Vec<Slug> {
    content_lines(text).map(str::to_lowercase).collect()
}

/// Parse a list whose lines are comma-separated slug groups.
pub fn parse_slug_groups(text: &str) -> Vec<Vec<Slug>> {
    content_lines(text)
        .map(|line| {
            line.split(',')
                .map(|slug| slug.trim().to_lowercase())
                .filter(|slug| !slug.is_empty())
                .collect::<Vec<_>>()
        })
        .filter(|group| !group.is_empty())
        .collect()
}

fn content_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}

/// Loads a one-slug-per-line list.
/// # Errors
/// - on file IO error
pub fn load_slug_list(path: &Path) -> Result<Vec<Slug>> {
    let text = fs::read_to_string(path).with_context(|| format!("reading slug list from '{}'", path.display()))?;
    let slugs = parse_slug_list(&text);
    info!("{} slugs loaded from '{}'", slugs.len(), path.display());
    Ok(slugs)
}

/// Loads a list of comma-separated slug groups.
/// # Errors
/// - on file IO error
pub fn load_slug_groups(path: &Path) -> Result<Vec<Vec<Slug>>> {
    let text = fs::read_to_string(path).with_context(|| format!("reading slug groups from '{}'", path.display()))?;
    let groups = parse_slug_groups(&text);
    info!("{} slug groups loaded from '{}'", groups.len(), path.display());
    Ok(groups)
}

/// Loads a list that may legitimately be absent; a missing file is empty.
/// # Errors
/// - on file IO error other than the file not existing
pub fn load_optional_slug_list(path: &Path) -> Result<Vec<Slug>> {
    if !path.exists() {
        warn!("Optional list '{}' not found; treating it as empty.", path.display());
        return Ok(Vec::new());
    }
    load_slug_list(path)
}

/// Group counterpart of [`load_optional_slug_list`].
/// # Errors
/// - on file IO error other than the file not existing
pub fn load_optional_slug_groups(path: &Path) -> Result<Vec<Vec<Slug>>> {
    if !path.exists() {
        warn!("Optional list '{}' not found; treating it as empty.", path.display());
        return Ok(Vec::new());
    }
    load_slug_groups(path)
}
