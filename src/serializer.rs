use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::model::SentenceUnit;

// @module: Canonical SRT output

/// Render sentence units as SRT text.
///
/// Indices are renumbered from 1 in sequence order, whatever the units carry.
pub fn to_srt(units: &[SentenceUnit]) -> String {
    let mut out = String::with_capacity(units.iter().map(|u| u.text().len() + 40).sum());
    for (i, unit) in units.iter().enumerate() {
        out.push_str(&unit.renumbered(i + 1).to_string());
    }
    out
}

/// Stream sentence units as SRT into any writer
pub fn write_srt<W: Write>(units: &[SentenceUnit], writer: &mut W) -> io::Result<()> {
    for (i, unit) in units.iter().enumerate() {
        write!(writer, "{}", unit.renumbered(i + 1))?;
    }
    writer.flush()
}

/// Write sentence units to an SRT file, creating parent directories
pub fn write_srt_file<P: AsRef<Path>>(units: &[SentenceUnit], path: P) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }

    let file = File::create(path)
        .with_context(|| format!("Failed to create subtitle file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_srt(units, &mut writer)
        .with_context(|| format!("Failed to write subtitle file: {}", path.display()))?;

    Ok(())
}
