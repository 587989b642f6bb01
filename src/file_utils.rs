use anyhow::{Result, Context};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use std::fs::OpenOptions;
use std::io::Write;
use chrono::Local;
use once_cell::sync::Lazy;
use regex::Regex;

// @module: File and directory utilities

// @const: SRT block head, index line followed by a timing line
static SRT_BLOCK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d+\s*\r?\n\d{1,}:\d{2}:\d{2}[,.]\d{1,3}\s*-->\s*\d{1,}:\d{2}:\d{2}[,.]\d{1,3}").unwrap()
});

// @const: Extensions the batch walker picks up
pub const SUPPORTED_EXTENSIONS: &[&str] = &["srt", "json", "ttml", "xml"];

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    // @generates: Output path for a re-segmented subtitle
    // @params: input_file, output_dir, optional file name suffix
    pub fn generate_output_path<P1: AsRef<Path>, P2: AsRef<Path>>(
        input_file: P1,
        output_dir: P2,
        suffix: Option<&str>,
    ) -> PathBuf {
        let input_file = input_file.as_ref();
        let output_dir = output_dir.as_ref();

        let stem = input_file.file_stem().unwrap_or_default().to_string_lossy().to_string();

        let mut output_filename = stem.clone();
        if let Some(suffix) = suffix.map(str::trim).filter(|s| !s.is_empty()) {
            output_filename.push('.');
            output_filename.push_str(suffix.trim_start_matches('.'));
        }
        output_filename.push_str(".srt");

        let output = output_dir.join(&output_filename);
        if Self::same_path(&output, input_file) {
            // Never write over the source track
            let base = output_filename.strip_suffix(".srt").unwrap_or(&output_filename);
            return output_dir.join(format!("{}.sentences.srt", base));
        }
        output
    }

    fn same_path(a: &Path, b: &Path) -> bool {
        match (a.canonicalize(), b.canonicalize()) {
            (Ok(a), Ok(b)) => a == b,
            _ => a == b,
        }
    }

    /// Find files matching any of `extensions` in a directory tree, sorted by path
    pub fn find_files_with_extensions<P: AsRef<Path>>(dir: P, extensions: &[&str]) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();
        let normalized: Vec<&str> = extensions.iter().map(|e| e.trim_start_matches('.')).collect();

        for entry in WalkDir::new(dir.as_ref()).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() {
                if let Some(ext) = path.extension() {
                    let ext = ext.to_string_lossy();
                    if normalized.iter().any(|n| ext.eq_ignore_ascii_case(n)) {
                        result.push(path.to_path_buf());
                    }
                }
            }
        }

        result.sort();
        Ok(result)
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Append content to a log file with timestamp
    pub fn append_to_log_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file: {:?}", path.as_ref()))?;

        writeln!(file, "[{}] {}", timestamp, content)
            .with_context(|| format!("Failed to write to log file: {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Detect the subtitle format of a file, by extension first, then by content
    pub fn detect_file_type<P: AsRef<Path>>(path: P) -> Result<FileType> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(anyhow::anyhow!("File does not exist: {:?}", path));
        }

        if let Some(ext) = path.extension() {
            match ext.to_string_lossy().to_lowercase().as_str() {
                "srt" => return Ok(FileType::Srt),
                "json" => return Ok(FileType::CaptionEvents),
                "ttml" | "dfxp" => return Ok(FileType::Ttml),
                // Plain .xml may be anything, sniff it below
                _ => {}
            }
        }

        match fs::read_to_string(path) {
            Ok(content) => Ok(Self::sniff_content(&content)),
            // Binary or unreadable content
            Err(_) => Ok(FileType::Unknown),
        }
    }

    /// Guess the subtitle format from text content
    pub fn sniff_content(content: &str) -> FileType {
        let head = content.trim_start_matches('\u{FEFF}').trim_start();

        if head.starts_with('[') || head.starts_with('{') {
            return FileType::CaptionEvents;
        }
        if head.starts_with('<') && (head.contains("<tt") || head.contains(":tt")) {
            return FileType::Ttml;
        }
        if SRT_BLOCK_REGEX.is_match(content) || head.lines().next().is_some_and(|l| l.contains("-->")) {
            return FileType::Srt;
        }
        FileType::Unknown
    }
}

/// Enum representing different file types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    /// SubRip text
    Srt,
    /// JSON caption event list
    CaptionEvents,
    /// TTML caption document
    Ttml,
    /// Unknown file type
    Unknown,
}

impl std::fmt::Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileType::Srt => write!(f, "SRT"),
            FileType::CaptionEvents => write!(f, "caption events"),
            FileType::Ttml => write!(f, "TTML"),
            FileType::Unknown => write!(f, "unknown"),
        }
    }
}
