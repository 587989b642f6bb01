use anyhow::{anyhow, Context, Result};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::app_config::Config;
use crate::errors::CueWarning;
use crate::file_utils::{FileManager, FileType, SUPPORTED_EXTENSIONS};
use crate::pipeline::{Resegmented, Resegmenter};
use crate::serializer;

// @module: Application controller for batch re-segmentation

// @const: Issues log written next to the outputs
pub const ISSUES_LOG_NAME: &str = "resub.issues.log";

/// What happened to one input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Output written
    Written {
        output: PathBuf,
        units: usize,
        warnings: usize,
    },
    /// Output already existed and overwrite was not forced
    Skipped { output: PathBuf },
}

/// Totals for a batch run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
    pub warnings: usize,
}

/// A task-list entry that cannot be processed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedTask {
    /// 1-based line in the task list
    pub line: usize,
    pub entry: String,
    pub reason: String,
}

/// Inputs collected from a task list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    pub inputs: Vec<PathBuf>,
    pub rejected: Vec<RejectedTask>,
}

/// Main application controller for subtitle re-segmentation
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Shared core, used from blocking worker threads
    resegmenter: Arc<Resegmenter>,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;

        let resegmenter = Arc::new(Resegmenter::new(&config.segmentation));
        Ok(Self { config, resegmenter })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Parse and re-segment one input file without writing anything
    pub fn resegment_file(&self, input_file: &Path) -> Result<Resegmented> {
        resegment_path(&self.resegmenter, input_file)
    }

    /// Re-segment one file into `output_dir`
    pub async fn run(&self, input_file: PathBuf, output_dir: PathBuf, force_overwrite: bool) -> Result<FileOutcome> {
        let start_time = std::time::Instant::now();

        if !input_file.is_file() {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        let output_path = FileManager::generate_output_path(
            &input_file,
            &output_dir,
            self.config.output.suffix.as_deref(),
        );
        if output_path.exists() && !force_overwrite {
            warn!("Skipping {}, output already exists (use -f to force overwrite)", input_file.display());
            return Ok(FileOutcome::Skipped { output: output_path });
        }

        FileManager::ensure_dir(&output_dir)?;

        let resegmenter = Arc::clone(&self.resegmenter);
        let input = input_file.clone();
        let output = output_path.clone();
        let log_path = output_dir.join(ISSUES_LOG_NAME);
        // The core is synchronous and CPU-bound; file I/O stays off the executor too
        let result = tokio::task::spawn_blocking(move || {
            let result = resegment_path(&resegmenter, &input)?;
            serializer::write_srt_file(&result.units, &output)?;

            if !result.warnings.is_empty() {
                for warning in &result.warnings {
                    warn!("{}: {}", input.display(), warning);
                }
                if let Err(e) = Self::write_warnings_to_log(&log_path, &input, &result.warnings) {
                    warn!("Failed to write issues log: {}", e);
                }
            }
            Ok::<_, anyhow::Error>(result)
        })
        .await
        .context("Re-segmentation task failed")??;

        info!(
            "Success: {} ({} sentences in {})",
            output_path.display(),
            result.units.len(),
            Self::format_duration(start_time.elapsed())
        );

        Ok(FileOutcome::Written {
            output: output_path,
            units: result.units.len(),
            warnings: result.warnings.len(),
        })
    }

    /// Re-segment many files concurrently, at most `output.concurrent_files`
    /// at a time. A failing file is logged and counted; it never aborts the batch.
    pub async fn run_batch(&self, inputs: Vec<PathBuf>, output_dir: PathBuf, force_overwrite: bool) -> Result<BatchSummary> {
        let start_time = std::time::Instant::now();

        if inputs.is_empty() {
            return Err(anyhow!("No subtitle files to process"));
        }

        let progress_bar = ProgressBar::new(inputs.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("#>-"));
        progress_bar.set_message("Processing files");

        let concurrency = self.config.output.concurrent_files.max(1);
        let mut results = stream::iter(inputs)
            .map(|input| {
                let output_dir = output_dir.clone();
                async move {
                    let outcome = self.run(input.clone(), output_dir, force_overwrite).await;
                    (input, outcome)
                }
            })
            .buffer_unordered(concurrency);

        let mut summary = BatchSummary::default();
        while let Some((input, outcome)) = results.next().await {
            let file_name = input
                .file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());

            match outcome {
                Ok(FileOutcome::Written { warnings, .. }) => {
                    summary.processed += 1;
                    summary.warnings += warnings;
                }
                Ok(FileOutcome::Skipped { .. }) => summary.skipped += 1,
                Err(e) => {
                    error!("Error processing file {}: {:#}", file_name, e);
                    summary.failed += 1;
                }
            }

            progress_bar.set_message(format!("Done: {}", file_name));
            progress_bar.inc(1);
        }

        progress_bar.finish_with_message("Batch processing complete");

        let summary_message = format!(
            "Batch completed: {} processed, {} skipped, {} errors, {} cue warnings",
            summary.processed, summary.skipped, summary.failed, summary.warnings
        );
        info!("{} in {}", summary_message, Self::format_duration(start_time.elapsed()));

        let log_path = output_dir.join(ISSUES_LOG_NAME);
        let logged = tokio::task::spawn_blocking(move || {
            FileManager::append_to_log_file(log_path, &summary_message)
        })
        .await;
        match logged {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!("Failed to write batch summary to issues log: {}", e),
            Err(e) => warn!("Issues log task failed: {}", e),
        }

        Ok(summary)
    }

    /// Re-segment every supported file under `input_dir`
    pub async fn run_folder(&self, input_dir: PathBuf, output_dir: PathBuf, force_overwrite: bool) -> Result<BatchSummary> {
        if !FileManager::dir_exists(&input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let files = Self::find_subtitle_files(&input_dir)?;
        if files.is_empty() {
            return Err(anyhow!("No subtitle files found in directory: {:?}", input_dir));
        }

        info!("Found {} subtitle files in {}", files.len(), input_dir.display());
        self.run_batch(files, output_dir, force_overwrite).await
    }

    /// Expand files and directories into the list of files to process
    pub fn expand_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for input in inputs {
            if FileManager::dir_exists(input) {
                files.extend(Self::find_subtitle_files(input)?);
            } else if FileManager::file_exists(input) {
                files.push(input.clone());
            } else {
                return Err(anyhow!("Input path does not exist: {:?}", input));
            }
        }
        Ok(files)
    }

    /// Read a task list: one file or directory per line, blank lines ignored
    pub fn collect_tasks(content: &str) -> Result<TaskList> {
        let mut tasks = TaskList::default();

        for (i, line) in content.lines().enumerate() {
            let entry = line.trim();
            if entry.is_empty() || entry.starts_with('#') {
                continue;
            }

            let reject = |reason: &str| RejectedTask {
                line: i + 1,
                entry: entry.to_string(),
                reason: reason.to_string(),
            };

            if entry.contains("://") {
                tasks.rejected.push(reject("remote URLs are not supported, download the track first"));
                continue;
            }

            let path = PathBuf::from(entry);
            if FileManager::dir_exists(&path) {
                tasks.inputs.extend(Self::find_subtitle_files(&path)?);
            } else if FileManager::file_exists(&path) {
                tasks.inputs.push(path);
            } else {
                tasks.rejected.push(reject("not a file or directory"));
            }
        }

        debug!("Task list: {} inputs, {} rejected", tasks.inputs.len(), tasks.rejected.len());
        Ok(tasks)
    }

    fn find_subtitle_files(dir: &Path) -> Result<Vec<PathBuf>> {
        let files = FileManager::find_files_with_extensions(dir, SUPPORTED_EXTENSIONS)?;
        // Skip our own logs and outputs that were written into the input tree
        Ok(files
            .into_iter()
            .filter(|f| !f.to_string_lossy().ends_with(".sentences.srt"))
            .collect())
    }

    /// Append cue warnings of one file to the issues log
    fn write_warnings_to_log(log_path: &Path, input_file: &Path, warnings: &[CueWarning]) -> Result<()> {
        let mut content = format!("{}: {} cue warnings", input_file.display(), warnings.len());
        for warning in warnings {
            content.push_str("\n    ");
            content.push_str(&warning.to_string());
        }
        FileManager::append_to_log_file(log_path, &content)
    }

    // Format duration in a human-readable format (HH:MM:SS)
    pub fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}

/// Detect, read and re-segment one file
fn resegment_path(resegmenter: &Resegmenter, input_file: &Path) -> Result<Resegmented> {
    let file_type = FileManager::detect_file_type(input_file)?;
    let content = FileManager::read_to_string(input_file)?;
    debug!("Detected {} input: {}", file_type, input_file.display());

    let result = match file_type {
        FileType::Srt => resegmenter.resegment_srt(&content),
        FileType::CaptionEvents => resegmenter.resegment_caption_json(&content),
        FileType::Ttml => resegmenter.resegment_ttml(&content),
        FileType::Unknown => {
            return Err(anyhow!("Unrecognized subtitle format: {}", input_file.display()));
        }
    };

    result.with_context(|| format!("Failed to parse {}", input_file.display()))
}
