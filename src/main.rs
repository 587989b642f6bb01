// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow, Context};
use log::{error, warn, info, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::PathBuf;
use std::io::Write;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand, Args};
use clap_complete::{generate, Shell};

use resub::app_config::{self, Config};
use resub::app_controller::Controller;
use resub::file_utils::FileManager;
use resub::segmenter::SplitRule;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

/// CLI Wrapper for SplitRule to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliSplitRule {
    Characters,
    Words,
}

impl From<CliSplitRule> for SplitRule {
    fn from(cli_rule: CliSplitRule) -> Self {
        match cli_rule {
            CliSplitRule::Characters => SplitRule::Characters,
            CliSplitRule::Words => SplitRule::Words,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Re-segment subtitle files into sentences (default command)
    #[command(alias = "resegment")]
    Process(ProcessArgs),

    /// Generate shell completions for resub
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone)]
struct ProcessArgs {
    /// Subtitle files or directories to process
    #[arg(value_name = "INPUTS")]
    inputs: Vec<PathBuf>,

    /// Read inputs from a task list, one path per line
    #[arg(long, value_name = "FILE")]
    list: Option<PathBuf>,

    /// Output directory (default from config: "subtitles")
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Print the result of a single input to stdout instead of writing files
    #[arg(long, conflicts_with = "list")]
    stdout: bool,

    /// How cue time is divided between sentences
    #[arg(long, value_enum)]
    split_rule: Option<CliSplitRule>,

    /// Keep text repeated by rolling auto-captions
    #[arg(long)]
    no_dedupe: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// resub - subtitle sentence re-segmentation
///
/// Merges machine-timed subtitle fragments into whole sentences and
/// re-times each sentence from the original cues.
#[derive(Parser, Debug)]
#[command(name = "resub")]
#[command(version)]
#[command(about = "Re-segment timed subtitles into sentences")]
#[command(long_about = "resub merges fragmentary subtitle cues (auto-generated captions, rolling captions)
into complete sentences and assigns each sentence a start and end time derived
from the original cues.

EXAMPLES:
    resub talk.srt                          # Write subtitles/talk.srt
    resub -o out/ captions/                 # Process a whole directory
    resub --list tasks.txt                  # Process paths listed in a file
    resub --stdout talk.json                # Print SRT for a caption event list
    resub --split-rule words talk.ttml      # Split cue time by word count
    resub completions bash > resub.bash     # Generate bash completions

INPUT FORMATS:
    .srt          SubRip text
    .json         Caption events: [{\"text\", \"start_ms\", \"end_ms\"}] or {\"events\": [...]}
    .ttml / .xml  TTML documents with <p begin end|dur> paragraphs

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    process: ProcessArgs,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Tag and ANSI color for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("ERROR", "\x1B[1;31m"),
            Level::Warn => ("WARN ", "\x1B[1;33m"),
            Level::Info => ("INFO ", "\x1B[1;32m"),
            Level::Debug => ("DEBUG", "\x1B[1;36m"),
            Level::Trace => ("TRACE", "\x1B[1;35m"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level.min(log::max_level())
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (tag, color) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", color, now, tag, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Trace is the ceiling, the effective level is set through log::set_max_level
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "resub", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Process(args)) => run_process(args).await,
        None => run_process(cli.process).await,
    }
}

/// Load the config file (creating it when missing) and apply CLI overrides
fn load_config(options: &ProcessArgs) -> Result<Config> {
    let (mut config, created) = Config::load_or_create(&options.config_path)?;
    if created {
        warn!("Config file not found at '{}', created default config.", options.config_path);
    }

    if let Some(rule) = &options.split_rule {
        config.segmentation.split_rule = rule.clone().into();
    }

    if options.no_dedupe {
        config.segmentation.dedupe_rolling_captions = false;
    }

    if let Some(output_dir) = &options.output_dir {
        config.output.output_dir = output_dir.to_string_lossy().to_string();
    }

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    config.validate().context("Configuration validation failed")?;
    Ok(config)
}

async fn run_process(options: ProcessArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let config = load_config(&options)?;
    log::set_max_level(config.log_level.to_level_filter());

    let controller = Controller::with_config(config.clone())?;

    if options.stdout {
        let [input] = options.inputs.as_slice() else {
            return Err(anyhow!("--stdout takes exactly one input file"));
        };
        let result = controller.resegment_file(input)?;
        for warning in &result.warnings {
            warn!("{}: {}", input.display(), warning);
        }
        let mut stdout = std::io::stdout().lock();
        resub::serializer::write_srt(&result.units, &mut stdout)
            .context("Failed to write to stdout")?;
        return Ok(());
    }

    let mut inputs = Controller::expand_inputs(&options.inputs)?;

    if let Some(list_path) = &options.list {
        let content = FileManager::read_to_string(list_path)?;
        let tasks = Controller::collect_tasks(&content)?;
        for rejected in &tasks.rejected {
            warn!(
                "Skipping task list line {} ({}): {}",
                rejected.line, rejected.entry, rejected.reason
            );
        }
        inputs.extend(tasks.inputs);
    }

    if inputs.is_empty() {
        return Err(anyhow!("No input given. Pass subtitle files, directories or --list FILE"));
    }

    let output_dir = PathBuf::from(&config.output.output_dir);
    info!("Writing re-segmented subtitles to {}", output_dir.display());

    if inputs.len() == 1 {
        let input = inputs.remove(0);
        controller.run(input, output_dir, options.force_overwrite).await?;
        return Ok(());
    }

    let summary = controller.run_batch(inputs, output_dir, options.force_overwrite).await?;
    if summary.failed > 0 {
        error!("{} file(s) failed, see log above", summary.failed);
    }

    Ok(())
}
