// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use subcue::app_config::{self, BoundaryStrategy, Config};
use subcue::app_controller::{Controller, FolderSummary};
use subcue::subtitle_processor::SubtitleFormat;

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

/// CLI Wrapper for SubtitleFormat to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliSubtitleFormat {
    Vtt,
    Srt,
}

impl From<CliSubtitleFormat> for SubtitleFormat {
    fn from(cli_format: CliSubtitleFormat) -> Self {
        match cli_format {
            CliSubtitleFormat::Vtt => SubtitleFormat::Vtt,
            CliSubtitleFormat::Srt => SubtitleFormat::Srt,
        }
    }
}

/// CLI Wrapper for BoundaryStrategy to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliBoundaryStrategy {
    Rules,
    Punctuation,
}

impl From<CliBoundaryStrategy> for BoundaryStrategy {
    fn from(cli_strategy: CliBoundaryStrategy) -> Self {
        match cli_strategy {
            CliBoundaryStrategy::Rules => BoundaryStrategy::Rules,
            CliBoundaryStrategy::Punctuation => BoundaryStrategy::Punctuation,
        }
    }
}

/// Options shared by every processing command
#[derive(Args, Debug)]
struct CommonArgs {
    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Debug-level logging
    #[arg(short, long)]
    verbose: bool,

    /// Trace-level logging, including every split decision
    #[arg(long)]
    debug: bool,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,
}

#[derive(Args, Debug)]
struct SegmentArgs {
    /// Word-level transcript (JSON) or directory of transcripts
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Output subtitle file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Transcript language code (e.g., 'en', 'fr'); detected when omitted
    #[arg(short, long)]
    language: Option<String>,

    /// Maximum characters per line
    #[arg(short = 'w', long)]
    max_width: Option<usize>,

    /// Maximum lines per cue
    #[arg(short = 'n', long)]
    max_lines: Option<usize>,

    /// Only split at sentence ends, never at commas
    #[arg(long)]
    punctuation_only: bool,

    /// Word count above which a sentence is split at a comma
    #[arg(long)]
    comma_threshold: Option<usize>,

    /// Output subtitle format
    #[arg(long, value_enum)]
    format: Option<CliSubtitleFormat>,

    /// Entity definition file (JSON list of phrases)
    #[arg(short, long)]
    entities: Option<PathBuf>,

    /// Boundary detection strategy
    #[arg(long, value_enum)]
    boundaries: Option<CliBoundaryStrategy>,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args, Debug)]
struct AdjustArgs {
    /// Subtitle file (VTT or SRT) or directory of subtitle files
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Seconds added to each cue's end time
    #[arg(short, long)]
    buffer: Option<f64>,

    /// Output subtitle file (default: <stem>.adjusted.<ext>)
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build subtitle cues from a word-level transcript
    Segment(SegmentArgs),

    /// Extend cue end times by a buffer without creating overlaps
    Adjust(AdjustArgs),

    /// Generate shell completions for subcue
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// subcue - subtitle segmentation from word-level transcripts
#[derive(Parser, Debug)]
#[command(name = "subcue")]
#[command(version)]
#[command(about = "Turn word-level transcripts into readable subtitle cues")]
#[command(long_about = "subcue groups timed words into subtitle cues that respect sentence
boundaries, line width and line count, and can extend cue end times afterwards.

EXAMPLES:
    subcue segment talk.words.json                  # Print WebVTT cues to stdout
    subcue segment talk.words.json -o talk.srt      # Write SRT
    subcue segment -l fr -w 37 -n 2 transcripts/    # Process a whole directory
    subcue segment --punctuation-only talk.json     # Never split at commas
    subcue adjust talk.vtt -b 0.3                   # Write talk.adjusted.vtt
    subcue completions bash > subcue.bash           # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
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
        // The logger itself accepts everything, `set_max_level` does the filtering
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }

    // @returns: ANSI color code for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let level = record.level();

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {} {}\x1B[0m",
                Self::get_color_for_level(level),
                now,
                Self::get_emoji_for_level(level),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Info until the config is loaded
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "subcue", &mut std::io::stdout());
            Ok(())
        }
        Commands::Segment(args) => run_segment(args).await,
        Commands::Adjust(args) => run_adjust(args).await,
    }
}

async fn run_segment(args: SegmentArgs) -> Result<()> {
    let mut config = load_config(&args.common)?;

    if let Some(language) = &args.language {
        config.language = Some(language.clone());
    }
    if let Some(max_width) = args.max_width {
        config.segmentation.max_width = max_width;
    }
    if let Some(max_lines) = args.max_lines {
        config.segmentation.max_lines = max_lines;
    }
    if args.punctuation_only {
        config.segmentation.punctuation_only = true;
    }
    if let Some(threshold) = args.comma_threshold {
        config.segmentation.comma_split_threshold = threshold;
    }
    if let Some(format) = &args.format {
        config.output_format = format.clone().into();
    }
    if let Some(entities) = &args.entities {
        config.entities_file = Some(entities.clone());
    }
    if let Some(boundaries) = &args.boundaries {
        config.boundaries = boundaries.clone().into();
    }

    config.validate().context("Configuration validation failed")?;

    let controller = Controller::with_config(config)?;
    let force_overwrite = args.common.force_overwrite;

    if args.input_path.is_file() {
        controller
            .segment_file(&args.input_path, args.output.as_deref(), force_overwrite)
            .await?;
    } else if args.input_path.is_dir() {
        if args.output.is_some() {
            return Err(anyhow!("--output cannot be used with a directory input"));
        }
        let summary = controller.segment_folder(&args.input_path, force_overwrite).await?;
        check_summary(&summary)?;
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", args.input_path));
    }

    Ok(())
}

async fn run_adjust(args: AdjustArgs) -> Result<()> {
    let mut config = load_config(&args.common)?;

    if let Some(buffer) = args.buffer {
        config.adjustment.buffer_seconds = buffer;
    }

    config.validate().context("Configuration validation failed")?;

    let controller = Controller::with_config(config)?;
    let force_overwrite = args.common.force_overwrite;

    if args.input_path.is_file() {
        controller
            .adjust_file(&args.input_path, args.output.as_deref(), force_overwrite)
            .await?;
    } else if args.input_path.is_dir() {
        if args.output.is_some() {
            return Err(anyhow!("--output cannot be used with a directory input"));
        }
        let summary = controller.adjust_folder(&args.input_path, force_overwrite).await?;
        check_summary(&summary)?;
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", args.input_path));
    }

    Ok(())
}

fn check_summary(summary: &FolderSummary) -> Result<()> {
    if summary.failed > 0 {
        return Err(anyhow!("{} file(s) failed to process", summary.failed));
    }
    Ok(())
}

/// Load the config file (creating a default one when missing) and apply the log level
fn load_config(options: &CommonArgs) -> Result<Config> {
    let config_path = &options.config_path;
    let mut config = if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path);

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        info!("Default config written to {}", config_path);
        config
    };

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }
    if options.verbose {
        config.log_level = app_config::LogLevel::Debug;
    }
    if options.debug {
        config.log_level = app_config::LogLevel::Trace;
    }

    let log_level = match config.log_level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    };

    // Just update the max level without reinitializing the logger
    log::set_max_level(log_level);

    Ok(config)
}
