#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, warn};
use std::io::Write;
use std::path::{Path, PathBuf};

use signgloss::Controller;
use signgloss::app_config::{Config, LogLevel, TranscriptionProvider};

/// CLI Wrapper for TranscriptionProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranscriptionProvider {
    Local,
    OpenAI,
}

impl From<CliTranscriptionProvider> for TranscriptionProvider {
    fn from(cli_provider: CliTranscriptionProvider) -> Self {
        match cli_provider {
            CliTranscriptionProvider::Local => TranscriptionProvider::Local,
            CliTranscriptionProvider::OpenAI => TranscriptionProvider::OpenAI,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

fn level_filter(level: &LogLevel) -> LevelFilter {
    match level {
        LogLevel::Error => LevelFilter::Error,
        LogLevel::Warn => LevelFilter::Warn,
        LogLevel::Info => LevelFilter::Info,
        LogLevel::Debug => LevelFilter::Debug,
        LogLevel::Trace => LevelFilter::Trace,
    }
}

/// Options shared by every glossing command
#[derive(Args, Debug, Clone)]
struct CommonArgs {
    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Write the result as JSON (a directory when the input is a folder)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Annotation service URL
    #[arg(long, env = "SIGNGLOSS_ANNOTATOR_ENDPOINT")]
    annotator_endpoint: Option<String>,

    /// Transcription provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliTranscriptionProvider>,

    /// Transcription service URL
    #[arg(long, env = "SIGNGLOSS_TRANSCRIPTION_ENDPOINT")]
    transcription_endpoint: Option<String>,

    /// Transcription model name
    #[arg(short, long)]
    model: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Gloss the speech of a video file or a folder of videos (default command)
    Translate(TranslateArgs),

    /// Gloss English text directly
    Text(TextArgs),

    /// Generate shell completions for signgloss
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// Input video file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Parser, Debug)]
struct TextArgs {
    /// English text to gloss
    #[arg(value_name = "TEXT")]
    text: String,

    #[command(flatten)]
    common: CommonArgs,
}

/// signgloss - English speech to Indian Sign Language gloss
///
/// Extracts the audio of a video, transcribes it, and rewrites every
/// sentence into ISL gloss order.
#[derive(Parser, Debug)]
#[command(name = "signgloss")]
#[command(version)]
#[command(about = "English speech to ISL gloss")]
#[command(long_about = "signgloss transcribes the speech in a video and rewrites each sentence as an ISL gloss sequence.

EXAMPLES:
    signgloss lecture.mp4                          # Gloss a video using the default config
    signgloss -o lecture.json lecture.mp4          # Also write a JSON report
    signgloss --log-level debug /videos/           # Process a folder with rule tracing
    signgloss text \"If it rains, bring an umbrella now.\"
    signgloss completions bash > signgloss.bash    # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. If the file does not
    exist, a default one is created automatically.

SERVICES:
    annotator     - spaCy-style parser (POST /parse, default http://localhost:8080)
    transcription - OpenAI-compatible Whisper server (local) or the OpenAI API")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input video file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    #[command(flatten)]
    common: CommonArgs,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger { level: LevelFilter::Trace }))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and emoji for a level
    fn decoration(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "❌ "),
            Level::Warn => ("\x1B[1;33m", "🚧 "),
            Level::Info => ("\x1B[1;32m", ""),
            Level::Debug => ("\x1B[1;36m", "🔍 "),
            Level::Trace => ("\x1B[1;35m", "📋 "),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let now = chrono::Local::now().format("%H:%M:%S.%3f");
        let (color, emoji) = Self::decoration(record.level());
        let _ = writeln!(std::io::stderr(), "{}{} {}{}\x1B[0m", color, now, emoji, record.args());
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "signgloss", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Translate(args)) => run_translate(&args.input_path, &args.common).await,
        Some(Commands::Text(args)) => run_text(&args.text, &args.common).await,
        None => {
            let input_path = cli
                .input_path
                .ok_or_else(|| anyhow!("INPUT_PATH is required when no subcommand is specified"))?;
            run_translate(&input_path, &cli.common).await
        }
    }
}

async fn run_translate(input_path: &Path, options: &CommonArgs) -> Result<()> {
    let controller = build_controller(options)?;

    if !input_path.exists() {
        return Err(anyhow!("Input path does not exist: {:?}", input_path));
    }

    controller.check_services().await;
    controller.run(input_path, options.output.as_deref()).await
}

async fn run_text(text: &str, options: &CommonArgs) -> Result<()> {
    let controller = build_controller(options)?;
    controller.run_text(text, options.output.as_deref()).await?;
    Ok(())
}

/// Load or create the configuration, apply CLI overrides and build the controller
fn build_controller(options: &CommonArgs) -> Result<Controller> {
    // Apply a command line log level immediately
    if let Some(cmd_log_level) = &options.log_level {
        log::set_max_level(level_filter(&cmd_log_level.clone().into()));
    }

    let config_path = Path::new(&options.config_path);
    let mut config = if config_path.exists() {
        Config::from_file(config_path)?
    } else {
        warn!("Config file not found at '{}', creating default config.", options.config_path);
        let config = Config::default();
        config
            .save(config_path)
            .with_context(|| format!("Failed to write default config to file: {}", options.config_path))?;
        config
    };

    apply_overrides(&mut config, options);

    config.validate().context("Configuration validation failed")?;

    if options.log_level.is_none() {
        log::set_max_level(level_filter(&config.log_level));
    }

    Controller::with_config(config)
}

fn apply_overrides(config: &mut Config, options: &CommonArgs) {
    if let Some(endpoint) = &options.annotator_endpoint {
        config.annotator.endpoint = endpoint.clone();
    }
    if let Some(provider) = &options.provider {
        config.transcription.provider = provider.clone().into();
    }
    if let Some(endpoint) = &options.transcription_endpoint {
        config.transcription.endpoint = endpoint.clone();
    }
    if let Some(model) = &options.model {
        config.transcription.model = model.clone();
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }
}
