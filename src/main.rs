// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::{Read, Write};

use humaniser::app_config::{self, Config, DeviceChoice, Strategy};
use humaniser::Controller;

/// CLI Wrapper for Strategy to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliStrategy {
    Lexical,
    Neural,
}

impl From<CliStrategy> for Strategy {
    fn from(cli_strategy: CliStrategy) -> Self {
        match cli_strategy {
            CliStrategy::Lexical => Strategy::Lexical,
            CliStrategy::Neural => Strategy::Neural,
        }
    }
}

/// CLI Wrapper for DeviceChoice to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliDevice {
    Auto,
    Cpu,
    Gpu,
}

impl From<CliDevice> for DeviceChoice {
    fn from(cli_device: CliDevice) -> Self {
        match cli_device {
            CliDevice::Auto => DeviceChoice::Auto,
            CliDevice::Cpu => DeviceChoice::Cpu,
            CliDevice::Gpu => DeviceChoice::Gpu,
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

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the HTTP API (default command)
    Serve,

    /// Humanise TEXT, or standard input when TEXT is omitted, and print the result
    Humanise {
        /// Passage to humanise
        #[arg(value_name = "TEXT")]
        text: Option<String>,
    },

    /// Download the WordNet dictionary into the configured directory
    FetchWordnet {
        /// Destination directory, overriding lexical.wordnet_dir
        #[arg(long, value_name = "DIR")]
        dir: Option<String>,

        /// Mirror of a WordNet dict directory, overriding lexical.wordnet_url
        #[arg(long, value_name = "URL")]
        url: Option<String>,
    },

    /// Generate shell completions for humaniser
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Settings that override the configuration file
#[derive(Args, Debug, Clone)]
struct GlobalArgs {
    /// Configuration file path
    #[arg(short, long, global = true, default_value = "conf.json")]
    config: String,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Sentence transformation strategy
    #[arg(short, long, global = true, value_enum)]
    strategy: Option<CliStrategy>,

    /// HTTP listen port
    #[arg(short, long, global = true)]
    port: Option<u16>,

    /// Per-token substitution probability for the lexical strategy
    #[arg(long, global = true)]
    probability: Option<f64>,

    /// Execution device for the neural strategy
    #[arg(long, global = true, value_enum)]
    device: Option<CliDevice>,

    /// Seed for reproducible output
    #[arg(long, global = true)]
    seed: Option<u64>,
}

/// Humaniser - sentence-level text rewriting service
///
/// Splits a passage into sentences and rewrites each one, either by random
/// synonym substitution or with a paraphrase model.
#[derive(Parser, Debug)]
#[command(name = "humaniser")]
#[command(version)]
#[command(about = "Sentence-level text humanising service")]
#[command(long_about = "Humaniser splits a passage into sentences and rewrites each one.

EXAMPLES:
    humaniser                                    # Serve the API using conf.json
    humaniser --strategy neural --port 8080      # Serve the neural strategy on port 8080
    humaniser humanise \"Hello world. Bye.\"       # Humanise one passage
    echo \"Some text.\" | humaniser humanise       # Humanise standard input
    humaniser fetch-wordnet                      # Download WordNet for the lexical strategy
    humaniser completions bash > humaniser.bash  # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically.

STRATEGIES:
    lexical - Random WordNet synonym substitution (default)
    neural  - Sequence-to-sequence paraphrasing through an Ollama backend")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    global: GlobalArgs,
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

    // @returns: ANSI colour and tag for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "ERROR"),
            Level::Warn => ("\x1B[1;33m", "WARN "),
            Level::Info => ("\x1B[1;32m", "INFO "),
            Level::Debug => ("\x1B[1;36m", "DEBUG"),
            Level::Trace => ("\x1B[1;35m", "TRACE"),
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
            let (colour, tag) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", colour, now, tag, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger at trace and narrow the max level once the config is known
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "humaniser", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::FetchWordnet { dir, url }) => {
            let mut config = load_config(&cli.global)?;
            if let Some(dir) = dir {
                config.lexical.wordnet_dir = dir;
            }
            if let Some(url) = url {
                config.lexical.wordnet_url = url;
            }

            let controller = Controller::with_config(config)?;
            let written = controller.fetch_wordnet().await?;
            info!(
                "WordNet ready in {} ({} files)",
                controller.config().lexical.wordnet_dir,
                written
            );
            Ok(())
        }
        Some(Commands::Humanise { text }) => {
            let controller = Controller::with_config(load_config(&cli.global)?)?;
            let passage = match text {
                Some(text) => text,
                None => {
                    let mut buffer = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buffer)
                        .context("Failed to read passage from standard input")?;
                    buffer
                }
            };

            let output = controller.humanise_once(&passage).await?;
            println!("{}", output);
            Ok(())
        }
        Some(Commands::Serve) | None => {
            let controller = Controller::with_config(load_config(&cli.global)?)?;
            info!(
                "Starting humaniser with the {} strategy",
                controller.config().strategy.display_name()
            );
            controller.serve().await
        }
    }
}

/// Load the configuration file and apply command line overrides
fn load_config(options: &GlobalArgs) -> Result<Config> {
    // If log level is set via command line, apply it before the config is read
    if let Some(cmd_log_level) = &options.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = Config::load_or_create(&options.config)?;

    if let Some(strategy) = &options.strategy {
        config.strategy = strategy.clone().into();
    }

    if let Some(port) = options.port {
        config.server.port = port;
    }

    if let Some(probability) = options.probability {
        config.lexical.substitution_probability = probability;
    }

    if let Some(device) = &options.device {
        config.neural.device = device.clone().into();
    }

    if let Some(seed) = options.seed {
        config.pipeline.seed = Some(seed);
    }

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    // Update the max level from the final configuration
    log::set_max_level(config.log_level.to_level_filter());

    Ok(config)
}
