use anyhow::Result;
use clap::{Parser, Subcommand};
use focloir_acquire::audio::{self, Dialect, PronunciationFetcher};
use focloir_acquire::client::build_client;
use focloir_acquire::definition::{ChatDefiner, DefinitionSettings};
use focloir_acquire::translation::{DictionaryTranslator, LOOKUP_BASE};
use focloir_deck::{DeckPaths, Enricher};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "focloir")]
#[command(about = "Build Irish vocabulary flashcards from a word list")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_HASH"), ")"))]
struct Cli {
    /// Log level: error, warn, info, debug, trace
    #[arg(long, global = true, default_value = "info", value_enum)]
    log_level: LogLevel,

    /// Use UTC timestamps instead of local time
    #[arg(long, global = true)]
    utc: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Subcommand)]
enum Commands {
    /// Enrich every word in a CSV list and write the flashcard deck
    Build {
        /// CSV word list with a `word` column
        #[arg(short, long, default_value = "irish_words.csv")]
        input: PathBuf,

        /// Flashcard deck CSV (complete entries)
        #[arg(short, long, default_value = "irish_words_with_definitions.csv")]
        output: PathBuf,

        /// Report of words with missing translation, audio, or definition
        #[arg(short, long, default_value = "missing_data.csv")]
        missing_output: PathBuf,

        /// Delay before each word, in milliseconds
        #[arg(long, default_value_t = 1000)]
        delay_ms: u64,

        #[command(flatten)]
        sources: SourceArgs,
    },

    /// Enrich a single word and print the result as JSON
    Lookup {
        /// Irish word to look up (e.g., "fáilte")
        word: String,

        #[command(flatten)]
        sources: SourceArgs,
    },
}

/// Remote sources and where audio lands.
#[derive(clap::Args)]
struct SourceArgs {
    /// Directory for downloaded pronunciation clips
    #[arg(short, long, default_value = "audio_files")]
    audio_dir: PathBuf,

    /// Pronunciation dialect to download
    #[arg(long, value_enum, default_value = "connacht")]
    dialect: DialectArg,

    /// Override the audio base URL (takes precedence over --dialect)
    #[arg(long)]
    audio_base: Option<String>,

    /// Dictionary lookup base URL; the word is appended verbatim
    #[arg(long, default_value = LOOKUP_BASE)]
    lookup_base: String,

    /// Don't append trailing silence to downloaded clips
    #[arg(long)]
    no_pad: bool,

    /// Timeout for each remote call, in seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Chat model used for beginner explanations
    #[arg(long, default_value = "gpt-4o-mini")]
    model: String,

    /// OpenAI-compatible API base URL
    #[arg(long)]
    api_base: Option<String>,

    /// API key for the chat model
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum DialectArg {
    /// Connemara / Connacht recordings
    Connacht,
    /// Kerry / Munster recordings
    Munster,
    /// Donegal / Ulster recordings
    Ulster,
}

impl From<DialectArg> for Dialect {
    fn from(arg: DialectArg) -> Self {
        match arg {
            DialectArg::Connacht => Dialect::Connacht,
            DialectArg::Munster => Dialect::Munster,
            DialectArg::Ulster => Dialect::Ulster,
        }
    }
}

impl SourceArgs {
    /// Construct the three fetchers. The audio directory must be prepared separately.
    fn enricher(self) -> Result<Enricher> {
        if self.api_key.is_none() {
            tracing::warn!("OPENAI_API_KEY is not set; every definition will be missing");
        }

        let timeout = Duration::from_secs(self.timeout_secs);
        let client = build_client(timeout)?;

        let audio_base = self
            .audio_base
            .unwrap_or_else(|| Dialect::from(self.dialect).base_url().to_string());
        let mut fetcher = PronunciationFetcher::new(client.clone(), audio_base, &self.audio_dir);
        if self.no_pad {
            fetcher = fetcher.without_padding();
        }

        let translator = DictionaryTranslator::new(client, self.lookup_base);
        let definer = ChatDefiner::new(
            self.api_key,
            self.api_base,
            DefinitionSettings {
                model: self.model,
                timeout,
                ..DefinitionSettings::default()
            },
        );

        Ok(Enricher::new(Box::new(translator), Box::new(fetcher), Box::new(definer)))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine; the key may come from the environment or --api-key
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    // Map log level, suppressing noisy HTML-parsing and audio crates at debug/trace
    let level = match cli.log_level {
        LogLevel::Error => "error",
        LogLevel::Warn  => "warn",
        LogLevel::Info  => "info",
        LogLevel::Debug => "debug,selectors=warn,html5ever=warn,symphonia=warn",
        LogLevel::Trace => "trace,selectors=warn,html5ever=warn,symphonia=warn,hyper=info",
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    // Timestamp format: 2026-02-14 19:44:09.123 -08:00
    let time_format = "%Y-%m-%d %H:%M:%S%.3f %:z";

    if cli.utc {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_timer(tracing_subscriber::fmt::time::ChronoUtc::new(time_format.to_string()))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_timer(tracing_subscriber::fmt::time::ChronoLocal::new(time_format.to_string()))
            .init();
    }

    match cli.command {
        Commands::Build {
            input,
            output,
            missing_output,
            delay_ms,
            sources,
        } => {
            let paths = DeckPaths {
                input,
                deck: output,
                missing: missing_output,
                audio_dir: sources.audio_dir.clone(),
            };
            let enricher = sources.enricher()?.with_pacing(Duration::from_millis(delay_ms));

            let summary = focloir_deck::build(&paths, &enricher).await?;
            tracing::info!(
                complete = summary.complete,
                path = %summary.deck_path.display(),
                "Done! Flashcard deck written"
            );
            match &summary.missing_path {
                Some(path) => tracing::info!(
                    missing = summary.missing,
                    path = %path.display(),
                    "Some words are missing data"
                ),
                None => tracing::info!("No missing data; no missing-data file written"),
            }
        }
        Commands::Lookup { word, sources } => {
            let word = word.trim().to_string();
            tracing::info!(word = %word, "Looking up");
            audio::prepare_dir(&sources.audio_dir)?;
            let enricher = sources.enricher()?;
            let result = enricher.enrich(&word).await;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}
