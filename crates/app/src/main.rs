use std::fmt;
use std::sync::Arc;

use buddy_core::model::ToolCatalog;
use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{ApiConfig, ConfigError, HttpQuizApi, QuizApi, SearchStrategy};
use tracing::info;
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidSearch { raw: String },
    Config(ConfigError),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidSearch { raw } => {
                write!(f, "invalid --search value: {raw} (expected client or server)")
            }
            ArgsError::Config(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ArgsError {}

impl From<ConfigError> for ArgsError {
    fn from(err: ConfigError) -> Self {
        ArgsError::Config(err)
    }
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn parse_search(raw: &str) -> Result<SearchStrategy, ArgsError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "client" => Ok(SearchStrategy::ClientSide),
        "server" => Ok(SearchStrategy::ServerSide),
        _ => Err(ArgsError::InvalidSearch {
            raw: raw.to_string(),
        }),
    }
}

struct DesktopApp {
    api: Arc<HttpQuizApi>,
    catalog: ToolCatalog,
    search: SearchStrategy,
}

impl UiApp for DesktopApp {
    fn quiz_api(&self) -> Arc<dyn QuizApi> {
        self.api.clone()
    }

    fn tool_catalog(&self) -> ToolCatalog {
        self.catalog.clone()
    }

    fn search_strategy(&self) -> SearchStrategy {
        self.search
    }
}

struct Args {
    config: ApiConfig,
    search: SearchStrategy,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--api-url <url>] [--tools <a,b,..>] [--timeout-secs <n>] [--search <client|server>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --api-url {}", services::DEFAULT_API_URL);
    eprintln!("  --tools   every supported tool");
    eprintln!("  --timeout-secs 30");
    eprintln!("  --search client");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  BUDDY_API_URL, BUDDY_TOOLS, BUDDY_TIMEOUT_SECS, BUDDY_SEARCH, RUST_LOG");
}

enum Parsed {
    Run(Args),
    Help,
}

impl Args {
    /// Environment first, then flags on top.
    fn parse(
        args: &mut impl Iterator<Item = String>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Parsed, ArgsError> {
        let mut config = ApiConfig::from_lookup(&lookup)?;
        let mut search = match lookup("BUDDY_SEARCH").filter(|value| !value.trim().is_empty()) {
            Some(raw) => parse_search(&raw)?,
            None => SearchStrategy::default(),
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--api-url" => {
                    let value = require_value(args, "--api-url")?;
                    config = config.with_base_url(&value)?;
                }
                "--tools" => {
                    let value = require_value(args, "--tools")?;
                    config = config.with_tools(&value)?;
                }
                "--timeout-secs" => {
                    let value = require_value(args, "--timeout-secs")?;
                    config = config.with_timeout_secs(&value)?;
                }
                "--search" => {
                    let value = require_value(args, "--search")?;
                    search = parse_search(&value)?;
                }
                "--help" | "-h" => return Ok(Parsed::Help),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Parsed::Run(Self { config, search }))
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(&mut argv, |key| std::env::var(key).ok()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    let args = match parsed {
        Parsed::Run(args) => args,
        Parsed::Help => {
            print_usage();
            return Ok(());
        }
    };

    init_tracing();
    info!(
        api_url = %args.config.base_url(),
        tools = args.config.catalog().len(),
        search = ?args.search,
        "starting command buddy"
    );

    let catalog = args.config.catalog().clone();
    let api = Arc::new(HttpQuizApi::new(args.config)?);
    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        api,
        catalog,
        search: args.search,
    });
    let context = build_app_context(&app);

    // Dioxus/tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Command Buddy")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
