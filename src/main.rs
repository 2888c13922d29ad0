use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use http::header::COOKIE;
use http::{HeaderMap, HeaderValue};
use meritpath::auth::{AuthGate, PROJECT_REF_ENV_VARS};
use meritpath::config::{
    default_config_path, find_config_file, get_config, load_config, save_config, Config,
};
use meritpath::models::{QueryState, SortDirection, SortKey, PAGE_SIZE_OPTIONS};
use meritpath::page::{CitersPage, CitersTable, Gated, PageView, TableCommand, HELP};
use meritpath::ui::{self, Status};
use meritpath::utils::{is_terminal, terminal_width};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// MeritPath - Shortlist researchers who cite your work
#[derive(Parser, Debug)]
#[command(name = "meritpath")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Search, sort and page through researchers who cite your work", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (can be used multiple times: -v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short)]
    quiet: bool,

    /// Output format
    #[arg(long, short, value_enum, global = true, default_value_t = OutputFormat::Auto)]
    output: OutputFormat,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Cookie header sent with the request (e.g. "sb-<ref>-auth-token=...")
    #[arg(long, global = true, env = "MERITPATH_COOKIE", hide_env_values = true)]
    cookie: Option<String>,

    /// Show all environment variables
    #[arg(long)]
    env: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Output format for results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Automatic based on terminal (table if TTY, JSON otherwise)
    Auto,
    /// Table format (human-readable)
    Table,
    /// JSON format (machine-readable)
    Json,
    /// Plain text format
    Plain,
}

/// Sort column
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum SortField {
    /// Sort by name
    Name,
    /// Sort by affiliation
    Affiliation,
    /// Sort by total citations
    Citations,
}

/// Sort order
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Order {
    /// Ascending order
    Asc,
    /// Descending order
    Desc,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show one page of citers
    #[command(alias = "ls")]
    Citers {
        /// Filter by name or affiliation (case-insensitive substring)
        #[arg(long, short)]
        search: Option<String>,

        /// Sort column
        #[arg(long, value_enum)]
        sort: Option<SortField>,

        /// Sort order
        #[arg(long, value_enum)]
        order: Option<Order>,

        /// Page number (1-based)
        #[arg(long, short, default_value_t = 1)]
        page: usize,

        /// Rows per page (5, 10, 15 or 20)
        #[arg(long, value_parser = parse_page_size)]
        page_size: Option<usize>,
    },

    /// Browse citers interactively (type "help" for commands)
    #[command(alias = "b")]
    Browse,

    /// Show a single citer
    #[command(alias = "d")]
    Detail {
        /// Citer ID
        id: String,
    },

    /// Check whether the given cookie authenticates
    Auth,

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Write a configuration file with default values
    Init {
        /// Where to write (default: user config directory)
        #[arg(long)]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,
    },

    /// Print the effective configuration
    Show,
}

fn parse_page_size(value: &str) -> Result<usize, String> {
    let size: usize = value
        .parse()
        .map_err(|_| format!("'{}' is not a number", value))?;
    if PAGE_SIZE_OPTIONS.contains(&size) {
        Ok(size)
    } else {
        Err(format!("page size must be one of {:?}", PAGE_SIZE_OPTIONS))
    }
}

/// Print all available environment variables
fn print_env_vars() {
    println!("MeritPath - Environment Variables");
    println!();
    println!("Authentication:");
    for var in PROJECT_REF_ENV_VARS {
        println!("  {:<36} Project reference for the auth cookie name", var);
    }
    println!("  MERITPATH_COOKIE                     Cookie header to send with requests");
    println!();
    println!("Configuration Overrides (nested keys use '__'):");
    println!("  MERITPATH_AUTH__PROJECT_REF          Project reference");
    println!("  MERITPATH_AUTH__LOGIN_PATH           Redirect target when not signed in");
    println!("  MERITPATH_AUTH__VALIDATION           presence | session");
    println!("  MERITPATH_TABLE__DEFAULT_PAGE_SIZE   Rows per page (5, 10, 15, 20)");
    println!("  MERITPATH_DATA__CITERS_FILE          JSON file with citers");
    println!("  MERITPATH_LOGGING__FORMAT            pretty | json");
    println!();
    println!("Other Settings:");
    println!("  RUST_LOG                             Rust logging level (e.g., debug, info, warn)");
    std::process::exit(0);
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.env {
        print_env_vars();
    }

    let (config, config_path) = if let Some(path) = &cli.config {
        (load_config(path)?, Some(path.clone()))
    } else if let Some(path) = find_config_file() {
        (load_config(&path)?, Some(path))
    } else {
        (get_config()?, None)
    };

    init_tracing(&cli, &config);

    if let Some(path) = &config_path {
        tracing::info!("Using config file: {}", path.display());
    }

    match cli.command {
        Some(Commands::Citers {
            ref search,
            sort,
            order,
            page,
            page_size,
        }) => {
            let mut state = initial_state(&config);
            if let Some(text) = search {
                state.search_text = text.clone();
            }
            if let Some(field) = sort {
                state.sort_key = sort_key(field);
                state.sort_direction = SortDirection::Ascending;
            }
            if let Some(order) = order {
                state.sort_direction = match order {
                    Order::Asc => SortDirection::Ascending,
                    Order::Desc => SortDirection::Descending,
                };
            }
            state.page_index = page;
            if let Some(size) = page_size {
                state.page_size = size;
            }

            let citers_page = CitersPage::from_config(&config)?;
            match citers_page.handle(&request_headers(&cli)?, &state).await? {
                Gated::Granted(view) => output_page(&view, cli.output)?,
                Gated::Redirect(redirect) => ui::print_redirect(&redirect),
            }
        }

        Some(Commands::Browse) => {
            let citers_page = CitersPage::from_config(&config)?;
            let opened = citers_page
                .open_table(&request_headers(&cli)?, initial_state(&config))
                .await?;

            match opened {
                Gated::Granted((user, table)) => browse(&user, table, &cli).await?,
                Gated::Redirect(redirect) => ui::print_redirect(&redirect),
            }
        }

        Some(Commands::Detail { ref id }) => {
            let citers_page = CitersPage::from_config(&config)?;
            match citers_page.detail(&request_headers(&cli)?, id).await? {
                Gated::Granted(citer) => match resolve_format(cli.output) {
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&citer)?),
                    _ => print!("{}", ui::render_citer(&citer)),
                },
                Gated::Redirect(redirect) => ui::print_redirect(&redirect),
            }
        }

        Some(Commands::Auth) => {
            let gate = AuthGate::from_config(&config.auth)?;
            let decision = gate.check_auth(&request_headers(&cli)?);

            match resolve_format(cli.output) {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&decision)?),
                _ => {
                    println!("Cookie: {}", gate.cookie_name());
                    match &decision.user {
                        Some(user) => ui::print_status(
                            Status::Success,
                            &format!("Authenticated as {} ({})", user.name, user.id),
                        ),
                        None => ui::print_status(Status::Error, "Not authenticated"),
                    }
                }
            }
        }

        Some(Commands::Config { command }) => match command {
            ConfigCommands::Init { path, force } => {
                let path = path
                    .or_else(default_config_path)
                    .context("Could not determine a config directory; pass --path")?;
                if path.exists() && !force {
                    anyhow::bail!(
                        "{} already exists (use --force to overwrite)",
                        path.display()
                    );
                }
                save_config(&Config::default(), &path)?;
                if !cli.quiet {
                    ui::print_status(
                        Status::Success,
                        &format!("Wrote default configuration to {}", path.display()),
                    );
                }
            }
            ConfigCommands::Show => match resolve_format(cli.output) {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&config)?),
                _ => print!("{}", toml::to_string_pretty(&config)?),
            },
        },

        None => {
            use clap::CommandFactory;
            Cli::command().print_help()?;
        }
    }

    Ok(())
}

fn init_tracing(cli: &Cli, config: &Config) {
    let level = match cli.verbose {
        0 => config.logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    };
    let level = if cli.quiet { "error" } else { level };

    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| format!("meritpath={}", level)),
    );

    let json = config.logging.is_json();
    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
        }))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();
}

fn initial_state(config: &Config) -> QueryState {
    QueryState::new()
        .sort(config.table.default_sort, config.table.default_direction)
        .page_size(config.table.default_page_size)
}

fn sort_key(field: SortField) -> SortKey {
    match field {
        SortField::Name => SortKey::Name,
        SortField::Affiliation => SortKey::Affiliation,
        SortField::Citations => SortKey::CitationCount,
    }
}

fn request_headers(cli: &Cli) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    if let Some(cookie) = &cli.cookie {
        let value = HeaderValue::from_str(cookie).context("Invalid cookie header")?;
        headers.insert(COOKIE, value);
    }
    Ok(headers)
}

fn resolve_format(format: OutputFormat) -> OutputFormat {
    if format == OutputFormat::Auto {
        if is_terminal() {
            OutputFormat::Table
        } else {
            OutputFormat::Json
        }
    } else {
        format
    }
}

fn output_page(view: &PageView, format: OutputFormat) -> Result<()> {
    match resolve_format(format) {
        OutputFormat::Json => println!("{}", ui::render_json(view)?),
        OutputFormat::Plain => print!("{}", ui::render_plain(view)),
        OutputFormat::Table | OutputFormat::Auto => {
            print!("{}", ui::render_table(view, terminal_width()))
        }
    }
    Ok(())
}

async fn browse(user: &meritpath::auth::User, mut table: CitersTable, cli: &Cli) -> Result<()> {
    let format = match resolve_format(cli.output) {
        OutputFormat::Json => OutputFormat::Json,
        OutputFormat::Plain => OutputFormat::Plain,
        _ => OutputFormat::Table,
    };

    output_page(&PageView::build(user, table.state(), table.result()), format)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match line.parse::<TableCommand>() {
            Ok(command) => command,
            Err(e) => {
                ui::print_status(Status::Error, &e.to_string());
                continue;
            }
        };

        match command {
            TableCommand::Quit => break,
            TableCommand::Help => println!("{}", HELP),
            command => {
                command.apply(&mut table);
                output_page(&PageView::build(user, table.state(), table.result()), format)?;
            }
        }
    }

    Ok(())
}
