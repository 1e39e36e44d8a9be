//! Octoview CLI - browse GitHub from the terminal.

mod commands;
mod config;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::Term;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "octoview")]
#[command(version)]
#[command(about = "A GitHub browsing client")]
#[command(
    long_about = "Octoview browses GitHub from the terminal: trending and searched \
repositories with incremental paging, the signed-in user's profile and repositories, \
and issue creation. Sign in once with the OAuth authorization-code flow; the token \
is kept locally."
)]
#[command(after_long_help = r#"EXAMPLES
    Show trending repositories:
        $ octoview trending

    Search for Rust repositories, two pages deep:
        $ octoview search ripgrep --language rust --pages 2

    Inspect one repository:
        $ octoview repo BurntSushi/ripgrep

    Sign in, then open an issue:
        $ octoview login
        $ octoview issue octocat/hello-world --title "Broken link in README"

    Generate shell completions:
        $ octoview completions bash > ~/.local/share/bash-completion/completions/octoview

CONFIGURATION
    Octoview reads configuration from:
      1. ~/.config/octoview/config.toml (or $XDG_CONFIG_HOME/octoview/config.toml)
      2. ./octoview.toml
      3. Environment variables
      4. .env file in current directory

ENVIRONMENT VARIABLES
    OCTOVIEW_CLIENT_ID        OAuth app client id (required for login)
    OCTOVIEW_CLIENT_SECRET    OAuth app client secret (required for login)
    OCTOVIEW_API_URL          API base URL (default: https://api.github.com)
"#)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show trending repositories
    Trending {
        #[command(flatten)]
        paging: PagingOptions,
    },
    /// Search repositories, sorted by stars
    Search {
        /// Search terms
        #[arg(required = true)]
        query: Vec<String>,

        /// Restrict results to a language (composed into the query)
        #[arg(short, long)]
        language: Option<String>,

        #[command(flatten)]
        paging: PagingOptions,
    },
    /// Show one repository
    Repo {
        /// Repository as owner/name (e.g. "BurntSushi/ripgrep")
        repo: String,
    },
    /// Show the signed-in user's profile
    Profile,
    /// List the signed-in user's repositories, most recently updated first
    Repos {
        /// Page to fetch (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
    /// Create an issue on a repository
    Issue {
        /// Repository as owner/name
        repo: String,

        /// Issue title
        #[arg(short, long)]
        title: String,

        /// Issue body
        #[arg(short, long)]
        body: Option<String>,

        /// Label(s) to attach - can specify multiple
        #[arg(short, long = "label")]
        labels: Vec<String>,
    },
    /// Sign in with the OAuth authorization-code flow
    ///
    /// Opens your browser to authorize Octoview with GitHub. The access
    /// token and your login are stored locally until you log out.
    Login {
        /// Paste the authorization code by hand instead of running the
        /// local callback server
        #[arg(long)]
        manual_code: bool,
    },
    /// Forget the stored credentials
    Logout,
    /// Show whether a user is signed in
    Status,
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
    /// Generate man page(s)
    Man {
        /// Output directory for man pages (prints to stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Paging options shared by the listing commands.
#[derive(Debug, Clone, clap::Args)]
struct PagingOptions {
    /// Number of pages to fetch (each page holds up to 30 items)
    #[arg(short = 'p', long, default_value_t = 1)]
    pages: u32,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize tracing for non-TTY mode (structured logging)
    if !Term::stdout().is_term() {
        let env_filter = match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => EnvFilter::new("octoview=info,octoview_cli=info"),
        };

        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .init();
    }

    let cli = Cli::parse();

    // Handle commands that don't need configuration or the network first
    match &cli.command {
        Commands::Completions { shell } => {
            commands::meta::handle_completions(*shell)?;
            return Ok(());
        }
        Commands::Man { output } => {
            commands::meta::handle_man(output.clone())?;
            return Ok(());
        }
        _ => {}
    }

    let config = config::Config::load();
    let context = commands::Context::new(&config)?;

    match cli.command {
        Commands::Trending { paging } => {
            commands::browse::handle_trending(&context, paging.pages).await?;
        }
        Commands::Search {
            query,
            language,
            paging,
        } => {
            let query = query.join(" ");
            commands::browse::handle_search(&context, &query, language.as_deref(), paging.pages)
                .await?;
        }
        Commands::Repo { repo } => {
            commands::browse::handle_repo(&context, &repo).await?;
        }
        Commands::Profile => {
            commands::profile::handle_profile(&context).await?;
        }
        Commands::Repos { page } => {
            commands::profile::handle_repos(&context, page).await?;
        }
        Commands::Issue {
            repo,
            title,
            body,
            labels,
        } => {
            commands::issue::handle_issue(&context, &repo, &title, body.as_deref(), &labels)
                .await?;
        }
        Commands::Login { manual_code } => {
            commands::login::handle_login(&context, &config, manual_code).await?;
        }
        Commands::Logout => {
            commands::profile::handle_logout(&context).await?;
        }
        Commands::Status => {
            commands::profile::handle_status(&context).await?;
        }
        Commands::Completions { .. } | Commands::Man { .. } => {}
    }

    Ok(())
}
