use clap::{Parser, Subcommand};
use textflow::model::SortKey;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.0" for releases, "0.3.0@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "textflow", bin_name = "textflow", version = get_version())]
#[command(about = "Count text and keep a searchable history of it", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Act as this user (email); overrides TEXTFLOW_USER and the config
    #[arg(short, long, global = true)]
    pub user: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show statistics for a text (reads stdin when no text is given)
    #[command(alias = "c")]
    Count {
        /// Text to analyse
        text: Option<String>,
    },

    /// Register a new user
    Register { username: String, email: String },

    /// Remember a user as the default caller
    Login { email: String },

    /// Show the current user and how many histories they own
    Whoami,

    /// Change the current user's username
    Rename { username: String },

    /// Save a text as a new history (reads stdin when no content is given)
    #[command(alias = "n")]
    Create {
        /// Title (derived from the content when omitted)
        #[arg(short, long)]
        title: Option<String>,

        /// Content type tag
        #[arg(long = "type")]
        content_type: Option<String>,

        /// Content of the history
        content: Option<String>,
    },

    /// List histories, newest first
    #[command(alias = "ls")]
    List {
        /// Only titles containing this text (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,

        #[command(flatten)]
        paging: PagingArgs,
    },

    /// Search history titles (case-insensitive)
    Search {
        query: String,

        #[command(flatten)]
        paging: PagingArgs,
    },

    /// Show one history with its content
    #[command(alias = "v")]
    View { id: String },

    /// Delete a history
    #[command(alias = "rm")]
    Delete { id: String },

    /// Import histories from a JSON export
    Import {
        /// File holding `{"histories": [...]}` or a bare array
        file: std::path::PathBuf,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (page-size, user)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[derive(clap::Args, Debug, Clone)]
pub struct PagingArgs {
    /// Page number, starting at 1
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,

    /// Histories per page (defaults to the configured page size)
    #[arg(long)]
    pub size: Option<usize>,

    /// Sort key: created, updated, title, chars
    #[arg(long, default_value = "created")]
    pub sort: SortKey,

    /// Sort ascending instead of descending
    #[arg(long)]
    pub asc: bool,
}
