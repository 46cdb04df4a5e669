//! # CLI Layer
//!
//! This module is **one possible UI client** for textflow.
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr, stdin)
//! - Decides which caller token to present to the API
//! - Initialises logging
//! - Formats output for human consumption
//!
//! ## Caller Token
//!
//! The first of these wins: `--user`, `TEXTFLOW_USER`, the `user` config key
//! (set by `textflow login`). The API turns it into a user or fails with
//! an authentication error.
//!
//! ## Structure
//!
//! - `run()`: Main dispatch logic (called by `main.rs`)
//! - `init_context()`: Builds `AppContext` with API and configuration
//! - `handle_*()`: Per-command handlers that call API and format output

use super::print::{
    print_history, print_history_page, print_messages, print_stats, print_user,
};
use super::setup::{Cli, Commands, PagingArgs};
use clap::Parser;
use directories::ProjectDirs;
use log::debug;
use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};
use textflow::api::{ConfigAction, TextflowApi};
use textflow::config::TextflowConfig;
use textflow::error::{Result, TextflowError};
use textflow::model::{
    parse_import_document, Direction, HistoryId, PageRequest, Sort, User,
};
use textflow::store::fs::FileStore;

const HOME_ENV: &str = "TEXTFLOW_HOME";
const USER_ENV: &str = "TEXTFLOW_USER";

struct AppContext {
    api: TextflowApi<FileStore>,
    config: TextflowConfig,
    token: Option<String>,
}

impl AppContext {
    fn current_user(&self) -> Result<User> {
        self.api.authenticate(self.token.as_deref())
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut ctx = init_context(&cli)?;

    match cli.command {
        Commands::Count { text } => handle_count(&ctx, text),
        Commands::Register { username, email } => handle_register(&mut ctx, &username, &email),
        Commands::Login { email } => handle_login(&mut ctx, &email),
        Commands::Whoami => handle_whoami(&ctx),
        Commands::Rename { username } => handle_rename(&mut ctx, &username),
        Commands::Create {
            title,
            content_type,
            content,
        } => handle_create(&mut ctx, title, content_type, content),
        Commands::List { search, paging } => handle_list(&ctx, search, paging),
        Commands::Search { query, paging } => handle_list(&ctx, Some(query), paging),
        Commands::View { id } => handle_view(&ctx, &id),
        Commands::Delete { id } => handle_delete(&mut ctx, &id),
        Commands::Import { file } => handle_import(&mut ctx, &file),
        Commands::Config { key, value } => handle_config(&ctx, key, value),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .try_init();
}

fn data_dir() -> Result<PathBuf> {
    if let Ok(home) = std::env::var(HOME_ENV) {
        if !home.is_empty() {
            return Ok(PathBuf::from(home));
        }
    }
    let proj_dirs = ProjectDirs::from("com", "textflow", "textflow")
        .ok_or_else(|| TextflowError::Store("Could not determine data directory".to_string()))?;
    Ok(proj_dirs.data_dir().to_path_buf())
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let dir = data_dir()?;
    debug!("using data directory {}", dir.display());

    let config = TextflowConfig::load(&dir)?;
    let token = cli
        .user
        .clone()
        .or_else(|| std::env::var(USER_ENV).ok().filter(|u| !u.is_empty()))
        .or_else(|| config.user.clone());

    let store = FileStore::new(dir.clone());
    Ok(AppContext {
        api: TextflowApi::new(store, dir),
        config,
        token,
    })
}

/// Positional text if given, otherwise stdin when it is piped.
fn text_or_stdin(text: Option<String>) -> Result<Option<String>> {
    if text.is_some() {
        return Ok(text);
    }
    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }
    let mut buf = String::new();
    stdin.read_to_string(&mut buf).map_err(TextflowError::Io)?;
    Ok(Some(buf))
}

fn parse_id(raw: &str) -> Result<HistoryId> {
    raw.parse()
        .map_err(|_| TextflowError::Validation(format!("Invalid history id: {}", raw)))
}

fn page_request(ctx: &AppContext, paging: &PagingArgs) -> PageRequest {
    let direction = if paging.asc {
        Direction::Asc
    } else {
        Direction::Desc
    };
    PageRequest::new(
        paging.page.saturating_sub(1),
        paging.size.unwrap_or(ctx.config.page_size),
    )
    .with_sort(Sort::new(paging.sort, direction))
}

fn handle_count(ctx: &AppContext, text: Option<String>) -> Result<()> {
    let text = text_or_stdin(text)?;
    let result = ctx.api.count_text(text.as_deref())?;
    if let Some(stats) = &result.stats {
        print_stats(stats);
    }
    Ok(())
}

fn handle_register(ctx: &mut AppContext, username: &str, email: &str) -> Result<()> {
    let result = ctx.api.register(username, email)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_login(ctx: &mut AppContext, email: &str) -> Result<()> {
    let result = ctx.api.login(email)?;
    ctx.api
        .config(ConfigAction::Set("user".to_string(), email.to_string()))?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_whoami(ctx: &AppContext) -> Result<()> {
    let user = ctx.current_user()?;
    let result = ctx.api.profile(user.id)?;
    if let Some(user) = &result.user {
        print_user(user, result.history_count);
    }
    Ok(())
}

fn handle_rename(ctx: &mut AppContext, username: &str) -> Result<()> {
    let user = ctx.current_user()?;
    let result = ctx.api.rename_user(user.id, username)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_create(
    ctx: &mut AppContext,
    title: Option<String>,
    content_type: Option<String>,
    content: Option<String>,
) -> Result<()> {
    let user = ctx.current_user()?;
    let content = text_or_stdin(content)?.unwrap_or_default();
    let result = ctx
        .api
        .create_history(user.id, title.as_deref(), content, content_type)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &AppContext, search: Option<String>, paging: PagingArgs) -> Result<()> {
    let user = ctx.current_user()?;
    let request = page_request(ctx, &paging);
    let result = ctx
        .api
        .search_histories(user.id, search.as_deref(), &request)?;
    if let Some(page) = &result.listed {
        print_history_page(page);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_view(ctx: &AppContext, id: &str) -> Result<()> {
    let user = ctx.current_user()?;
    let result = ctx.api.get_history(user.id, parse_id(id)?)?;
    for record in &result.affected_histories {
        print_history(record);
    }
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, id: &str) -> Result<()> {
    let user = ctx.current_user()?;
    let result = ctx.api.delete_history(user.id, parse_id(id)?)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_import(ctx: &mut AppContext, file: &Path) -> Result<()> {
    let user = ctx.current_user()?;
    let raw = std::fs::read_to_string(file).map_err(TextflowError::Io)?;
    let items = parse_import_document(&raw).map_err(TextflowError::Serialization)?;
    debug!("read {} import items from {}", items.len(), file.display());
    let result = ctx.api.import_histories(user.id, items)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };

    let result = ctx.api.config(action)?;
    if let (Some(config), true) = (&result.config, result.messages.is_empty()) {
        for key in TextflowConfig::keys() {
            println!("{} = {}", key, config.get(key).unwrap_or_default());
        }
    }
    print_messages(&result.messages);
    Ok(())
}
