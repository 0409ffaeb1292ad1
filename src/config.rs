//! Startup configuration.
//!
//! Sources, later ones winning: built-in defaults, a TOML file, environment
//! variables (`.env` included), command line flags.

use crate::initializer::Config;
use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use serde::*;
use std::path::{Path, PathBuf};

pub const DEFAULT_DB_URL: &str = "tweetboard.db";
pub const DEFAULT_POOL_SIZE: u32 = 5;
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_TIMELINE_LIMIT: i64 = 50;

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub database_url: Option<String>,
    pub database_pool_size: Option<u32>,
    pub bind_addr: Option<String>,
    pub enforce_foreign_keys: Option<bool>,
    pub timeline_limit: Option<i64>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct CliArgs {
    pub config: Option<PathBuf>,
    pub database_url: Option<String>,
    pub bind: Option<String>,
    pub pool_size: Option<u32>,
    pub no_foreign_keys: bool,
}

pub fn command() -> Command {
    Command::new("tweetboard")
        .about("Tweet, reply and like service")
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("FILE")
                .help("TOML config file")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("database-url")
                .long("database-url")
                .value_name("PATH")
                .help("SQLite database file"),
        )
        .arg(
            Arg::new("bind")
                .long("bind")
                .value_name("ADDR")
                .help("Address to listen on, e.g. 127.0.0.1:3000"),
        )
        .arg(
            Arg::new("pool-size")
                .long("pool-size")
                .value_name("N")
                .help("Database connection pool size")
                .value_parser(value_parser!(u32)),
        )
        .arg(
            Arg::new("no-foreign-keys")
                .long("no-foreign-keys")
                .help("Do not enforce foreign keys in the store")
                .action(ArgAction::SetTrue),
        )
}

impl CliArgs {
    pub fn from_matches(matches: &ArgMatches) -> CliArgs {
        CliArgs {
            config: matches.get_one::<PathBuf>("config").cloned(),
            database_url: matches.get_one::<String>("database-url").cloned(),
            bind: matches.get_one::<String>("bind").cloned(),
            pool_size: matches.get_one::<u32>("pool-size").copied(),
            no_foreign_keys: matches.get_flag("no-foreign-keys"),
        }
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("dev", "tweetboard", "tweetboard")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

pub fn load_file(path: &Path) -> anyhow::Result<FileConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config = toml::from_str(&text)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;
    Ok(config)
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn env_parsed<T, F>(env: &impl Fn(&str) -> Option<String>, key: &str, parse: F) -> Option<T>
where
    F: Fn(&str) -> Option<T>,
{
    let raw = env(key)?;
    let parsed = parse(&raw);
    if parsed.is_none() {
        log::warn!("ignoring {}={:?}: not a valid value", key, raw);
    }
    parsed
}

pub fn resolve(
    file: FileConfig,
    env: impl Fn(&str) -> Option<String>,
    cli: &CliArgs,
) -> anyhow::Result<Config> {
    let db_url = cli
        .database_url
        .clone()
        .or_else(|| env("DATABASE_URL"))
        .or(file.database_url)
        .unwrap_or_else(|| DEFAULT_DB_URL.to_string());

    let db_pool_size = cli
        .pool_size
        .or_else(|| env_parsed(&env, "DATABASE_POOL_SIZE", |it| it.trim().parse().ok()))
        .or(file.database_pool_size)
        .unwrap_or(DEFAULT_POOL_SIZE);
    if db_pool_size == 0 {
        anyhow::bail!("database pool size must be at least 1");
    }

    let bind_addr = cli
        .bind
        .clone()
        .or_else(|| env("BIND_ADDR"))
        .or(file.bind_addr)
        .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
    let bind_addr = bind_addr
        .parse()
        .with_context(|| format!("invalid bind address {:?}", bind_addr))?;

    let enforce_foreign_keys = if cli.no_foreign_keys {
        false
    } else {
        env_parsed(&env, "ENFORCE_FOREIGN_KEYS", parse_bool)
            .or(file.enforce_foreign_keys)
            .unwrap_or(true)
    };

    let timeline_limit = env_parsed(&env, "TIMELINE_LIMIT", |it| it.trim().parse().ok())
        .or(file.timeline_limit)
        .unwrap_or(DEFAULT_TIMELINE_LIMIT)
        .max(1);

    Ok(Config {
        db_url,
        db_pool_size,
        enforce_foreign_keys,
        bind_addr,
        timeline_limit,
    })
}

/// Reads the file named by `--config`, else the per-user default when present.
pub fn load(cli: &CliArgs) -> anyhow::Result<Config> {
    let file = match &cli.config {
        Some(path) => load_file(path)?,
        None => match default_config_path() {
            Some(path) if path.exists() => load_file(&path)?,
            _ => FileConfig::default(),
        },
    };
    resolve(file, |key| std::env::var(key).ok(), cli)
}
