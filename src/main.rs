use anyhow::{Context, Result};
use calculogic::auth::{StaticIdentity, UserId};
use calculogic::calculator::{Action, AngleUnit, Mode};
use calculogic::config::{Config, StorageMode};
use calculogic::persistence::FileStore;
use calculogic::session::Session;
use calculogic::ui::{self, Command, Theme};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

/// Terminal calculator with history and memory.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Config file (default: $XDG_CONFIG_HOME/calculogic/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Storage mode, overriding the config file
    #[arg(long, value_enum)]
    mode: Option<StorageMode>,

    /// Signed-in user for remote storage
    #[arg(long)]
    user: Option<String>,

    /// Start in scientific mode
    #[arg(long)]
    scientific: bool,

    /// Start with angles in radians
    #[arg(long)]
    radians: bool,

    /// Evaluate keys, print the result and exit
    #[arg(short, long, value_name = "KEYS")]
    eval: Option<String>,

    /// Disable colours
    #[arg(long)]
    plain: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(mode) = args.mode {
        config.storage.mode = mode;
    }

    init_logging(&config);

    let path = config
        .storage
        .path
        .clone()
        .or_else(FileStore::default_path)
        .context("No data directory found; set storage.path in the config file")?;
    let store = match config.storage.mode {
        StorageMode::Local => FileStore::new(path),
        StorageMode::Remote => FileStore::with_history_limit(path, usize::MAX),
    };
    let identity = match args.user {
        Some(user) => StaticIdentity::signed_in(UserId::new(user)),
        None => StaticIdentity::anonymous(),
    };

    if args.eval.is_none() {
        println!("Loading...");
    }
    let mut session = Session::load(&config, Arc::new(store), Arc::new(identity)).await;

    if args.scientific && session.state().mode() == Mode::Basic {
        session.press(Action::ToggleMode);
    }
    if args.radians && session.state().angle_unit() == AngleUnit::Degrees {
        session.press(Action::ToggleAngleUnit);
    }

    let result = match args.eval {
        Some(keys) => run_once(&mut session, &keys, args.plain),
        None => run_prompt(&mut session, args.plain).await,
    };

    session.flush().await;
    result
}

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn theme(session: &Session, plain: bool) -> Theme {
    if plain {
        Theme::plain()
    } else {
        Theme::for_dark_mode(session.settings().dark_mode)
    }
}

fn run_once(session: &mut Session, keys: &str, plain: bool) -> Result<()> {
    let actions = calculogic::calculator::parse_keys(keys)?;
    for action in actions {
        if let Some(notice) = session.press(action)
            && notice.is_error()
        {
            eprintln!("{}", ui::render_notice(&notice, &theme(session, plain)));
        }
    }
    println!(
        "{}",
        calculogic::calculator::format_for_display(session.state().display())
    );
    Ok(())
}

async fn run_prompt(session: &mut Session, plain: bool) -> Result<()> {
    println!("{}", ui::render_display(session.state(), &theme(session, plain)));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let command = match ui::parse_command(line) {
            Ok(command) => command,
            Err(err) => {
                println!("{err} (type `help` for the key list)");
                continue;
            }
        };

        let mut notices = Vec::new();
        match command {
            Command::Quit => break,
            Command::Help => {
                println!("{}", ui::HELP);
                continue;
            }
            Command::History => {
                println!("{}", ui::render_history(session.history(), &theme(session, plain)));
                continue;
            }
            Command::Keys(actions) => {
                notices.extend(actions.into_iter().filter_map(|a| session.press(a)));
            }
            Command::Recall(n) => notices.extend(session.recall(n - 1)),
            Command::ClearHistory => notices.push(session.clear_history().await),
            Command::ToggleDarkMode => notices.push(session.toggle_dark_mode()),
            Command::Logout => notices.push(session.logout()),
        }

        let style = theme(session, plain);
        for notice in &notices {
            println!("{}", ui::render_notice(notice, &style));
        }
        println!("{}", ui::render_display(session.state(), &style));
    }

    Ok(())
}
