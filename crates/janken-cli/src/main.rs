//! janken - rock-paper-scissors-lizard-Spock in the terminal.
//!
//! # 構成
//! - Session の進行はメインタスク（stdin を 1 行ずつ読む）
//! - 画面表示はイベント受信タスク（ChannelEventSink 経由）
//! - 診断ログは tracing（stderr）

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::mpsc::UnboundedReceiver;

use janken_core::app::{Game, GameBuilder, GameConfig, PacingConfig, Scoreboard, Session};
use janken_core::domain::{
    DisplayCatalog, GameError, MoveId, OutcomeTable, PlayerName, RoundEvent, StoredRecord,
};
use janken_core::impls::{ChannelEventSink, JsonLinesReporter, LogReporter, NoPause, TokioPacer};
use janken_core::ports::{Pacer, ResultReporter, SystemClock};

#[derive(Parser, Debug)]
#[command(name = "janken")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Play rounds against the computer
    Play {
        /// Player name (asked interactively when omitted)
        #[arg(short, long)]
        name: Option<String>,

        /// Game configuration file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Append every result to this JSON Lines file instead of the log
        #[arg(long)]
        record_file: Option<PathBuf>,

        /// Skip the dramatic pauses
        #[arg(long)]
        fast: bool,

        /// Stop after this many rounds
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
        rounds: Option<u32>,
    },

    /// List results stored by `play --record-file`
    Records {
        /// JSON Lines result file
        #[arg(long)]
        record_file: PathBuf,

        /// Print the stored documents as JSON, one per line
        #[arg(long)]
        json: bool,
    },

    /// List the configured moves and what each one beats
    Moves {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Validate a configuration file
    Check {
        #[arg(short, long)]
        config: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match Args::parse().command {
        Commands::Play {
            name,
            config,
            record_file,
            fast,
            rounds,
        } => {
            let config = load_config(config.as_deref()).await?;
            play(config, name, record_file, fast, rounds).await
        }
        Commands::Moves { config } => {
            let game = build(load_config(config.as_deref()).await?)?;
            print_moves(game.table(), game.display());
            Ok(())
        }
        Commands::Check { config } => {
            let game = build(load_config(Some(&config)).await?)?;
            println!("{}: ok ({} moves)", config.display(), game.table().len());
            Ok(())
        }
        Commands::Records { record_file, json } => {
            let records = load_records(&record_file).await?;
            if records.is_empty() && !json {
                println!("no results recorded in {}", record_file.display());
            }
            for line in format_records(&records, json)? {
                println!("{line}");
            }
            Ok(())
        }
    }
}

async fn load_records(path: &Path) -> anyhow::Result<Vec<StoredRecord>> {
    JsonLinesReporter::new(path.to_path_buf(), Arc::new(SystemClock))
        .load()
        .await
        .with_context(|| format!("reading {}", path.display()))
}

fn format_records(records: &[StoredRecord], json: bool) -> anyhow::Result<Vec<String>> {
    records
        .iter()
        .map(|r| -> anyhow::Result<String> {
            if json {
                Ok(serde_json::to_string(r)?)
            } else {
                Ok(format!(
                    "{}  {}  {}",
                    r.recorded_at.format("%Y-%m-%d %H:%M:%S"),
                    r.outcome,
                    r.player
                ))
            }
        })
        .collect()
}

async fn load_config(path: Option<&Path>) -> anyhow::Result<GameConfig> {
    match path {
        Some(path) => GameConfig::from_path(path)
            .await
            .with_context(|| format!("loading {}", path.display())),
        None => Ok(GameConfig::standard()),
    }
}

fn build(config: GameConfig) -> anyhow::Result<Game> {
    GameBuilder::new()
        .config(config)
        .build()
        .context("invalid game configuration")
}

async fn play(
    config: GameConfig,
    name: Option<String>,
    record_file: Option<PathBuf>,
    fast: bool,
    rounds: Option<u32>,
) -> anyhow::Result<()> {
    let reporter: Arc<dyn ResultReporter> = match record_file {
        Some(path) => Arc::new(JsonLinesReporter::new(path, Arc::new(SystemClock))),
        None => Arc::new(LogReporter),
    };
    let config = if fast {
        config.with_pacing(PacingConfig::instant())
    } else {
        config
    };
    let pacer: Arc<dyn Pacer> = if fast {
        Arc::new(NoPause)
    } else {
        Arc::new(TokioPacer)
    };
    let (sink, events) = ChannelEventSink::new();
    let game = GameBuilder::new()
        .config(config)
        .reporter(reporter)
        .pacer(pacer)
        .event_sink(Arc::new(sink))
        .build()
        .context("invalid game configuration")?;

    let renderer = tokio::spawn(render(
        events,
        game.display().clone(),
        game.table().moves().to_vec(),
    ));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut session = game.session();
    let mut played = 0u32;

    let name = match name.map(PlayerName::new) {
        Some(Ok(name)) => name,
        Some(Err(e)) => {
            println!("{e}");
            ask_name(&mut lines).await?
        }
        None => ask_name(&mut lines).await?,
    };
    session.start(name.as_str())?;

    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        match input {
            "" => continue,
            "q" | "quit" => break,
            "reset" => {
                session.reset();
                let name = ask_name(&mut lines).await?;
                session.start(name.as_str())?;
                continue;
            }
            _ => {}
        }

        let Some(mv) = parse_move(game.table(), game.display(), input) else {
            println!("Unknown move: {input}");
            continue;
        };
        match session.play(mv).await {
            Ok(summary) => {
                played += 1;
                if rounds.is_some_and(|limit| played >= limit) {
                    break;
                }
                session.start(summary.player.as_str())?;
            }
            Err(GameError::RoundInProgress(state)) => {
                tracing::debug!(?state, "input ignored while round in progress");
            }
            Err(e) => return Err(e.into()),
        }
    }

    let scoreboard = finish(session).await;
    drop(game);
    // the sink lives in the game context; once it is gone the renderer drains and exits
    if let Err(e) = renderer.await {
        tracing::warn!(error = %e, "renderer stopped unexpectedly");
    }
    println!("{scoreboard}");
    Ok(())
}

async fn finish(mut session: Session) -> Scoreboard {
    session.flush_reports().await;
    *session.scoreboard()
}

async fn ask_name(lines: &mut Lines<BufReader<Stdin>>) -> anyhow::Result<PlayerName> {
    loop {
        println!("Enter your name:");
        let Some(line) = lines.next_line().await? else {
            bail!("stdin closed before a name was entered");
        };
        match PlayerName::new(line) {
            Ok(name) => return Ok(name),
            Err(e) => println!("{e}"),
        }
    }
}

/// Accepts a move id or display name (both case-insensitive), or its
/// 1-based position in the list.
fn parse_move(table: &OutcomeTable, display: &DisplayCatalog, input: &str) -> Option<MoveId> {
    if let Ok(n) = input.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| table.get_by_index(i)).cloned();
    }
    let wanted = input.to_lowercase();
    table
        .moves()
        .iter()
        .find(|mv| mv.as_str().to_lowercase() == wanted || display.name(mv).to_lowercase() == wanted)
        .cloned()
}

fn print_moves(table: &OutcomeTable, display: &DisplayCatalog) {
    for (i, mv) in table.moves().iter().enumerate() {
        let beats: Vec<&str> = table
            .beats(mv)
            .map(|set| set.iter().map(|b| display.name(b)).collect())
            .unwrap_or_default();
        println!("{}. {} beats {}", i + 1, display.badge(mv), beats.join(", "));
    }
}

async fn render(mut events: UnboundedReceiver<RoundEvent>, display: DisplayCatalog, moves: Vec<MoveId>) {
    let menu = moves
        .iter()
        .enumerate()
        .map(|(i, mv)| format!("{}) {}", i + 1, display.badge(mv)))
        .collect::<Vec<_>>()
        .join("  ");
    let mut player_move: Option<MoveId> = None;
    let mut opponent_move: Option<MoveId> = None;

    while let Some(event) = events.recv().await {
        match event {
            RoundEvent::Started { player, .. } => {
                player_move = None;
                opponent_move = None;
                println!();
                println!("{player}, choose your move ('q' to quit, 'reset' to change player):");
                println!("{menu}");
            }
            RoundEvent::PlayerChose { player_move: mv, .. } => {
                println!("{}", display.player_choice_message(&mv));
                println!("PC is choosing...");
                player_move = Some(mv);
            }
            RoundEvent::OpponentChose { opponent_move: mv, .. } => {
                println!("{}", display.opponent_choice_message(&mv));
                opponent_move = Some(mv);
            }
            RoundEvent::Resolved { outcome, .. } => {
                if let (Some(p), Some(o)) = (&player_move, &opponent_move) {
                    println!("{}", display.result_message(outcome, p, o));
                }
            }
            RoundEvent::Reported { .. } | RoundEvent::ReportFailed { .. } => {}
        }
    }
}
