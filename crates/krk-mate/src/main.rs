//! krk-mate - forced-mate finder for the king and rook versus king endgame.
//!
//! Lists legal moves, searches for the best move, plays a full mate hunt
//! with a board printed after every ply, or runs perft on a FEN position.

mod config;

use anyhow::Context;
use clap::{Parser, Subcommand};
use config::MateConfig;
use krk_engine::{find_best_move, perft, perft_divide, GameState, MateHunt, Position};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Position the hunt starts from when no FEN is given.
const DEFAULT_FEN: &str = "8/8/8/k7/8/KR6/8/8 w - - 0 1";

#[derive(Parser)]
#[command(name = "krk-mate")]
#[command(about = "Forced-mate search for the king and rook versus king endgame")]
struct Cli {
    /// Path to a TOML config file (defaults to krk.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the board, its status and its legal moves
    Moves {
        /// Position in FEN
        fen: String,
    },
    /// Search a position and print the best move
    Best {
        /// Position in FEN
        fen: String,
        /// Search depth in plies
        #[arg(short, long)]
        depth: Option<u32>,
    },
    /// Play best moves until checkmate, stalemate or the ply cap
    Hunt {
        /// Position in FEN
        #[arg(default_value = DEFAULT_FEN)]
        fen: String,
        /// Search depth in plies
        #[arg(short, long)]
        depth: Option<u32>,
        /// Maximum number of plies to play
        #[arg(short, long)]
        max_plies: Option<u32>,
        /// Only print the moves, not a board per ply
        #[arg(short, long)]
        quiet: bool,
    },
    /// Count leaf nodes of the legal move tree
    Perft {
        /// Position in FEN
        fen: String,
        /// Depth in plies
        depth: u32,
        /// Print the count below each root move
        #[arg(long)]
        divide: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = MateConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Moves { fen } => {
            let position = parse_position(&fen)?;
            println!("{}\n", position);
            println!("status: {}", status_text(position.game_state()));
            let moves = position.legal_moves().to_uci();
            println!("{} legal moves: {}", moves.len(), moves.join(" "));
        }

        Commands::Best { fen, depth } => {
            let mut position = parse_position(&fen)?;
            let depth = depth.unwrap_or(config.hunt.depth);
            let start = Instant::now();
            let result = find_best_move(&mut position, depth);

            println!("{}\n", position);
            match result.best_move {
                Some(mv) => println!(
                    "best move: {} (score {}, depth {}, {:.2?})",
                    mv,
                    result.score,
                    depth,
                    start.elapsed()
                ),
                None => println!(
                    "no move to play: {}",
                    status_text(position.game_state())
                ),
            }
        }

        Commands::Hunt {
            fen,
            depth,
            max_plies,
            quiet,
        } => {
            let mut position = parse_position(&fen)?;
            let hunt_config = config.hunt_with(depth, max_plies);
            tracing::info!(
                "Hunting from {} at depth {} for up to {} plies",
                position.to_fen(),
                hunt_config.depth,
                hunt_config.max_plies
            );

            if !quiet {
                println!("{}\n", position);
            }
            let start = Instant::now();
            let mut hunt = MateHunt::new(hunt_config);
            let report = hunt.run_with(&mut position, |record, pos| {
                println!("{}. {} (score {})", record.ply, record.mv, record.score);
                if !quiet {
                    println!("{}\n", pos);
                }
            });

            println!(
                "{} after {} plies, {} nodes in {:.2?}",
                report.outcome,
                report.plies,
                report.stats.nodes,
                start.elapsed()
            );
            println!("final position: {}", position.to_fen());
        }

        Commands::Perft { fen, depth, divide } => {
            let mut position = parse_position(&fen)?;
            let start = Instant::now();
            let nodes = if divide {
                let counts = perft_divide(&mut position, depth);
                for (mv, count) in &counts {
                    println!("{}: {}", mv, count);
                }
                counts.iter().map(|(_, count)| count).sum()
            } else {
                perft(&mut position, depth)
            };
            println!("perft({}) = {} in {:.2?}", depth, nodes, start.elapsed());
        }
    }

    Ok(())
}

fn parse_position(fen: &str) -> anyhow::Result<Position> {
    Position::from_fen(fen).with_context(|| format!("invalid position '{}'", fen))
}

fn status_text(state: GameState) -> &'static str {
    match state {
        GameState::Ongoing => "ongoing",
        GameState::Checkmate => "checkmate",
        GameState::Stalemate => "stalemate",
        GameState::RookCaptured => "rook captured, draw",
    }
}
