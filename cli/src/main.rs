use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use nanikiru::{Analyzer, DiscardCandidate, MemoCache, ShantenBackend, TenpaiCheck};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "nanikiru", about = "Shanten, effective tiles and discard ranking for riichi hands")]
struct Args {
    /// Evaluate with the exhaustive decomposition search instead of the
    /// suit-wise evaluator.
    #[arg(long)]
    exhaustive: bool,
    /// Emit machine-readable JSON instead of the table view.
    #[arg(long)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Pick the single best discard from a 14-tile hand.
    Recommend { hand: String },
    /// Rank every discard candidate of a 14-tile hand.
    Analyze { hand: String },
    /// Check whether a 13-tile hand is tenpai and list its winning tiles.
    Tenpai { hand: String },
}

fn candidate_line(candidate: &DiscardCandidate) -> String {
    format!(
        "{:<3} shanten {:>2}  ukeire {:>3}  {}",
        candidate.tile.to_string(),
        candidate.shanten,
        candidate.num_required_tiles,
        candidate
            .required_tiles
            .iter()
            .map(|r| format!("{}[{}]", r.tile, r.count))
            .collect::<Vec<_>>()
            .join(" "),
    )
}

fn tenpai_line(check: &TenpaiCheck) -> String {
    if check.is_tenpai {
        format!(
            "tenpai, waiting on {}",
            check
                .winning_tiles
                .iter()
                .map(|r| format!("{}[{}]", r.tile, r.count))
                .collect::<Vec<_>>()
                .join(" "),
        )
    } else {
        format!("not tenpai ({} shanten)", check.shanten)
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let backend = if args.exhaustive {
        ShantenBackend::Exhaustive
    } else {
        ShantenBackend::SuitWise
    };
    let analyzer = Analyzer::new(backend, Arc::new(MemoCache::default()));
    log::debug!("evaluating with the {backend:?} backend");

    match &args.command {
        Command::Recommend { hand } => {
            let best = analyzer
                .recommend_discard(hand)
                .with_context(|| format!("cannot analyze {hand:?}"))?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&best)?);
            } else {
                println!("{}", candidate_line(&best));
            }
        }
        Command::Analyze { hand } => {
            let ranked = analyzer
                .analyze_discards(hand)
                .with_context(|| format!("cannot analyze {hand:?}"))?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&ranked)?);
            } else {
                for candidate in &ranked {
                    println!("{}", candidate_line(candidate));
                }
            }
        }
        Command::Tenpai { hand } => {
            let check = analyzer
                .check_tenpai(hand)
                .with_context(|| format!("cannot analyze {hand:?}"))?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&check)?);
            } else {
                println!("{}", tenpai_line(&check));
            }
        }
    }
    Ok(())
}
