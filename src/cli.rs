//! Headless runner: build a board, replay scripted clicks, print what happened.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::info;

use crate::core::{Board, BoardConfig, BoardEvent, ClickOutcome, ShufflePolicy};
use crate::types::TileType;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "tile-blast")]
#[command(about = "Replay clicks on a deterministic tile-blast board")]
pub struct Args {
    /// JSON board config; command-line flags override its fields
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Board edge length
    #[arg(long)]
    pub size: Option<usize>,

    /// Comma-separated tile types, e.g. red,green,blue
    #[arg(long, value_delimiter = ',', value_parser = parse_tile_type)]
    pub palette: Option<Vec<TileType>>,

    /// RNG seed
    #[arg(long)]
    pub seed: Option<u32>,

    /// Click to apply, as ROW,COL (row 0 is the bottom row). Repeatable
    #[arg(long = "click", value_parser = parse_click)]
    pub clicks: Vec<(usize, usize)>,

    /// Reshuffle a deadlocked board up to N times instead of once
    #[arg(long, value_name = "N")]
    pub until_playable: Option<u32>,

    /// Print events and outcomes as JSON lines
    #[arg(long)]
    pub json: bool,
}

pub fn parse_tile_type(s: &str) -> Result<TileType, String> {
    match TileType::from_str(s) {
        Some(TileType::Empty) => Err("empty is not a drawable tile type".to_string()),
        Some(kind) => Ok(kind),
        None => Err(format!("unknown tile type: {s}")),
    }
}

pub fn parse_click(s: &str) -> Result<(usize, usize), String> {
    let (row, col) = s
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL, got {s:?}"))?;
    let row = row
        .trim()
        .parse::<usize>()
        .map_err(|_| format!("invalid row in {s:?}"))?;
    let col = col
        .trim()
        .parse::<usize>()
        .map_err(|_| format!("invalid column in {s:?}"))?;
    Ok((row, col))
}

/// Resolve the effective config: file (or defaults), then flag overrides.
pub fn load_config(args: &Args) -> Result<BoardConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str::<BoardConfig>(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => BoardConfig::default(),
    };

    if let Some(size) = args.size {
        config.size = size;
    }
    if let Some(palette) = &args.palette {
        config.palette = palette.clone();
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(max_attempts) = args.until_playable {
        config.shuffle_policy = ShufflePolicy::UntilPlayable { max_attempts };
    }

    config
        .validate()
        .map_err(|e| anyhow!("invalid board config: {e}"))?;
    Ok(config)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ClickRecord<'a> {
    row: usize,
    col: usize,
    result: &'a ClickOutcome,
    events: &'a [BoardEvent],
}

/// Build the board and replay `args.clicks`, writing a report to `out`.
pub fn run<W: Write>(args: &Args, out: &mut W) -> Result<()> {
    let config = load_config(args)?;
    info!(
        size = config.size,
        seed = config.seed,
        clicks = args.clicks.len(),
        "starting replay"
    );

    let mut board = Board::new(&config);
    if args.json {
        writeln!(out, "{}", serde_json::to_string(&board.snapshot())?)?;
    } else {
        write!(out, "{board}")?;
    }

    for &(row, col) in &args.clicks {
        let outcome = board.click_at(row, col);
        let events = board.take_events();

        if args.json {
            let record = ClickRecord {
                row,
                col,
                result: &outcome,
                events: &events,
            };
            writeln!(out, "{}", serde_json::to_string(&record)?)?;
            continue;
        }

        writeln!(out)?;
        writeln!(out, "click ({row}, {col}): {}", describe(&outcome))?;
        for event in &events {
            writeln!(out, "  {}", event.name())?;
        }
        if outcome.is_resolved() {
            write!(out, "{board}")?;
        }
    }

    if args.json {
        writeln!(out, "{}", serde_json::to_string(&board.snapshot())?)?;
    }
    Ok(())
}

fn describe(outcome: &ClickOutcome) -> String {
    match outcome {
        ClickOutcome::OutOfBounds => "outside the board".to_string(),
        ClickOutcome::EmptyCell => "empty cell".to_string(),
        ClickOutcome::TooSmall => "no matching neighbour".to_string(),
        ClickOutcome::Resolved(r) => format!(
            "removed {} {}, refilled {}, shuffled {}x",
            r.destroyed, r.kind, r.refilled, r.shuffles
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_click_accepts_row_col() {
        assert_eq!(parse_click("3,4"), Ok((3, 4)));
        assert_eq!(parse_click(" 0 , 7 "), Ok((0, 7)));
        assert!(parse_click("3").is_err());
        assert!(parse_click("a,1").is_err());
        assert!(parse_click("1,-2").is_err());
    }

    #[test]
    fn parse_tile_type_rejects_empty() {
        assert_eq!(parse_tile_type("Green"), Ok(TileType::Green));
        assert!(parse_tile_type("empty").is_err());
        assert!(parse_tile_type("mauve").is_err());
    }

    #[test]
    fn args_parse_repeated_clicks_and_palette() {
        let args = Args::try_parse_from([
            "tile-blast",
            "--size",
            "4",
            "--palette",
            "red,blue",
            "--click",
            "0,0",
            "--click",
            "1,2",
            "--json",
        ])
        .unwrap();
        assert_eq!(args.size, Some(4));
        assert_eq!(args.palette, Some(vec![TileType::Red, TileType::Blue]));
        assert_eq!(args.clicks, vec![(0, 0), (1, 2)]);
        assert!(args.json);
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args {
            size: Some(5),
            seed: Some(77),
            until_playable: Some(10),
            ..Args::default()
        };
        let config = load_config(&args).unwrap();
        assert_eq!(config.size, 5);
        assert_eq!(config.seed, 77);
        assert_eq!(
            config.shuffle_policy,
            ShufflePolicy::UntilPlayable { max_attempts: 10 }
        );
    }

    #[test]
    fn invalid_flags_are_reported() {
        let args = Args {
            size: Some(0),
            ..Args::default()
        };
        let err = load_config(&args).unwrap_err();
        assert!(err.to_string().contains("board size"));
    }

    #[test]
    fn missing_config_file_has_context() {
        let args = Args {
            config: Some(PathBuf::from("/definitely/not/here.json")),
            ..Args::default()
        };
        let err = load_config(&args).unwrap_err();
        assert!(err.to_string().contains("reading config"));
    }

    #[test]
    fn text_report_starts_with_board_dump() {
        let args = Args {
            size: Some(3),
            seed: Some(5),
            ..Args::default()
        };
        let mut out = Vec::new();
        run(&args, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let board = Board::new(&load_config(&args).unwrap());
        assert_eq!(text, board.to_string());
    }

    #[test]
    fn json_report_has_one_line_per_click_plus_snapshots() {
        let args = Args {
            size: Some(4),
            seed: Some(3),
            clicks: vec![(0, 0), (9, 9)],
            json: true,
            ..Args::default()
        };
        let mut out = Vec::new();
        run(&args, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);

        let last_click: serde_json::Value = serde_json::from_str(lines[2]).unwrap();
        assert_eq!(last_click["result"]["outcome"], "outOfBounds");
        assert_eq!(last_click["events"], serde_json::json!([]));
    }
}
