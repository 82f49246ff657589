use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::batch::{analyze_file, analyze_folder};
use crate::cards::{parse_board, parse_hole};
use crate::display::{equity_bar, file_line, hand_table, print_error, totals_line};
use crate::equity::{estimate_equity_with, DEFAULT_MAX_SAMPLES};
use crate::hand_evaluator::RankedEval;

#[derive(Parser)]
#[command(
    name = "luck",
    version,
    about = "Showdown luck analyzer — how far your tournament results ran from all-in equity."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze every .txt hand-history file in a folder
    Analyze {
        /// Folder containing hand-history .txt files
        folder: PathBuf,
        /// Evaluation bound per showdown
        #[arg(short = 'n', long, default_value_t = DEFAULT_MAX_SAMPLES)]
        samples: usize,
        /// Seed for reproducible sampled equity
        #[arg(long)]
        seed: Option<u64>,
        /// Emit the full report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Analyze a single hand-history file with a per-hand breakdown
    File {
        /// Hand-history .txt file
        path: PathBuf,
        /// Evaluation bound per showdown
        #[arg(short = 'n', long, default_value_t = DEFAULT_MAX_SAMPLES)]
        samples: usize,
        /// Seed for reproducible sampled equity
        #[arg(long)]
        seed: Option<u64>,
        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Equity between two known hands on a partial board
    Equity {
        /// Hero's hole cards (e.g. AhAs)
        hero: String,
        /// Villain's hole cards (e.g. KsKd)
        villain: String,
        /// Board cards (e.g. 2s5d8c)
        #[arg(short, long)]
        board: Option<String>,
        /// Evaluation bound
        #[arg(short = 'n', long, default_value_t = DEFAULT_MAX_SAMPLES)]
        samples: usize,
        /// Seed for reproducible sampled equity
        #[arg(long)]
        seed: Option<u64>,
    },
}

pub fn run() {
    let cli = Cli::parse();
    dispatch(cli);
}

pub fn run_with_args(args: Vec<String>) {
    let cli = Cli::parse_from(args);
    dispatch(cli);
}

fn dispatch(cli: Cli) {
    match cli.command {
        Commands::Analyze {
            folder,
            samples,
            seed,
            json,
        } => cmd_analyze(folder, samples, seed, json),
        Commands::File {
            path,
            samples,
            seed,
            json,
        } => cmd_file(path, samples, seed, json),
        Commands::Equity {
            hero,
            villain,
            board,
            samples,
            seed,
        } => cmd_equity(hero, villain, board, samples, seed),
    }
}

fn cmd_analyze(folder: PathBuf, samples: usize, seed: Option<u64>, json: bool) {
    let summary = match analyze_folder(&folder, samples, seed) {
        Ok(summary) => summary,
        Err(e) => {
            print_error(&format!("{}: {}", folder.display(), e));
            return;
        }
    };

    if json {
        match serde_json::to_string_pretty(&summary) {
            Ok(out) => println!("{}", out),
            Err(e) => print_error(&e.to_string()),
        }
        return;
    }

    for file in &summary.files {
        println!("{}", file_line(file));
    }
    println!();
    println!("{}", totals_line(summary.totals.luck, summary.totals.buy_in));
}

fn cmd_file(path: PathBuf, samples: usize, seed: Option<u64>, json: bool) {
    let report = analyze_file(&path, samples, seed);

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(out) => println!("{}", out),
            Err(e) => print_error(&e.to_string()),
        }
        return;
    }

    println!("{}", file_line(&report));
    if let Some(outcome) = &report.outcome {
        if !outcome.hands.is_empty() {
            println!();
            println!("{}", hand_table(outcome));
        }
    }
}

fn cmd_equity(
    hero: String,
    villain: String,
    board: Option<String>,
    samples: usize,
    seed: Option<u64>,
) {
    let hero_hole = match parse_hole(&hero) {
        Ok(h) => h,
        Err(e) => return print_error(&e.to_string()),
    };
    let villain_hole = match parse_hole(&villain) {
        Ok(h) => h,
        Err(e) => return print_error(&e.to_string()),
    };
    let board_cards = match board.as_deref().map(parse_board).transpose() {
        Ok(b) => b.unwrap_or_default(),
        Err(e) => return print_error(&e.to_string()),
    };

    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };

    match estimate_equity_with(
        &RankedEval,
        hero_hole,
        villain_hole,
        &board_cards,
        samples,
        &mut rng,
    ) {
        Ok(dist) => {
            println!("{} {}", "Hero:".bold(), hero);
            println!("{} {}", "Villain:".bold(), villain);
            if let Some(b) = &board {
                println!("{} {}", "Board:".bold(), b);
            }
            println!();
            println!("{}", dist);
            println!("{}", equity_bar(dist.equity(), 30));
        }
        Err(e) => print_error(&e.to_string()),
    }
}
