use colored::Colorize;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};

use crate::batch::FileReport;
use crate::session::FileOutcome;

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "Error:".red().bold(), msg);
}

/// Status line per file, in processed/skipped color.
pub fn file_line(report: &FileReport) -> String {
    match &report.outcome {
        Some(outcome) if !outcome.hands.is_empty() => {
            let luck = format!("{:+.2}$", outcome.total_luck);
            let luck = if outcome.total_luck >= 0.0 {
                luck.green()
            } else {
                luck.red()
            };
            format!(
                "Processed {}: Luck = {}, Buy-in = {:.2}$ ({} hands, {} skipped)",
                report.name.bold(),
                luck,
                outcome.buy_in,
                outcome.hands.len(),
                outcome.skipped,
            )
        }
        Some(_) => format!(
            "{} {}: no eligible showdowns",
            "Skipping".yellow(),
            report.name
        ),
        None => format!(
            "{} {}: unreadable or degenerate session",
            "Skipping".yellow(),
            report.name
        ),
    }
}

pub fn totals_line(luck: f64, buy_in: f64) -> String {
    let luck_str = format!("{:+.2}$", luck);
    let luck_str = if luck >= 0.0 {
        luck_str.green().bold()
    } else {
        luck_str.red().bold()
    };
    format!("Total Luck: {}, Total Buy-in: {:.2}$", luck_str, buy_in)
}

/// Per-hand breakdown table for a single file.
pub fn hand_table(outcome: &FileOutcome) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("#"),
        Cell::new("Hero"),
        Cell::new("Villain"),
        Cell::new("Board"),
        Cell::new("Pot"),
        Cell::new("Equity"),
        Cell::new("Luck"),
    ]);

    for (i, hand) in outcome.hands.iter().enumerate() {
        let luck = format!("{:+.3}", hand.luck);
        let luck = if hand.luck >= 0.0 {
            luck.green().to_string()
        } else {
            luck.red().to_string()
        };
        table.add_row(vec![
            Cell::new(i + 1).set_alignment(CellAlignment::Right),
            Cell::new(&hand.hero),
            Cell::new(&hand.villain),
            Cell::new(if hand.board.is_empty() {
                "(preflop)"
            } else {
                hand.board.as_str()
            }),
            Cell::new(format!("{:.2}", hand.total_pot)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.1}%", hand.equity * 100.0)).set_alignment(CellAlignment::Right),
            Cell::new(luck).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

pub fn equity_bar(equity: f64, width: usize) -> String {
    let filled = (equity * width as f64) as usize;
    let filled = filled.min(width);
    let bar: String = "\u{2588}".repeat(filled) + &"\u{2591}".repeat(width - filled);
    let pct = format!("{:.1}%", equity * 100.0);

    if equity >= 0.6 {
        format!("{} {}", bar.green(), pct)
    } else if equity >= 0.4 {
        format!("{} {}", bar.yellow(), pct)
    } else {
        format!("{} {}", bar.red(), pct)
    }
}
