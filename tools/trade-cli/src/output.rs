//! Terminal tables and CSV export

use anyhow::{Context, Result};
use colored::*;
use std::path::Path;
use trade_engine::{LeagueUser, ScenarioOutcome, TradeSearchReport};

const CSV_HEADER: [&str; 7] = [
    "Sends",
    "To",
    "Receives",
    "Your Proj. Before",
    "Your Proj. After",
    "Their Proj. Before",
    "Their Proj. After",
];

pub fn print_users(users: &[LeagueUser]) {
    println!("{}", format!("{:<24} {}", "Display Name", "User ID").bold());
    for user in users {
        println!("{:<24} {}", user.display_name, user.user_id.dimmed());
    }
}

fn signed(delta: f64) -> ColoredString {
    let text = format!("{delta:+.2}");
    if delta > 0.0 {
        text.green()
    } else if delta < 0.0 {
        text.red()
    } else {
        text.normal()
    }
}

pub fn print_report(report: &TradeSearchReport) {
    println!(
        "{} {} ({}, weeks {}-{}, groups up to {})",
        "Trades for".bold(),
        report.target_display_name.cyan().bold(),
        report.scoring_variant,
        report.window.first,
        report.window.last,
        report.max_group_size
    );
    println!("Current projection: {:.2} per week", report.target_baseline);
    println!(
        "{}",
        format!(
            "Evaluated {} candidates ({} pruned, {} rejected, {} accepted)",
            report.stats.candidates, report.stats.pruned, report.stats.rejected, report.stats.accepted
        )
        .dimmed()
    );

    if report.is_empty() {
        println!("{}", "No mutually beneficial trades found.".yellow());
        return;
    }

    println!();
    println!(
        "{}",
        format!(
            "{:<36} {:<16} {:<36} {:>9} {:>9} {:>9}",
            "Sends", "To", "Receives", "You", "Gain", "Them"
        )
        .bold()
    );
    for row in &report.rows {
        println!(
            "{:<36} {:<16} {:<36} {:>9.2} {:>9} {:>9}",
            row.sends_label(),
            row.counterparty_name,
            row.receives_label(),
            row.target_after,
            signed(row.gain()),
            signed(row.counterparty_gain())
        );
    }
}

pub fn print_scenario(outcome: &ScenarioOutcome) {
    println!("{} {}", "Trade with".bold(), outcome.counterparty_display_name.cyan().bold());
    println!(
        "  You:  {:.2} -> {:.2} ({})",
        outcome.target_before,
        outcome.target_after,
        signed(outcome.target_change())
    );
    println!(
        "  Them: {:.2} -> {:.2} ({})",
        outcome.counterparty_before,
        outcome.counterparty_after,
        signed(outcome.counterparty_change())
    );
    if !outcome.rosters_complete {
        println!("{}", "Warning: a roster could not fill every position slot after this trade".yellow());
    }
    if outcome.is_beneficial() {
        println!("{}", "Both sides come out ahead or even.".green());
    } else {
        println!("{}", "This trade does not work for both sides.".red());
    }
}

/// Render the report's rows as CSV
pub fn report_csv(report: &TradeSearchReport) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(CSV_HEADER)?;
    for row in &report.rows {
        wtr.write_record([
            &row.sends_label(),
            &row.counterparty_name,
            &row.receives_label(),
            &format!("{:.2}", row.target_before),
            &format!("{:.2}", row.target_after),
            &format!("{:.2}", row.counterparty_before),
            &format!("{:.2}", row.counterparty_after),
        ])?;
    }
    let data = wtr.into_inner().context("Failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

pub fn write_csv(report: &TradeSearchReport, path: &Path) -> Result<()> {
    let csv = report_csv(report)?;
    std::fs::write(path, csv).with_context(|| format!("Failed to write {}", path.display()))
}
