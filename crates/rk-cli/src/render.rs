//! Colored terminal output for session results.

use colored::{ColoredString, Colorize};
use comfy_table::{ContentArrangement, Table};

use rk_dice::{Critical, InitiativeEntry, RollResult};
use rk_session::{Difficulty, EncounterOutcome, SessionSummary};

pub fn roll(result: &RollResult, flavor: Option<&str>) {
    println!(
        "{} {}",
        format!(
            "Rolls: {:?} | Mod: {:+} | Total:",
            result.rolls,
            result.request.modifier()
        )
        .cyan(),
        result.total.to_string().green().bold()
    );
    match result.critical() {
        Some(Critical::Hit) => println!(
            "{} {}",
            "Critical hit!".yellow().bold(),
            flavor.unwrap_or_default().yellow()
        ),
        Some(Critical::Fail) => println!(
            "{} {}",
            "Critical fail!".red().bold(),
            flavor.unwrap_or_default().red()
        ),
        None => {}
    }
}

pub fn check(stat: &str, result: &RollResult, flavor: Option<&str>) {
    println!(
        "{}",
        format!(
            "Rolling {} check ({:+})",
            stat.trim().to_uppercase(),
            result.request.modifier()
        )
        .magenta()
    );
    roll(result, flavor);
}

pub fn locations<'a>(names: impl Iterator<Item = &'a str>) {
    let names: Vec<&str> = names.collect();
    println!("{} {}", "Locations:".cyan(), names.join(", "));
}

pub fn encounter(outcome: &EncounterOutcome) {
    let title = tier(
        outcome.difficulty,
        &format!("Encounter! {} ({})", outcome.encounter, outcome.difficulty),
    );
    println!("{}", title.bold());
    if outcome.was_adjusted() {
        println!(
            "  {}",
            format!(
                "Your luck turned a {} encounter into a {} one.",
                outcome.requested, outcome.difficulty
            )
            .dimmed()
        );
    }
    let verdict = if outcome.success {
        "Success".green()
    } else {
        "Fail".red()
    };
    match outcome.roll {
        Some(roll) => println!("{} {roll} | {} {verdict}", "Roll:".cyan(), "Outcome:".cyan()),
        None => println!("{} {verdict}", "Outcome:".cyan()),
    }
}

fn tier(difficulty: Difficulty, text: &str) -> ColoredString {
    match difficulty {
        Difficulty::Easy => text.green(),
        Difficulty::Normal => text.yellow(),
        Difficulty::Hard => text.red(),
    }
}

pub fn initiative(order: &[InitiativeEntry]) {
    println!("{}", "--- Initiative Order ---".yellow().bold());

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Name", "Roll"]);
    for (i, entry) in order.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            entry.name.clone(),
            entry.roll.to_string(),
        ]);
    }
    println!("{table}");
}

pub fn summary(summary: &SessionSummary) {
    println!("{}", "--- SESSION SUMMARY ---".yellow().bold());
    println!("{summary}");
    println!("{}", "-".repeat(30));
}

pub fn error(message: impl std::fmt::Display) {
    println!("{}\n", message.to_string().red());
}
