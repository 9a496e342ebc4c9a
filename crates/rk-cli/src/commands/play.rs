//! The interactive menu and command mode.

use std::io::BufRead;
use std::path::Path;

use colored::Colorize;

use rk_session::persist::{load_character, load_session};
use rk_session::{GameData, Session, SessionPaths};

use super::{Loaded, Prompt, create};
use crate::render;

const MENU: &str = "
1. Roll Dice
2. Stat Check
3. Generate Encounter
4. Initiative Tracker
5. Session Summary
6. Command Mode
7. Save & Quit
";

enum Exit {
    Menu,
    Quit,
}

pub fn run(dir: &Path, seed: Option<u64>) -> Result<(), String> {
    let paths = SessionPaths::in_dir(dir);
    let data = GameData::load_or_default(&paths.data).map_err(|e| e.to_string())?;
    let mut prompt = Prompt::stdin();

    let character = match load_character(&paths.character).map_err(|e| e.to_string())? {
        Some(sheet) => {
            println!("{}\n", format!("Loaded character '{}'", sheet.name()).green());
            sheet
        }
        None => {
            println!("{}\n", "No saved character found. Creating one...".yellow());
            let sheet = create::create_character(&mut prompt, &mut super::rng(seed))?;
            create::save(&paths, &sheet)?;
            sheet
        }
    };

    let mut session = Session::new(character, data, &super::config(seed));
    if let Some(saved) = load_session(&paths.history).map_err(|e| e.to_string())? {
        session.restore(saved);
        println!("{}\n", "Previous session loaded.".green());
    }

    let mut loaded = Loaded { session, paths };
    main_menu(&mut loaded.session, &mut prompt)?;
    loaded.save()?;
    println!("{}", "Session saved. Goodbye adventurer!".magenta());
    Ok(())
}

fn main_menu<R: BufRead>(session: &mut Session, prompt: &mut Prompt<R>) -> Result<(), String> {
    loop {
        println!("{}", "=== Rollkeeper ===".cyan().bold());
        println!("{}", MENU.cyan());
        let Some(choice) = prompt.ask("Choose: ")? else {
            return Ok(());
        };

        match choice.as_str() {
            "1" => {
                let Some(notation) = prompt.ask("Dice (e.g. 2d6+3 adv): ")? else {
                    return Ok(());
                };
                match session.roll(&notation) {
                    Ok(result) => render::roll(&result, session.flavor(&result)),
                    Err(e) => render::error(format!("{e}. Example: 2d6+3 adv")),
                }
            }
            "2" => {
                let Some(stat) = prompt.ask("Stat (STR, DEX, CON, INT, WIS, CHA): ")? else {
                    return Ok(());
                };
                match session.check(&stat) {
                    Ok(result) => render::check(&stat, &result, session.flavor(&result)),
                    Err(e) => render::error(e),
                }
            }
            "3" => {
                render::locations(session.data().encounters.locations());
                let Some(location) = prompt.ask("Location: ")? else {
                    return Ok(());
                };
                println!("{}", "Difficulty: easy / normal / hard".cyan());
                let Some(difficulty) = prompt.ask("Difficulty: ")? else {
                    return Ok(());
                };
                match session.encounter(&location, &difficulty) {
                    Ok(outcome) => render::encounter(&outcome),
                    Err(e) => render::error(e),
                }
            }
            "4" => {
                let Some(names) = prompt.ask("Participants (comma separated): ")? else {
                    return Ok(());
                };
                let names: Vec<&str> = names.split(',').collect();
                match session.initiative(&names) {
                    Ok(order) => render::initiative(&order),
                    Err(e) => render::error(e),
                }
            }
            "5" => render::summary(&session.summary()),
            "6" => {
                if let Exit::Quit = command_mode(session, prompt)? {
                    return Ok(());
                }
            }
            "7" => return Ok(()),
            _ => render::error("Invalid choice."),
        }
        println!();
    }
}

fn command_mode<R: BufRead>(session: &mut Session, prompt: &mut Prompt<R>) -> Result<Exit, String> {
    println!(
        "{}",
        "\nCommand Mode ('help' for options, 'menu' to return, 'quit' to save and exit)\n".cyan()
    );
    loop {
        let Some(line) = prompt.ask("> ")? else {
            return Ok(Exit::Quit);
        };
        match line.to_lowercase().as_str() {
            "menu" => return Ok(Exit::Menu),
            "q" | "quit" | "exit" => return Ok(Exit::Quit),
            _ => {}
        }
        match session.process(&line) {
            Ok(output) if output.is_empty() => {}
            Ok(output) => println!("{output}\n"),
            Err(e) => render::error(e),
        }
    }
}
