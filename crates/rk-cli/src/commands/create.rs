use std::io::BufRead;
use std::path::Path;

use colored::Colorize;

use rk_dice::DiceSource;
use rk_session::persist::save_character;
use rk_session::{CharacterBuilder, CharacterSheet, MAX_MODIFIER, SessionPaths, Stat};

use super::Prompt;
use crate::render;

/// Blank names accepted before creation gives up.
const NAME_ATTEMPTS: usize = 3;

pub fn run(dir: &Path, seed: Option<u64>) -> Result<(), String> {
    let paths = SessionPaths::in_dir(dir);
    let mut prompt = Prompt::stdin();
    let sheet = create_character(&mut prompt, &mut super::rng(seed))?;
    save(&paths, &sheet)
}

pub fn save(paths: &SessionPaths, sheet: &CharacterSheet) -> Result<(), String> {
    save_character(&paths.character, sheet).map_err(|e| e.to_string())?;
    println!(
        "{}\n",
        format!("Character '{}' created and saved!", sheet.name()).green()
    );
    Ok(())
}

/// Walk the player through naming the character and setting its stats.
pub fn create_character<R: BufRead, D: DiceSource>(
    prompt: &mut Prompt<R>,
    source: &mut D,
) -> Result<CharacterSheet, String> {
    println!("{}", "\n--- Create New Character ---".cyan());
    let mut builder = CharacterBuilder::new();

    let mut attempts = 0;
    loop {
        let name = prompt.ask("Name: ")?.ok_or(INPUT_ENDED)?;
        match builder.name(&name) {
            Ok(()) => break,
            Err(e) => {
                attempts += 1;
                if attempts >= NAME_ATTEMPTS {
                    return Err(e.to_string());
                }
                render::error(e);
            }
        }
    }

    loop {
        let mode = prompt
            .ask("Assign stats manually or roll randomly? (manual/roll): ")?
            .ok_or(INPUT_ENDED)?;
        match mode.to_lowercase().as_str() {
            "roll" => {
                for (stat, value) in builder.roll_stats(source) {
                    println!("{stat}: {value}");
                }
                break;
            }
            "manual" => {
                for stat in Stat::ALL {
                    assign(prompt, &mut builder, stat)?;
                }
                break;
            }
            _ => render::error("Type 'manual' or 'roll'."),
        }
    }

    builder.build().map_err(|e| e.to_string())
}

/// Ask for one stat until the player enters a valid value.
fn assign<R: BufRead>(
    prompt: &mut Prompt<R>,
    builder: &mut CharacterBuilder,
    stat: Stat,
) -> Result<(), String> {
    loop {
        let answer = prompt
            .ask(&format!("{stat} (0-{MAX_MODIFIER}): "))?
            .ok_or(INPUT_ENDED)?;
        match answer.parse::<i64>() {
            Ok(value) => match builder.assign(stat, value) {
                Ok(()) => return Ok(()),
                Err(e) => render::error(e),
            },
            Err(_) => render::error(format!("Invalid. Enter a number 0-{MAX_MODIFIER}.")),
        }
    }
}

const INPUT_ENDED: &str = "input ended before the character was finished";
