use std::path::Path;

use crate::render;

pub fn run(dir: &Path, seed: Option<u64>, location: &str, difficulty: &str) -> Result<(), String> {
    let mut loaded = super::open(dir, seed)?;
    let outcome = loaded
        .session
        .encounter(location, difficulty)
        .map_err(|e| e.to_string())?;
    render::encounter(&outcome);
    loaded.save()
}
