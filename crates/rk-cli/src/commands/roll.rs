use std::path::Path;

use crate::render;

pub fn run(dir: &Path, seed: Option<u64>, notation: &str) -> Result<(), String> {
    let mut loaded = super::open(dir, seed)?;
    let result = loaded.session.roll(notation).map_err(|e| e.to_string())?;
    render::roll(&result, loaded.session.flavor(&result));
    loaded.save()
}
