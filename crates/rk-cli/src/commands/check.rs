use std::path::Path;

use crate::render;

pub fn run(dir: &Path, seed: Option<u64>, stat: &str) -> Result<(), String> {
    let mut loaded = super::open(dir, seed)?;
    let result = loaded.session.check(stat).map_err(|e| e.to_string())?;
    render::check(stat, &result, loaded.session.flavor(&result));
    loaded.save()
}
