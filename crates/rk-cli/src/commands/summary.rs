use std::path::Path;

use crate::render;

pub fn run(dir: &Path, seed: Option<u64>) -> Result<(), String> {
    let loaded = super::open(dir, seed)?;
    render::summary(&loaded.session.summary());
    Ok(())
}
