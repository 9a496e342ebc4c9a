use std::path::Path;

use crate::render;

pub fn run(dir: &Path, seed: Option<u64>, names: &[String]) -> Result<(), String> {
    let names: Vec<&str> = names.iter().flat_map(|n| n.split(',')).collect();
    let mut loaded = super::open(dir, seed)?;
    let order = loaded.session.initiative(&names).map_err(|e| e.to_string())?;
    render::initiative(&order);
    Ok(())
}
