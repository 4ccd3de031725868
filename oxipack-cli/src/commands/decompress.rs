//! Decompress command implementation.

use oxipack::{Method, Pipeline};
use std::fs;
use std::path::Path;

pub fn cmd_decompress(
    artifact: &Path,
    method: Method,
    output: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read(artifact)?;
    let restored = Pipeline::default().decompress(method, &data)?;
    fs::write(output, &restored)?;

    println!(
        "{} -> {} ({} bytes)",
        artifact.display(),
        output.display(),
        restored.len()
    );
    Ok(())
}
