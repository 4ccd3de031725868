//! Interactive menu.

use super::compress::run_method;
use crate::CodecArgs;
use crate::utils::read_input;
use dialoguer::Select;
use log::debug;
use oxipack::{Method, Pipeline};
use std::path::Path;

pub fn cmd_menu(input: &Path, codec: &CodecArgs) -> Result<(), Box<dyn std::error::Error>> {
    let data = read_input(input)?;
    let pipeline = Pipeline::new(codec.pipeline_options())?;

    let items: Vec<String> = Method::ALL
        .iter()
        .map(|m| format!("{} - {}", m.menu_choice(), m.label()))
        .collect();

    loop {
        let index = Select::new()
            .with_prompt("Choose a compression method")
            .items(&items)
            .default(0)
            .interact()?;
        let method = Method::ALL[index];
        debug!("menu selection: {}", method.tag());

        match run_method(&pipeline, method, input, &data, codec) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => eprintln!("Error: {}", e),
        }
    }

    println!("Done.");
    Ok(())
}
