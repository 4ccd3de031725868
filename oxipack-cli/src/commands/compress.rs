//! Compress command implementation.

use crate::CodecArgs;
use crate::utils::{ReportJson, create_spinner, print_report, read_input, report_from_files};
use log::info;
use oxipack::{Method, Outcome, Pipeline};
use std::fs;
use std::path::Path;

pub fn cmd_compress(
    input: &Path,
    method: Method,
    codec: &CodecArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let data = read_input(input)?;
    let pipeline = Pipeline::new(codec.pipeline_options())?;

    if !run_method(&pipeline, method, input, &data, codec)? {
        println!("Nothing to do.");
    }
    Ok(())
}

/// Run one method over `data`, write both artifacts and print the report.
///
/// Returns `false` when [`Method::Exit`] was selected.
pub fn run_method(
    pipeline: &Pipeline,
    method: Method,
    input: &Path,
    data: &[u8],
    codec: &CodecArgs,
) -> Result<bool, Box<dyn std::error::Error>> {
    let spinner = create_spinner(data.len(), !codec.json);
    spinner.set_message(format!("Compressing with {}", method));
    let outcome = pipeline.compress(method, data);
    spinner.finish_and_clear();

    let artifacts = match outcome? {
        Outcome::Completed(artifacts) => artifacts,
        Outcome::Exit => return Ok(false),
    };

    fs::write(&codec.output, &artifacts.compressed)?;
    fs::write(&codec.decompressed, &artifacts.decompressed)?;
    info!(
        "wrote {} and {}",
        codec.output.display(),
        codec.decompressed.display()
    );

    let report = report_from_files(input, &codec.output)?;
    if codec.json {
        let json = ReportJson::new(
            input,
            method,
            &codec.output,
            &codec.decompressed,
            &report,
            artifacts.decompressed == data,
        );
        println!("{}", serde_json::to_string_pretty(&json)?);
    } else {
        print_report(method, &report);
    }

    Ok(true)
}
