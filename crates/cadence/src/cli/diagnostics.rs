//! Offline helpers that never touch the upstream API.

use cadence::{CadenceConfig, extract_skills};
use std::path::Path;
use tracing::{debug, instrument};

/// Print one matched skill per line.
#[instrument]
pub fn print_skills(file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(file)?;
    let skills = extract_skills(&text);
    debug!(count = skills.len(), "Matched skills");

    for skill in skills {
        println!("{}", skill);
    }
    Ok(())
}

/// Print the backoff the worker would apply to `message`, in milliseconds.
#[instrument]
pub fn print_backoff(message: &str) -> Result<(), Box<dyn std::error::Error>> {
    let policy = CadenceConfig::load()?.worker.backoff();
    let delay = policy.delay_for(message);
    println!("{} ms", delay.as_millis());
    Ok(())
}
