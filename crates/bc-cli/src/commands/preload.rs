use std::time::Instant;

use anyhow::Result;
use bc_engine::Redactor;

pub fn handle() -> Result<()> {
    let redactor = Redactor::default();
    let started = Instant::now();
    redactor.preload()?;

    println!("✓ Recognizer ready: {}", redactor.recognizer_id());
    println!("  Load time: {} ms", started.elapsed().as_millis());

    Ok(())
}
