use ratekit_core::{Decision, NoopPrompter};

use super::open_engine;

pub fn evaluate() -> Result<(), Box<dyn std::error::Error>> {
    let engine = open_engine()?;
    println!("{}", serde_json::to_string_pretty(&engine.evaluate())?);
    Ok(())
}

/// Full flow: evaluate and, when a store review is due, start the
/// cooldown. The native prompt itself is the host platform's job, so
/// the dispatch here is the no-op stand-in.
pub fn request() -> Result<(), Box<dyn std::error::Error>> {
    let engine = open_engine()?;
    let decision = engine.request_review(&NoopPrompter);
    println!("{}", serde_json::to_string_pretty(&decision)?);
    if decision == Decision::ShowSentimentGate {
        eprintln!(
            "present the gate, then record the answer with `ratekit-cli respond`"
        );
    }
    Ok(())
}

pub fn stats() -> Result<(), Box<dyn std::error::Error>> {
    let engine = open_engine()?;
    println!("{}", serde_json::to_string_pretty(&engine.statistics())?);
    Ok(())
}

pub fn reset() -> Result<(), Box<dyn std::error::Error>> {
    let engine = open_engine()?;
    engine.reset();
    println!("rating state cleared");
    Ok(())
}
