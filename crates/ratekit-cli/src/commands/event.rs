use clap::Subcommand;

use super::open_engine;

#[derive(Subcommand)]
pub enum EventAction {
    /// Record an app session start
    Session,
    /// Record a completed success flow
    Success,
}

pub fn run(action: EventAction) -> Result<(), Box<dyn std::error::Error>> {
    let engine = open_engine()?;

    match action {
        EventAction::Session => {
            engine.record_session_event();
        }
        EventAction::Success => {
            engine.record_success_event();
        }
    }

    println!("{}", serde_json::to_string_pretty(&engine.statistics())?);
    Ok(())
}
