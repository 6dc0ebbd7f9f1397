use clap::Subcommand;
use ratekit_core::{LinkOpener, NoopOpener, SentimentResponse, SystemOpener};

use super::open_engine;

#[derive(Subcommand)]
pub enum RespondAction {
    /// Record a positive answer
    Positive,
    /// Record a negative answer
    Negative {
        /// Skip opening the configured feedback URL
        #[arg(long)]
        no_open: bool,
    },
    /// Gate was closed without an answer
    Dismissed,
}

pub fn run(action: RespondAction) -> Result<(), Box<dyn std::error::Error>> {
    let engine = open_engine()?;

    match action {
        RespondAction::Positive => {
            engine.on_sentiment_response(SentimentResponse::Positive, &NoopOpener);
        }
        RespondAction::Negative { no_open } => {
            let opener: &dyn LinkOpener = if no_open { &NoopOpener } else { &SystemOpener };
            engine.on_sentiment_response(SentimentResponse::Negative, opener);
        }
        RespondAction::Dismissed => {
            engine.on_sentiment_response(SentimentResponse::Dismissed, &NoopOpener);
        }
    }

    println!("{}", serde_json::to_string_pretty(&engine.evaluate())?);
    Ok(())
}
