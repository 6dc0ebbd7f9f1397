use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "ratekit-cli", version, about = "Ratekit CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Usage event recording
    Event {
        #[command(subcommand)]
        action: commands::event::EventAction,
    },
    /// Print the current prompt decision
    Evaluate,
    /// Run the full review-request flow
    Request,
    /// Record a sentiment gate response
    Respond {
        #[command(subcommand)]
        action: commands::respond::RespondAction,
    },
    /// Persisted usage statistics
    Stats,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Clear all persisted rating state
    Reset,
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Event { action } => commands::event::run(action),
        Commands::Evaluate => commands::engine::evaluate(),
        Commands::Request => commands::engine::request(),
        Commands::Respond { action } => commands::respond::run(action),
        Commands::Stats => commands::engine::stats(),
        Commands::Config { action } => commands::config::run(action),
        Commands::Reset => commands::engine::reset(),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
