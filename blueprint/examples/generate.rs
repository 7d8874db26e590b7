//! Generate an agent configuration for a goal given on the command line.
//!
//! ```text
//! API_KEY=... cargo run --example generate -- "Monitor social media for brand mentions"
//! ```
//!
//! Progress is printed as the phases advance; the six sections are printed
//! once the configuration is revealed. Set `RUST_LOG=blueprint=debug` to see
//! the provider call.

use anyhow::Context;
use blueprint::layers::{LoggingLayer, TimeoutLayer};
use blueprint::provider::GeminiProvider;
use blueprint::{
    AgentDesigner, Config, ConfigurationSection, GenerationError, GenerationSession, Progress,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let goal = std::env::args().skip(1).collect::<Vec<_>>().join(" ");

    let config = Config::from_env().context("reading configuration from the environment")?;
    let provider = GeminiProvider::from_config(&config)?;

    let designer = AgentDesigner::builder(provider)
        .layer(TimeoutLayer::new(config.timeout()))
        .layer(LoggingLayer::new())
        .config(&config)
        .finish();

    let session = GenerationSession::new(designer);
    let phases = session.tracker().phases().to_vec();

    let mut progress = session.subscribe();
    let printer = tokio::spawn(async move {
        while progress.changed().await.is_ok() {
            let current = *progress.borrow_and_update();
            match current {
                Progress::Step { index, substep } => {
                    let phase = &phases[index];
                    println!(
                        "[{}/{}] {} - {}",
                        index + 1,
                        phases.len(),
                        phase.name,
                        phase.substeps.get(substep).copied().unwrap_or_default()
                    );
                }
                Progress::Done | Progress::Failed => break,
                Progress::Idle => {}
            }
        }
    });

    let result = session.generate(&goal).await;
    match &result {
        // Progress was never touched, so the printer has nothing left to see.
        Err(GenerationError::InvalidGoal | GenerationError::Busy) => printer.abort(),
        _ => printer.await?,
    }

    let agent = match result {
        Ok(agent) => agent,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    };

    println!("\nAgent {}\n", agent.agent_creation_id);
    for section in ConfigurationSection::ALL {
        println!("== {} ==", section);
        println!("{}\n", section.render(&agent)?);
    }

    Ok(())
}
