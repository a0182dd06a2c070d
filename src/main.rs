use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use livingmap::{
    resolve::effective_tier,
    scenario::ScenarioLoader,
    session::MapSession,
    store,
    web::{self, WebServerConfig},
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Living Map scenario-diff server")]
struct Cli {
    /// Path to the settlement dataset (YAML or JSON)
    #[arg(long, default_value = "data/settlements.yaml")]
    settlements: PathBuf,

    /// Directory containing scenario files
    #[arg(long, default_value = "data/scenarios")]
    scenarios: PathBuf,

    /// Scenario key to select at startup (baseline when omitted)
    #[arg(long)]
    scenario: Option<String>,

    /// Address to bind the web UI on
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    #[arg(long, default_value_t = 8080)]
    port: u16,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the settlements whose tier changes under a scenario
    Diff {
        /// Scenario key to compare against the baseline
        key: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settlements = store::load_settlements(&cli.settlements)?;
    let scenarios = ScenarioLoader::new(&cli.scenarios).load_all()?;
    let mut session = MapSession::new(settlements, scenarios);
    if let Some(key) = &cli.scenario {
        session.select(key)?;
    }

    match cli.command {
        Some(Command::Diff { key }) => print_diff(&mut session, &key),
        None => {
            web::run(WebServerConfig {
                session,
                host: cli.host,
                port: cli.port,
            })
            .await
        }
    }
}

fn print_diff(session: &mut MapSession, key: &str) -> Result<()> {
    session.select(key)?;
    let scenario = session.active_scenario();
    let frame = session.frame();
    for settlement in session.settlements() {
        if frame.changed.contains(&settlement.id) {
            println!(
                "{:<16} {:<12} {} -> {}",
                settlement.id.as_str(),
                settlement.name,
                settlement.tier,
                effective_tier(settlement, scenario)
            );
        }
    }
    println!(
        "Scenario '{}' changes {} of {} settlements.",
        key,
        frame.changed.len(),
        session.settlements().len()
    );
    Ok(())
}
