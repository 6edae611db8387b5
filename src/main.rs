use anyhow::Result;
use clap::Parser;
use memory_match_game::{Config, GameInterface, VERSION};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "memory-match")]
#[command(about = "A terminal memory matching card game")]
#[command(version = VERSION)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<String>,

    /// Shuffle seed for a reproducible deal (starts a game immediately)
    #[arg(short, long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(format!("memory_match_game={},warn", log_level))
        .init();

    info!("Starting Memory Match v{}", VERSION);

    // Load configuration
    let config = match cli.config {
        Some(config_path) => Config::from_file(&config_path)?,
        None => Config::default(),
    };

    // Create and start the game interface
    let mut game_interface = GameInterface::new(config).await?;

    if let Some(seed) = cli.seed {
        info!("Dealing seeded game: {}", seed);
        game_interface.start_new_game(Some(seed)).await?;
    }

    // Start the menu loop
    if let Err(e) = game_interface.run().await {
        error!("Game error: {}", e);
        eprintln!("An error occurred: {}", e);
        std::process::exit(1);
    }

    info!("Game session ended");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from(["memory-match", "--debug"]).unwrap();
        assert!(cli.debug);
        assert!(cli.seed.is_none());
    }

    #[test]
    fn test_cli_seed() {
        let cli = Cli::try_parse_from(["memory-match", "--seed", "42"]).unwrap();
        assert_eq!(cli.seed, Some(42));
    }
}
