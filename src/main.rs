use anyhow::Result;
use letter_boxed::{config::Config, terminal};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize tracing on stderr so it stays out of the board on stdout
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "letter_boxed=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting Letter Boxed...");

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!(
        "Configuration loaded: {} sides of {} letters, words from {}",
        config.board.size.sides(),
        config.board.size.letters_per_side(),
        config.dictionary.source
    );

    terminal::run(config).await
}
