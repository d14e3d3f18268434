use clap::Parser;
use tracing::info;
use tts_client::GoogleTtsClient;

use cli::CliArgs;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Before parsing, so `.env` can supply TTS_* defaults
    let _ = dotenv::dotenv();

    let args = CliArgs::parse();
    let client = GoogleTtsClient::from_env()?;
    info!(
        endpoint = %client.config().api_endpoint(),
        voice = %args.voice_selector().name,
        "Text-to-Speech client ready"
    );

    let written = cli::run(&args, &client).await?;
    if let Some(path) = written.audio {
        println!("{}", path.display());
    }
    Ok(())
}
