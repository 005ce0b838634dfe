use anyhow::Result;
use clap::Parser;
use checkout_login_cli::{
    cli::{Args, CliApp},
    utils::Config,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Logging follows the config, so load errors surface through main's return.
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(
            config.log_filter(args.verbose),
        ))
        .init();

    tracing::info!("🦀 Checkout/login demo starting...");
    tracing::info!(
        "Configuration loaded for {} environment",
        config.environment
    );

    let app = CliApp::new(config)?;
    app.run(args).await?;

    tracing::info!("🦀 Checkout/login demo stopped");
    Ok(())
}
