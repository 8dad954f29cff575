use clap::Parser;
use farewatch::cli::{self, output, Cli};
use farewatch::infrastructure::config::settings::Config;
use tracing::error;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let mut config = match Config::load(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            output::error(&format!("Failed to load config: {e}"));
            std::process::exit(1);
        }
    };
    cli::apply_overrides(&cli, &mut config);
    config.init_logging();

    if let Err(e) = cli::execute(&cli, &config).await {
        error!(error = %e, "Fatal error");
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
