//! pdf-anchor command line

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pdf_anchor::AnchorConfig;

#[tokio::main]
async fn main() {
    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pdf_anchor=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    dotenvy::dotenv().ok();

    let config = AnchorConfig::from_env();
    tracing::debug!(
        subtype = %config.default_subtype,
        line_tolerance = config.line_tolerance,
        gap_tolerance = config.gap_tolerance,
        "Loaded configuration"
    );

    if let Err(error) = pdf_anchor::cli::run(std::env::args_os(), &config).await {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}
