use argh::FromArgs;
use std::path::PathBuf;

use weather_producer::{setup_shutdown, AmqpPublisher, Config, OpenMeteoClient, ProducerNode};

#[derive(FromArgs)]
/// Open-Meteo weather data publisher for RabbitMQ
struct Args {
    /// path to a YAML configuration file (optional, built-in defaults otherwise)
    #[argh(option, short = 'c')]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Args = argh::from_env();

    let config = match &args.config {
        Some(path) => {
            log::info!("Loading config from: {}", path.display());
            Config::load(path)?
        }
        None => {
            log::info!("No config file specified, using defaults");
            Config::default()
        }
    };

    log::info!(
        "Location: ({:.2}, {:.2}), queue: '{}'",
        config.api.latitude,
        config.api.longitude,
        config.broker.queue
    );

    let client = OpenMeteoClient::new(&config.api)?;
    let (_shutdown_tx, mut shutdown_rx) = setup_shutdown()?;

    let publisher = tokio::select! {
        biased;
        _ = shutdown_rx.changed() => {
            log::info!("Shutdown requested before the broker connection was established");
            return Ok(());
        }
        publisher = AmqpPublisher::connect(&config.broker) => publisher?,
    };

    let node = ProducerNode::new(client, publisher, config.interval());
    if let Err(e) = node.run(shutdown_rx).await {
        log::error!("Producer failed: {}", e);
        return Err(e.into());
    }

    log::info!("Weather producer shut down, exiting");
    Ok(())
}
