use anyhow::Result;
use clap::Parser;
use fp_hal::{MockModule, MockProvider};
use fp_service::{Coordinator, SensorKind, ServiceConfig, UdfpsHandlerFactory};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "fp-daemon")]
#[command(about = "Fingerprint sensor coordinator daemon")]
struct Args {
    /// YAML sensor configuration; defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Backend class the mock provider answers for
    #[arg(long, default_value = "fpc")]
    backend_class: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_tracing();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ServiceConfig::from_file(path)?,
        None => ServiceConfig::default(),
    };
    info!("fp-daemon starting");
    info!("Sensor kind: {:?}", config.sensor_kind);
    info!("Backend class: {}", args.backend_class);

    // Mock backend until a vendor module provider lands.
    let provider = MockProvider::new().with_module(MockModule::new(&args.backend_class));
    let udfps_factory: Option<&dyn UdfpsHandlerFactory> =
        if config.sensor_kind == SensorKind::UnderDisplayOptical {
            Some(&fp_service::NoopUdfpsHandlerFactory)
        } else {
            None
        };

    let coordinator = Coordinator::new(config, &provider, udfps_factory);
    for props in coordinator.sensor_props() {
        info!(
            "sensor {}: strength {:?}, max enrollments {}, location {:?}",
            props.sensor_id, props.strength, props.max_enrollments_per_user, props.location
        );
    }
    if !coordinator.has_device() {
        warn!("no backend device opened, session creation will be refused");
    }

    tokio::signal::ctrl_c().await?;
    info!("fp-daemon shutting down");
    Ok(())
}

fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
