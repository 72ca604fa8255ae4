//! Radar data extraction
//!
//! Finds a radar on the serial ports, configures raw frame and/or target
//! acquisition and prints everything it receives until Ctrl+C. Every 20th
//! target list is also forwarded over UDP.

mod cli;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use radar_acquire::{
    AcquisitionConfig, AcquisitionMode, DataKind, FrameReporter, Handlers, RunLoop,
    TargetForwarder, TelemetryChannel,
};
use radar_detect::{EndpointLocator, PortScanner};
use radar_sdk::{host_port_names, ScanFilter};
use radar_sim::{SimConfig, SimulatedRadar};
use tokio::sync::oneshot;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Args;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Parse before anything else so a bad flag never opens a socket
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "radar_extract=info,radar_acquire=info,radar_detect=info,radar_sdk=info,radar_sim=info"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(args.mode()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(mode: AcquisitionMode) -> anyhow::Result<()> {
    info!("Starting radar data extraction");
    info!("Mode: {}", mode);

    let config = AcquisitionConfig::default();

    let channel = if mode.includes(DataKind::Targets) {
        let channel = TelemetryChannel::open(config.telemetry_destination)
            .await
            .context("failed to initialize telemetry socket")?;
        Some(channel)
    } else {
        None
    };

    let host_ports = match host_port_names(&ScanFilter::default()) {
        Ok(names) => names,
        Err(e) => {
            warn!("{}; scanning the simulated sensor only", e);
            Vec::new()
        }
    };
    let mut radar = SimulatedRadar::new(SimConfig::default().with_host_ports(host_ports));

    let connection = PortScanner::new()
        .connect(&mut radar)
        .context("failed to connect to radar")?;
    let endpoints = EndpointLocator::new().locate(&mut radar, &connection);

    let handlers = Handlers {
        frames: mode.includes(DataKind::RawFrames).then(|| {
            FrameReporter::new(Box::new(std::io::stdout()), config.max_reported_samples)
        }),
        targets: mode
            .includes(DataKind::Targets)
            .then(|| TargetForwarder::new(channel, Box::new(std::io::stdout()), &config)),
    };

    let mut run = RunLoop::new(radar, connection, config);
    run.configure(&endpoints, mode, handlers);

    let (stop_tx, stop_rx) = oneshot::channel();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Shutdown requested");
                let _ = stop_tx.send(());
            }
            Err(e) => {
                warn!("Cannot listen for Ctrl+C: {}", e);
                // Keep the sender alive so the loop is not stopped by its drop
                std::future::pending::<()>().await;
                drop(stop_tx);
            }
        }
    });

    info!("Press Ctrl+C to stop.");
    let summary = run.run(stop_rx).await;

    if let Some(count) = summary.telemetry_count {
        info!("Received {} target list(s)", count);
    }
    info!(
        "Fetches: {} raw ok / {} failed, {} target ok / {} failed",
        summary.frames.ok, summary.frames.failed, summary.targets.ok, summary.targets.failed
    );

    Ok(())
}
