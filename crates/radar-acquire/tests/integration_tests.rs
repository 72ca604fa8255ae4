//! Integration tests for the acquisition engine
//!
//! These tests drive a simulated radar end to end:
//! - Port scan, endpoint location and configuration per mode
//! - Raw frame reports through the polling loop
//! - Target telemetry decimation over a real UDP socket
//! - Degraded setups (missing endpoints, failing fetches)

use std::time::Duration;

use radar_acquire::{
    AcquisitionConfig, AcquisitionMode, DataKind, FrameReporter, Handlers, RunLoop,
    TargetForwarder, TelemetryChannel,
};
use radar_detect::{DetectError, EndpointLocator, LocatedEndpoints, PortScanner};
use radar_sim::{SimConfig, SimEndpoint, SimPort, SimulatedRadar};
use tokio::net::UdpSocket;

// ============================================================================
// Helper Functions
// ============================================================================

mod helpers {
    use super::*;
    use std::cell::RefCell;
    use std::io::{self, Write};
    use std::rc::Rc;

    /// Report sink that can be read back after being handed to a handler
    #[derive(Clone, Default)]
    pub struct SharedReport(Rc<RefCell<Vec<u8>>>);

    impl SharedReport {
        pub fn text(&self) -> String {
            String::from_utf8(self.0.borrow().clone()).unwrap()
        }
    }

    impl Write for SharedReport {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Connect to a simulated radar and locate its endpoints
    pub fn connect(config: SimConfig) -> (RunLoop<SimulatedRadar>, LocatedEndpoints) {
        let mut radar = SimulatedRadar::new(config);
        let conn = PortScanner::new().connect(&mut radar).unwrap();
        let located = EndpointLocator::new().locate(&mut radar, &conn);
        (
            RunLoop::new(radar, conn, AcquisitionConfig::default()),
            located,
        )
    }

    /// Frame reporter writing into a shared report
    pub fn frame_reporter(report: &SharedReport) -> FrameReporter {
        FrameReporter::new(Box::new(report.clone()), 10)
    }

    /// Target forwarder writing into a shared report
    pub fn target_forwarder(
        channel: Option<TelemetryChannel>,
        report: &SharedReport,
    ) -> TargetForwarder {
        TargetForwarder::new(
            channel,
            Box::new(report.clone()),
            &AcquisitionConfig::default(),
        )
    }

    /// Drain every datagram currently queued on `socket`
    pub async fn drain(socket: &UdpSocket) -> Vec<Vec<u8>> {
        let mut datagrams = Vec::new();
        let mut buf = [0u8; 2048];
        while let Ok(Ok(n)) =
            tokio::time::timeout(Duration::from_millis(200), socket.recv(&mut buf)).await
        {
            datagrams.push(buf[..n].to_vec());
        }
        datagrams
    }
}

// ============================================================================
// Raw Frame Tests
// ============================================================================

mod raw_frame_tests {
    use super::*;

    #[test]
    fn raw_only_reports_each_frame() {
        let (mut run, located) = helpers::connect(SimConfig {
            endpoints: vec![SimEndpoint::RadarBase],
            samples_per_chirp: 12,
            ..Default::default()
        });
        let report = helpers::SharedReport::default();

        run.configure(
            &located,
            AcquisitionMode::RawOnly,
            Handlers {
                frames: Some(helpers::frame_reporter(&report)),
                targets: None,
            },
        );
        for _ in 0..3 {
            run.poll_once();
        }

        let text = report.text();
        assert_eq!(text.matches("=== RAW DATA FRAME ===").count(), 3);
        assert_eq!(text.matches("Samples per chirp: 12\n").count(), 3);
        assert_eq!(text.matches("ADC sample ").count(), 30);
        assert_eq!(text.matches("ADC sample 9: ").count(), 3);
        assert_eq!(text.matches("ADC sample 10: ").count(), 0);
        assert_eq!(text.matches("... (2 more samples)").count(), 3);
    }

    #[test]
    fn multiple_frames_per_fetch_are_all_reported() {
        let (mut run, located) = helpers::connect(SimConfig {
            samples_per_chirp: 4,
            frames_per_fetch: 3,
            ..Default::default()
        });
        let report = helpers::SharedReport::default();

        run.configure(
            &located,
            AcquisitionMode::RawOnly,
            Handlers {
                frames: Some(helpers::frame_reporter(&report)),
                targets: None,
            },
        );
        run.poll_once();

        let text = report.text();
        assert_eq!(text.matches("=== RAW DATA FRAME ===").count(), 3);
        assert!(!text.contains("more samples"));
        assert_eq!(run.stats(DataKind::RawFrames).ok, 1);
    }
}

// ============================================================================
// Target Telemetry Tests
// ============================================================================

mod telemetry_tests {
    use super::*;

    #[tokio::test]
    async fn target_only_forwards_twentieth_reading() {
        let receiver = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let channel = TelemetryChannel::open(receiver.local_addr().unwrap())
            .await
            .unwrap();

        let (mut run, located) = helpers::connect(SimConfig {
            endpoints: vec![SimEndpoint::TargetDetection],
            targets_per_fetch: 1,
            ..Default::default()
        });
        let report = helpers::SharedReport::default();
        let forwarder = helpers::target_forwarder(Some(channel), &report);
        let counter = forwarder.counter();

        run.configure(
            &located,
            AcquisitionMode::TargetOnly,
            Handlers {
                frames: None,
                targets: Some(forwarder),
            },
        );

        for i in 1..=19 {
            run.poll_once();
            assert_eq!(counter.get(), i);
        }
        assert!(helpers::drain(&receiver).await.is_empty());

        for _ in 20..=25 {
            run.poll_once();
        }

        let datagrams = helpers::drain(&receiver).await;
        assert_eq!(datagrams.len(), 1);
        let payload = String::from_utf8(datagrams[0].clone()).unwrap();
        assert!(payload.starts_with("NumTargets: 1 TgtId: "));
        assert!(!payload.ends_with('\0'));

        assert_eq!(counter.get(), 25);
        assert_eq!(report.text().matches("=== TARGET DATA ===").count(), 25);
        assert_eq!(run.stop().telemetry_count, Some(25));
    }

    #[tokio::test]
    async fn empty_target_lists_still_count() {
        let (mut run, located) = helpers::connect(SimConfig {
            endpoints: vec![SimEndpoint::TargetDetection],
            targets_per_fetch: 0,
            ..Default::default()
        });
        let report = helpers::SharedReport::default();
        let forwarder = helpers::target_forwarder(None, &report);
        let counter = forwarder.counter();

        run.configure(
            &located,
            AcquisitionMode::TargetOnly,
            Handlers {
                frames: None,
                targets: Some(forwarder),
            },
        );
        for _ in 0..5 {
            run.poll_once();
        }

        assert_eq!(counter.get(), 5);
        assert_eq!(report.text().matches("NumTargets: 0 \n").count(), 5);
    }

    #[tokio::test]
    async fn large_target_lists_are_truncated() {
        let receiver = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let channel = TelemetryChannel::open(receiver.local_addr().unwrap())
            .await
            .unwrap();

        let (mut run, located) = helpers::connect(SimConfig {
            endpoints: vec![SimEndpoint::TargetDetection],
            targets_per_fetch: 40,
            ..Default::default()
        });
        let report = helpers::SharedReport::default();

        run.configure(
            &located,
            AcquisitionMode::TargetOnly,
            Handlers {
                frames: None,
                targets: Some(helpers::target_forwarder(Some(channel), &report)),
            },
        );
        for _ in 0..20 {
            run.poll_once();
        }

        let datagrams = helpers::drain(&receiver).await;
        assert_eq!(datagrams.len(), 1);
        assert_eq!(datagrams[0].len(), 512);
        assert!(datagrams[0].starts_with(b"NumTargets: 40 "));
    }
}

// ============================================================================
// Degraded Setup Tests
// ============================================================================

mod degraded_tests {
    use super::*;

    #[test]
    fn both_without_target_endpoint_runs_raw_only() {
        let (mut run, located) = helpers::connect(SimConfig {
            endpoints: vec![SimEndpoint::Other, SimEndpoint::RadarBase],
            samples_per_chirp: 12,
            ..Default::default()
        });
        let report = helpers::SharedReport::default();

        let channels = run.configure(
            &located,
            AcquisitionMode::Both,
            Handlers {
                frames: Some(helpers::frame_reporter(&report)),
                targets: Some(helpers::target_forwarder(None, &report)),
            },
        );
        assert!(channels.raw.is_some());
        assert!(channels.target.is_none());

        for _ in 0..3 {
            run.poll_once();
        }

        assert_eq!(run.stats(DataKind::RawFrames).ok, 3);
        assert_eq!(run.stats(DataKind::Targets).ok, 0);
        assert_eq!(run.stats(DataKind::Targets).failed, 0);
        assert!(!report.text().contains("TARGET DATA"));

        let summary = run.stop();
        assert_eq!(summary.telemetry_count, None);
    }

    #[test]
    fn failing_fetches_do_not_stop_the_loop() {
        let (mut run, located) = helpers::connect(SimConfig::default());
        let report = helpers::SharedReport::default();

        run.configure(
            &located,
            AcquisitionMode::Both,
            Handlers {
                frames: Some(helpers::frame_reporter(&report)),
                targets: Some(helpers::target_forwarder(None, &report)),
            },
        );

        run.sdk_mut().set_fetch_failure(Some(-1));
        for _ in 0..250 {
            run.poll_once();
        }
        run.sdk_mut().set_fetch_failure(None);
        run.poll_once();

        assert_eq!(run.iterations(), 251);
        assert_eq!(run.stats(DataKind::RawFrames).failed, 250);
        assert_eq!(run.stats(DataKind::RawFrames).ok, 1);
        assert_eq!(report.text().matches("=== RAW DATA FRAME ===").count(), 1);
    }

    #[test]
    fn no_sensor_on_any_port() {
        let mut radar = SimulatedRadar::new(SimConfig {
            ports: vec![SimPort::silent("COM1"), SimPort::silent("COM2")],
            ..Default::default()
        });

        let err = PortScanner::new().connect(&mut radar).unwrap_err();

        assert!(matches!(err, DetectError::NoDeviceResponded { .. }));
    }

    #[test]
    fn sensor_found_after_host_ports() {
        let (run, located) = helpers::connect(
            SimConfig::default().with_host_ports(["/dev/ttyS0", "/dev/ttyUSB0"]),
        );

        assert_eq!(run.connection().port, "VSIM:radar");
        assert_eq!(run.sdk().connect_attempts().len(), 3);
        assert!(located.raw.is_some());
        assert!(located.target.is_some());
    }
}
