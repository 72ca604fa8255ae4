//! Target reporting and telemetry forwarding
//!
//! Every target list is formatted into a bounded record and printed. The
//! record is also sent over UDP for every `forward_every`-th list, counted
//! after incrementing, so with the default of 20 the 20th, 40th, ... lists
//! are forwarded.

use std::cell::Cell;
use std::fmt::{self, Write as _};
use std::io::Write;
use std::rc::Rc;

use radar_sdk::{EndpointId, TargetHandler, TargetInfo};
use tracing::{debug, trace, warn};

use crate::config::AcquisitionConfig;
use crate::record::BoundedRecord;
use crate::telemetry::TelemetryChannel;

/// Unbounded text form of a target list
pub struct TargetList<'a>(pub &'a [TargetInfo]);

impl fmt::Display for TargetList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NumTargets: {} ", self.0.len())?;
        for t in self.0 {
            write!(
                f,
                "TgtId: {} Level: {:.2} Range: {:.2} Azimuth: {:.2} Elevation: {:.2} \
                 RadialSpeed: {:.2} AzimuthSpeed: {:.2} ElevationSpeed: {:.2} ",
                t.target_id,
                t.level,
                t.radius,
                t.azimuth,
                t.elevation,
                t.radial_speed,
                t.azimuth_speed,
                t.elevation_speed,
            )?;
        }
        Ok(())
    }
}

/// Format a target list into a record of at most `capacity` bytes
///
/// Lists too long for the record are cut at `capacity`; the result is
/// always a prefix of the full text.
pub fn format_targets(targets: &[TargetInfo], capacity: usize) -> BoundedRecord {
    let mut record = BoundedRecord::with_capacity(capacity);
    // An error here only means the record filled up
    let _ = write!(record, "{}", TargetList(targets));
    record
}

/// Count of target lists received
///
/// Clones share the same count. The count only ever goes up.
#[derive(Debug, Clone, Default)]
pub struct TelemetryCounter(Rc<Cell<u64>>);

impl TelemetryCounter {
    /// Create a counter at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Current count
    pub fn get(&self) -> u64 {
        self.0.get()
    }

    /// Increment and return the new count
    pub fn increment(&self) -> u64 {
        let next = self.0.get().saturating_add(1);
        self.0.set(next);
        next
    }
}

/// Prints every target list and forwards a decimated subset over UDP
pub struct TargetForwarder {
    channel: Option<TelemetryChannel>,
    counter: TelemetryCounter,
    out: Box<dyn Write>,
    forward_every: u64,
    capacity: usize,
}

impl TargetForwarder {
    /// Create a forwarder
    ///
    /// Without a channel the forwarder still counts and reports, but sends
    /// nothing.
    pub fn new(
        channel: Option<TelemetryChannel>,
        out: Box<dyn Write>,
        config: &AcquisitionConfig,
    ) -> Self {
        Self {
            channel,
            counter: TelemetryCounter::new(),
            out,
            forward_every: config.forward_every,
            capacity: config.record_capacity,
        }
    }

    /// Handle on the telemetry counter
    pub fn counter(&self) -> TelemetryCounter {
        self.counter.clone()
    }

    /// Handle one target list; returns whether it was due for forwarding
    pub fn process(&mut self, targets: &[TargetInfo]) -> bool {
        let record = format_targets(targets, self.capacity);
        if record.is_truncated() {
            debug!(
                "Target record truncated to {} bytes ({} targets)",
                record.len(),
                targets.len()
            );
        }

        let count = self.counter.increment();
        let due = self.forward_every != 0 && count % self.forward_every == 0;
        if due {
            if let Some(channel) = &self.channel {
                match channel.send(record.as_bytes()) {
                    Ok(()) => debug!("Forwarded target record #{} to {}", count, channel.destination()),
                    Err(e) => debug!("{}", e),
                }
            }
        }

        if let Err(e) = writeln!(
            self.out,
            "=== TARGET DATA ===\n{}\n===================\n",
            record
        ) {
            warn!("Failed to write target report: {}", e);
        }

        due
    }
}

impl TargetHandler for TargetForwarder {
    fn on_targets(&mut self, endpoint: EndpointId, targets: &[TargetInfo]) {
        trace!("{} target(s) on endpoint {}", targets.len(), endpoint);
        self.process(targets);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::cell::RefCell;

    struct SharedReport(Rc<RefCell<Vec<u8>>>);

    impl Write for SharedReport {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn target(id: u32) -> TargetInfo {
        TargetInfo {
            target_id: id,
            level: 51.234,
            radius: 2.5,
            azimuth: -12.346,
            elevation: 0.0,
            radial_speed: 0.126,
            azimuth_speed: 1.0,
            elevation_speed: -0.5,
        }
    }

    fn forwarder(forward_every: u64) -> TargetForwarder {
        let config = AcquisitionConfig {
            forward_every,
            ..Default::default()
        };
        TargetForwarder::new(None, Box::new(std::io::sink()), &config)
    }

    #[test]
    fn test_format_single_target() {
        let record = format_targets(&[target(3)], 512);

        assert_eq!(
            record.as_str(),
            "NumTargets: 1 TgtId: 3 Level: 51.23 Range: 2.50 Azimuth: -12.35 Elevation: 0.00 \
             RadialSpeed: 0.13 AzimuthSpeed: 1.00 ElevationSpeed: -0.50 "
        );
        assert!(!record.is_truncated());
    }

    #[test]
    fn test_format_empty_list() {
        assert_eq!(format_targets(&[], 512).as_str(), "NumTargets: 0 ");
    }

    #[test]
    fn test_large_list_truncated_at_capacity() {
        let targets: Vec<TargetInfo> = (0..10).map(target).collect();
        let full = TargetList(&targets).to_string();
        assert!(full.len() > 512);

        let record = format_targets(&targets, 512);

        assert_eq!(record.len(), 512);
        assert!(record.is_truncated());
        assert_eq!(record.as_str(), &full[..512]);
    }

    #[test]
    fn test_counter_increments_for_empty_lists() {
        let mut fwd = forwarder(20);
        let counter = fwd.counter();

        fwd.process(&[]);
        fwd.process(&[]);

        assert_eq!(counter.get(), 2);
    }

    #[test]
    fn test_forwards_every_twentieth() {
        let mut fwd = forwarder(20);

        let due: Vec<u64> = (1..=45u64).filter(|_| fwd.process(&[target(1)])).collect();

        assert_eq!(due, vec![20, 40]);
        assert_eq!(fwd.counter().get(), 45);
    }

    #[test]
    fn test_zero_disables_forwarding() {
        let mut fwd = forwarder(0);

        assert!((0..50).all(|_| !fwd.process(&[])));
        assert_eq!(fwd.counter().get(), 50);
    }

    #[tokio::test]
    async fn test_send_failure_keeps_counting_and_reporting() {
        let receiver = tokio::net::UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let channel = TelemetryChannel::open(receiver.local_addr().unwrap())
            .await
            .unwrap();
        // Record too large for one UDP datagram
        let config = AcquisitionConfig {
            forward_every: 1,
            record_capacity: 100_000,
            ..Default::default()
        };
        let report = Rc::new(RefCell::new(Vec::new()));
        let mut fwd = TargetForwarder::new(
            Some(channel),
            Box::new(SharedReport(report.clone())),
            &config,
        );
        let targets: Vec<TargetInfo> = (0..800).map(target).collect();
        assert!(format_targets(&targets, config.record_capacity).len() > 65_507);

        assert!(fwd.process(&targets));
        assert!(fwd.process(&targets));

        assert_eq!(fwd.counter().get(), 2);
        let text = String::from_utf8(report.borrow().clone()).unwrap();
        assert_eq!(text.matches("=== TARGET DATA ===").count(), 2);
    }

    proptest! {
        #[test]
        fn record_never_exceeds_capacity(count in 0usize..64, capacity in 0usize..2048) {
            let targets: Vec<TargetInfo> = (0..count as u32).map(target).collect();
            let full = TargetList(&targets).to_string();

            let record = format_targets(&targets, capacity);

            prop_assert!(record.len() <= capacity);
            prop_assert!(full.starts_with(record.as_str()));
            prop_assert_eq!(record.is_truncated(), full.len() > capacity);
        }

        #[test]
        fn forwards_iff_count_is_multiple(invocations in 1u64..200, counts in prop::collection::vec(0usize..5, 200)) {
            let mut fwd = forwarder(20);
            for (i, &n) in counts.iter().take(invocations as usize).enumerate() {
                let targets: Vec<TargetInfo> = (0..n as u32).map(target).collect();
                let due = fwd.process(&targets);
                prop_assert_eq!(due, (i as u64 + 1) % 20 == 0);
            }
            prop_assert_eq!(fwd.counter().get(), invocations);
        }
    }
}
