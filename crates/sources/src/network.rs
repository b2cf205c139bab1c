//! Network throughput producers
//!
//! Rates are computed from successive reads of the kernel's cumulative
//! byte counters. The first read only establishes a baseline.

use rg_status_core::{
    fmt_human, require_argument, Producer, ProducerMetadata, Reading, Unavailable,
    BITS_PER_MEGABIT,
};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Default sysfs location of per-interface statistics
const SYSFS_NET: &str = "/sys/class/net";

/// Traffic direction of a byte counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Rx,
    Tx,
}

impl Direction {
    fn counter_file(self) -> &'static str {
        match self {
            Direction::Rx => "rx_bytes",
            Direction::Tx => "tx_bytes",
        }
    }
}

/// Source of cumulative interface byte counters
pub trait CounterReader: Send {
    fn read(&self, interface: &str, direction: Direction) -> Result<u64, Unavailable>;
}

/// Reads `/sys/class/net/<iface>/statistics/{rx,tx}_bytes`
#[derive(Debug, Clone)]
pub struct SysfsCounters {
    root: PathBuf,
}

impl SysfsCounters {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Default for SysfsCounters {
    fn default() -> Self {
        Self::new(SYSFS_NET)
    }
}

impl CounterReader for SysfsCounters {
    fn read(&self, interface: &str, direction: Direction) -> Result<u64, Unavailable> {
        let path = self
            .root
            .join(interface)
            .join("statistics")
            .join(direction.counter_file());
        let content =
            std::fs::read_to_string(&path).map_err(|e| Unavailable::io(&path, e))?;
        content.trim().parse::<u64>().map_err(|e| {
            Unavailable::Malformed(format!("{}: {}", path.display(), e))
        })
    }
}

/// A sample that can be differenced against an earlier one
pub trait CounterSample: Copy {
    /// Growth since `previous`, or `None` if any counter went backwards
    fn delta_since(&self, previous: &Self) -> Option<Self>;
}

impl CounterSample for u64 {
    fn delta_since(&self, previous: &Self) -> Option<Self> {
        self.checked_sub(*previous)
    }
}

/// Receive and transmit counters read together
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RxTx {
    pub rx: u64,
    pub tx: u64,
}

impl CounterSample for RxTx {
    fn delta_since(&self, previous: &Self) -> Option<Self> {
        Some(Self {
            rx: self.rx.checked_sub(previous.rx)?,
            tx: self.tx.checked_sub(previous.tx)?,
        })
    }
}

/// Cold/Warm baseline tracker
///
/// Only successful reads reach [`observe`](Self::observe), so a failed read
/// leaves the stored baseline and its timestamp untouched. Multi-counter
/// samples are stored as one value: all counters advance together or none
/// do.
#[derive(Debug, Clone, Default)]
pub struct DifferentialSampler<S> {
    previous: Option<(S, Instant)>,
}

impl<S: CounterSample> DifferentialSampler<S> {
    pub fn new() -> Self {
        Self { previous: None }
    }

    /// Record `current` taken at `at`
    ///
    /// Returns the growth since the last good sample and the time elapsed
    /// since it was taken.
    pub fn observe(&mut self, current: S, at: Instant) -> Result<(S, Duration), Unavailable> {
        match self.previous.replace((current, at)) {
            None => Err(Unavailable::Cold),
            Some((previous, taken)) => {
                let delta = current
                    .delta_since(&previous)
                    .ok_or(Unavailable::CounterReset)?;
                Ok((delta, at.saturating_duration_since(taken)))
            }
        }
    }

    pub fn is_warm(&self) -> bool {
        self.previous.is_some()
    }

    pub fn previous(&self) -> Option<S> {
        self.previous.map(|(sample, _)| sample)
    }
}

/// `delta * scale` spread over `elapsed`, per second
pub fn rate_per_sec(delta: u64, scale: f64, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs <= 0.0 {
        return 0.0;
    }
    delta as f64 * scale / secs
}

/// Single-direction throughput in binary human units (e.g. "1.5 Ki")
pub struct NetSpeedSource {
    metadata: ProducerMetadata,
    direction: Direction,
    reader: Box<dyn CounterReader>,
    sampler: DifferentialSampler<u64>,
}

impl NetSpeedSource {
    pub fn new(direction: Direction, reader: Box<dyn CounterReader>) -> Self {
        let metadata = match direction {
            Direction::Rx => ProducerMetadata::new(
                "netspeed_rx",
                "Receive Speed",
                "Network receive speed in bytes per second",
                Some("interface name (wlan0)"),
            ),
            Direction::Tx => ProducerMetadata::new(
                "netspeed_tx",
                "Transmit Speed",
                "Network transmit speed in bytes per second",
                Some("interface name (wlan0)"),
            ),
        };

        Self {
            metadata,
            direction,
            reader,
            sampler: DifferentialSampler::new(),
        }
    }
}

impl Producer for NetSpeedSource {
    fn metadata(&self) -> &ProducerMetadata {
        &self.metadata
    }

    fn produce(&mut self, argument: Option<&str>) -> Reading {
        self.produce_at(argument, Instant::now())
    }

    fn produce_at(&mut self, argument: Option<&str>, now: Instant) -> Reading {
        let interface = require_argument(argument)?;
        let current = self.reader.read(interface, self.direction)?;
        let (delta, elapsed) = self.sampler.observe(current, now)?;
        let bytes_per_sec = rate_per_sec(delta, 1.0, elapsed);
        Ok(fmt_human(bytes_per_sec as u64, 1024))
    }
}

/// Combined "tx/rx Mbps" throughput
pub struct NetSpeedCombinedSource {
    metadata: ProducerMetadata,
    reader: Box<dyn CounterReader>,
    sampler: DifferentialSampler<RxTx>,
}

impl NetSpeedCombinedSource {
    pub fn new(reader: Box<dyn CounterReader>) -> Self {
        Self {
            metadata: ProducerMetadata::new(
                "netspeed_combined",
                "Network Speed",
                "Transmit/receive speed in megabits per second",
                Some("interface name (enp4s0)"),
            ),
            reader,
            sampler: DifferentialSampler::new(),
        }
    }
}

impl Producer for NetSpeedCombinedSource {
    fn metadata(&self) -> &ProducerMetadata {
        &self.metadata
    }

    fn produce(&mut self, argument: Option<&str>) -> Reading {
        self.produce_at(argument, Instant::now())
    }

    fn produce_at(&mut self, argument: Option<&str>, now: Instant) -> Reading {
        let interface = require_argument(argument)?;
        // Both counters must be read before the sampler sees either
        let current = RxTx {
            rx: self.reader.read(interface, Direction::Rx)?,
            tx: self.reader.read(interface, Direction::Tx)?,
        };
        let (delta, elapsed) = self.sampler.observe(current, now)?;

        let bits = 8.0 / BITS_PER_MEGABIT;
        let tx_mbps = rate_per_sec(delta.tx, bits, elapsed);
        let rx_mbps = rate_per_sec(delta.rx, bits, elapsed);
        Ok(format!("{:.2}/{:.2} Mbps", tx_mbps, rx_mbps))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    /// Scripted counter values; `None` entries simulate read failures
    #[derive(Clone, Default)]
    struct ScriptedCounters {
        rx: Arc<Mutex<VecDeque<Option<u64>>>>,
        tx: Arc<Mutex<VecDeque<Option<u64>>>>,
    }

    impl ScriptedCounters {
        fn push(&self, rx: Option<u64>, tx: Option<u64>) {
            self.rx.lock().unwrap().push_back(rx);
            self.tx.lock().unwrap().push_back(tx);
        }
    }

    impl CounterReader for ScriptedCounters {
        fn read(&self, _interface: &str, direction: Direction) -> Result<u64, Unavailable> {
            let queue = match direction {
                Direction::Rx => &self.rx,
                Direction::Tx => &self.tx,
            };
            queue
                .lock()
                .unwrap()
                .pop_front()
                .flatten()
                .ok_or_else(|| Unavailable::Malformed("scripted failure".to_string()))
        }
    }

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_first_observation_is_cold() {
        let now = Instant::now();
        for value in [0u64, 1, 1_000_000, u64::MAX] {
            let mut sampler = DifferentialSampler::new();
            assert!(matches!(sampler.observe(value, now), Err(Unavailable::Cold)));
            assert!(sampler.is_warm());
        }
    }

    #[test]
    fn test_rate_one_second_apart() {
        let t0 = Instant::now();
        let mut sampler = DifferentialSampler::new();
        assert!(sampler.observe(1_000_000u64, t0).is_err());
        let (delta, elapsed) = sampler.observe(2_000_000u64, t0 + ms(1000)).unwrap();
        assert_eq!(elapsed, ms(1000));
        let rate = rate_per_sec(delta, 1.0, elapsed);
        assert!((rate - 1_000_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_counter_reset_rebaselines() {
        let t0 = Instant::now();
        let mut sampler = DifferentialSampler::new();
        let _ = sampler.observe(5_000u64, t0);
        assert!(matches!(
            sampler.observe(100u64, t0 + ms(1000)),
            Err(Unavailable::CounterReset)
        ));
        // Elapsed time restarts from the re-baselined sample
        assert_eq!(sampler.observe(1_124u64, t0 + ms(1500)).unwrap(), (1_024, ms(500)));
    }

    #[test]
    fn test_zero_elapsed_rate_is_zero() {
        assert_eq!(rate_per_sec(4096, 1.0, Duration::ZERO), 0.0);
    }

    #[test]
    fn test_rx_speed_in_binary_units() {
        let counters = ScriptedCounters::default();
        counters.push(Some(10_000), None);
        counters.push(Some(10_000 + 2 * 1536), None);

        let t0 = Instant::now();
        let mut source = NetSpeedSource::new(Direction::Rx, Box::new(counters.clone()));
        assert!(matches!(
            source.produce_at(Some("eth0"), t0),
            Err(Unavailable::Cold)
        ));
        assert_eq!(source.produce_at(Some("eth0"), t0 + ms(2000)).unwrap(), "1.5 Ki");
    }

    #[test]
    fn test_failed_read_keeps_baseline_time() {
        let counters = ScriptedCounters::default();
        counters.push(Some(0), None);
        counters.push(None, None);
        counters.push(Some(2_000_000), None);

        let t0 = Instant::now();
        let mut source = NetSpeedSource::new(Direction::Rx, Box::new(counters.clone()));
        assert!(source.produce_at(Some("eth0"), t0).is_err());
        assert!(matches!(
            source.produce_at(Some("eth0"), t0 + ms(1000)),
            Err(Unavailable::Malformed(_))
        ));
        // 2,000,000 bytes over the 2 s since the last good sample
        assert_eq!(
            source.produce_at(Some("eth0"), t0 + ms(2000)).unwrap(),
            "976.6 Ki"
        );
    }

    #[test]
    fn test_missing_interface_argument() {
        let mut source =
            NetSpeedSource::new(Direction::Tx, Box::new(ScriptedCounters::default()));
        assert!(matches!(source.produce(None), Err(Unavailable::MissingArgument)));
        assert!(matches!(source.produce(Some("")), Err(Unavailable::MissingArgument)));
    }

    #[test]
    fn test_combined_formats_tx_then_rx() {
        let counters = ScriptedCounters::default();
        counters.push(Some(0), Some(0));
        // 1.25 MB received, 250 KB sent over one second
        counters.push(Some(1_250_000), Some(250_000));

        let t0 = Instant::now();
        let mut source = NetSpeedCombinedSource::new(Box::new(counters.clone()));
        assert!(source.produce_at(Some("enp4s0"), t0).is_err());
        assert_eq!(
            source.produce_at(Some("enp4s0"), t0 + ms(1000)).unwrap(),
            "2.00/10.00 Mbps"
        );
    }

    #[test]
    fn test_combined_partial_read_preserves_baseline() {
        let counters = ScriptedCounters::default();
        counters.push(Some(1_000), Some(2_000));
        // tx read fails: neither counter may advance
        counters.push(Some(500_000), None);
        counters.push(Some(251_000), Some(252_000));

        let t0 = Instant::now();
        let mut source = NetSpeedCombinedSource::new(Box::new(counters.clone()));
        assert!(source.produce_at(Some("eth0"), t0).is_err());
        assert_eq!(source.sampler.previous(), Some(RxTx { rx: 1_000, tx: 2_000 }));

        assert!(source.produce_at(Some("eth0"), t0 + ms(1000)).is_err());
        assert_eq!(source.sampler.previous(), Some(RxTx { rx: 1_000, tx: 2_000 }));

        // 250_000 bytes each way over 2 s = 1 Mbps
        assert_eq!(
            source.produce_at(Some("eth0"), t0 + ms(2000)).unwrap(),
            "1.00/1.00 Mbps"
        );
    }

    #[test]
    fn test_sysfs_counters_read_and_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let stats = dir.path().join("eth0").join("statistics");
        std::fs::create_dir_all(&stats).unwrap();
        std::fs::write(stats.join("rx_bytes"), "12345\n").unwrap();
        std::fs::write(stats.join("tx_bytes"), "garbage\n").unwrap();

        let counters = SysfsCounters::new(dir.path());
        assert_eq!(counters.read("eth0", Direction::Rx).unwrap(), 12345);
        assert!(matches!(
            counters.read("eth0", Direction::Tx),
            Err(Unavailable::Malformed(_))
        ));
        assert!(matches!(
            counters.read("wlan9", Direction::Rx),
            Err(Unavailable::Io { .. })
        ));
    }
}
