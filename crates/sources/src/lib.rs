//! rg-status-sources: Producer implementations for rg-status.

mod command;
mod cpu;
mod datetime;
mod file;
mod gpu;
mod keyboard;
mod memory;
mod network;
mod system;

pub use command::CommandSource;
pub use cpu::CpuSource;
pub use datetime::DateTimeSource;
pub use file::{FileField, FileSource};
pub use gpu::{
    GpuDevice, GpuMetrics, GpuSource, NativeSensor, NullResolver, NvmlResolver, SensorResolver,
    SharedSensor, NVML_LIBRARY,
};
pub use keyboard::{
    format_indicators, KeyboardIndicatorsSource, LedReader, NullLedReader, CAPS_LOCK_LED,
    NUM_LOCK_LED,
};
pub use memory::{MemoryField, MemorySource};
pub use network::{
    rate_per_sec, CounterReader, CounterSample, DifferentialSampler, Direction,
    NetSpeedCombinedSource, NetSpeedSource, RxTx, SysfsCounters,
};
pub use system::{SystemField, SystemSource};

use rg_status_core::Registry;
use std::sync::{Arc, Mutex};

/// Register all built-in producers with real system collaborators
pub fn register_all(registry: &mut Registry) {
    registry.register("netspeed_rx", "Receive Speed", |_| {
        Box::new(NetSpeedSource::new(
            Direction::Rx,
            Box::new(SysfsCounters::default()),
        ))
    });

    registry.register("netspeed_tx", "Transmit Speed", |_| {
        Box::new(NetSpeedSource::new(
            Direction::Tx,
            Box::new(SysfsCounters::default()),
        ))
    });

    registry.register("netspeed_combined", "Network Speed", |_| {
        Box::new(NetSpeedCombinedSource::new(Box::new(SysfsCounters::default())))
    });

    // One NVML handle per registry, shared by every GPU binding
    let gpu_sensor: SharedSensor =
        Arc::new(Mutex::new(NativeSensor::new(Box::new(NvmlResolver))));
    registry.register("gpu_combined", "GPU", move |_| {
        Box::new(GpuSource::shared(Arc::clone(&gpu_sensor)))
    });

    registry.register("cpu_perc", "CPU Usage", |_| Box::new(CpuSource::new()));

    registry.register("ram_used", "RAM Used", |_| {
        Box::new(MemorySource::new(MemoryField::Used))
    });

    registry.register("ram_perc", "RAM Usage", |_| {
        Box::new(MemorySource::new(MemoryField::Percent))
    });

    registry.register("datetime", "Date and Time", |_| Box::new(DateTimeSource::new()));

    registry.register("run_command", "Command", |_| Box::new(CommandSource::new()));

    registry.register("cat", "File", |_| Box::new(FileSource::new(FileField::Cat)));

    registry.register("temp", "Temperature", |_| {
        Box::new(FileSource::new(FileField::Temperature))
    });

    registry.register("hostname", "Hostname", |_| {
        Box::new(SystemSource::new(SystemField::Hostname))
    });

    registry.register("load_avg", "Load Average", |_| {
        Box::new(SystemSource::new(SystemField::LoadAvg))
    });

    registry.register("uptime", "Uptime", |_| {
        Box::new(SystemSource::new(SystemField::Uptime))
    });

    // Needs a display; the binary registers an X11-backed reader over this
    registry.register("keyboard_indicators", "Keyboard Indicators", |_| {
        Box::new(KeyboardIndicatorsSource::new(Box::new(NullLedReader)))
    });
}
