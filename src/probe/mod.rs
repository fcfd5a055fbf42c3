//! Sequential pass over the OS/hardware sources that make up a report.

use std::time::Instant;

use log::{debug, info};
use sysinfo::{System, SystemExt};

use crate::error::Result;
use crate::report::SystemReport;

pub mod cpu;
pub mod disk;
pub mod gpu;
pub mod memory;
pub mod system;

/// Gather a complete [`SystemReport`]. Blocks; run it off the UI thread.
pub fn gather() -> Result<SystemReport> {
    let started = Instant::now();

    let mut sys = System::new();
    sys.refresh_cpu();
    sys.refresh_memory();
    sys.refresh_disks_list();
    debug!("sysinfo refreshed in {:?}", started.elapsed());

    let report = SystemReport {
        system: system::identify(&sys),
        cpu: cpu::summarize(&sys),
        memory: memory::summarize(&sys),
        disks: disk::usage(&sys)?,
        gpus: gpu::query()?,
    };

    info!(
        "gathered report with {} partitions and {} GPUs in {:?}",
        report.disks.len(),
        report.gpus.len(),
        started.elapsed()
    );
    Ok(report)
}
