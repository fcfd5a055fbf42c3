//! The report assembled from one pass over the probes.
//!
//! A [`SystemReport`] is plain data: the probes fill it in, [`render`] turns
//! it into the text shown in the window, and `serde` turns it into JSON for
//! the clipboard.

use serde::Serialize;

mod render;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemReport {
    pub system: SystemIdentity,
    pub cpu: CpuSummary,
    pub memory: MemorySummary,
    pub disks: Vec<DiskUsage>,
    pub gpus: Vec<GpuStats>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemIdentity {
    /// Platform family, e.g. `Linux`, `Windows` or `Darwin`.
    pub system: String,
    /// Host name.
    pub node: String,
    /// Kernel release.
    pub release: String,
    /// Kernel build string.
    pub version: String,
    /// CPU architecture.
    pub machine: String,
    /// CPU vendor id.
    pub processor: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CpuSummary {
    pub brand: String,
    pub physical_cores: Option<usize>,
    pub total_cores: usize,
    pub max_frequency_mhz: f64,
    pub min_frequency_mhz: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemorySummary {
    pub total_bytes: u64,
    pub available_bytes: u64,
    pub used_bytes: u64,
}

/// Usage of one mounted partition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiskUsage {
    pub device: String,
    pub mount_point: String,
    pub file_system: String,
    pub total_bytes: u64,
    pub used_bytes: u64,
    pub free_bytes: u64,
}

impl DiskUsage {
    /// Share of the space a user can fill that is already taken. Blocks
    /// reserved for the superuser are left out of both sides.
    pub fn percent(&self) -> f64 {
        let usable = self.used_bytes.saturating_add(self.free_bytes);
        if usable == 0 {
            return 0.0;
        }
        self.used_bytes as f64 / usable as f64 * 100.0
    }
}

/// One GPU as reported by the driver.
///
/// Readings the driver marks as unavailable (`[N/A]`, `[Not Supported]`) are
/// kept as `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GpuStats {
    pub id: u32,
    pub name: String,
    /// Utilization as a fraction in `0.0..=1.0`.
    pub load: Option<f64>,
    pub memory_free_mb: Option<f64>,
    pub memory_used_mb: Option<f64>,
    pub memory_total_mb: Option<f64>,
    pub temperature_c: Option<f64>,
    pub uuid: Option<String>,
    pub driver_version: Option<String>,
}

pub use render::render;
