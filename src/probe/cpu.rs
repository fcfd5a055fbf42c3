use sysinfo::{CpuExt, System, SystemExt};

use crate::report::CpuSummary;

#[cfg(target_os = "linux")]
const CPUFREQ_DIR: &str = "/sys/devices/system/cpu/cpu0/cpufreq";

pub fn summarize(sys: &System) -> CpuSummary {
    let (max_frequency_mhz, min_frequency_mhz) = frequency_bounds(sys);

    CpuSummary {
        brand: sys
            .cpus()
            .first()
            .map(|cpu| cpu.brand().trim().to_owned())
            .unwrap_or_default(),
        physical_cores: sys.physical_core_count(),
        total_cores: sys.cpus().len(),
        max_frequency_mhz,
        min_frequency_mhz,
    }
}

/// `(max, min)` frequency in MHz from the cpufreq scaling limits. Without
/// cpufreq both are unknown and reported as zero.
#[cfg(target_os = "linux")]
fn frequency_bounds(_sys: &System) -> (f64, f64) {
    read_cpufreq_bounds(std::path::Path::new(CPUFREQ_DIR)).unwrap_or_else(|| {
        log::debug!("cpufreq limits unavailable under {CPUFREQ_DIR}");
        (0.0, 0.0)
    })
}

/// `(max, min)` frequency in MHz. Only the current frequency is known here;
/// it stands in for the maximum.
#[cfg(not(target_os = "linux"))]
fn frequency_bounds(sys: &System) -> (f64, f64) {
    let current_max = sys.cpus().iter().map(CpuExt::frequency).max().unwrap_or(0);
    (current_max as f64, 0.0)
}

#[cfg(target_os = "linux")]
fn read_cpufreq_bounds(dir: &std::path::Path) -> Option<(f64, f64)> {
    let read = |name: &str| {
        std::fs::read_to_string(dir.join(name))
            .ok()
            .and_then(|contents| parse_khz(&contents))
    };
    Some((read("scaling_max_freq")?, read("scaling_min_freq")?))
}

/// Parse a cpufreq sysfs value (kHz) into MHz.
fn parse_khz(contents: &str) -> Option<f64> {
    contents
        .trim()
        .parse::<u64>()
        .ok()
        .map(|khz| khz as f64 / 1000.0)
}
