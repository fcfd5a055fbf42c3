use std::fmt::{self, Write as _};

use itertools::Itertools;

use super::{CpuSummary, DiskUsage, GpuStats, MemorySummary, SystemIdentity, SystemReport};
use crate::format::{render_subtitle, render_title, scale_bytes};

/// Render the full text report, section by section.
pub fn render(report: &SystemReport) -> String {
    let mut out = String::new();
    out.push_str(&system_section(&report.system));
    out.push_str(&cpu_section(&report.cpu));
    out.push_str(&memory_section(&report.memory));
    out.push_str(&disk_section(&report.disks));
    out.push_str(&gpu_section(&report.gpus));
    out
}

impl fmt::Display for SystemReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self))
    }
}

/// A driver reading that may be missing, with its unit.
struct Reading(Option<f64>, &'static str);

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => write!(f, "{value:.1}{}", self.1),
            None => f.write_str("N/A"),
        }
    }
}

fn system_section(system: &SystemIdentity) -> String {
    let mut out = format!("\n{}\n\n", render_title("System Information"));
    let _ = writeln!(out, "System: {}", system.system);
    let _ = writeln!(out, "PC Name: {}", system.node);
    let _ = writeln!(out, "Release: {}", system.release);
    let _ = writeln!(out, "Version: {}", system.version);
    let _ = writeln!(out, "Machine: {}", system.machine);
    let _ = writeln!(out, "Processor: {}", system.processor);
    out.push('\n');
    out
}

fn cpu_section(cpu: &CpuSummary) -> String {
    let physical = match cpu.physical_cores {
        Some(count) => count.to_string(),
        None => "Unknown".to_owned(),
    };

    let mut out = format!("{}\n\n", render_title("CPU Info"));
    let _ = writeln!(out, "Brand Name: {}", cpu.brand);
    let _ = writeln!(out, "Physical cores: {physical}");
    let _ = writeln!(out, "Total cores: {}", cpu.total_cores);
    let _ = writeln!(out, "Max Frequency: {:.2}Mhz", cpu.max_frequency_mhz);
    let _ = writeln!(out, "Min Frequency: {:.2}Mhz", cpu.min_frequency_mhz);
    out.push('\n');
    out
}

fn memory_section(memory: &MemorySummary) -> String {
    format!(
        "{}\n\nTotal: {}\n\n",
        render_title("Memory Information"),
        scale_bytes(memory.total_bytes)
    )
}

fn disk_section(disks: &[DiskUsage]) -> String {
    format!(
        "{}\n\n{}\n",
        render_title("Disk Information"),
        disks.iter().map(disk_block).join("\n")
    )
}

fn disk_block(disk: &DiskUsage) -> String {
    let mut out = render_subtitle(&format!("Device: {}", disk.device));
    out.push('\n');
    let _ = writeln!(out, "  Mountpoint: {}", disk.mount_point);
    let _ = writeln!(out, "  File system type: {}", disk.file_system);
    let _ = writeln!(out, "  Total Size: {}", scale_bytes(disk.total_bytes));
    let _ = writeln!(out, "  Used: {}", scale_bytes(disk.used_bytes));
    let _ = writeln!(out, "  Free: {}", scale_bytes(disk.free_bytes));
    let _ = writeln!(out, "  Percentage: {:.1}%", disk.percent());
    out
}

fn gpu_section(gpus: &[GpuStats]) -> String {
    format!(
        "{}\n\n{}",
        render_title("GPU Information"),
        gpus.iter().map(gpu_block).join("\n")
    )
}

fn gpu_block(gpu: &GpuStats) -> String {
    let mut out = render_subtitle(&format!("GPU {}", gpu.id));
    out.push('\n');
    let _ = writeln!(out, "  Name: {}", gpu.name);
    let _ = writeln!(out, "  Load: {}", Reading(gpu.load.map(|load| load * 100.0), "%"));
    let _ = writeln!(out, "  Free memory: {}", Reading(gpu.memory_free_mb, "MB"));
    let _ = writeln!(out, "  Used memory: {}", Reading(gpu.memory_used_mb, "MB"));
    let _ = writeln!(out, "  Total memory: {}", Reading(gpu.memory_total_mb, "MB"));
    let _ = writeln!(out, "  Temperature: {}", Reading(gpu.temperature_c, " °C"));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fixtures;

    #[test]
    fn sections_appear_in_order() {
        let text = render(&fixtures::report());

        let positions: Vec<usize> = [
            "System Information",
            "CPU Info",
            "Memory Information",
            "Disk Information",
            "GPU Information",
        ]
        .iter()
        .map(|title| text.find(&render_title(title)).unwrap())
        .collect();

        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(text.starts_with('\n'));
    }

    #[test]
    fn system_and_cpu_sections_match_layout() {
        let report = fixtures::report();

        let expected_system = format!(
            "\n{}\n\nSystem: Linux\nPC Name: workstation\nRelease: 6.1.0-18-amd64\n\
             Version: #1 SMP PREEMPT_DYNAMIC Debian 6.1.76-1\nMachine: x86_64\n\
             Processor: GenuineIntel\n\n",
            render_title("System Information")
        );
        assert_eq!(system_section(&report.system), expected_system);

        let cpu = cpu_section(&report.cpu);
        assert!(cpu.contains("Brand Name: Intel(R) Core(TM) i7-9700K CPU @ 3.60GHz\n"));
        assert!(cpu.contains("Physical cores: 8\nTotal cores: 8\n"));
        assert!(cpu.contains("Max Frequency: 4900.00Mhz\nMin Frequency: 800.00Mhz\n\n"));
    }

    #[test]
    fn unknown_physical_cores_are_labelled() {
        let mut report = fixtures::report();
        report.cpu.physical_cores = None;
        assert!(cpu_section(&report.cpu).contains("Physical cores: Unknown\n"));
    }

    #[test]
    fn memory_section_shows_scaled_total() {
        let report = fixtures::report();
        assert_eq!(
            memory_section(&report.memory),
            format!("{}\n\nTotal: 16.00GB\n\n", render_title("Memory Information"))
        );
    }

    #[test]
    fn disk_blocks_are_separated_by_blank_lines() {
        let report = fixtures::report();
        let section = disk_section(&report.disks);

        let root = format!(
            "{}\n  Mountpoint: /\n  File system type: ext4\n  Total Size: 500.00GB\n  \
             Used: 125.00GB\n  Free: 375.00GB\n  Percentage: 25.0%\n",
            render_subtitle("Device: /dev/nvme0n1p2")
        );
        assert!(section.contains(&format!("{root}\n{}", render_subtitle("Device: /dev/nvme0n1p1"))));
        assert!(section.ends_with("Percentage: 1.2%\n\n"));
    }

    #[test]
    fn disk_section_without_partitions_keeps_title() {
        assert_eq!(
            disk_section(&[]),
            format!("{}\n\n\n", render_title("Disk Information"))
        );
    }

    #[test]
    fn gpu_block_reports_load_as_percentage() {
        let report = fixtures::report();
        let block = gpu_block(&report.gpus[0]);

        assert!(block.starts_with(&render_subtitle("GPU 0")));
        assert!(block.contains("  Name: NVIDIA GeForce RTX 3070\n"));
        assert!(block.contains("  Load: 35.0%\n"));
        assert!(block.contains("  Free memory: 7000.0MB\n"));
        assert!(block.contains("  Total memory: 8192.0MB\n"));
        assert!(block.ends_with("  Temperature: 45.0 °C\n"));
    }

    #[test]
    fn missing_gpu_readings_render_as_not_available() {
        let mut gpu = fixtures::report().gpus.remove(0);
        gpu.load = None;
        gpu.temperature_c = None;

        let block = gpu_block(&gpu);
        assert!(block.contains("  Load: N/A\n"));
        assert!(block.contains("  Used memory: 1192.0MB\n"));
        assert!(block.contains("  Temperature: N/A\n"));
    }

    #[test]
    fn report_without_gpus_ends_after_gpu_title() {
        let mut report = fixtures::report();
        report.gpus.clear();

        let text = report.to_string();
        assert!(text.ends_with(&format!("{}\n\n", render_title("GPU Information"))));
    }
}
