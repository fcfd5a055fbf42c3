use sysinfo::{CpuExt, System, SystemExt};

use crate::report::SystemIdentity;

pub fn identify(sys: &System) -> SystemIdentity {
    SystemIdentity {
        system: platform_name(std::env::consts::OS),
        node: sys.host_name().unwrap_or_default(),
        release: sys.kernel_version().unwrap_or_default(),
        version: kernel_build()
            .or_else(|| sys.long_os_version())
            .unwrap_or_default(),
        machine: std::env::consts::ARCH.to_owned(),
        processor: sys
            .cpus()
            .first()
            .map(|cpu| cpu.vendor_id().trim().to_owned())
            .unwrap_or_default(),
    }
}

/// Platform family the way `uname -s` spells it.
fn platform_name(os: &str) -> String {
    match os {
        "linux" => "Linux".to_owned(),
        "windows" => "Windows".to_owned(),
        "macos" => "Darwin".to_owned(),
        "freebsd" => "FreeBSD".to_owned(),
        "netbsd" => "NetBSD".to_owned(),
        "openbsd" => "OpenBSD".to_owned(),
        other => {
            let mut chars = other.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        }
    }
}

#[cfg(target_os = "linux")]
fn kernel_build() -> Option<String> {
    std::fs::read_to_string("/proc/sys/kernel/version")
        .ok()
        .map(|version| version.trim().to_owned())
        .filter(|version| !version.is_empty())
}

#[cfg(not(target_os = "linux"))]
fn kernel_build() -> Option<String> {
    None
}
