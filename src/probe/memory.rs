use sysinfo::{System, SystemExt};

use crate::report::MemorySummary;

pub fn summarize(sys: &System) -> MemorySummary {
    MemorySummary {
        total_bytes: sys.total_memory(),
        available_bytes: sys.available_memory(),
        used_bytes: sys.used_memory(),
    }
}
