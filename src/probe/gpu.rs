//! NVIDIA GPU stats through `nvidia-smi`.
//!
//! The tool ships with the driver, so a machine without it simply has no GPUs
//! to report.

use std::io;
use std::process::{Command, Output};

use log::{debug, warn};

use crate::error::{Error, Result};
use crate::report::GpuStats;

const NVIDIA_SMI: &str = "nvidia-smi";
const QUERY_FIELDS: &str =
    "index,name,utilization.gpu,memory.total,memory.used,memory.free,temperature.gpu,uuid,driver_version";

pub fn query() -> Result<Vec<GpuStats>> {
    query_with(|| {
        Command::new(NVIDIA_SMI)
            .arg(format!("--query-gpu={QUERY_FIELDS}"))
            .arg("--format=csv,noheader,nounits")
            .output()
    })
}

/// Interpret the result of running the query; `run` spawns the tool.
pub(crate) fn query_with<R>(run: R) -> Result<Vec<GpuStats>>
where
    R: FnOnce() -> io::Result<Output>,
{
    let output = match run() {
        Ok(output) => output,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!("{NVIDIA_SMI} not found, no GPUs to report");
            return Ok(Vec::new());
        }
        Err(err) => return Err(Error::GpuQuery(err)),
    };

    if !output.status.success() {
        warn!(
            "{NVIDIA_SMI} exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
        return Ok(Vec::new());
    }

    parse_output(&String::from_utf8_lossy(&output.stdout))
}

/// Parse `csv,noheader,nounits` output, one GPU per line.
pub(crate) fn parse_output(stdout: &str) -> Result<Vec<GpuStats>> {
    stdout
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(parse_line)
        .collect()
}

fn parse_line(line: &str) -> Result<GpuStats> {
    let malformed = || Error::GpuOutput {
        line: line.to_owned(),
    };

    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    let [index, name, utilization, total, used, free, temperature, uuid, driver] =
        fields.as_slice()
    else {
        return Err(malformed());
    };

    Ok(GpuStats {
        id: index.parse().map_err(|_| malformed())?,
        name: (*name).to_owned(),
        load: reading(utilization).map(|percent| percent / 100.0),
        memory_free_mb: reading(free),
        memory_used_mb: reading(used),
        memory_total_mb: reading(total),
        temperature_c: reading(temperature),
        uuid: text(uuid),
        driver_version: text(driver),
    })
}

/// Numeric field; `[N/A]` and friends become `None`.
fn reading(field: &str) -> Option<f64> {
    field.parse().ok().filter(|value: &f64| value.is_finite())
}

fn text(field: &str) -> Option<String> {
    if field.is_empty() || field.starts_with('[') {
        None
    } else {
        Some(field.to_owned())
    }
}
