//! Per-partition usage.
//!
//! `sysinfo` lists the mounted partitions; each mount point is then asked for
//! its sizes (`statvfs` on Unix, `GetDiskFreeSpaceExW` on Windows). A
//! partition the current user may not look at (or, on Windows, a drive with
//! no media) is left out.

use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use sysinfo::{DiskExt, System, SystemExt};

use crate::error::{Error, Result};
use crate::report::DiskUsage;

/// A mounted partition as listed by `sysinfo`, before probing.
#[derive(Debug, Clone)]
pub(crate) struct Partition {
    pub device: String,
    pub mount_point: PathBuf,
    pub file_system: String,
}

impl Partition {
    fn from_disk(disk: &sysinfo::Disk) -> Self {
        Self {
            device: disk.name().to_string_lossy().into_owned(),
            mount_point: disk.mount_point().to_path_buf(),
            file_system: String::from_utf8_lossy(disk.file_system()).into_owned(),
        }
    }

    fn into_usage(self, space: DiskSpace) -> DiskUsage {
        DiskUsage {
            device: self.device,
            mount_point: self.mount_point.display().to_string(),
            file_system: self.file_system,
            total_bytes: space.total_bytes,
            used_bytes: space.total_bytes.saturating_sub(space.free_bytes),
            free_bytes: space.available_bytes,
        }
    }
}

/// Sizes of one mounted file system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DiskSpace {
    pub total_bytes: u64,
    /// Free blocks, including those reserved for the superuser.
    pub free_bytes: u64,
    /// Free blocks an unprivileged user may allocate.
    pub available_bytes: u64,
}

pub fn usage(sys: &System) -> Result<Vec<DiskUsage>> {
    let partitions = sys.disks().iter().map(Partition::from_disk).collect();
    collect_usage(partitions, probe_mount)
}

pub(crate) fn collect_usage<P>(partitions: Vec<Partition>, probe: P) -> Result<Vec<DiskUsage>>
where
    P: Fn(&Path) -> io::Result<DiskSpace>,
{
    let mut usage = Vec::with_capacity(partitions.len());

    for partition in partitions {
        match probe(&partition.mount_point) {
            Ok(space) => usage.push(partition.into_usage(space)),
            Err(err) if is_unavailable(&err) => {
                debug!(
                    "skipping {} mounted at {}: {err}",
                    partition.device,
                    partition.mount_point.display()
                );
            }
            Err(source) => {
                return Err(Error::DiskUsage {
                    mount_point: partition.mount_point,
                    source,
                })
            }
        }
    }

    Ok(usage)
}

fn is_unavailable(err: &io::Error) -> bool {
    if err.kind() == io::ErrorKind::PermissionDenied {
        return true;
    }

    #[cfg(windows)]
    {
        use winapi::shared::winerror::ERROR_NOT_READY;
        if err.raw_os_error() == Some(ERROR_NOT_READY as i32) {
            return true;
        }
    }

    false
}

#[cfg(unix)]
fn probe_mount(mount_point: &Path) -> io::Result<DiskSpace> {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let path = CString::new(mount_point.as_os_str().as_bytes())
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;

    let mut stat: libc::statvfs = unsafe { std::mem::zeroed() };
    if unsafe { libc::statvfs(path.as_ptr(), &mut stat) } != 0 {
        return Err(io::Error::last_os_error());
    }

    let fragment = stat.f_frsize as u64;
    Ok(DiskSpace {
        total_bytes: (stat.f_blocks as u64).saturating_mul(fragment),
        free_bytes: (stat.f_bfree as u64).saturating_mul(fragment),
        available_bytes: (stat.f_bavail as u64).saturating_mul(fragment),
    })
}

#[cfg(windows)]
fn probe_mount(mount_point: &Path) -> io::Result<DiskSpace> {
    use std::os::windows::ffi::OsStrExt;
    use winapi::shared::ntdef::ULARGE_INTEGER;
    use winapi::um::fileapi::GetDiskFreeSpaceExW;

    let wide: Vec<u16> = mount_point
        .as_os_str()
        .encode_wide()
        .chain(std::iter::once(0))
        .collect();

    let mut available: ULARGE_INTEGER = unsafe { std::mem::zeroed() };
    let mut total: ULARGE_INTEGER = unsafe { std::mem::zeroed() };
    let mut free: ULARGE_INTEGER = unsafe { std::mem::zeroed() };

    let ok = unsafe { GetDiskFreeSpaceExW(wide.as_ptr(), &mut available, &mut total, &mut free) };
    if ok == 0 {
        return Err(io::Error::last_os_error());
    }

    // Windows has no reserved blocks; free space is what everyone sees.
    let free = unsafe { *free.QuadPart() };
    Ok(DiskSpace {
        total_bytes: unsafe { *total.QuadPart() },
        free_bytes: free,
        available_bytes: free,
    })
}

#[cfg(not(any(unix, windows)))]
fn probe_mount(_mount_point: &Path) -> io::Result<DiskSpace> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "disk usage is not available on this platform",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const GIB: u64 = 1024 * 1024 * 1024;

    fn partition(device: &str, mount_point: &str) -> Partition {
        Partition {
            device: device.to_owned(),
            mount_point: PathBuf::from(mount_point),
            file_system: "ext4".to_owned(),
        }
    }

    fn space(total: u64, free: u64, available: u64) -> DiskSpace {
        DiskSpace {
            total_bytes: total * GIB,
            free_bytes: free * GIB,
            available_bytes: available * GIB,
        }
    }

    #[test]
    fn reserved_blocks_count_neither_as_used_nor_free() {
        let usage = partition("/dev/sda1", "/").into_usage(space(500, 400, 375));

        assert_eq!(usage.total_bytes, 500 * GIB);
        assert_eq!(usage.used_bytes, 100 * GIB);
        assert_eq!(usage.free_bytes, 375 * GIB);
        assert_eq!(format!("{:.1}", usage.percent()), "21.1");
        assert_eq!(usage.mount_point, "/");
    }

    #[test]
    fn without_reserved_blocks_percent_is_used_over_total() {
        let usage = partition("C:", "C:\\").into_usage(space(200, 50, 50));
        assert_eq!(usage.used_bytes, 150 * GIB);
        assert_eq!(usage.percent(), 75.0);
    }

    #[test]
    fn skips_partitions_denied_by_permissions() {
        let partitions = vec![
            partition("/dev/sda1", "/"),
            partition("portal", "/run/user/1000/doc"),
            partition("/dev/sda2", "/home"),
        ];

        let usage = collect_usage(partitions, |mount_point| {
            if mount_point == Path::new("/run/user/1000/doc") {
                Err(io::Error::from(io::ErrorKind::PermissionDenied))
            } else {
                Ok(space(100, 50, 45))
            }
        })
        .unwrap();

        let devices: Vec<&str> = usage.iter().map(|disk| disk.device.as_str()).collect();
        assert_eq!(devices, ["/dev/sda1", "/dev/sda2"]);
    }

    #[test]
    fn other_probe_errors_fail_the_gather() {
        let partitions = vec![partition("/dev/sdb1", "/mnt/stale")];

        let err = collect_usage(partitions, |_| {
            Err(io::Error::new(io::ErrorKind::Other, "stale file handle"))
        })
        .unwrap_err();

        match err {
            Error::DiskUsage { mount_point, .. } => {
                assert_eq!(mount_point, PathBuf::from("/mnt/stale"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn free_above_total_saturates_used_at_zero() {
        let usage = partition("/dev/sdc1", "/data").into_usage(space(10, 20, 20));
        assert_eq!(usage.used_bytes, 0);
        assert_eq!(usage.percent(), 0.0);
    }

    #[cfg(unix)]
    #[test]
    fn reads_sizes_of_root_file_system() {
        let space = probe_mount(Path::new("/")).unwrap();
        assert!(space.total_bytes > 0);
        assert!(space.free_bytes <= space.total_bytes);
        assert!(space.available_bytes <= space.free_bytes);
    }

    #[cfg(unix)]
    #[test]
    fn missing_mount_point_is_an_error() {
        let err = probe_mount(Path::new("/nonexistent/mount/point")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
