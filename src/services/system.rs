use std::path::Path;
use std::time::Duration;
use sysinfo::{CpuRefreshKind, Disks, RefreshKind, System, MINIMUM_CPU_UPDATE_INTERVAL};

use crate::models::SystemSnapshot;
use crate::services::temperature::cpu_temperature;
use crate::services::tool::ExternalTools;

/// CPU 使用率采样窗口
pub const CPU_SAMPLE_INTERVAL: Duration = Duration::from_millis(200);

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;
const BYTES_PER_GB: f64 = BYTES_PER_MB * 1024.0;

pub fn sample_interval() -> Duration {
    CPU_SAMPLE_INTERVAL.max(MINIMUM_CPU_UPDATE_INTERVAL)
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// 字节 -> MB，一位小数
pub fn bytes_to_mb(bytes: u64) -> f64 {
    round_to(bytes as f64 / BYTES_PER_MB, 1)
}

/// 字节 -> GB，两位小数
pub fn bytes_to_gb(bytes: u64) -> f64 {
    round_to(bytes as f64 / BYTES_PER_GB, 2)
}

/// 未换算的原始读数（字节）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SystemReadings {
    pub cpu_per_core: Vec<f32>,
    pub mem_total: u64,
    pub mem_used: u64,
    pub disk_total: u64,
    pub disk_used: u64,
    pub swap_total: u64,
    pub swap_used: u64,
}

impl SystemReadings {
    pub fn into_snapshot(self, cpu_temp: Option<f64>) -> SystemSnapshot {
        SystemSnapshot {
            cpu_percent_per_core: self
                .cpu_per_core
                .into_iter()
                .map(|usage| round_to(usage as f64, 1))
                .collect(),
            mem_total_mb: bytes_to_mb(self.mem_total),
            mem_used_mb: bytes_to_mb(self.mem_used),
            disk_total_gb: bytes_to_gb(self.disk_total),
            disk_used_gb: bytes_to_gb(self.disk_used),
            cpu_temp_celsius: cpu_temp,
            swap_used_mb: bytes_to_mb(self.swap_used),
            swap_total_mb: bytes_to_mb(self.swap_total),
        }
    }
}

/// 采集 CPU/内存/磁盘/交换分区
///
/// CPU 使用率需要两次刷新之间的时间差，这里固定等待一个采样窗口。
pub async fn read_system() -> SystemReadings {
    let mut sys =
        System::new_with_specifics(RefreshKind::nothing().with_cpu(CpuRefreshKind::everything()));
    tokio::time::sleep(sample_interval()).await;
    sys.refresh_cpu_usage();
    sys.refresh_memory();

    let (disk_total, disk_used) = root_disk_usage();

    SystemReadings {
        cpu_per_core: sys.cpus().iter().map(|cpu| cpu.cpu_usage()).collect(),
        mem_total: sys.total_memory(),
        mem_used: sys.used_memory(),
        disk_total,
        disk_used,
        swap_total: sys.total_swap(),
        swap_used: sys.used_swap(),
    }
}

/// 根分区的 (总量, 已用)，没有 `/` 时取第一块盘
fn root_disk_usage() -> (u64, u64) {
    let disks = Disks::new_with_refreshed_list();
    let disk = disks
        .list()
        .iter()
        .find(|disk| disk.mount_point() == Path::new("/"))
        .or_else(|| disks.list().first());

    match disk {
        Some(disk) => {
            let total = disk.total_space();
            (total, total.saturating_sub(disk.available_space()))
        }
        None => (0, 0),
    }
}

pub async fn collect_system(tools: &ExternalTools) -> SystemSnapshot {
    let (readings, cpu_temp) = tokio::join!(read_system(), cpu_temperature(tools));
    readings.into_snapshot(cpu_temp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_rounding() {
        let readings = SystemReadings {
            mem_total: 2_147_483_648,
            mem_used: 1_073_741_824,
            ..Default::default()
        };

        let snapshot = readings.into_snapshot(None);
        assert_eq!(snapshot.mem_total_mb, 2048.0);
        assert_eq!(snapshot.mem_used_mb, 1024.0);
        assert_eq!(snapshot.cpu_temp_celsius, None);
    }

    #[test]
    fn test_unit_rounding() {
        // 1.5 MB + 1 字节
        assert_eq!(bytes_to_mb(1_572_865), 1.5);
        assert_eq!(bytes_to_mb(1_100_000), 1.0);
        // 500 GiB + 10 MiB
        assert_eq!(bytes_to_gb(536_881_397_760), 500.01);
        assert_eq!(bytes_to_gb(0), 0.0);
    }

    #[test]
    fn test_snapshot_keeps_core_order_and_temperature() {
        let readings = SystemReadings {
            cpu_per_core: vec![12.34, 0.0, 99.96],
            swap_total: 4 * 1024 * 1024 * 1024,
            swap_used: 512 * 1024 * 1024,
            ..Default::default()
        };

        let snapshot = readings.into_snapshot(Some(45.0));
        assert_eq!(snapshot.cpu_percent_per_core, vec![12.3, 0.0, 100.0]);
        assert_eq!(snapshot.swap_total_mb, 4096.0);
        assert_eq!(snapshot.swap_used_mb, 512.0);
        assert_eq!(snapshot.cpu_temp_celsius, Some(45.0));
    }

    #[test]
    fn test_snapshot_wire_names() {
        let json = serde_json::to_value(SystemReadings::default().into_snapshot(None)).unwrap();
        for key in [
            "cpu_percent",
            "mem_total",
            "mem_used",
            "disk_total",
            "disk_used",
            "cpu_temp",
            "swap_used",
            "swap_total",
        ] {
            assert!(json.get(key).is_some(), "missing {}", key);
        }
        assert!(json["cpu_temp"].is_null());
    }

    #[tokio::test]
    async fn test_collect_system_without_sensors() {
        let tools = ExternalTools::none(Duration::from_secs(1));
        let snapshot = collect_system(&tools).await;

        assert_eq!(snapshot.cpu_temp_celsius, None);
        assert!(snapshot.mem_total_mb >= 0.0);
        assert!(snapshot
            .cpu_percent_per_core
            .iter()
            .all(|usage| *usage >= 0.0));
    }
}
