use serde::Serialize;

/// 主机资源快照
///
/// 内存/交换分区单位为 MB（保留一位小数），磁盘单位为 GB（保留两位小数）。
/// 字段名与 dashboard 读取的 `/api/sysstats` 保持一致。
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct SystemSnapshot {
    /// 每个逻辑核心的 CPU 使用率 (0-100)
    #[serde(rename = "cpu_percent")]
    pub cpu_percent_per_core: Vec<f64>,

    #[serde(rename = "mem_total")]
    pub mem_total_mb: f64,

    #[serde(rename = "mem_used")]
    pub mem_used_mb: f64,

    /// 根分区
    #[serde(rename = "disk_total")]
    pub disk_total_gb: f64,

    #[serde(rename = "disk_used")]
    pub disk_used_gb: f64,

    /// 无传感器时为 null
    #[serde(rename = "cpu_temp")]
    pub cpu_temp_celsius: Option<f64>,

    #[serde(rename = "swap_used")]
    pub swap_used_mb: f64,

    #[serde(rename = "swap_total")]
    pub swap_total_mb: f64,
}
