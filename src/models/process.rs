use serde::Serialize;

/// 进程采样
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessSample {
    pub pid: u32,
    pub name: String,
    /// CPU 使用率 (百分比)
    pub cpu_percent: f64,
    /// 常驻内存 (MB，一位小数)
    pub mem_mb: f64,
}
