use serde::Serialize;

/// 节点健康信息，字段与 dashboard 的 nodehealth 面板对应
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeHealth {
    /// 开机时长 (秒)
    pub uptime: u64,
    /// 可用内存 (字节)
    pub freemem: u64,
    /// 总内存 (字节)
    pub totalmem: u64,
    /// 逻辑 CPU 数
    pub cpus: usize,
    pub hostname: Option<String>,
    pub platform: &'static str,
    pub arch: &'static str,
    pub user: Option<String>,
    /// 1/5/15 分钟负载
    pub loadavg: [f64; 3],
}
