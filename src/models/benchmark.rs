use chrono::{DateTime, Local};
use serde::Serialize;

/// 启动压测的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    /// 已有压测进程在运行
    AlreadyRunning,
    /// 未找到 stress-ng 或无法启动
    Unavailable,
}

impl StartOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            StartOutcome::Started => "started",
            StartOutcome::AlreadyRunning => "already running",
            StartOutcome::Unavailable => "unavailable",
        }
    }
}

/// 停止压测的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    Terminated,
    /// 空闲，或进程已自行退出
    NotRunning,
}

impl StopOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            StopOutcome::Terminated => "terminated",
            StopOutcome::NotRunning => "not running",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkStatus {
    pub running: bool,
    pub pid: Option<u32>,
    pub started_at: Option<DateTime<Local>>,
}

impl BenchmarkStatus {
    pub fn idle() -> Self {
        Self {
            running: false,
            pid: None,
            started_at: None,
        }
    }
}
