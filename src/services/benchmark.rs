use chrono::{DateTime, Local};
use log::{debug, info, warn};
use std::io;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;
use sysinfo::{CpuRefreshKind, Pid, ProcessesToUpdate, RefreshKind, Signal, System};

use crate::models::{BenchmarkStatus, StartOutcome, StopOutcome};

/// stress-ng 自身的运行时长上限（秒）
pub const BENCHMARK_TIMEOUT_SECS: u64 = 30;

/// 全局唯一的压测进程槽位，启动时创建后注入 BenchmarkController
pub type BenchmarkSlot = Arc<Mutex<BenchmarkState>>;

#[derive(Debug, Default)]
pub enum BenchmarkState {
    #[default]
    Idle,
    Running {
        child: Child,
        started_at: DateTime<Local>,
    },
}

impl BenchmarkState {
    pub fn shared() -> BenchmarkSlot {
        Arc::new(Mutex::new(BenchmarkState::Idle))
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, BenchmarkState::Idle)
    }

    /// 检查子进程是否已退出，已退出则回到 Idle
    fn reap_if_exited(&mut self) {
        if let BenchmarkState::Running { child, .. } = self {
            match child.try_wait() {
                Ok(None) => return,
                Ok(Some(status)) => {
                    debug!("Benchmark process {} exited on its own: {}", child.id(), status)
                }
                Err(e) => warn!("Failed to poll benchmark process {}: {}", child.id(), e),
            }
            *self = BenchmarkState::Idle;
        }
    }
}

/// 压测命令
#[derive(Debug, Clone)]
pub struct StressTool {
    program: PathBuf,
    args: Vec<String>,
}

impl StressTool {
    pub fn new<I, S>(program: impl Into<PathBuf>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// `stress-ng --cpu <cpus> --timeout 30`
    pub fn stress_ng(program: impl Into<PathBuf>, cpus: usize) -> Self {
        Self::new(
            program,
            [
                "--cpu".to_string(),
                cpus.to_string(),
                "--timeout".to_string(),
                BENCHMARK_TIMEOUT_SECS.to_string(),
            ],
        )
    }

    fn spawn(&self) -> io::Result<Child> {
        Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
    }
}

/// 逻辑 CPU 数
pub fn logical_cpu_count() -> usize {
    let sys = System::new_with_specifics(RefreshKind::nothing().with_cpu(CpuRefreshKind::everything()));
    sys.cpus().len().max(1)
}

/// 管理唯一的压测进程
///
/// 所有操作都在同一把锁内完成，并发 start 只会有一个成功。
pub struct BenchmarkController {
    slot: BenchmarkSlot,
    tool: Option<StressTool>,
}

impl BenchmarkController {
    pub fn new(slot: BenchmarkSlot, tool: Option<StressTool>) -> Self {
        Self { slot, tool }
    }

    fn lock(&self) -> MutexGuard<'_, BenchmarkState> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn start(&self) -> StartOutcome {
        let mut state = self.lock();
        state.reap_if_exited();

        if !state.is_idle() {
            return StartOutcome::AlreadyRunning;
        }

        let Some(tool) = &self.tool else {
            return StartOutcome::Unavailable;
        };

        match tool.spawn() {
            Ok(child) => {
                info!("🚀 Benchmark started (pid {})", child.id());
                *state = BenchmarkState::Running {
                    child,
                    started_at: Local::now(),
                };
                StartOutcome::Started
            }
            Err(e) => {
                warn!("Failed to spawn {}: {}", tool.program.display(), e);
                StartOutcome::Unavailable
            }
        }
    }

    pub fn stop(&self) -> StopOutcome {
        let mut state = self.lock();
        state.reap_if_exited();

        match std::mem::take(&mut *state) {
            BenchmarkState::Idle => StopOutcome::NotRunning,
            BenchmarkState::Running { child, .. } => {
                terminate(child);
                StopOutcome::Terminated
            }
        }
    }

    pub fn status(&self) -> BenchmarkStatus {
        let mut state = self.lock();
        state.reap_if_exited();

        match &*state {
            BenchmarkState::Idle => BenchmarkStatus::idle(),
            BenchmarkState::Running { child, started_at } => BenchmarkStatus {
                running: true,
                pid: Some(child.id()),
                started_at: Some(*started_at),
            },
        }
    }
}

/// 发送 SIGTERM，不等待进程结束
fn terminate(mut child: Child) {
    let pid = child.id();

    if send_term(pid) {
        info!("🛑 Sent SIGTERM to benchmark process {}", pid);
    } else if let Err(e) = child.kill() {
        warn!("Failed to kill benchmark process {}: {}", pid, e);
    }

    // 后台回收，避免僵尸进程
    thread::spawn(move || {
        if let Err(e) = child.wait() {
            debug!("Failed to reap benchmark process {}: {}", pid, e);
        }
    });
}

fn send_term(pid: u32) -> bool {
    let pid = Pid::from_u32(pid);
    let mut sys = System::new();
    sys.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);

    sys.process(pid)
        .and_then(|process| process.kill_with(Signal::Term))
        .unwrap_or(false)
}
