use sysinfo::{ProcessRefreshKind, ProcessesToUpdate, System};

use crate::models::ProcessSample;
use crate::services::system::{bytes_to_mb, sample_interval};

/// `/api/procs` 返回的进程数
pub const TOP_PROCESS_COUNT: usize = 5;

/// 按 CPU 使用率降序排序并截断
///
/// 稳定排序，CPU 相同的进程保持原有顺序。NaN 排在最后。
pub fn rank_top(mut samples: Vec<ProcessSample>, limit: usize) -> Vec<ProcessSample> {
    samples.sort_by(|a, b| cpu_key(b).total_cmp(&cpu_key(a)));
    samples.truncate(limit);
    samples
}

fn cpu_key(sample: &ProcessSample) -> f64 {
    if sample.cpu_percent.is_nan() {
        f64::NEG_INFINITY
    } else {
        sample.cpu_percent
    }
}

/// 采集当前所有进程，按 PID 升序
///
/// 两次刷新之间退出的进程会被丢弃。
pub async fn snapshot_processes() -> Vec<ProcessSample> {
    let refresh = ProcessRefreshKind::nothing().with_cpu().with_memory();

    let mut sys = System::new();
    sys.refresh_processes_specifics(ProcessesToUpdate::All, true, refresh);
    tokio::time::sleep(sample_interval()).await;
    sys.refresh_processes_specifics(ProcessesToUpdate::All, true, refresh);

    let mut samples: Vec<ProcessSample> = sys
        .processes()
        .iter()
        .map(|(pid, process)| ProcessSample {
            pid: pid.as_u32(),
            name: process.name().to_string_lossy().into_owned(),
            cpu_percent: process.cpu_usage() as f64,
            mem_mb: bytes_to_mb(process.memory()),
        })
        .collect();

    samples.sort_by_key(|sample| sample.pid);
    samples
}

pub async fn collect_top_processes() -> Vec<ProcessSample> {
    rank_top(snapshot_processes().await, TOP_PROCESS_COUNT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(pid: u32, cpu: f64) -> ProcessSample {
        ProcessSample {
            pid,
            name: format!("proc-{}", pid),
            cpu_percent: cpu,
            mem_mb: 1.0,
        }
    }

    #[test]
    fn test_rank_top_stable_ties() {
        let samples: Vec<_> = [1.0, 5.0, 5.0, 3.0, 9.0, 0.0, 2.0]
            .iter()
            .enumerate()
            .map(|(i, cpu)| sample(i as u32 + 1, *cpu))
            .collect();

        let top = rank_top(samples, TOP_PROCESS_COUNT);
        assert_eq!(top.len(), 5);

        let pids: Vec<_> = top.iter().map(|s| s.pid).collect();
        assert_eq!(pids, vec![5, 2, 3, 4, 7]);
        assert_eq!(top[0].cpu_percent, 9.0);
        assert_eq!(top[1].cpu_percent, 5.0);
    }

    #[test]
    fn test_rank_top_fewer_than_limit() {
        let top = rank_top(vec![sample(1, 0.5), sample(2, 2.0)], TOP_PROCESS_COUNT);
        let pids: Vec<_> = top.iter().map(|s| s.pid).collect();
        assert_eq!(pids, vec![2, 1]);

        assert!(rank_top(Vec::new(), TOP_PROCESS_COUNT).is_empty());
    }

    #[test]
    fn test_rank_top_nan_sorts_last() {
        let top = rank_top(vec![sample(1, f64::NAN), sample(2, 1.0), sample(3, 0.0)], 3);
        let pids: Vec<_> = top.iter().map(|s| s.pid).collect();
        assert_eq!(pids, vec![2, 3, 1]);
    }

    #[tokio::test]
    async fn test_collect_top_processes_includes_live_processes() {
        let top = collect_top_processes().await;
        assert!(!top.is_empty());
        assert!(top.len() <= TOP_PROCESS_COUNT);
        assert!(top
            .windows(2)
            .all(|pair| pair[0].cpu_percent >= pair[1].cpu_percent));
    }
}
