use std::env;
use sysinfo::{CpuRefreshKind, MemoryRefreshKind, RefreshKind, System};

use crate::models::NodeHealth;

pub fn collect_node_health() -> NodeHealth {
    let sys = System::new_with_specifics(
        RefreshKind::nothing()
            .with_cpu(CpuRefreshKind::everything())
            .with_memory(MemoryRefreshKind::nothing().with_ram()),
    );
    let load = System::load_average();

    NodeHealth {
        uptime: System::uptime(),
        freemem: sys.available_memory(),
        totalmem: sys.total_memory(),
        cpus: sys.cpus().len(),
        hostname: System::host_name(),
        platform: env::consts::OS,
        arch: env::consts::ARCH,
        user: env::var("USER").or_else(|_| env::var("USERNAME")).ok(),
        loadavg: [load.one, load.five, load.fifteen],
    }
}
