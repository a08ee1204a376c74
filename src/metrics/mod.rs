use prometheus::{
    register_counter_vec_with_registry, register_gauge_with_registry, CounterVec, Encoder, Gauge,
    Opts, Registry, TextEncoder,
};
use lazy_static::lazy_static;
use std::sync::Arc;

pub struct MetricsRegistry {
    registry: Registry,

    /// 各接口请求数
    pub http_requests: CounterVec,
    /// 压测 start/stop 请求及结果
    pub benchmark_requests: CounterVec,
    /// 外部命令不可用导致的降级次数
    pub source_degraded: CounterVec,
    /// 压测进程是否在运行 (1/0)
    pub benchmark_running: Gauge,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        let registry = Registry::new();

        let http_requests = register_counter_vec_with_registry!(
            Opts::new("netmon_http_requests_total", "Requests served per endpoint"),
            &["endpoint"],
            registry
        )
        .unwrap();

        let benchmark_requests = register_counter_vec_with_registry!(
            Opts::new("netmon_benchmark_requests_total", "Benchmark control requests by outcome"),
            &["action", "outcome"],
            registry
        )
        .unwrap();

        let source_degraded = register_counter_vec_with_registry!(
            Opts::new("netmon_source_degraded_total", "Telemetry results degraded to empty or absent"),
            &["source"],
            registry
        )
        .unwrap();

        let benchmark_running = register_gauge_with_registry!(
            Opts::new("netmon_benchmark_running", "Benchmark process is running (1) or idle (0)"),
            registry
        )
        .unwrap();

        #[cfg(target_os = "linux")]
        {
            let collector = prometheus::process_collector::ProcessCollector::for_self();
            if let Err(e) = registry.register(Box::new(collector)) {
                log::warn!("Failed to register process collector: {}", e);
            }
        }

        Self {
            registry,
            http_requests,
            benchmark_requests,
            source_degraded,
            benchmark_running,
        }
    }

    pub fn observe_request(&self, endpoint: &str) {
        self.http_requests.with_label_values(&[endpoint]).inc();
    }

    pub fn observe_degraded(&self, source: &str) {
        self.source_degraded.with_label_values(&[source]).inc();
    }

    pub fn observe_benchmark(&self, action: &str, outcome: &str, running: bool) {
        self.benchmark_requests
            .with_label_values(&[action, outcome])
            .inc();
        self.set_benchmark_running(running);
    }

    pub fn set_benchmark_running(&self, running: bool) {
        self.benchmark_running.set(if running { 1.0 } else { 0.0 });
    }

    pub fn render(&self) -> Result<String, Box<dyn std::error::Error>> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

impl Default for MetricsRegistry {
    fn default() -> Self {
        Self::new()
    }
}

lazy_static! {
    pub static ref METRICS: Arc<MetricsRegistry> = Arc::new(MetricsRegistry::new());
}
