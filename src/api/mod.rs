pub mod benchmark;
pub mod metrics;
pub mod telemetry;

pub use benchmark::{benchmark_status, start_benchmark, stop_benchmark};
pub use metrics::get_metrics;
pub use telemetry::{containers, netstats, nodehealth, procs, sysstats};

use actix_web::{web, HttpResponse, Responder};

pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy"
    }))
}

/// 注册所有路由
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/netstats", web::get().to(netstats))
        .route("/api/sysstats", web::get().to(sysstats))
        .route("/api/procs", web::get().to(procs))
        .route("/api/docker", web::get().to(containers))
        .route("/api/nodehealth", web::get().to(nodehealth))
        .route("/api/benchmark", web::post().to(start_benchmark))
        .route("/api/benchmark", web::get().to(benchmark_status))
        .route("/api/benchmark/stop", web::post().to(stop_benchmark))
        .route("/metrics", web::get().to(get_metrics))
        .route("/health", web::get().to(health));
}
