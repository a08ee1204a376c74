use actix_web::{web, HttpResponse, Responder};

use crate::metrics::METRICS;
use crate::models::{StartOutcome, StopOutcome};
use crate::state::AppState;

pub async fn start_benchmark(data: web::Data<AppState>) -> impl Responder {
    METRICS.observe_request("benchmark_start");

    let outcome = data.benchmark.start();
    METRICS.observe_benchmark("start", outcome.as_str(), outcome != StartOutcome::Unavailable);
    data.journal.record(format!("BENCHMARK start {}", outcome.as_str()));

    let body = serde_json::json!({ "status": outcome.as_str() });
    match outcome {
        StartOutcome::Started => HttpResponse::Ok().json(body),
        StartOutcome::AlreadyRunning => HttpResponse::Conflict().json(body),
        StartOutcome::Unavailable => HttpResponse::NotImplemented().json(body),
    }
}

pub async fn stop_benchmark(data: web::Data<AppState>) -> impl Responder {
    METRICS.observe_request("benchmark_stop");

    let outcome = data.benchmark.stop();
    METRICS.observe_benchmark("stop", outcome.as_str(), false);
    data.journal.record(format!("BENCHMARK stop {}", outcome.as_str()));

    let body = serde_json::json!({ "status": outcome.as_str() });
    match outcome {
        StopOutcome::Terminated => HttpResponse::Ok().json(body),
        StopOutcome::NotRunning => HttpResponse::NotFound().json(body),
    }
}

pub async fn benchmark_status(data: web::Data<AppState>) -> impl Responder {
    METRICS.observe_request("benchmark_status");

    let status = data.benchmark.status();
    METRICS.set_benchmark_running(status.running);
    HttpResponse::Ok().json(status)
}
