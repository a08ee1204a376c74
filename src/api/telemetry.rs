use actix_web::{web, HttpResponse, Responder};

use crate::metrics::METRICS;
use crate::models::{ContainerListing, InterfaceCounters};
use crate::services::{
    collect_containers, collect_network, collect_node_health, collect_system,
    collect_top_processes,
};
use crate::state::AppState;

pub async fn netstats(data: web::Data<AppState>) -> impl Responder {
    METRICS.observe_request("netstats");

    let stats = InterfaceCounters::into_map(collect_network());
    data.journal.record_json("NETSTATS", &stats);
    HttpResponse::Ok().json(stats)
}

pub async fn sysstats(data: web::Data<AppState>) -> impl Responder {
    METRICS.observe_request("sysstats");

    let snapshot = collect_system(&data.tools).await;
    data.journal.record_json("SYSSTATS", &snapshot);
    HttpResponse::Ok().json(snapshot)
}

pub async fn procs(data: web::Data<AppState>) -> impl Responder {
    METRICS.observe_request("procs");

    let top = collect_top_processes().await;
    data.journal.record_json("PROCS", &top);
    HttpResponse::Ok().json(top)
}

pub async fn containers(data: web::Data<AppState>) -> impl Responder {
    METRICS.observe_request("docker");

    let listing = collect_containers(&data.tools).await;
    match &listing {
        ContainerListing::Unavailable => data.journal.record("DOCKER not available on PATH"),
        ContainerListing::Listed(records) => data.journal.record_json("DOCKER", records),
    }
    HttpResponse::Ok().json(listing.into_records())
}

pub async fn nodehealth(data: web::Data<AppState>) -> impl Responder {
    METRICS.observe_request("nodehealth");

    let health = collect_node_health();
    data.journal.record_json("NODEHEALTH", &health);
    HttpResponse::Ok().json(health)
}
