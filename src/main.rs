use actix_web::{web, App, HttpServer};
use clap::Parser;

use netmon::api;
use netmon::cli::CommandArgs;
use netmon::config::ServiceConfig;
use netmon::state::{new_state, AppState};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = CommandArgs::parse();
    let bind_address = format!("{}:{}", args.address, args.port);

    let config = ServiceConfig::load(&args.config);
    let state = new_state(config);

    print_banner(&args, &state);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .configure(api::routes)
    })
    .bind(&bind_address)?
    .run()
    .await?;

    Ok(())
}

fn print_banner(args: &CommandArgs, state: &AppState) {
    let availability = |found: bool| if found { "available" } else { "not found" };

    println!("╔═══════════════════════════════════════════════════════════╗");
    println!("║      NetMon v{:<45}║", env!("CARGO_PKG_VERSION"));
    println!("║      Host Telemetry & CPU Benchmark Control               ║");
    println!("╚═══════════════════════════════════════════════════════════╝");
    println!();
    println!("🚀 Server starting on http://{}:{}", args.address, args.port);
    println!("📝 Logging to {} (config: {})", state.journal.path().display(), args.config.display());
    println!();
    println!("📋 Available endpoints:");
    println!("  GET    /api/netstats          - Network interface counters");
    println!("  GET    /api/sysstats          - CPU, memory, disk, swap, temperature");
    println!("  GET    /api/procs             - Top 5 processes by CPU");
    println!("  GET    /api/docker            - Running containers");
    println!("  GET    /api/nodehealth        - Uptime, load and host info");
    println!("  POST   /api/benchmark         - Start CPU benchmark");
    println!("  POST   /api/benchmark/stop    - Stop CPU benchmark");
    println!("  GET    /api/benchmark         - Benchmark status");
    println!("  GET    /metrics               - Prometheus metrics");
    println!("  GET    /health                - Health check");
    println!();
    println!("💡 External tools:");
    println!("  • docker     {}", availability(state.tools.docker.is_some()));
    println!("  • sensors    {}", availability(state.tools.sensors.is_some()));
    println!("  • stress-ng  {}", availability(state.tools.stress_ng.is_some()));
    println!("  (timeout {:?} per call)", state.config.tool_timeout());
    println!("═══════════════════════════════════════════════════════════");
}
