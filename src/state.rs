use std::sync::Arc;

use crate::config::ServiceConfig;
use crate::journal::Journal;
use crate::services::benchmark::logical_cpu_count;
use crate::services::{BenchmarkController, BenchmarkState, ExternalTools, StressTool};

pub struct AppStateInner {
    pub config: ServiceConfig,
    pub tools: ExternalTools,
    pub benchmark: BenchmarkController,
    pub journal: Journal,
}

pub type AppState = Arc<AppStateInner>;

pub fn new_state(config: ServiceConfig) -> AppState {
    let tools = ExternalTools::discover(config.tool_timeout());
    new_state_with_tools(config, tools)
}

pub fn new_state_with_tools(config: ServiceConfig, tools: ExternalTools) -> AppState {
    let stress_tool = tools
        .stress_ng
        .clone()
        .map(|path| StressTool::stress_ng(path, logical_cpu_count()));

    Arc::new(AppStateInner {
        journal: Journal::new(config.log_file.clone()),
        benchmark: BenchmarkController::new(BenchmarkState::shared(), stress_tool),
        config,
        tools,
    })
}
