pub mod api;
pub mod cli;
pub mod config;
pub mod journal;
pub mod metrics;
pub mod models;
pub mod services;
pub mod state;
