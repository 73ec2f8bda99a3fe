pub mod algorithms;
pub mod config;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod models;
pub mod orchestrator;
pub mod output;
pub mod state;
