//! CLI module for the study planner
//!
//! - `serve`: HTTP API server
//! - `plan`: run the allocation engine on a request file

pub mod plan;
pub mod serve;

use clap::{Parser, Subcommand};

/// Study planner - weekly study-hour allocation
#[derive(Parser)]
#[command(name = "study-planner")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Generate a schedule from a JSON request and print it
    Plan(plan::PlanArgs),
}
