mod cli;
mod configuration;
mod report;

use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    shared_kernel::tracing::config_telemetry("boost_planner")?;
    let result = cli::Cli::parse().run().await;
    shared_kernel::tracing::shutdown_global_tracer_provider();
    result
}
