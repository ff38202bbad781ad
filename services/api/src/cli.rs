use crate::listing::{
    run_dashboard, run_leases, run_tenants, DashboardArgs, LeasesArgs, TenantsArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use homehub::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "HomeHub",
    about = "Serve and query the HomeHub tenant and lease portfolio",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Search and sort the tenant list
    Tenants(TenantsArgs),
    /// Search, filter and sort the lease list
    Leases(LeasesArgs),
    /// Print dashboard statistics for the portfolio
    Dashboard(DashboardArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Tenant CSV export to serve instead of the sample data
    #[arg(long)]
    pub(crate) tenants_csv: Option<PathBuf>,
    /// Lease CSV export to serve instead of the sample data
    #[arg(long)]
    pub(crate) leases_csv: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Tenants(args) => run_tenants(args),
        Command::Leases(args) => run_leases(args),
        Command::Dashboard(args) => run_dashboard(args),
    }
}
