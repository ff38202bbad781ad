use crate::infra::load_portfolio;
use clap::Args;
use homehub::config::AppConfig;
use homehub::error::AppError;
use homehub::portfolio::{
    DashboardSummary, Lease, LeaseList, LeaseQueryParams, Portfolio, RecordQuery, Tenant,
    TenantList, TenantQueryParams,
};
use serde::Serialize;
use std::fmt::Write;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct TenantsArgs {
    /// Case-insensitive text matched against name, email, property and unit
    #[arg(long)]
    pub(crate) search: Option<String>,
    /// Column to sort by (id, name, email, property, unit, status)
    #[arg(long)]
    pub(crate) sort: Option<String>,
    /// asc or desc
    #[arg(long)]
    pub(crate) direction: Option<String>,
    /// Tenant CSV export to query instead of the sample data
    #[arg(long)]
    pub(crate) tenants_csv: Option<PathBuf>,
    /// Print the result as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct LeasesArgs {
    /// Case-insensitive text matched against tenant, property and unit
    #[arg(long)]
    pub(crate) search: Option<String>,
    /// All, Active, Expiring Soon or Expired
    #[arg(long)]
    pub(crate) status: Option<String>,
    /// Column to sort by (id, tenant, property, unit, start_date, end_date, rent, status)
    #[arg(long)]
    pub(crate) sort: Option<String>,
    /// asc or desc
    #[arg(long)]
    pub(crate) direction: Option<String>,
    /// Lease CSV export to query instead of the sample data
    #[arg(long)]
    pub(crate) leases_csv: Option<PathBuf>,
    /// Print the result as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DashboardArgs {
    #[arg(long)]
    pub(crate) tenants_csv: Option<PathBuf>,
    #[arg(long)]
    pub(crate) leases_csv: Option<PathBuf>,
    /// Print the summary as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

fn cli_portfolio(
    tenants_csv: Option<PathBuf>,
    leases_csv: Option<PathBuf>,
) -> Result<Portfolio, AppError> {
    let config = AppConfig::load()?;
    Ok(load_portfolio(&config.data, tenants_csv, leases_csv)?)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub(crate) fn run_tenants(args: TenantsArgs) -> Result<(), AppError> {
    let TenantsArgs {
        search,
        sort,
        direction,
        tenants_csv,
        json,
    } = args;

    let query = RecordQuery::<Tenant>::try_from(TenantQueryParams {
        search,
        sort,
        direction,
    })?;
    let portfolio = cli_portfolio(tenants_csv, None)?;
    let list = TenantList::evaluate(&query, portfolio.tenants());

    if json {
        return print_json(&list);
    }
    print!("{}", render_tenants(&list));
    Ok(())
}

pub(crate) fn run_leases(args: LeasesArgs) -> Result<(), AppError> {
    let LeasesArgs {
        search,
        status,
        sort,
        direction,
        leases_csv,
        json,
    } = args;

    let query = RecordQuery::<Lease>::try_from(LeaseQueryParams {
        search,
        status,
        sort,
        direction,
    })?;
    let portfolio = cli_portfolio(None, leases_csv)?;
    let list = LeaseList::evaluate(&query, portfolio.leases());

    if json {
        return print_json(&list);
    }
    print!("{}", render_leases(&list));
    Ok(())
}

pub(crate) fn run_dashboard(args: DashboardArgs) -> Result<(), AppError> {
    let portfolio = cli_portfolio(args.tenants_csv, args.leases_csv)?;
    let summary = DashboardSummary::from_portfolio(&portfolio);

    if args.json {
        return print_json(&summary);
    }
    print!("{}", render_dashboard(&summary));
    Ok(())
}

/// Left-aligned columns padded to the widest cell.
fn render_table(header: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = header.iter().map(|cell| cell.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let mut push_line = |cells: Vec<&str>| {
        let line: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<w$}", cell, w = *width))
            .collect();
        let _ = writeln!(out, "{}", line.join("  ").trim_end());
    };

    push_line(header.to_vec());
    for row in rows {
        push_line(row.iter().map(String::as_str).collect());
    }
    out
}

fn sort_caption(key: &str, direction: &str, matched: usize, total: usize) -> String {
    format!("{matched} of {total} shown, sorted by {key} {direction}\n")
}

pub(crate) fn render_tenants(list: &TenantList) -> String {
    let rows: Vec<Vec<String>> = list
        .rows
        .iter()
        .map(|row| {
            vec![
                row.name.clone(),
                row.email.clone(),
                row.property.clone(),
                row.unit.clone(),
                row.status_label.to_string(),
            ]
        })
        .collect();

    let mut out = render_table(&["Name", "Email", "Property", "Unit", "Status"], &rows);
    out.push_str(&sort_caption(
        list.sort.key.as_str(),
        list.sort.direction.as_str(),
        list.matched,
        list.total,
    ));
    out
}

pub(crate) fn render_leases(list: &LeaseList) -> String {
    let rows: Vec<Vec<String>> = list
        .rows
        .iter()
        .map(|row| {
            vec![
                row.tenant.clone(),
                row.property.clone(),
                row.unit.clone(),
                row.start_date.to_string(),
                row.end_date.to_string(),
                format!("${}", row.rent),
                row.status_label.to_string(),
            ]
        })
        .collect();

    let mut out = render_table(
        &[
            "Tenant",
            "Property",
            "Unit",
            "Start Date",
            "End Date",
            "Rent",
            "Status",
        ],
        &rows,
    );
    out.push_str(&sort_caption(
        list.sort.key.as_str(),
        list.sort.direction.as_str(),
        list.matched,
        list.total,
    ));
    out
}

pub(crate) fn render_dashboard(summary: &DashboardSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Portfolio dashboard");
    let _ = writeln!(out, "- Total properties: {}", summary.total_properties);
    let _ = writeln!(out, "- Occupancy rate: {:.1}%", summary.occupancy_rate);
    let _ = writeln!(out, "- Monthly rent roll: ${}", summary.monthly_rent_roll);

    let _ = writeln!(out, "\nTenants by status");
    for entry in &summary.tenant_status_counts {
        let _ = writeln!(out, "- {}: {}", entry.status_label, entry.count);
    }

    let _ = writeln!(out, "\nLeases by status");
    for entry in &summary.lease_status_counts {
        let _ = writeln!(out, "- {}: {}", entry.status_label, entry.count);
    }

    let _ = writeln!(out, "\nProperties overview");
    for property in &summary.properties {
        let _ = writeln!(
            out,
            "- {}: {} units, {} tenants, {} current leases",
            property.name, property.units, property.tenants, property.active_leases
        );
    }
    out
}
