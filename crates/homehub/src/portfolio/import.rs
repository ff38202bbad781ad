//! CSV loaders for tenant and lease exports.
//!
//! Tenants: `id,name,email,property,unit,status`.
//! Leases: `id,tenant,property,unit,start_date,end_date,rent,status`.
//! Status cells accept display labels ("Late Payment") or snake_case names.

use super::catalog::{Portfolio, PortfolioError};
use super::domain::{Lease, LeaseId, LeaseStatus, Tenant, TenantId, TenantStatus};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to read portfolio export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid portfolio CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("portfolio export is inconsistent: {0}")]
    Portfolio(#[from] PortfolioError),
}

#[derive(Debug, Deserialize)]
struct TenantRow {
    id: u32,
    name: String,
    email: String,
    property: String,
    unit: String,
    #[serde(deserialize_with = "from_text")]
    status: TenantStatus,
}

#[derive(Debug, Deserialize)]
struct LeaseRow {
    id: u32,
    tenant: String,
    property: String,
    unit: String,
    #[serde(deserialize_with = "iso_date")]
    start_date: NaiveDate,
    #[serde(deserialize_with = "iso_date")]
    end_date: NaiveDate,
    rent: u32,
    #[serde(deserialize_with = "from_text")]
    status: LeaseStatus,
}

fn from_text<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(serde::de::Error::custom)
}

fn iso_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| serde::de::Error::custom(format!("'{raw}' is not YYYY-MM-DD ({err})")))
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
}

pub fn tenants_from_reader<R: Read>(reader: R) -> Result<Vec<Tenant>, ImportError> {
    let mut tenants = Vec::new();
    for row in csv_reader(reader).deserialize::<TenantRow>() {
        let row = row?;
        tenants.push(Tenant {
            id: TenantId(row.id),
            name: row.name,
            email: row.email,
            property: row.property,
            unit: row.unit,
            status: row.status,
        });
    }
    Ok(tenants)
}

pub fn leases_from_reader<R: Read>(reader: R) -> Result<Vec<Lease>, ImportError> {
    let mut leases = Vec::new();
    for row in csv_reader(reader).deserialize::<LeaseRow>() {
        let row = row?;
        leases.push(Lease {
            id: LeaseId(row.id),
            tenant: row.tenant,
            property: row.property,
            unit: row.unit,
            start_date: row.start_date,
            end_date: row.end_date,
            rent: row.rent,
            status: row.status,
        });
    }
    Ok(leases)
}

pub fn tenants_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Tenant>, ImportError> {
    let file = std::fs::File::open(path)?;
    tenants_from_reader(file)
}

pub fn leases_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Lease>, ImportError> {
    let file = std::fs::File::open(path)?;
    leases_from_reader(file)
}

impl Portfolio {
    /// Loads whichever exports are given; a missing side falls back to the sample records.
    pub fn from_csv_paths(
        tenants_csv: Option<&Path>,
        leases_csv: Option<&Path>,
    ) -> Result<Self, ImportError> {
        let sample = Portfolio::sample();
        let tenants = match tenants_csv {
            Some(path) => tenants_from_path(path)?,
            None => sample.tenants().to_vec(),
        };
        let leases = match leases_csv {
            Some(path) => leases_from_path(path)?,
            None => sample.leases().to_vec(),
        };

        let portfolio = Portfolio::new(tenants, leases)?;
        let source = |path: Option<&Path>| {
            path.map_or_else(|| "sample".to_string(), |path| path.display().to_string())
        };
        info!(
            tenants = portfolio.tenants().len(),
            leases = portfolio.leases().len(),
            tenants_source = %source(tenants_csv),
            leases_source = %source(leases_csv),
            "portfolio loaded"
        );
        Ok(portfolio)
    }
}
