use super::domain::{Lease, LeaseId, LeaseStatus, Tenant, TenantId, TenantStatus};
use chrono::NaiveDate;
use std::collections::HashSet;

/// Read-only tenant and lease collections with unique identifiers.
#[derive(Debug, Clone, Default)]
pub struct Portfolio {
    tenants: Vec<Tenant>,
    leases: Vec<Lease>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortfolioError {
    #[error("tenant id {0} appears more than once")]
    DuplicateTenant(TenantId),
    #[error("lease id {0} appears more than once")]
    DuplicateLease(LeaseId),
}

impl Portfolio {
    pub fn new(tenants: Vec<Tenant>, leases: Vec<Lease>) -> Result<Self, PortfolioError> {
        let mut seen = HashSet::new();
        if let Some(tenant) = tenants.iter().find(|tenant| !seen.insert(tenant.id)) {
            return Err(PortfolioError::DuplicateTenant(tenant.id));
        }

        let mut seen = HashSet::new();
        if let Some(lease) = leases.iter().find(|lease| !seen.insert(lease.id)) {
            return Err(PortfolioError::DuplicateLease(lease.id));
        }

        Ok(Self { tenants, leases })
    }

    /// The five-household portfolio shown on the dashboard before any data is connected.
    pub fn sample() -> Self {
        Self {
            tenants: sample_tenants(),
            leases: sample_leases(),
        }
    }

    pub fn tenants(&self) -> &[Tenant] {
        &self.tenants
    }

    pub fn leases(&self) -> &[Lease] {
        &self.leases
    }

    pub fn tenant(&self, id: TenantId) -> Option<&Tenant> {
        self.tenants.iter().find(|tenant| tenant.id == id)
    }

    pub fn lease(&self, id: LeaseId) -> Option<&Lease> {
        self.leases.iter().find(|lease| lease.id == id)
    }
}

fn sample_tenants() -> Vec<Tenant> {
    vec![
        Tenant::new(
            1,
            "Alice Johnson",
            "alice@example.com",
            "Sunset Apartments",
            "4B",
            TenantStatus::Active,
        ),
        Tenant::new(
            2,
            "Bob Smith",
            "bob@example.com",
            "Oakwood Residences",
            "2A",
            TenantStatus::Active,
        ),
        Tenant::new(
            3,
            "Charlie Brown",
            "charlie@example.com",
            "Riverfront Condos",
            "3C",
            TenantStatus::LatePayment,
        ),
        Tenant::new(
            4,
            "Diana Ross",
            "diana@example.com",
            "Pine Street Houses",
            "1D",
            TenantStatus::Active,
        ),
        Tenant::new(
            5,
            "Edward Norton",
            "edward@example.com",
            "Sunset Apartments",
            "5A",
            TenantStatus::MovingOut,
        ),
    ]
}

fn sample_leases() -> Vec<Lease> {
    vec![
        Lease::new(
            1,
            "Alice Johnson",
            "Sunset Apartments",
            "4B",
            ymd(2023, 1, 1),
            ymd(2024, 1, 1),
            1200,
            LeaseStatus::Active,
        ),
        Lease::new(
            2,
            "Bob Smith",
            "Oakwood Residences",
            "2A",
            ymd(2023, 3, 15),
            ymd(2024, 3, 15),
            1500,
            LeaseStatus::Active,
        ),
        Lease::new(
            3,
            "Charlie Brown",
            "Riverfront Condos",
            "3C",
            ymd(2022, 11, 1),
            ymd(2023, 11, 1),
            1800,
            LeaseStatus::ExpiringSoon,
        ),
        Lease::new(
            4,
            "Diana Ross",
            "Pine Street Houses",
            "1D",
            ymd(2023, 6, 1),
            ymd(2024, 6, 1),
            2000,
            LeaseStatus::Active,
        ),
        Lease::new(
            5,
            "Edward Norton",
            "Sunset Apartments",
            "5A",
            ymd(2022, 9, 1),
            ymd(2023, 9, 1),
            1300,
            LeaseStatus::Expired,
        ),
    ]
}

// Invalid literals collapse to the epoch, which `sample_dates_are_real_calendar_dates` rejects.
fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}
