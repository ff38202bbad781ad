use super::catalog::Portfolio;
use super::domain::{LeaseStatus, TenantStatus};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Serialize)]
pub struct TenantStatusCount {
    pub status: TenantStatus,
    pub status_label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct LeaseStatusCount {
    pub status: LeaseStatus,
    pub status_label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyOverview {
    pub name: String,
    pub units: usize,
    pub tenants: usize,
    pub active_leases: usize,
}

/// Headline figures for the dashboard landing screen.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub total_properties: usize,
    pub occupancy_rate: f32,
    pub monthly_rent_roll: u64,
    pub tenant_status_counts: Vec<TenantStatusCount>,
    pub lease_status_counts: Vec<LeaseStatusCount>,
    pub properties: Vec<PropertyOverview>,
}

#[derive(Default)]
struct PropertyTally<'a> {
    units: BTreeSet<&'a str>,
    tenants: usize,
    active_leases: usize,
}

impl DashboardSummary {
    pub fn from_portfolio(portfolio: &Portfolio) -> Self {
        let tenants = portfolio.tenants();
        let leases = portfolio.leases();

        let mut tallies: BTreeMap<&str, PropertyTally<'_>> = BTreeMap::new();
        for tenant in tenants {
            let tally = tallies.entry(tenant.property.as_str()).or_default();
            tally.units.insert(tenant.unit.as_str());
            tally.tenants += 1;
        }
        for lease in leases {
            let tally = tallies.entry(lease.property.as_str()).or_default();
            tally.units.insert(lease.unit.as_str());
            if lease.status != LeaseStatus::Expired {
                tally.active_leases += 1;
            }
        }

        let properties: Vec<PropertyOverview> = tallies
            .into_iter()
            .map(|(name, tally)| PropertyOverview {
                name: name.to_string(),
                units: tally.units.len(),
                tenants: tally.tenants,
                active_leases: tally.active_leases,
            })
            .collect();

        let staying = tenants
            .iter()
            .filter(|tenant| tenant.status != TenantStatus::MovingOut)
            .count();

        let monthly_rent_roll = leases
            .iter()
            .filter(|lease| lease.status != LeaseStatus::Expired)
            .map(|lease| u64::from(lease.rent))
            .sum();

        let tenant_status_counts = TenantStatus::ordered()
            .into_iter()
            .map(|status| TenantStatusCount {
                status,
                status_label: status.label(),
                count: tenants.iter().filter(|tenant| tenant.status == status).count(),
            })
            .collect();

        let lease_status_counts = LeaseStatus::ordered()
            .into_iter()
            .map(|status| LeaseStatusCount {
                status,
                status_label: status.label(),
                count: leases.iter().filter(|lease| lease.status == status).count(),
            })
            .collect();

        Self {
            total_properties: properties.len(),
            occupancy_rate: occupancy_rate(staying, tenants.len()),
            monthly_rent_roll,
            tenant_status_counts,
            lease_status_counts,
            properties,
        }
    }
}

fn occupancy_rate(staying: usize, total: usize) -> f32 {
    if total == 0 {
        return 0.0;
    }
    let pct = staying as f32 / total as f32 * 100.0;
    (pct * 10.0).round() / 10.0
}
