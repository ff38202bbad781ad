use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeaseId(pub u32);

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for LeaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TenantStatus {
    Active,
    LatePayment,
    MovingOut,
}

impl TenantStatus {
    pub const fn ordered() -> [Self; 3] {
        [Self::Active, Self::LatePayment, Self::MovingOut]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::LatePayment => "Late Payment",
            Self::MovingOut => "Moving Out",
        }
    }

    const fn slug(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::LatePayment => "late_payment",
            Self::MovingOut => "moving_out",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaseStatus {
    Active,
    ExpiringSoon,
    Expired,
}

impl LeaseStatus {
    pub const fn ordered() -> [Self; 3] {
        [Self::Active, Self::ExpiringSoon, Self::Expired]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::ExpiringSoon => "Expiring Soon",
            Self::Expired => "Expired",
        }
    }

    const fn slug(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::ExpiringSoon => "expiring_soon",
            Self::Expired => "expired",
        }
    }
}

/// Raised when a status cell or query parameter names no known status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} status '{value}'")]
pub struct UnknownStatus {
    pub kind: &'static str,
    pub value: String,
}

fn matches_status_name(raw: &str, label: &str, slug: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.eq_ignore_ascii_case(label) || trimmed.eq_ignore_ascii_case(slug)
}

impl FromStr for TenantStatus {
    type Err = UnknownStatus;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ordered()
            .into_iter()
            .find(|status| matches_status_name(raw, status.label(), status.slug()))
            .ok_or_else(|| UnknownStatus {
                kind: "tenant",
                value: raw.to_string(),
            })
    }
}

impl FromStr for LeaseStatus {
    type Err = UnknownStatus;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ordered()
            .into_iter()
            .find(|status| matches_status_name(raw, status.label(), status.slug()))
            .ok_or_else(|| UnknownStatus {
                kind: "lease",
                value: raw.to_string(),
            })
    }
}

impl fmt::Display for TenantStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for LeaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A resident listed on the tenants screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    pub id: TenantId,
    pub name: String,
    pub email: String,
    pub property: String,
    pub unit: String,
    pub status: TenantStatus,
}

impl Tenant {
    pub fn new(
        id: u32,
        name: impl Into<String>,
        email: impl Into<String>,
        property: impl Into<String>,
        unit: impl Into<String>,
        status: TenantStatus,
    ) -> Self {
        Self {
            id: TenantId(id),
            name: name.into(),
            email: email.into(),
            property: property.into(),
            unit: unit.into(),
            status,
        }
    }
}

/// A lease agreement listed on the leases screen. Rent is in whole currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lease {
    pub id: LeaseId,
    pub tenant: String,
    pub property: String,
    pub unit: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub rent: u32,
    pub status: LeaseStatus,
}

impl Lease {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: u32,
        tenant: impl Into<String>,
        property: impl Into<String>,
        unit: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        rent: u32,
        status: LeaseStatus,
    ) -> Self {
        Self {
            id: LeaseId(id),
            tenant: tenant.into(),
            property: property.into(),
            unit: unit.into(),
            start_date,
            end_date,
            rent,
            status,
        }
    }
}
