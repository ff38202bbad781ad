//! Tenant and lease records behind the HomeHub list and dashboard screens.

pub mod catalog;
pub mod dashboard;
pub mod domain;
pub mod import;
pub mod query;
pub mod views;

pub use catalog::{Portfolio, PortfolioError};
pub use dashboard::DashboardSummary;
pub use domain::{Lease, LeaseId, LeaseStatus, Tenant, TenantId, TenantStatus};
pub use import::ImportError;
pub use query::{
    LeaseQueryParams, LeaseSortKey, QueryError, Record, RecordQuery, SortDirection, SortState,
    StatusFilter, TenantQueryParams, TenantSortKey,
};
pub use views::{LeaseList, LeaseRow, TenantList, TenantRow};
