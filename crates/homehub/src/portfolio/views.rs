use super::domain::{Lease, LeaseId, LeaseStatus, Tenant, TenantId, TenantStatus};
use super::query::{LeaseSortKey, RecordQuery, SortState, StatusFilter, TenantSortKey};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct TenantRow {
    pub id: TenantId,
    pub name: String,
    pub email: String,
    pub property: String,
    pub unit: String,
    pub status: TenantStatus,
    pub status_label: &'static str,
}

impl From<&Tenant> for TenantRow {
    fn from(tenant: &Tenant) -> Self {
        Self {
            id: tenant.id,
            name: tenant.name.clone(),
            email: tenant.email.clone(),
            property: tenant.property.clone(),
            unit: tenant.unit.clone(),
            status: tenant.status,
            status_label: tenant.status.label(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LeaseRow {
    pub id: LeaseId,
    pub tenant: String,
    pub property: String,
    pub unit: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub rent: u32,
    pub status: LeaseStatus,
    pub status_label: &'static str,
}

impl From<&Lease> for LeaseRow {
    fn from(lease: &Lease) -> Self {
        Self {
            id: lease.id,
            tenant: lease.tenant.clone(),
            property: lease.property.clone(),
            unit: lease.unit.clone(),
            start_date: lease.start_date,
            end_date: lease.end_date,
            rent: lease.rent,
            status: lease.status,
            status_label: lease.status.label(),
        }
    }
}

/// Envelope returned by the list endpoints and the CLI `--json` output.
#[derive(Debug, Clone, Serialize)]
pub struct QueryResult<K, F, T> {
    pub total: usize,
    pub matched: usize,
    pub search: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<F>,
    pub sort: SortState<K>,
    pub rows: Vec<T>,
}

pub type TenantList = QueryResult<TenantSortKey, (), TenantRow>;
pub type LeaseList = QueryResult<LeaseSortKey, StatusFilter<LeaseStatus>, LeaseRow>;

impl TenantList {
    pub fn evaluate(query: &RecordQuery<Tenant>, tenants: &[Tenant]) -> Self {
        let rows: Vec<TenantRow> = query
            .apply(tenants)
            .into_iter()
            .map(TenantRow::from)
            .collect();
        Self {
            total: tenants.len(),
            matched: rows.len(),
            search: query.search_term().to_string(),
            status: None,
            sort: query.sort_state(),
            rows,
        }
    }
}

impl LeaseList {
    pub fn evaluate(query: &RecordQuery<Lease>, leases: &[Lease]) -> Self {
        let rows: Vec<LeaseRow> = query
            .apply(leases)
            .into_iter()
            .map(LeaseRow::from)
            .collect();
        Self {
            total: leases.len(),
            matched: rows.len(),
            search: query.search_term().to_string(),
            status: Some(*query.status_filter()),
            sort: query.sort_state(),
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::catalog::Portfolio;
    use crate::portfolio::query::{Record, SortDirection};

    #[test]
    fn lease_list_reports_counts_and_applied_query() {
        let portfolio = Portfolio::sample();
        let query = RecordQuery::<Lease>::new()
            .with_status(StatusFilter::Only(LeaseStatus::Active))
            .sorted_by(LeaseSortKey::Rent, SortDirection::Descending);

        let list = LeaseList::evaluate(&query, portfolio.leases());
        assert_eq!(list.total, 5);
        assert_eq!(list.matched, 3);
        assert_eq!(list.rows[0].tenant, "Diana Ross");

        let value = serde_json::to_value(&list).expect("list serializes");
        assert_eq!(value["status"], "active");
        assert_eq!(value["sort"]["key"], "rent");
        assert_eq!(value["sort"]["direction"], "desc");
        assert_eq!(value["rows"][0]["status_label"], "Active");
        assert_eq!(value["rows"][0]["start_date"], "2023-06-01");
    }

    #[test]
    fn tenant_list_omits_status_filter() {
        let portfolio = Portfolio::sample();
        let query = RecordQuery::<Tenant>::new().with_search("brown");

        let list = TenantList::evaluate(&query, portfolio.tenants());
        let value = serde_json::to_value(&list).expect("list serializes");
        assert!(value.get("status").is_none());
        assert_eq!(value["matched"], 1);
        assert_eq!(value["rows"][0]["status_label"], "Late Payment");
        assert_eq!(value["search"], "brown");
    }

    #[test]
    fn default_tenant_order_matches_collection_order() {
        let portfolio = Portfolio::sample();
        let list = TenantList::evaluate(&RecordQuery::new(), portfolio.tenants());
        let ids: Vec<u32> = list.rows.iter().map(|row| row.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert_eq!(list.sort.key, <Tenant as Record>::DEFAULT_SORT_KEY);
    }
}
