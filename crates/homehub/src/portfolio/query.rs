//! Search, status filtering and column sorting shared by the tenant and lease lists.
//!
//! A [`RecordQuery`] is evaluated in a fixed order: status filter, then the
//! case-insensitive text filter, then a stable sort on the selected column.
//! Evaluation borrows the input collection and returns a subset of it.

use super::domain::{Lease, LeaseStatus, Tenant, UnknownStatus};
use serde::{Deserialize, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// A row type that can be searched and sorted by [`RecordQuery`].
pub trait Record {
    type SortKey: Copy + Eq + fmt::Debug;
    /// `()` for records that offer no status filter.
    type StatusFilter: Clone + Default + fmt::Debug;

    const KIND: &'static str;
    const DEFAULT_SORT_KEY: Self::SortKey;

    /// Text fields the search term is matched against.
    fn search_fields(&self) -> Vec<&str>;

    fn compare_by(&self, other: &Self, key: Self::SortKey) -> Ordering;

    fn passes_status(&self, _filter: &Self::StatusFilter) -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    pub const fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }

    /// Orients an ascending comparison. `Equal` stays `Equal`, so ties keep input order.
    pub fn orient(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

impl FromStr for SortDirection {
    type Err = QueryError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            _ => Err(QueryError::UnknownDirection(raw.to_string())),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Selected column plus direction, as driven by clicks on a column header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortState<K> {
    pub key: K,
    pub direction: SortDirection,
}

impl<K: Copy + Eq> SortState<K> {
    pub fn new(key: K) -> Self {
        Self {
            key,
            direction: SortDirection::Ascending,
        }
    }

    /// Same column flips the direction; a different column starts ascending.
    pub fn toggle(&mut self, key: K) {
        if self.key == key {
            self.direction = self.direction.toggled();
        } else {
            self.key = key;
            self.direction = SortDirection::Ascending;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter<S> {
    All,
    Only(S),
}

impl<S> Default for StatusFilter<S> {
    fn default() -> Self {
        Self::All
    }
}

impl<S: PartialEq> StatusFilter<S> {
    pub fn matches(&self, status: &S) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == status,
        }
    }
}

impl<S: FromStr<Err = UnknownStatus>> FromStr for StatusFilter<S> {
    type Err = UnknownStatus;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        raw.parse().map(Self::Only)
    }
}

impl<S: Serialize> Serialize for StatusFilter<S> {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        match self {
            Self::All => serializer.serialize_str("all"),
            Self::Only(status) => status.serialize(serializer),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TenantSortKey {
    Id,
    Name,
    Email,
    Property,
    Unit,
    Status,
}

impl TenantSortKey {
    pub const fn all() -> [Self; 6] {
        [
            Self::Id,
            Self::Name,
            Self::Email,
            Self::Property,
            Self::Unit,
            Self::Status,
        ]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Email => "email",
            Self::Property => "property",
            Self::Unit => "unit",
            Self::Status => "status",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaseSortKey {
    Id,
    Tenant,
    Property,
    Unit,
    StartDate,
    EndDate,
    Rent,
    Status,
}

impl LeaseSortKey {
    pub const fn all() -> [Self; 8] {
        [
            Self::Id,
            Self::Tenant,
            Self::Property,
            Self::Unit,
            Self::StartDate,
            Self::EndDate,
            Self::Rent,
            Self::Status,
        ]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Tenant => "tenant",
            Self::Property => "property",
            Self::Unit => "unit",
            Self::StartDate => "start_date",
            Self::EndDate => "end_date",
            Self::Rent => "rent",
            Self::Status => "status",
        }
    }
}

/// Folds `start_date`, `startDate` and `Start-Date` to the same spelling.
fn column_name(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|ch| *ch != '_' && *ch != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

impl FromStr for TenantSortKey {
    type Err = QueryError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let wanted = column_name(raw);
        Self::all()
            .into_iter()
            .find(|key| column_name(key.as_str()) == wanted)
            .ok_or_else(|| QueryError::UnknownSortKey {
                record: Tenant::KIND,
                key: raw.to_string(),
            })
    }
}

impl FromStr for LeaseSortKey {
    type Err = QueryError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let wanted = column_name(raw);
        Self::all()
            .into_iter()
            .find(|key| column_name(key.as_str()) == wanted)
            .ok_or_else(|| QueryError::UnknownSortKey {
                record: Lease::KIND,
                key: raw.to_string(),
            })
    }
}

impl Record for Tenant {
    type SortKey = TenantSortKey;
    type StatusFilter = ();

    const KIND: &'static str = "tenant";
    const DEFAULT_SORT_KEY: TenantSortKey = TenantSortKey::Id;

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.email.as_str(),
            self.property.as_str(),
            self.unit.as_str(),
        ]
    }

    fn compare_by(&self, other: &Self, key: TenantSortKey) -> Ordering {
        match key {
            TenantSortKey::Id => self.id.cmp(&other.id),
            TenantSortKey::Name => self.name.cmp(&other.name),
            TenantSortKey::Email => self.email.cmp(&other.email),
            TenantSortKey::Property => self.property.cmp(&other.property),
            TenantSortKey::Unit => self.unit.cmp(&other.unit),
            TenantSortKey::Status => self.status.label().cmp(other.status.label()),
        }
    }
}

impl Record for Lease {
    type SortKey = LeaseSortKey;
    type StatusFilter = StatusFilter<LeaseStatus>;

    const KIND: &'static str = "lease";
    const DEFAULT_SORT_KEY: LeaseSortKey = LeaseSortKey::StartDate;

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.tenant.as_str(),
            self.property.as_str(),
            self.unit.as_str(),
        ]
    }

    fn compare_by(&self, other: &Self, key: LeaseSortKey) -> Ordering {
        match key {
            LeaseSortKey::Id => self.id.cmp(&other.id),
            LeaseSortKey::Tenant => self.tenant.cmp(&other.tenant),
            LeaseSortKey::Property => self.property.cmp(&other.property),
            LeaseSortKey::Unit => self.unit.cmp(&other.unit),
            LeaseSortKey::StartDate => self.start_date.cmp(&other.start_date),
            LeaseSortKey::EndDate => self.end_date.cmp(&other.end_date),
            LeaseSortKey::Rent => self.rent.cmp(&other.rent),
            LeaseSortKey::Status => self.status.label().cmp(other.status.label()),
        }
    }

    fn passes_status(&self, filter: &StatusFilter<LeaseStatus>) -> bool {
        filter.matches(&self.status)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("unknown {record} sort key '{key}'")]
    UnknownSortKey { record: &'static str, key: String },
    #[error("unknown sort direction '{0}', expected asc or desc")]
    UnknownDirection(String),
    #[error(transparent)]
    UnknownStatus(#[from] UnknownStatus),
}

/// Search term, status filter and sort selection for one list screen.
#[derive(Debug, Clone)]
pub struct RecordQuery<R: Record> {
    search: String,
    folded_search: String,
    status: R::StatusFilter,
    sort: SortState<R::SortKey>,
}

impl<R: Record> Default for RecordQuery<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> RecordQuery<R> {
    pub fn new() -> Self {
        Self {
            search: String::new(),
            folded_search: String::new(),
            status: R::StatusFilter::default(),
            sort: SortState::new(R::DEFAULT_SORT_KEY),
        }
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.set_search(term);
        self
    }

    pub fn with_status(mut self, filter: R::StatusFilter) -> Self {
        self.status = filter;
        self
    }

    pub fn sorted_by(mut self, key: R::SortKey, direction: SortDirection) -> Self {
        self.sort = SortState { key, direction };
        self
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
        self.folded_search = self.search.to_lowercase();
    }

    pub fn toggle_sort(&mut self, key: R::SortKey) {
        self.sort.toggle(key);
    }

    pub fn search_term(&self) -> &str {
        &self.search
    }

    pub fn status_filter(&self) -> &R::StatusFilter {
        &self.status
    }

    pub fn sort_state(&self) -> SortState<R::SortKey> {
        self.sort
    }

    /// Status filter first, then substring containment over the searchable fields.
    pub fn matches(&self, record: &R) -> bool {
        if !record.passes_status(&self.status) {
            return false;
        }
        if self.folded_search.is_empty() {
            return true;
        }
        record
            .search_fields()
            .into_iter()
            .any(|field| field.to_lowercase().contains(&self.folded_search))
    }

    pub fn filter<'a>(&self, records: &'a [R]) -> Vec<&'a R> {
        records.iter().filter(|record| self.matches(record)).collect()
    }

    /// Stable sort on the selected column.
    pub fn sort(&self, rows: &mut [&R]) {
        let SortState { key, direction } = self.sort;
        rows.sort_by(|a, b| direction.orient(a.compare_by(b, key)));
    }

    pub fn apply<'a>(&self, records: &'a [R]) -> Vec<&'a R> {
        let mut rows = self.filter(records);
        self.sort(&mut rows);

        debug!(
            record = R::KIND,
            search = %self.search,
            status = ?self.status,
            sort_key = ?self.sort.key,
            direction = %self.sort.direction,
            matched = rows.len(),
            total = records.len(),
            "record query evaluated"
        );

        rows
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

/// Raw tenant list parameters as they arrive from a query string or CLI flags.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TenantQueryParams {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub sort: Option<String>,
    #[serde(default)]
    pub direction: Option<String>,
}

impl TryFrom<TenantQueryParams> for RecordQuery<Tenant> {
    type Error = QueryError;

    fn try_from(params: TenantQueryParams) -> Result<Self, Self::Error> {
        let key = non_blank(params.sort.as_deref())
            .map(str::parse::<TenantSortKey>)
            .transpose()?
            .unwrap_or(Tenant::DEFAULT_SORT_KEY);
        let direction = non_blank(params.direction.as_deref())
            .map(str::parse::<SortDirection>)
            .transpose()?
            .unwrap_or_default();

        Ok(Self::new()
            .with_search(params.search.unwrap_or_default())
            .sorted_by(key, direction))
    }
}

/// Raw lease list parameters; `status` accepts `All` or a lease status.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeaseQueryParams {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub sort: Option<String>,
    #[serde(default)]
    pub direction: Option<String>,
}

impl TryFrom<LeaseQueryParams> for RecordQuery<Lease> {
    type Error = QueryError;

    fn try_from(params: LeaseQueryParams) -> Result<Self, Self::Error> {
        let status = non_blank(params.status.as_deref())
            .map(str::parse::<StatusFilter<LeaseStatus>>)
            .transpose()?
            .unwrap_or_default();
        let key = non_blank(params.sort.as_deref())
            .map(str::parse::<LeaseSortKey>)
            .transpose()?
            .unwrap_or(Lease::DEFAULT_SORT_KEY);
        let direction = non_blank(params.direction.as_deref())
            .map(str::parse::<SortDirection>)
            .transpose()?
            .unwrap_or_default();

        Ok(Self::new()
            .with_search(params.search.unwrap_or_default())
            .with_status(status)
            .sorted_by(key, direction))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::domain::TenantStatus;
    use chrono::NaiveDate;

    fn tenant(id: u32, name: &str, property: &str, unit: &str) -> Tenant {
        Tenant::new(
            id,
            name,
            format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
            property,
            unit,
            TenantStatus::Active,
        )
    }

    fn lease(id: u32, tenant: &str, rent: u32, status: LeaseStatus) -> Lease {
        let start = NaiveDate::from_ymd_opt(2023, 1, id).expect("valid start");
        let end = NaiveDate::from_ymd_opt(2024, 1, id).expect("valid end");
        Lease::new(id, tenant, "Harbor Lofts", format!("{id}A"), start, end, rent, status)
    }

    fn ids<R>(rows: &[&R], id: impl Fn(&R) -> u32) -> Vec<u32> {
        rows.iter().map(|row| id(*row)).collect()
    }

    #[test]
    fn empty_search_keeps_every_record() {
        let tenants = vec![
            tenant(1, "Ana Ruiz", "Harbor Lofts", "1A"),
            tenant(2, "Ben Ode", "Maple Court", "2B"),
        ];
        let rows = RecordQuery::<Tenant>::new().apply(&tenants);
        assert_eq!(ids(&rows, |t| t.id.0), vec![1, 2]);
    }

    #[test]
    fn search_is_case_insensitive_substring_over_whitelisted_fields() {
        let mut tenants = vec![
            tenant(1, "Ana Ruiz", "Harbor Lofts", "1A"),
            tenant(2, "Ben Ode", "Maple Court", "2B"),
            tenant(3, "Cleo Hart", "Harbor Lofts", "3C"),
        ];
        tenants[1].email = "ben@harbor-mail.test".to_string();

        let rows = RecordQuery::<Tenant>::new()
            .with_search("HARBOR")
            .apply(&tenants);
        assert_eq!(ids(&rows, |t| t.id.0), vec![1, 2, 3]);

        let rows = RecordQuery::<Tenant>::new().with_search("2b").apply(&tenants);
        assert_eq!(ids(&rows, |t| t.id.0), vec![2]);

        let rows = RecordQuery::<Tenant>::new()
            .with_search("rt lo")
            .apply(&tenants);
        assert_eq!(ids(&rows, |t| t.id.0), Vec::<u32>::new());
    }

    #[test]
    fn tenant_status_is_not_searchable() {
        let tenants = vec![tenant(1, "Ana Ruiz", "Harbor Lofts", "1A")];
        let rows = RecordQuery::<Tenant>::new()
            .with_search("active")
            .apply(&tenants);
        assert!(rows.is_empty());
    }

    #[test]
    fn lease_search_ignores_dates_and_rent() {
        let leases = vec![lease(1, "Ana Ruiz", 1250, LeaseStatus::Active)];
        for term in ["2023", "1250", "active"] {
            assert!(RecordQuery::<Lease>::new()
                .with_search(term)
                .apply(&leases)
                .is_empty());
        }
        assert_eq!(
            RecordQuery::<Lease>::new()
                .with_search("lofts")
                .apply(&leases)
                .len(),
            1
        );
    }

    #[test]
    fn filtering_is_idempotent() {
        let tenants = vec![
            tenant(1, "Ana Ruiz", "Harbor Lofts", "1A"),
            tenant(2, "Ben Ode", "Maple Court", "2B"),
            tenant(3, "Cleo Hart", "Harbor Lofts", "3C"),
        ];
        let query = RecordQuery::<Tenant>::new().with_search("harbor");

        let once: Vec<Tenant> = query.filter(&tenants).into_iter().cloned().collect();
        let twice: Vec<Tenant> = query.filter(&once).into_iter().cloned().collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn status_filter_applies_before_search() {
        let leases = vec![
            lease(1, "Ana Ruiz", 1000, LeaseStatus::Active),
            lease(2, "Ana Ruiz", 1100, LeaseStatus::Expired),
            lease(3, "Ben Ode", 1200, LeaseStatus::Expired),
        ];

        let rows = RecordQuery::<Lease>::new()
            .with_status(StatusFilter::Only(LeaseStatus::Expired))
            .with_search("ana")
            .apply(&leases);
        assert_eq!(ids(&rows, |l| l.id.0), vec![2]);

        let rows = RecordQuery::<Lease>::new()
            .with_status(StatusFilter::All)
            .apply(&leases);
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn sort_is_stable_in_both_directions() {
        let leases = vec![
            lease(1, "Ana Ruiz", 1500, LeaseStatus::Active),
            lease(2, "Ben Ode", 1200, LeaseStatus::Active),
            lease(3, "Cleo Hart", 1500, LeaseStatus::Active),
            lease(4, "Dev Patel", 1200, LeaseStatus::Active),
        ];

        let asc = RecordQuery::<Lease>::new()
            .sorted_by(LeaseSortKey::Rent, SortDirection::Ascending)
            .apply(&leases);
        assert_eq!(ids(&asc, |l| l.id.0), vec![2, 4, 1, 3]);

        let desc = RecordQuery::<Lease>::new()
            .sorted_by(LeaseSortKey::Rent, SortDirection::Descending)
            .apply(&leases);
        assert_eq!(ids(&desc, |l| l.id.0), vec![1, 3, 2, 4]);
    }

    #[test]
    fn toggling_the_same_key_reverses_unique_keys() {
        let tenants = vec![
            tenant(1, "Cleo Hart", "Harbor Lofts", "3C"),
            tenant(2, "Ana Ruiz", "Harbor Lofts", "1A"),
            tenant(3, "Ben Ode", "Maple Court", "2B"),
        ];
        let mut query = RecordQuery::<Tenant>::new();
        query.toggle_sort(TenantSortKey::Name);
        let asc = ids(&query.apply(&tenants), |t| t.id.0);

        query.toggle_sort(TenantSortKey::Name);
        assert_eq!(query.sort_state().direction, SortDirection::Descending);
        let mut desc = ids(&query.apply(&tenants), |t| t.id.0);
        desc.reverse();

        assert_eq!(asc, vec![2, 3, 1]);
        assert_eq!(asc, desc);
    }

    #[test]
    fn selecting_a_new_key_resets_to_ascending() {
        let mut state = SortState::new(LeaseSortKey::StartDate);
        state.toggle(LeaseSortKey::StartDate);
        assert_eq!(state.direction, SortDirection::Descending);

        state.toggle(LeaseSortKey::Rent);
        assert_eq!(
            state,
            SortState {
                key: LeaseSortKey::Rent,
                direction: SortDirection::Ascending,
            }
        );
    }

    #[test]
    fn status_sorts_by_label_text() {
        let leases = vec![
            lease(1, "Ana Ruiz", 1000, LeaseStatus::ExpiringSoon),
            lease(2, "Ben Ode", 1000, LeaseStatus::Expired),
            lease(3, "Cleo Hart", 1000, LeaseStatus::Active),
        ];
        let rows = RecordQuery::<Lease>::new()
            .sorted_by(LeaseSortKey::Status, SortDirection::Ascending)
            .apply(&leases);
        assert_eq!(ids(&rows, |l| l.id.0), vec![3, 2, 1]);
    }

    #[test]
    fn sort_keys_parse_from_snake_and_camel_case() {
        assert_eq!("startDate".parse::<LeaseSortKey>(), Ok(LeaseSortKey::StartDate));
        assert_eq!("end_date".parse::<LeaseSortKey>(), Ok(LeaseSortKey::EndDate));
        assert_eq!(" Rent ".parse::<LeaseSortKey>(), Ok(LeaseSortKey::Rent));
        assert_eq!("EMAIL".parse::<TenantSortKey>(), Ok(TenantSortKey::Email));

        let err = "rent".parse::<TenantSortKey>().expect_err("tenants have no rent");
        assert_eq!(err.to_string(), "unknown tenant sort key 'rent'");
    }

    #[test]
    fn status_filter_parses_all_sentinel() {
        assert_eq!(
            "All".parse::<StatusFilter<LeaseStatus>>(),
            Ok(StatusFilter::All)
        );
        assert_eq!(
            "Expiring Soon".parse::<StatusFilter<LeaseStatus>>(),
            Ok(StatusFilter::Only(LeaseStatus::ExpiringSoon))
        );
        assert!("someday".parse::<StatusFilter<LeaseStatus>>().is_err());
    }

    #[test]
    fn lease_params_build_typed_query() {
        let params = LeaseQueryParams {
            search: Some("Ana".to_string()),
            status: Some("expired".to_string()),
            sort: Some("rent".to_string()),
            direction: Some("DESC".to_string()),
        };
        let query = RecordQuery::<Lease>::try_from(params).expect("valid params");

        assert_eq!(query.search_term(), "Ana");
        assert_eq!(
            query.status_filter(),
            &StatusFilter::Only(LeaseStatus::Expired)
        );
        assert_eq!(
            query.sort_state(),
            SortState {
                key: LeaseSortKey::Rent,
                direction: SortDirection::Descending,
            }
        );
    }

    #[test]
    fn blank_params_fall_back_to_defaults() {
        let params = LeaseQueryParams {
            status: Some("  ".to_string()),
            sort: Some(String::new()),
            ..LeaseQueryParams::default()
        };
        let query = RecordQuery::<Lease>::try_from(params).expect("valid params");
        assert_eq!(query.status_filter(), &StatusFilter::All);
        assert_eq!(query.sort_state(), SortState::new(LeaseSortKey::StartDate));

        let query =
            RecordQuery::<Tenant>::try_from(TenantQueryParams::default()).expect("defaults");
        assert_eq!(query.sort_state(), SortState::new(TenantSortKey::Id));
    }

    #[test]
    fn invalid_params_fail_fast() {
        let params = TenantQueryParams {
            direction: Some("sideways".to_string()),
            ..TenantQueryParams::default()
        };
        assert_eq!(
            RecordQuery::<Tenant>::try_from(params).expect_err("bad direction"),
            QueryError::UnknownDirection("sideways".to_string())
        );

        let params = LeaseQueryParams {
            status: Some("Pending".to_string()),
            ..LeaseQueryParams::default()
        };
        assert!(matches!(
            RecordQuery::<Lease>::try_from(params),
            Err(QueryError::UnknownStatus(_))
        ));
    }
}
