use homehub::config::DataConfig;
use homehub::portfolio::{ImportError, Portfolio};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) portfolio: Arc<Portfolio>,
}

/// CLI flags win over `HOMEHUB_*_CSV`; with neither, the sample portfolio is served.
pub(crate) fn load_portfolio(
    data: &DataConfig,
    tenants_csv: Option<PathBuf>,
    leases_csv: Option<PathBuf>,
) -> Result<Portfolio, ImportError> {
    let tenants_csv = tenants_csv.or_else(|| data.tenants_csv.clone());
    let leases_csv = leases_csv.or_else(|| data.leases_csv.clone());
    Portfolio::from_csv_paths(tenants_csv.as_deref(), leases_csv.as_deref())
}

#[cfg(test)]
pub(crate) fn test_state(portfolio: Portfolio, ready: bool) -> AppState {
    use metrics_exporter_prometheus::PrometheusBuilder;

    AppState {
        readiness: Arc::new(AtomicBool::new(ready)),
        metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        portfolio: Arc::new(portfolio),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_paths_are_read_and_absent_paths_use_sample() {
        let data = DataConfig {
            tenants_csv: None,
            leases_csv: Some(PathBuf::from("./configured-leases.csv")),
        };
        let err = load_portfolio(&data, None, Some(PathBuf::from("./flag-leases.csv")))
            .expect_err("neither file exists");
        assert!(matches!(err, ImportError::Io(_)));

        let portfolio = load_portfolio(&DataConfig::default(), None, None).expect("sample");
        assert_eq!(portfolio.leases().len(), 5);
    }
}
