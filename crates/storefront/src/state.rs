use crate::di::{DependenciesInject, DependenciesInjectDeps};
use prometheus_client::registry::Registry;
use shared::{
    config::ConnectionPool,
    utils::{SystemMetrics, run_metrics_collector},
};
use std::{fmt, sync::Arc};

#[derive(Clone)]
pub struct AppState {
    pub di_container: DependenciesInject,
    pub registry: Arc<Registry>,
    pub system_metrics: Arc<SystemMetrics>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("di_container", &self.di_container)
            .field("registry", &self.registry)
            .field("system_metrics", &self.system_metrics)
            .finish()
    }
}

impl AppState {
    /// Builds the services over Postgres and starts the system metrics
    /// collector. Must run inside a tokio runtime.
    pub fn new(pool: ConnectionPool) -> Self {
        let state = Self::from_deps(DependenciesInjectDeps::from_pool(pool));

        tokio::spawn(run_metrics_collector(state.system_metrics.clone()));

        state
    }

    pub fn from_deps(deps: DependenciesInjectDeps) -> Self {
        let mut registry = Registry::default();
        let system_metrics = Arc::new(SystemMetrics::new());

        let di_container = DependenciesInject::new(deps, &mut registry);
        system_metrics.register(&mut registry);

        Self {
            di_container,
            registry: Arc::new(registry),
            system_metrics,
        }
    }
}
