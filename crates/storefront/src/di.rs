use crate::{
    abstract_trait::{
        category::{
            repository::{DynCategoryCommandRepository, DynCategoryQueryRepository},
            service::{DynCategoryCommandService, DynCategoryQueryService},
        },
        order::{
            repository::{DynOrderCommandRepository, DynOrderQueryRepository},
            service::{DynOrderCommandService, DynOrderQueryService},
        },
        product::{
            repository::{DynProductCommandRepository, DynProductQueryRepository},
            service::{DynProductCommandService, DynProductQueryService},
        },
    },
    repository::{
        category::{command::CategoryCommandRepository, query::CategoryQueryRepository},
        order::{command::OrderCommandRepository, query::OrderQueryRepository},
        product::{command::ProductCommandRepository, query::ProductQueryRepository},
    },
    service::{
        category::{command::CategoryCommandService, query::CategoryQueryService},
        order::{command::OrderCommandService, query::OrderQueryService},
        product::{command::ProductCommandService, query::ProductQueryService},
    },
};
use prometheus_client::registry::Registry;
use shared::config::ConnectionPool;
use std::{fmt, sync::Arc};

#[derive(Clone)]
pub struct DependenciesInject {
    pub category_query: DynCategoryQueryService,
    pub category_command: DynCategoryCommandService,
    pub product_query: DynProductQueryService,
    pub product_command: DynProductCommandService,
    pub order_query: DynOrderQueryService,
    pub order_command: DynOrderCommandService,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("category_query", &"CategoryQueryService")
            .field("category_command", &"CategoryCommandService")
            .field("product_query", &"ProductQueryService")
            .field("product_command", &"ProductCommandService")
            .field("order_query", &"OrderQueryService")
            .field("order_command", &"OrderCommandService")
            .finish()
    }
}

/// Repositories the services are built from. Production wires the Postgres
/// implementations through [`DependenciesInjectDeps::from_pool`].
#[derive(Clone)]
pub struct DependenciesInjectDeps {
    pub category_query: DynCategoryQueryRepository,
    pub category_command: DynCategoryCommandRepository,
    pub product_query: DynProductQueryRepository,
    pub product_command: DynProductCommandRepository,
    pub order_query: DynOrderQueryRepository,
    pub order_command: DynOrderCommandRepository,
}

impl DependenciesInjectDeps {
    pub fn from_pool(pool: ConnectionPool) -> Self {
        Self {
            category_query: Arc::new(CategoryQueryRepository::new(pool.clone())),
            category_command: Arc::new(CategoryCommandRepository::new(pool.clone())),
            product_query: Arc::new(ProductQueryRepository::new(pool.clone())),
            product_command: Arc::new(ProductCommandRepository::new(pool.clone())),
            order_query: Arc::new(OrderQueryRepository::new(pool.clone())),
            order_command: Arc::new(OrderCommandRepository::new(pool)),
        }
    }
}

impl DependenciesInject {
    pub fn new(deps: DependenciesInjectDeps, registry: &mut Registry) -> Self {
        let DependenciesInjectDeps {
            category_query: category_query_repo,
            category_command: category_command_repo,
            product_query: product_query_repo,
            product_command: product_command_repo,
            order_query: order_query_repo,
            order_command: order_command_repo,
        } = deps;

        let category_query = Arc::new(CategoryQueryService::new(
            category_query_repo.clone(),
            product_query_repo.clone(),
            registry,
        )) as DynCategoryQueryService;

        let category_command = Arc::new(CategoryCommandService::new(
            category_query_repo.clone(),
            category_command_repo,
            product_query_repo.clone(),
            registry,
        )) as DynCategoryCommandService;

        let product_query = Arc::new(ProductQueryService::new(
            product_query_repo.clone(),
            category_query_repo.clone(),
            registry,
        )) as DynProductQueryService;

        let product_command = Arc::new(ProductCommandService::new(
            product_query_repo.clone(),
            product_command_repo,
            category_query_repo,
            registry,
        )) as DynProductCommandService;

        let order_query = Arc::new(OrderQueryService::new(order_query_repo.clone(), registry))
            as DynOrderQueryService;

        let order_command = Arc::new(OrderCommandService::new(
            order_query_repo,
            order_command_repo,
            product_query_repo,
            registry,
        )) as DynOrderCommandService;

        Self {
            category_query,
            category_command,
            product_query,
            product_command,
            order_query,
            order_command,
        }
    }
}
