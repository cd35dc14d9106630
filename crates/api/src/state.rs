//! Application state shared across handlers.

use std::sync::Arc;

use axum::extract::FromRef;
use axum::http::header::InvalidHeaderName;
use sqlx::PgPool;

use crate::config::ShopConfig;
use crate::db::{
    AddressRepository, CategoryRepository, CustomerRepository, ProductRepository, Repository,
    WishListRepository,
};
use crate::headers::AlertHeaders;
use crate::models::{Address, Category, Customer, Entity, Product, WishList};
use crate::services::{EntityService, QueryService};

/// One repository per resource.
pub struct Repositories {
    pub customers: Arc<dyn Repository<Customer>>,
    pub addresses: Arc<dyn Repository<Address>>,
    pub wish_lists: Arc<dyn Repository<WishList>>,
    pub categories: Arc<dyn Repository<Category>>,
    pub products: Arc<dyn Repository<Product>>,
}

impl Repositories {
    /// `PostgreSQL` repositories sharing `pool`.
    #[must_use]
    pub fn postgres(pool: &PgPool) -> Self {
        Self {
            customers: Arc::new(CustomerRepository::new(pool.clone())),
            addresses: Arc::new(AddressRepository::new(pool.clone())),
            wish_lists: Arc::new(WishListRepository::new(pool.clone())),
            categories: Arc::new(CategoryRepository::new(pool.clone())),
            products: Arc::new(ProductRepository::new(pool.clone())),
        }
    }
}

/// CRUD and query services for one resource.
struct Resource<E: Entity> {
    service: EntityService<E>,
    queries: QueryService<E>,
}

impl<E: Entity> Resource<E> {
    fn new(repository: Arc<dyn Repository<E>>) -> Self {
        Self {
            service: EntityService::new(Arc::clone(&repository)),
            queries: QueryService::new(repository),
        }
    }
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ShopConfig,
    pool: PgPool,
    alerts: AlertHeaders,
    customers: Resource<Customer>,
    addresses: Resource<Address>,
    wish_lists: Resource<WishList>,
    categories: Resource<Category>,
    products: Resource<Product>,
}

impl AppState {
    /// Create application state backed by `PostgreSQL`.
    ///
    /// # Errors
    ///
    /// Returns an error if the application name cannot be used in header
    /// names.
    pub fn new(config: ShopConfig, pool: PgPool) -> Result<Self, InvalidHeaderName> {
        let repositories = Repositories::postgres(&pool);
        Self::with_repositories(config, pool, repositories)
    }

    /// Create application state with explicit repositories.
    ///
    /// # Errors
    ///
    /// Returns an error if the application name cannot be used in header
    /// names.
    pub fn with_repositories(
        config: ShopConfig,
        pool: PgPool,
        repositories: Repositories,
    ) -> Result<Self, InvalidHeaderName> {
        let alerts = AlertHeaders::new(&config.application_name)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                alerts,
                customers: Resource::new(repositories.customers),
                addresses: Resource::new(repositories.addresses),
                wish_lists: Resource::new(repositories.wish_lists),
                categories: Resource::new(repositories.categories),
                products: Resource::new(repositories.products),
            }),
        })
    }

    /// Get a reference to the API configuration.
    #[must_use]
    pub fn config(&self) -> &ShopConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }
}

impl FromRef<AppState> for AlertHeaders {
    fn from_ref(state: &AppState) -> Self {
        state.inner.alerts.clone()
    }
}

macro_rules! resource_state {
    ($($entity:ty => $field:ident),* $(,)?) => {
        $(
            impl FromRef<AppState> for EntityService<$entity> {
                fn from_ref(state: &AppState) -> Self {
                    state.inner.$field.service.clone()
                }
            }

            impl FromRef<AppState> for QueryService<$entity> {
                fn from_ref(state: &AppState) -> Self {
                    state.inner.$field.queries.clone()
                }
            }
        )*
    };
}

resource_state! {
    Customer => customers,
    Address => addresses,
    WishList => wish_lists,
    Category => categories,
    Product => products,
}

#[cfg(test)]
impl AppState {
    /// State backed by in-memory repositories and a pool that never
    /// connects unless used.
    #[allow(clippy::expect_used)]
    pub(crate) fn in_memory() -> Self {
        use std::time::Duration;

        use secrecy::{ExposeSecret, SecretString};
        use sqlx::postgres::PgPoolOptions;

        use crate::config::DEFAULT_APPLICATION_NAME;
        use crate::db::memory::MemoryRepository;

        let config = ShopConfig {
            database_url: SecretString::from("postgres://shop@localhost/online_shop_test"),
            host: [127, 0, 0, 1].into(),
            port: 0,
            application_name: DEFAULT_APPLICATION_NAME.to_string(),
            log_json: false,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        };
        let pool = PgPoolOptions::new()
            .acquire_timeout(Duration::from_millis(100))
            .connect_lazy(config.database_url.expose_secret())
            .expect("lazy pool");
        let repositories = Repositories {
            customers: Arc::new(MemoryRepository::<Customer>::new()),
            addresses: Arc::new(MemoryRepository::<Address>::new()),
            wish_lists: Arc::new(MemoryRepository::<WishList>::new()),
            categories: Arc::new(MemoryRepository::<Category>::new()),
            products: Arc::new(MemoryRepository::<Product>::new()),
        };

        Self::with_repositories(config, pool, repositories).expect("valid application name")
    }
}
