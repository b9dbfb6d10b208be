//! Server construction, store selection and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::{info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::Trace;
use crate::doc::ApiDoc;
use crate::domain::UserService;
use crate::domain::ports::UserRecordService;
use crate::inbound::http::fallback::not_found;
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users;
use crate::inbound::http::validation::json_config;
use crate::outbound::memory::InMemoryUserStore;
use crate::outbound::persistence::{
    DbPool, DieselUserStore, MigrationError, PoolError, run_pending_migrations,
};
use crate::settings::Settings;

/// Failures that prevent the store from coming up.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Migration(#[from] MigrationError),
    #[error(transparent)]
    Pool(#[from] PoolError),
}

/// Connect the record service to its store.
///
/// With a database configured, pending migrations are applied and a pool is
/// opened before anything listens. Without one, records live in memory for
/// the lifetime of the process.
///
/// # Errors
/// Returns [`StartupError`] when migrations fail or the pool cannot connect.
pub async fn connect_user_service(
    settings: &Settings,
) -> Result<Arc<dyn UserRecordService>, StartupError> {
    let Some(pool_config) = settings.pool_config() else {
        warn!("DATABASE_URL not set; records are kept in memory and lost on exit");
        return Ok(Arc::new(UserService::new(Arc::new(
            InMemoryUserStore::new(),
        ))));
    };

    run_pending_migrations(pool_config.database_url()).await?;
    let pool = DbPool::new(pool_config).await?;
    info!(
        max_connections = settings.max_connections,
        "connected to PostgreSQL"
    );
    Ok(Arc::new(UserService::new(Arc::new(DieselUserStore::new(
        pool,
    )))))
}

/// Shared per-worker application data.
#[derive(Clone)]
pub struct AppDependencies {
    pub health_state: web::Data<HealthState>,
    pub http_state: web::Data<HttpState>,
}

impl AppDependencies {
    pub fn new(health_state: web::Data<HealthState>, users: Arc<dyn UserRecordService>) -> Self {
        Self {
            health_state,
            http_state: web::Data::new(HttpState::new(users)),
        }
    }
}

/// Build the application: user routes under `/v1`, health probes, API docs
/// under `/api-docs`, and a JSON 404 for everything else.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config())
        .wrap(Trace)
        .service(users::scope())
        .service(ready)
        .service(live)
        .service(
            SwaggerUi::new("/api-docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
        )
        .default_service(web::to(not_found))
}

/// Construct the HTTP server and mark the service ready.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig { bind_addr, users } = config;
    let deps = AppDependencies::new(health_state.clone(), users);

    let server = HttpServer::new(move || build_app(deps.clone()))
        .bind(bind_addr)?
        .run();

    health_state.mark_ready();
    info!(port = bind_addr.port(), "listening on port {}", bind_addr.port());
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockUserRecordService;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;

    fn deps() -> AppDependencies {
        AppDependencies::new(
            web::Data::new(HealthState::new()),
            Arc::new(MockUserRecordService::new()),
        )
    }

    #[rstest]
    #[case("/v2/users")]
    #[case("/v1/users/a/b")]
    #[actix_web::test]
    async fn unknown_paths_fall_through_to_json_404(#[case] uri: &str) {
        let app = actix_test::init_service(build_app(deps())).await;
        let response =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request())
                .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().contains_key(crate::domain::TRACE_ID_HEADER));
    }

    #[actix_web::test]
    async fn health_probes_are_mounted() {
        let app = actix_test::init_service(build_app(deps())).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/health/live").to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn openapi_document_is_served() {
        let app = actix_test::init_service(build_app(deps())).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api-docs/openapi.json")
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = actix_test::read_body_json(response).await;
        assert!(body["paths"].get("/v1/users").is_some());
    }

    #[actix_web::test]
    async fn memory_store_is_selected_without_database() {
        let settings = Settings {
            bind_addr: "127.0.0.1:0".parse().expect("addr"),
            database_url: None,
            max_connections: 1,
        };
        let users = connect_user_service(&settings)
            .await
            .expect("memory store needs no connection");
        let listed = users
            .list(&crate::domain::UserListParams::default())
            .await
            .expect("empty list");
        assert!(listed.is_empty());
    }
}
