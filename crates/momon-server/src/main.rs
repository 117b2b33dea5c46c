use axum::{
    extract::{DefaultBodyLimit, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use momon::{ImageStore, PersonaGenerator, SystemClock};

mod adapters;
mod application;
mod config;
mod models;
mod routes;
#[cfg(test)]
mod test_support;

use adapters::{
    HttpImageFetcher, MockPersonaGenerator, OpenAiPersonaGenerator, PgIdentityRepository,
    PgMonsterRepository, S3ObjectStorage,
};
use application::{ArchivingImageStore, MonsterService, PassThroughImageStore};
use config::AppConfig;

/// Type alias for the monster service with concrete repository implementations
pub type AppMonsterService = MonsterService<PgIdentityRepository, PgMonsterRepository>;

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub monster_service: Arc<AppMonsterService>,
}

#[derive(Serialize, ToSchema)]
struct HealthCheck {
    status: String,
    message: String,
    version: String,
    backend: String,
}

/// Liveness probe
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Server is running", body = HealthCheck)),
    tag = "Health"
)]
async fn health_check(State(state): State<AppState>) -> Json<HealthCheck> {
    Json(HealthCheck {
        status: "ok".to_string(),
        message: "Momon API is running - feelings become monsters".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        backend: state.monster_service.backend_name().to_string(),
    })
}

/// Pick the generator and image store once; both follow the same mock flag
async fn build_backends(
    config: &AppConfig,
) -> anyhow::Result<(Arc<dyn PersonaGenerator>, Arc<dyn ImageStore>)> {
    let (openai, storage) = match (&config.openai, &config.storage) {
        (Some(openai), Some(storage)) if !config.mock_mode => (openai, storage),
        _ => {
            tracing::info!("🎭 Mock mode: offline catalog + pass-through image URLs");
            return Ok((
                Arc::new(MockPersonaGenerator::new()),
                Arc::new(PassThroughImageStore),
            ));
        }
    };

    let generator = OpenAiPersonaGenerator::new(openai, config.external_timeout)
        .map_err(|e| anyhow::anyhow!("Failed to initialize OpenAI client: {e}"))?;
    let fetcher = HttpImageFetcher::new(config.external_timeout)
        .map_err(|e| anyhow::anyhow!("Failed to initialize image fetcher: {e}"))?;
    let object_storage = S3ObjectStorage::from_config(storage, config.external_timeout).await;

    tracing::info!(
        "🤖 Live mode: OpenAI ({} / {}) + S3 bucket {} ({})",
        openai.analysis_model,
        openai.image_model,
        storage.bucket_name,
        storage.region
    );

    Ok((
        Arc::new(generator),
        Arc::new(ArchivingImageStore::new(
            Arc::new(fetcher),
            Arc::new(object_storage),
        )),
    ))
}

fn app(state: AppState, max_upload_bytes: usize) -> Router {
    let openapi = routes::swagger::ApiDoc::openapi();

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .route("/health", get(health_check))
        .merge(routes::monster::router())
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[shuttle_runtime::main]
async fn main(
    #[shuttle_shared_db::Postgres] pool: PgPool,
    #[shuttle_runtime::Secrets] secrets: shuttle_runtime::SecretStore,
) -> shuttle_axum::ShuttleAxum {
    tracing::info!("👾 Momon API initializing...");

    let config = AppConfig::from_secrets(&secrets).map_err(|e| {
        tracing::error!("❌ Invalid configuration: {}", e);
        anyhow::anyhow!(e)
    })?;

    sqlx::migrate!()
        .run(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to run database migrations: {e}"))?;

    tracing::info!("✅ Database migrations completed");

    let (generator, image_store) = build_backends(&config).await?;

    let identity_repo = Arc::new(PgIdentityRepository::new(pool.clone()));
    let monster_repo = Arc::new(PgMonsterRepository::new(pool));
    let monster_service = Arc::new(MonsterService::new(
        identity_repo,
        monster_repo,
        generator,
        image_store,
        Arc::new(SystemClock),
    ));

    let router = app(AppState { monster_service }, config.max_upload_bytes);

    tracing::info!("📚 Swagger UI: /swagger-ui");
    tracing::info!("✅ Momon API ready");

    Ok(router.into())
}
