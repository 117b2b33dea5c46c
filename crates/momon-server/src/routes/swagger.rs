//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.

use utoipa::OpenApi;

use crate::models::{CreateMonsterForm, MonsterResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::health_check,
        super::monster::create_monster,
        super::monster::list_monsters,
        super::monster::get_monster,
    ),
    info(
        title = "Momon API",
        version = "0.1.0",
        description = "Turn a photo and today's feeling into a monster.",
        license(name = "MIT"),
    ),
    servers(
        (url = "/", description = "Current server"),
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Monster", description = "Monster creation and collection"),
    ),
    components(
        schemas(
            crate::HealthCheck,
            MonsterResponse,
            CreateMonsterForm,
        )
    ),
)]
pub struct ApiDoc;
