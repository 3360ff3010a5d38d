//! # barista-server
//!
//! HTTP API server for the Barista drinks menu. Provides:
//!
//! - Public menu listing (short drink representations)
//! - Permission-gated detail, create, update, and delete routes
//! - The JSON envelope contract: `{"success": true, ...}` on success,
//!   `{"success": false, "error": <status>, "message": <text>}` on failure
//!
//! Authentication failures are serialized as `{"code", "description"}` at
//! their own status, matching the identity-provider error taxonomy.

mod error;

pub use error::ApiError;

use axum::{
    Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::Json,
    routing::{delete, get, patch, post},
};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use barista_auth::{Auth0Verifier, Claims, TokenVerifier, check_permission, extract_bearer};
use barista_config::Environment;
use barista_core::RecipePart;
use barista_menu::MenuStore;

/// Shared server state.
pub struct AppState {
    pub verifier: Arc<dyn TokenVerifier>,
    pub store: Arc<MenuStore>,
}

/// Request body for creating or patching a drink. Both fields optional at
/// the type level; each route enforces its own presence rules so the 422
/// contract stays exact.
#[derive(Deserialize)]
struct DrinkRequest {
    title: Option<String>,
    recipe: Option<Value>,
}

/// Build the Axum router.
pub fn build_router(verifier: Arc<dyn TokenVerifier>, store: Arc<MenuStore>) -> Router {
    let state = Arc::new(AppState { verifier, store });

    Router::new()
        .route("/health", get(health_handler))
        .route("/drinks", get(get_drinks_handler))
        .route("/drinks", post(post_drink_handler))
        .route("/drinks-detail", get(get_drinks_detail_handler))
        .route("/drinks/{id}", patch(patch_drink_handler))
        .route("/drinks/{id}", delete(delete_drink_handler))
        .with_state(state)
        .layer(CorsLayer::permissive())
}

/// Start the HTTP server, listening on the address derived from
/// `api_server_url`.
pub async fn start_server(
    environment: Environment,
    store: Arc<MenuStore>,
) -> barista_core::Result<()> {
    let listen = environment.bind_addr()?;
    let verifier: Arc<dyn TokenVerifier> =
        Arc::new(Auth0Verifier::from_environment(&environment));
    let router = build_router(verifier, store);

    info!(listen = %listen, "starting HTTP server");

    let listener = tokio::net::TcpListener::bind(&listen)
        .await
        .map_err(|e| {
            barista_core::BaristaError::Server(format!("failed to bind {listen}: {e}"))
        })?;

    axum::serve(listener, router)
        .await
        .map_err(|e| barista_core::BaristaError::Server(format!("server error: {e}")))?;

    Ok(())
}

/// Extract, verify, and authorize the request's bearer token for one
/// permission.
async fn authorize(
    state: &AppState,
    headers: &HeaderMap,
    permission: &str,
) -> Result<Claims, ApiError> {
    let header = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    let token = extract_bearer(header)?;
    let claims = state.verifier.verify(token).await?;
    check_permission(&claims, permission)?;
    Ok(claims)
}

/// Parse and validate a recipe from a request body. Every layer must carry
/// `color`, `name`, and `parts`; anything else is unprocessable.
fn parse_recipe(value: &Value) -> Result<Vec<RecipePart>, ApiError> {
    let unprocessable =
        |msg: &str| ApiError::status(StatusCode::UNPROCESSABLE_ENTITY, msg.to_string());

    let layers = value
        .as_array()
        .ok_or_else(|| unprocessable("recipe must be an array of layers"))?;
    if layers.is_empty() {
        return Err(unprocessable("recipe must contain at least one layer"));
    }

    let mut recipe = Vec::with_capacity(layers.len());
    for layer in layers {
        let color = layer["color"]
            .as_str()
            .ok_or_else(|| unprocessable("recipe layer is missing 'color'"))?;
        let name = layer["name"]
            .as_str()
            .ok_or_else(|| unprocessable("recipe layer is missing 'name'"))?;
        let parts = layer["parts"]
            .as_u64()
            .ok_or_else(|| unprocessable("recipe layer is missing 'parts'"))?;
        let parts = u32::try_from(parts)
            .map_err(|_| unprocessable("recipe layer 'parts' is out of range"))?;
        recipe.push(RecipePart {
            color: color.to_string(),
            name: name.to_string(),
            parts,
        });
    }
    Ok(recipe)
}

async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// `GET /drinks` — public; short representations only.
async fn get_drinks_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, ApiError> {
    let drinks: Vec<Value> = state.store.list()?.iter().map(|d| d.short()).collect();
    Ok(Json(json!({ "success": true, "drinks": drinks })))
}

/// `GET /drinks-detail` — requires `get:drinks-detail`; long
/// representations.
async fn get_drinks_detail_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    authorize(&state, &headers, "get:drinks-detail").await?;
    let drinks: Vec<Value> = state.store.list()?.iter().map(|d| d.long()).collect();
    Ok(Json(json!({ "success": true, "drinks": drinks })))
}

/// `POST /drinks` — requires `post:drinks`; both title and recipe are
/// mandatory.
async fn post_drink_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<DrinkRequest>,
) -> Result<Json<Value>, ApiError> {
    authorize(&state, &headers, "post:drinks").await?;

    let title = body.title.as_deref().ok_or_else(|| {
        ApiError::status(StatusCode::UNPROCESSABLE_ENTITY, "a drink needs a title".into())
    })?;
    let recipe_value = body.recipe.as_ref().ok_or_else(|| {
        ApiError::status(StatusCode::UNPROCESSABLE_ENTITY, "a drink needs a recipe".into())
    })?;
    let recipe = parse_recipe(recipe_value)?;

    let drink = state.store.create(title, recipe)?;
    Ok(Json(json!({ "success": true, "drinks": [drink.long()] })))
}

/// `PATCH /drinks/{id}` — requires `patch:drinks`; at least one of
/// title/recipe must be supplied.
async fn patch_drink_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(body): Json<DrinkRequest>,
) -> Result<Json<Value>, ApiError> {
    authorize(&state, &headers, "patch:drinks").await?;

    if body.title.is_none() && body.recipe.is_none() {
        return Err(ApiError::status(
            StatusCode::UNPROCESSABLE_ENTITY,
            "a patch needs a title or a recipe".into(),
        ));
    }
    let recipe = body.recipe.as_ref().map(parse_recipe).transpose()?;

    let drink = state.store.update(id, body.title.as_deref(), recipe)?;
    Ok(Json(json!({ "success": true, "drinks": [drink.long()] })))
}

/// `DELETE /drinks/{id}` — requires `delete:drinks`.
async fn delete_drink_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    authorize(&state, &headers, "delete:drinks").await?;
    state.store.delete(id)?;
    Ok(Json(json!({ "success": true, "delete": id })))
}
