//! Route handlers.
//!
//! Meal handlers take [`Session`] as their first extractor so a request
//! without a session is rejected before its body is read.

use axum::{
    extract::{Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

use super::error::AppError;
use super::extract::{parse_meal_id, ValidJson};
use super::session::{ResolvedSession, Session};
use super::AppState;
use crate::models::{Meal, MealChanges, Metrics, User};

/// Builds the application router.
///
/// - `GET /health`
/// - `POST|GET /daily-diet/user`
/// - `POST|GET /daily-diet/meal`
/// - `GET /daily-diet/meal/metrics`
/// - `GET|PUT|DELETE /daily-diet/meal/{id}`
pub fn build_router(state: AppState) -> Router {
    let diet_routes = Router::new()
        .route("/user", get(list_users).post(create_user))
        .route("/meal", get(list_meals).post(create_meal))
        .route("/meal/metrics", get(metrics))
        .route(
            "/meal/{id}",
            get(get_meal).put(update_meal).delete(delete_meal),
        );

    Router::new()
        .route("/health", get(health))
        .nest("/daily-diet", diet_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

// ============================================================================
// Request / response bodies
// ============================================================================

#[derive(Deserialize)]
struct CreateUserBody {
    name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateMealBody {
    name: String,
    description: String,
    is_on_diet: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateMealBody {
    name: Option<String>,
    description: Option<String>,
    is_on_diet: Option<bool>,
}

impl From<UpdateMealBody> for MealChanges {
    fn from(body: UpdateMealBody) -> Self {
        MealChanges {
            name: body.name,
            description: body.description,
            is_on_diet: body.is_on_diet,
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
struct UserResponse {
    user: User,
}

#[derive(Serialize)]
struct UsersResponse {
    users: Vec<User>,
}

#[derive(Serialize)]
struct MealResponse {
    meal: Meal,
}

#[derive(Serialize)]
struct MealsResponse {
    meals: Vec<Meal>,
}

#[derive(Serialize)]
struct MetricsResponse {
    metrics: Metrics,
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Registers a user under the caller's session, minting one if needed.
async fn create_user(
    State(state): State<AppState>,
    resolved: ResolvedSession,
    ValidJson(body): ValidJson<CreateUserBody>,
) -> Result<Response, AppError> {
    if body.name.is_empty() {
        return Err(AppError::Validation("name must not be empty".to_string()));
    }

    let user = state
        .users
        .create(&User::new(body.name, resolved.session.id()))
        .await?;

    tracing::info!(
        "Registered user {} (session {}, minted: {})",
        user.id,
        resolved.session.redacted(),
        resolved.minted
    );

    let mut response = (StatusCode::CREATED, Json(UserResponse { user })).into_response();
    if let Some(cookie) = resolved.set_cookie(state.cookie_max_age_secs) {
        let value =
            HeaderValue::from_str(&cookie).map_err(|e| AppError::Internal(e.to_string()))?;
        response.headers_mut().insert(header::SET_COOKIE, value);
    }

    Ok(response)
}

async fn list_users(State(state): State<AppState>) -> Result<Json<UsersResponse>, AppError> {
    let users = state.users.list().await?;
    Ok(Json(UsersResponse { users }))
}

async fn create_meal(
    session: Session,
    State(state): State<AppState>,
    ValidJson(body): ValidJson<CreateMealBody>,
) -> Result<(StatusCode, Json<MealResponse>), AppError> {
    let meal = Meal::new(session.id(), body.name, body.description, body.is_on_diet);
    let meal = state.meals.create(&meal).await?;

    tracing::info!(
        "Recorded meal {} (session {}, on diet: {})",
        meal.id,
        session.redacted(),
        meal.is_on_diet
    );

    Ok((StatusCode::CREATED, Json(MealResponse { meal })))
}

async fn list_meals(
    session: Session,
    State(state): State<AppState>,
) -> Result<Json<MealsResponse>, AppError> {
    let meals = state.meals.list(session.id()).await?;
    Ok(Json(MealsResponse { meals }))
}

async fn get_meal(
    session: Session,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MealResponse>, AppError> {
    let id = parse_meal_id(&id)?;

    let meal = state
        .meals
        .get(session.id(), id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(MealResponse { meal }))
}

/// Partial update. A meal owned by another session is reported exactly like
/// a missing one and is left untouched.
async fn update_meal(
    session: Session,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidJson(body): ValidJson<UpdateMealBody>,
) -> Result<Json<MealResponse>, AppError> {
    let id = parse_meal_id(&id)?;
    let changes = MealChanges::from(body);

    let meal = match state.meals.update(session.id(), id, &changes).await? {
        Some(meal) => meal,
        None => {
            tracing::debug!("Update of {} matched nothing for session {}", id, session.redacted());
            return Err(AppError::NotFound);
        }
    };

    tracing::info!("Updated meal {} (session {})", meal.id, session.redacted());

    Ok(Json(MealResponse { meal }))
}

async fn delete_meal(
    session: Session,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_meal_id(&id)?;

    if !state.meals.delete(session.id(), id).await? {
        tracing::debug!("Delete of {} matched nothing for session {}", id, session.redacted());
        return Err(AppError::NotFound);
    }

    tracing::info!("Deleted meal {} (session {})", id, session.redacted());

    Ok(StatusCode::NO_CONTENT)
}

async fn metrics(
    session: Session,
    State(state): State<AppState>,
) -> Result<Json<MetricsResponse>, AppError> {
    let metrics = state.meals.metrics(session.id()).await?;
    Ok(Json(MetricsResponse { metrics }))
}
