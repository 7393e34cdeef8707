//! Axum route handlers for the registrar API.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::Utc;
use registrar_core::{
    CourseId, CourseProfile, CourseUpdate, ProfessorId, ProfessorProfile, ProfessorUpdate,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    error::ApiError,
    store::{CourseFilter, CourseStore, ProfessorFilter, ProfessorStore},
};

// ── Shared state ─────────────────────────────────────────────────────────────

/// Shared application state: one in-memory store per entity type.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Professor records keyed by professor id.
    pub professors: Arc<ProfessorStore>,
    /// Course records keyed by course id.
    pub courses: Arc<CourseStore>,
}

// ── Router ────────────────────────────────────────────────────────────────────

/// Build the application router over the given stores.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/professors", get(list_professors).post(create_professor))
        .route(
            "/professors/{id}",
            get(get_professor).patch(update_professor).delete(delete_professor),
        )
        .route("/courses", get(list_courses).post(create_course))
        .route(
            "/courses/{id}",
            get(get_course).patch(update_course).delete(delete_course),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

// ── Service handlers ──────────────────────────────────────────────────────────

/// `GET /` — welcome message.
pub async fn root() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "Welcome to the registrar API. Resources live under /professors and /courses."
    }))
}

/// `GET /health` — liveness probe.
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({"status": "ok"})))
}

// ── Professor handlers ────────────────────────────────────────────────────────

/// `POST /professors` — create a professor record.
///
/// # Errors
/// Returns [`ApiError::ProfessorExists`] if a stored record already carries
/// the supplied id.
pub async fn create_professor(
    State(state): State<AppState>,
    Json(profile): Json<ProfessorProfile>,
) -> Result<impl IntoResponse, ApiError> {
    let id = profile.id.clone();
    let record = state
        .professors
        .create(profile, Utc::now())
        .ok_or(ApiError::ProfessorExists(id))?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// `GET /professors` — list professors, optionally filtered by first name,
/// last name, and id.
pub async fn list_professors(
    State(state): State<AppState>,
    Query(filter): Query<ProfessorFilter>,
) -> impl IntoResponse {
    Json(state.professors.list(&filter))
}

/// `GET /professors/:id` — fetch one professor.
///
/// # Errors
/// Returns [`ApiError::ProfessorNotFound`] if the id is not in the store.
pub async fn get_professor(
    State(state): State<AppState>,
    Path(id): Path<ProfessorId>,
) -> Result<impl IntoResponse, ApiError> {
    let record = state.professors.get(&id).ok_or(ApiError::ProfessorNotFound(id))?;
    Ok(Json(record))
}

/// `PATCH /professors/:id` — merge the supplied fields onto a professor.
///
/// # Errors
/// Returns [`ApiError::ProfessorNotFound`] if the id is not in the store.
pub async fn update_professor(
    State(state): State<AppState>,
    Path(id): Path<ProfessorId>,
    Json(update): Json<ProfessorUpdate>,
) -> Result<impl IntoResponse, ApiError> {
    let record = state
        .professors
        .update(&id, update, Utc::now())
        .ok_or(ApiError::ProfessorNotFound(id))?;
    Ok(Json(record))
}

/// `DELETE /professors/:id` — remove a professor. Courses embedding this
/// professor are left untouched.
///
/// # Errors
/// Returns [`ApiError::ProfessorNotFound`] if the id is not in the store.
pub async fn delete_professor(
    State(state): State<AppState>,
    Path(id): Path<ProfessorId>,
) -> Result<impl IntoResponse, ApiError> {
    if !state.professors.remove(&id) {
        return Err(ApiError::ProfessorNotFound(id));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ── Course handlers ───────────────────────────────────────────────────────────

/// `POST /courses` — create a course record. The embedded instructor is
/// stored as a snapshot; it is not checked against the professor store.
///
/// # Errors
/// Returns [`ApiError::CourseExists`] if a stored record already carries the
/// supplied course id.
pub async fn create_course(
    State(state): State<AppState>,
    Json(profile): Json<CourseProfile>,
) -> Result<impl IntoResponse, ApiError> {
    let id = profile.course_id.clone();
    let record = state
        .courses
        .create(profile, Utc::now())
        .ok_or(ApiError::CourseExists(id))?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// `GET /courses` — list courses, optionally filtered by course id, name
/// substring, and instructor id.
pub async fn list_courses(
    State(state): State<AppState>,
    Query(filter): Query<CourseFilter>,
) -> impl IntoResponse {
    Json(state.courses.list(&filter))
}

/// `GET /courses/:id` — fetch one course.
///
/// # Errors
/// Returns [`ApiError::CourseNotFound`] if the id is not in the store.
pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<CourseId>,
) -> Result<impl IntoResponse, ApiError> {
    let record = state.courses.get(&id).ok_or(ApiError::CourseNotFound(id))?;
    Ok(Json(record))
}

/// `PATCH /courses/:id` — merge the supplied fields onto a course.
///
/// # Errors
/// Returns [`ApiError::CourseNotFound`] if the id is not in the store.
pub async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<CourseId>,
    Json(update): Json<CourseUpdate>,
) -> Result<impl IntoResponse, ApiError> {
    let record = state
        .courses
        .update(&id, update, Utc::now())
        .ok_or(ApiError::CourseNotFound(id))?;
    Ok(Json(record))
}

/// `DELETE /courses/:id` — remove a course.
///
/// # Errors
/// Returns [`ApiError::CourseNotFound`] if the id is not in the store.
pub async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<CourseId>,
) -> Result<impl IntoResponse, ApiError> {
    if !state.courses.remove(&id) {
        return Err(ApiError::CourseNotFound(id));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
    };
    use tower::ServiceExt;

    use super::*;

    const BODY_LIMIT: usize = 64 * 1024;

    fn test_app() -> Router {
        create_router(AppState::default())
    }

    fn json_request(method: Method, uri: &str, body: &serde_json::Value) -> Request<Body> {
        match Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
        {
            Ok(r) => r,
            Err(e) => panic!("failed to build request: {e}"),
        }
    }

    fn empty_request(method: Method, uri: &str) -> Request<Body> {
        match Request::builder().method(method).uri(uri).body(Body::empty()) {
            Ok(r) => r,
            Err(e) => panic!("failed to build request: {e}"),
        }
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let resp = match app.oneshot(request).await {
            Ok(r) => r,
            Err(e) => panic!("handler error: {e}"),
        };
        let status = resp.status();
        let bytes = match axum::body::to_bytes(resp.into_body(), BODY_LIMIT).await {
            Ok(b) => b,
            Err(e) => panic!("failed to read body: {e}"),
        };
        let body = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            match serde_json::from_slice(&bytes) {
                Ok(v) => v,
                // Extractor rejections (Path/Query/Json) return a plain-text
                // body, not JSON. Surface it as a string instead of panicking
                // so status-only assertions can still run.
                Err(_) => serde_json::Value::String(String::from_utf8_lossy(&bytes).into_owned()),
            }
        };
        (status, body)
    }

    fn john_smith() -> serde_json::Value {
        serde_json::json!({
            "first_name": "John",
            "last_name": "Smith",
            "id": "js2233",
            "email": "js2233@columbia.edu",
            "courses": []
        })
    }

    #[tokio::test]
    async fn root_returns_welcome_message() {
        let (status, body) = send(test_app(), empty_request(Method::GET, "/")).await;
        assert_eq!(status, StatusCode::OK);
        let message = body["message"].as_str().unwrap_or_default();
        assert!(message.contains("registrar"), "unexpected welcome: {message}");
    }

    #[tokio::test]
    async fn health_returns_ok_with_status_field() {
        let (status, body) = send(test_app(), empty_request(Method::GET, "/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn create_professor_returns_201_with_server_timestamps() {
        let (status, body) =
            send(test_app(), json_request(Method::POST, "/professors", &john_smith())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["id"], "js2233");
        assert_eq!(
            body["created_at"], body["updated_at"],
            "fresh record must have equal timestamps"
        );
    }

    #[tokio::test]
    async fn create_duplicate_professor_returns_400_with_message() {
        let app = test_app();
        let (status, _) =
            send(app.clone(), json_request(Method::POST, "/professors", &john_smith())).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) =
            send(app, json_request(Method::POST, "/professors", &john_smith())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error = body["error"].as_str().unwrap_or_default();
        assert!(error.contains("js2233"), "error must name the id: {error}");
    }

    #[tokio::test]
    async fn get_unknown_professor_returns_404() {
        let (status, body) =
            send(test_app(), empty_request(Method::GET, "/professors/zz999")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].is_string(), "error body must carry a message");
    }

    #[tokio::test]
    async fn malformed_path_id_is_rejected_before_lookup() {
        let (status, _) =
            send(test_app(), empty_request(Method::GET, "/professors/NOT-AN-ID")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_query_id_filter_is_rejected() {
        let (status, _) =
            send(test_app(), empty_request(Method::GET, "/professors?id=NOT-AN-ID")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn create_professor_with_invalid_email_is_rejected() {
        let mut payload = john_smith();
        payload["email"] = serde_json::json!("not-an-email");
        let (status, _) =
            send(test_app(), json_request(Method::POST, "/professors", &payload)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn delete_professor_returns_204_then_404() {
        let app = test_app();
        let (status, _) =
            send(app.clone(), json_request(Method::POST, "/professors", &john_smith())).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) =
            send(app.clone(), empty_request(Method::DELETE, "/professors/js2233")).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(body.is_null(), "delete must return no body");

        let (status, _) =
            send(app, empty_request(Method::DELETE, "/professors/js2233")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn list_professors_returns_bare_array() {
        let app = test_app();
        let (_, body) = send(app.clone(), empty_request(Method::GET, "/professors")).await;
        assert_eq!(body, serde_json::json!([]), "empty store must list as a bare empty array");

        let (status, _) =
            send(app.clone(), json_request(Method::POST, "/professors", &john_smith())).await;
        assert_eq!(status, StatusCode::CREATED);

        let (_, body) = send(app, empty_request(Method::GET, "/professors")).await;
        let items = body.as_array().map(Vec::len);
        assert_eq!(items, Some(1), "list must be a bare array, no envelope");
    }

    #[tokio::test]
    async fn patch_unknown_course_returns_404() {
        let (status, _) = send(
            test_app(),
            json_request(Method::PATCH, "/courses/COMS4153", &serde_json::json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn create_course_with_malformed_course_id_is_rejected() {
        let payload = serde_json::json!({
            "courseID": "coms4153",
            "courseName": "Cloud Computing",
            "instructor": john_smith(),
            "assignment": []
        });
        let (status, _) = send(test_app(), json_request(Method::POST, "/courses", &payload)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
