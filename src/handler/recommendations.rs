use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, put},
    Extension, Json, Router,
};
use serde_json::Value;

use crate::{
    db::RecommendationExt,
    dtos::FilterQueryDto,
    error::HttpError,
    models::{Recommendation, RecommendationType},
    AppState,
};

pub fn recommendations_handler() -> Router {
    Router::new()
        .route("/", get(list_recommendations).post(create_recommendation))
        .route(
            "/:rec_id",
            get(get_recommendation)
                .put(update_recommendation)
                .delete(delete_recommendation),
        )
        .route("/:rec_id/interested", put(increment_interested))
}

pub async fn list_recommendations(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(filters): Query<FilterQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    tracing::info!("Request to list recommendations");

    let rec_type = match filters.rec_type.as_deref() {
        Some(name) => Some(RecommendationType::from_name(name).ok_or_else(|| {
            HttpError::bad_request(format!("Invalid Recommendation Type: {}", name))
        })?),
        None => None,
    };

    let recs = if filters.product_id.is_none()
        && filters.rec_product_id.is_none()
        && rec_type.is_none()
    {
        app_state.db_client.all().await?
    } else {
        app_state
            .db_client
            .find_by_filter(filters.product_id, filters.rec_product_id, rec_type)
            .await?
    };

    let results: Vec<Value> = recs.iter().map(|rec| rec.serialize()).collect();

    Ok(Json(results))
}

pub async fn create_recommendation(
    Extension(app_state): Extension<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, HttpError> {
    tracing::info!("Request to create a recommendation");
    check_content_type(&headers)?;
    let body = json_body(payload)?;

    let mut rec = Recommendation::default();
    rec.deserialize(&body)
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let created = app_state.db_client.create(&rec).await?;
    let location = format!("/recommendations/{}", created.id.unwrap_or_default());

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created.serialize()),
    ))
}

pub async fn get_recommendation(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(rec_id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    tracing::info!("Request for recommendation with id: {}", rec_id);

    let rec = app_state.db_client.find_or_404(rec_id).await?;

    Ok(Json(rec.serialize()))
}

pub async fn update_recommendation(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(rec_id): Path<i64>,
    headers: HeaderMap,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, HttpError> {
    tracing::info!("Request to update recommendation with id: {}", rec_id);
    check_content_type(&headers)?;

    let mut rec = app_state.db_client.find_or_404(rec_id).await?;

    let body = json_body(payload)?;
    rec.deserialize(&body)
        .map_err(|e| HttpError::bad_request(e.to_string()))?;
    rec.id = Some(rec_id);

    let updated = app_state.db_client.update(&rec).await?;

    Ok(Json(updated.serialize()))
}

pub async fn delete_recommendation(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(rec_id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    tracing::info!("Request to delete recommendation with id: {}", rec_id);

    // deleting an id that was never stored is a silent no-op
    if app_state.db_client.find(rec_id).await?.is_some() {
        app_state.db_client.delete(rec_id).await?;
    }

    Ok(StatusCode::NO_CONTENT)
}

pub async fn increment_interested(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(rec_id): Path<i64>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, HttpError> {
    tracing::info!(
        "Request to increment interest in recommendation with id: {}",
        rec_id
    );
    check_content_type(&headers)?;

    let mut rec = app_state.db_client.find_or_404(rec_id).await?;
    rec.interested += 1;

    let updated = app_state.db_client.update(&rec).await?;

    Ok(Json(updated.serialize()))
}

fn check_content_type(headers: &HeaderMap) -> Result<(), HttpError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    if content_type != "application/json" {
        return Err(HttpError::unsupported_media_type(
            "Content-Type must be application/json",
        ));
    }

    Ok(())
}

fn json_body(payload: Result<Json<Value>, JsonRejection>) -> Result<Value, HttpError> {
    let Json(body) = payload.map_err(|_| {
        HttpError::bad_request("Invalid Recommendation: body of request contained bad or no data")
    })?;

    Ok(body)
}
