use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde_json::{json, Value};
use validator::Validate;

use crate::api::dto::reference_dto::{LoadRequest, LoadResult, ReferenceItemsResponse, ResolveQuery};
use crate::api::dto::ApiResponse;
use crate::api::util::json::to_json;
use crate::app_state::AppState;
use crate::core::state::reference::reference_item::ReferenceItem;
use crate::domain::reference::reference_store::{LoadOutcome, ReferenceSummary};
use crate::domain::reference::reference_type::ReferenceType;
use crate::domain::reference::resolver::Resolution;
use crate::errors::AppError;

pub struct ReferenceController;

impl ReferenceController {
    pub async fn list_summaries(
        State(state): State<AppState>,
    ) -> Result<Json<ApiResponse<Vec<ReferenceSummary>>>, AppError> {
        Ok(Json(ApiResponse::ok(state.registry.summaries().await)))
    }

    pub async fn load_all(
        State(state): State<AppState>,
        body: Bytes,
    ) -> Result<Json<ApiResponse<Vec<LoadResult>>>, AppError> {
        let req = parse_load_request(&body)?;

        let results = state
            .registry
            .load_all(req.into())
            .await
            .into_iter()
            .map(|(t, r)| LoadResult::from_result(t, r))
            .collect();

        Ok(Json(ApiResponse::ok(results)))
    }

    /// Session reset (logout / workspace switch).
    pub async fn reset(
        State(state): State<AppState>,
    ) -> Result<Json<ApiResponse<Value>>, AppError> {
        state.registry.reset_all().await;
        Ok(Json(ApiResponse::ok(json!({ "message": "Reference stores reset" }))))
    }

    pub async fn get_items(
        State(state): State<AppState>,
        Path(reference_type): Path<String>,
    ) -> Result<Json<ApiResponse<ReferenceItemsResponse>>, AppError> {
        let reference_type: ReferenceType = reference_type.parse()?;
        let items = state.registry.items(reference_type).await?;

        Ok(Json(ApiResponse::ok(ReferenceItemsResponse { reference_type, items })))
    }

    pub async fn load(
        State(state): State<AppState>,
        Path(reference_type): Path<String>,
        body: Bytes,
    ) -> Result<Json<ApiResponse<LoadOutcome>>, AppError> {
        let reference_type: ReferenceType = reference_type.parse()?;
        let req = parse_load_request(&body)?;

        to_json(state.registry.load_with(reference_type, req.into()).await)
    }

    pub async fn get_item(
        State(state): State<AppState>,
        Path((reference_type, id)): Path<(String, String)>,
    ) -> Result<Json<ApiResponse<ReferenceItem>>, AppError> {
        let reference_type: ReferenceType = reference_type.parse()?;
        let store = state.registry.store(reference_type)?;

        store
            .get(&id)
            .await
            .map(|item| Json(ApiResponse::ok(item)))
            .ok_or_else(|| AppError::NotFound(format!("{reference_type} reference {id}")))
    }

    pub async fn resolve(
        State(state): State<AppState>,
        Path(reference_type): Path<String>,
        Query(query): Query<ResolveQuery>,
    ) -> Result<Json<ApiResponse<Vec<Resolution>>>, AppError> {
        let reference_type: ReferenceType = reference_type.parse()?;
        query
            .validate()
            .map_err(|e| AppError::BodyParsingError(e.to_string()))?;

        let ids = query.id_list();
        to_json(state.resolver.resolve_many(reference_type, ids.as_slice()).await)
    }
}

/// Empty body means default options.
fn parse_load_request(body: &Bytes) -> Result<LoadRequest, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(LoadRequest::default());
    }

    let req: LoadRequest =
        serde_json::from_slice(body).map_err(|e| AppError::BodyParsingError(e.to_string()))?;
    req.validate()
        .map_err(|e| AppError::BodyParsingError(e.to_string()))?;

    Ok(req)
}
