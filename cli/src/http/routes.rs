//! HTTP路由handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Local;
use listkeeper_core::api::{ItemList, ListSummary};

use crate::http::{
    models::*,
    params::FormParams,
    state::AppState,
    validation::{require_non_empty, require_param, validate_move_target},
};

/// 创建所有路由
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/list/all", get(all_lists_handler))
        .route("/list/new", post(new_list_handler))
        .route(
            "/list/id/:list_id",
            get(get_list_handler).delete(delete_list_handler),
        )
        .route("/list/id/:list_id/item/add", post(add_item_handler))
        .route(
            "/list/id/:list_id/item/id/:item_id",
            post(edit_item_handler).delete(delete_item_handler),
        )
        .route(
            "/list/id/:list_id/item/id/:item_id/move",
            post(move_item_handler),
        )
        .route("/health", get(health_handler))
        .with_state(state)
}

fn find_list(state: &AppState, list_id: &str) -> Result<std::sync::Arc<ItemList>, HttpServerError> {
    state
        .registry
        .get_list(list_id)
        .ok_or_else(|| HttpServerError::NotFound(format!("list not found: {list_id}")))
}

/// Empty 200, or the whole list when `return_list=true`.
fn ack_or_list(params: &FormParams, list: &ItemList) -> Response {
    if params.flag("return_list") {
        list_response(list)
    } else {
        StatusCode::OK.into_response()
    }
}

/// GET /list/all - 所有列表摘要（按创建时间升序）
async fn all_lists_handler(State(state): State<AppState>) -> Json<Vec<ListSummary>> {
    Json(state.registry.all_lists())
}

/// POST /list/new - 创建列表
async fn new_list_handler(
    State(state): State<AppState>,
    params: FormParams,
) -> Result<Response, HttpServerError> {
    let name = require_non_empty(&params, "name")?;
    let list = state.registry.new_list(name, state.default_max_items)?;
    tracing::info!(list_id = %list.id, name = %list.name, "List created");
    Ok(list_response(&list))
}

/// GET /list/id/:list_id - 获取完整列表
async fn get_list_handler(
    State(state): State<AppState>,
    Path(list_id): Path<String>,
) -> Result<Response, HttpServerError> {
    let list = find_list(&state, &list_id)?;
    Ok(list_response(&list))
}

/// DELETE /list/id/:list_id - 删除列表
async fn delete_list_handler(
    State(state): State<AppState>,
    Path(list_id): Path<String>,
) -> Result<StatusCode, HttpServerError> {
    state.registry.delete_list(&list_id)?;
    tracing::info!(list_id = %list_id, "List deleted");
    Ok(StatusCode::OK)
}

/// POST /list/id/:list_id/item/add - 追加条目
async fn add_item_handler(
    State(state): State<AppState>,
    Path(list_id): Path<String>,
    params: FormParams,
) -> Result<Response, HttpServerError> {
    let text = require_non_empty(&params, "text")?;
    let list = find_list(&state, &list_id)?;

    let requested = params.get("uuid").map(str::to_string);
    let item_id = list.store.add_item(text, requested)?;

    if params.flag("return_list") {
        return Ok(list_response(&list));
    }
    let item = list
        .store
        .get_item(&item_id)
        .ok_or_else(|| HttpServerError::NotFound(format!("item not found: {item_id}")))?;
    Ok(Json(item).into_response())
}

/// POST /list/id/:list_id/item/id/:item_id - 修改条目文本
async fn edit_item_handler(
    State(state): State<AppState>,
    Path((list_id, item_id)): Path<(String, String)>,
    params: FormParams,
) -> Result<Response, HttpServerError> {
    let text = require_param(&params, "text")?;
    let list = find_list(&state, &list_id)?;
    list.store.edit_item(&item_id, text)?;
    Ok(ack_or_list(&params, &list))
}

/// DELETE /list/id/:list_id/item/id/:item_id - 删除条目
async fn delete_item_handler(
    State(state): State<AppState>,
    Path((list_id, item_id)): Path<(String, String)>,
) -> Result<StatusCode, HttpServerError> {
    let list = find_list(&state, &list_id)?;
    list.store.delete_item(&item_id)?;
    Ok(StatusCode::OK)
}

/// POST /list/id/:list_id/item/id/:item_id/move - 移动条目
async fn move_item_handler(
    State(state): State<AppState>,
    Path((list_id, item_id)): Path<(String, String)>,
    params: FormParams,
) -> Result<Response, HttpServerError> {
    let target = validate_move_target(&params)?;
    let list = find_list(&state, &list_id)?;
    match &target {
        MoveTarget::After(anchor) => list.store.move_item_after(&item_id, anchor)?,
        MoveTarget::Before(anchor) => list.store.move_item_before(&item_id, anchor)?,
    }
    Ok(ack_or_list(&params, &list))
}

/// GET /health - 健康检查
async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let stats = &state.stats;

    Json(HealthResponse {
        status: "healthy".into(),
        uptime_seconds: stats.uptime_seconds(),
        requests_handled: stats.requests_total(),
        errors_total: stats.errors_total(),
        lists: state.registry.len(),
        timestamp: Local::now().to_rfc3339(),
    })
}
