//! HTTP API of the development directory server.
//!
//! Serves an in-memory directory in the wire format [`HttpDirectory`]
//! speaks:
//! - `GET /api/auth/users?uids=[...]`
//! - `GET /api/auth/users/{id}`
//! - `GET /api/auth/users/search?q=&exclude=[...]&skip=&limit=`
//!
//! [`HttpDirectory`]: picker_directory::HttpDirectory

use axum::{
    Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
};
use picker_directory::{DEFAULT_PAGE_SIZE, MemoryDirectory, SearchQuery};
use picker_types::{Entity, EntityId, SearchHit};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::debug;

/// Route prefix of the users collection.
pub const USERS_PATH: &str = "/api/auth/users";

type ApiResult<T> = Result<Json<T>, (StatusCode, String)>;

#[derive(Debug, Deserialize)]
struct LookupParams {
    /// JSON array of ids.
    uids: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    q: Option<String>,
    /// JSON array of ids.
    exclude: Option<String>,
    skip: Option<usize>,
    limit: Option<usize>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SearchResponse {
    pub results: Vec<SearchHit>,
}

fn parse_id_list<T: FromIterator<EntityId>>(
    raw: Option<&str>,
    param: &str,
) -> Result<T, (StatusCode, String)> {
    let Some(raw) = raw.filter(|s| !s.trim().is_empty()) else {
        return Ok(std::iter::empty().collect());
    };
    let ids: Vec<EntityId> = serde_json::from_str(raw).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            format!("`{param}` must be a JSON array of ids: {e}"),
        )
    })?;
    Ok(ids.into_iter().collect())
}

async fn lookup_handler(
    State(directory): State<Arc<MemoryDirectory>>,
    Query(params): Query<LookupParams>,
) -> ApiResult<Vec<Entity>> {
    let ids: Vec<EntityId> = parse_id_list(params.uids.as_deref(), "uids")?;
    let found = directory.lookup_sync(&ids);
    debug!("Lookup of {} ids matched {}", ids.len(), found.len());
    Ok(Json(found))
}

async fn user_handler(
    State(directory): State<Arc<MemoryDirectory>>,
    Path(id): Path<String>,
) -> ApiResult<Entity> {
    let id = EntityId::try_from(id).map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
    directory
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("no user {id}")))
}

async fn search_handler(
    State(directory): State<Arc<MemoryDirectory>>,
    Query(params): Query<SearchParams>,
) -> ApiResult<SearchResponse> {
    let exclude: BTreeSet<EntityId> = parse_id_list(params.exclude.as_deref(), "exclude")?;
    let query = SearchQuery {
        text: params.q.unwrap_or_default(),
        exclude,
        skip: params.skip.unwrap_or(0),
        limit: params.limit.unwrap_or(DEFAULT_PAGE_SIZE),
    };
    let results = directory.search_sync(&query);
    debug!(
        "Search {:?} (skip {}, limit {}) returned {} hits",
        query.text,
        query.skip,
        query.effective_limit(),
        results.len()
    );
    Ok(Json(SearchResponse { results }))
}

/// Build the HTTP API router over the given directory.
pub fn build_router(directory: Arc<MemoryDirectory>) -> Router {
    Router::new()
        .route(USERS_PATH, get(lookup_handler))
        .route(&format!("{USERS_PATH}/search"), get(search_handler))
        .route(&format!("{USERS_PATH}/{{id}}"), get(user_handler))
        .with_state(directory)
}
