use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use crate::{
    dto::search::SearchResults,
    error::AppResult,
    response::ApiResponse,
    routes::params::SearchQuery,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(search))
}

#[utoipa::path(
    get,
    path = "/api/search",
    params(("q" = String, Query, description = "Search term, matched against medicines and pharmacies")),
    responses(
        (status = 200, description = "Top matches in both catalogs", body = ApiResponse<SearchResults>)
    ),
    tag = "Search"
)]
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<ApiResponse<SearchResults>>> {
    let results = state.search.search(&query.q).await?;
    Ok(Json(ApiResponse::success("OK", results, None)))
}
