use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
};

use crate::{AppState, error::AppResult, templates};

pub async fn root() -> Redirect {
    Redirect::to("/movies")
}

pub async fn movie_list(State(state): State<Arc<AppState>>) -> AppResult<Html<String>> {
    let movies = state.store.list_movies().await?;
    Ok(Html(templates::movie_list_page(&movies)))
}

pub async fn movie_detail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<Html<String>> {
    let detail = state.store.get_movie(id).await?;
    Ok(Html(templates::movie_detail_page(&detail)))
}
