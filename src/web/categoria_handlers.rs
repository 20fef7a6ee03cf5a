// src/web/categoria_handlers.rs
use crate::{error::AppResult, services::categoria_service, state::AppState};
use axum::{
    extract::{Json, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct FiltroSubcategorias {
    pub categoria_id: Option<String>,
}

// GET /categorias
pub async fn handle_listar_categorias(
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let categorias = categoria_service::listar_categorias(&state.db_pool).await?;
    Ok(Json(categorias))
}

// GET /subcategorias?categoria_id=
pub async fn handle_listar_subcategorias(
    State(state): State<AppState>,
    Query(filtro): Query<FiltroSubcategorias>,
) -> AppResult<impl IntoResponse> {
    let subcategorias =
        categoria_service::listar_subcategorias(&state.db_pool, filtro.categoria_id.as_deref())
            .await?;
    Ok(Json(subcategorias))
}
