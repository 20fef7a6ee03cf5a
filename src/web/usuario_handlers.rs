// src/web/usuario_handlers.rs
use crate::{
    error::AppResult,
    models::usuario::{AtualizarPerfilPayload, ComprarDestaquePayload},
    services::usuario_service,
    state::AppState,
    web::mw_auth::AuthUsuario,
};
use axum::{
    extract::{Extension, Json, State},
    response::IntoResponse,
};
use validator::Validate;

// PATCH /usuarios/perfil — o chamador só altera o próprio perfil
pub async fn handle_atualizar_perfil(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUsuario>,
    Json(payload): Json<AtualizarPerfilPayload>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;
    let perfil = usuario_service::atualizar_perfil(&state.db_pool, &auth.id, payload).await?;
    Ok(Json(perfil))
}

// POST /usuarios/premium — pagamento simulado, só liga a flag
pub async fn handle_virar_premium(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUsuario>,
) -> AppResult<impl IntoResponse> {
    let perfil = usuario_service::virar_premium(&state.db_pool, &auth.id).await?;
    Ok(Json(perfil))
}

// POST /usuarios/destaque {tipo: "perfil" | "vaga", vaga_id?}
pub async fn handle_comprar_destaque(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUsuario>,
    Json(payload): Json<ComprarDestaquePayload>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;
    let resultado = usuario_service::comprar_destaque(&state.db_pool, &auth.id, payload).await?;
    Ok(Json(resultado))
}

// GET /usuarios/estatisticas — números conforme o papel do chamador
pub async fn handle_estatisticas(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUsuario>,
) -> AppResult<impl IntoResponse> {
    let estatisticas =
        usuario_service::estatisticas(&state.db_pool, &auth.id, &auth.tipo).await?;
    Ok(Json(estatisticas))
}
