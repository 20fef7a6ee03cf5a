// src/web/auth_handlers.rs
use crate::{
    error::AppResult,
    models::usuario::{LoginPayload, RegistrarPayload, SincronizarPayload},
    services::{auth_service, usuario_service},
    state::AppState,
    web::mw_auth::AuthUsuario,
};
use axum::{
    extract::{Extension, Json, State},
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

// POST /auth/registrar
pub async fn handle_registrar(
    State(state): State<AppState>,
    Json(payload): Json<RegistrarPayload>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;
    let resposta = auth_service::registrar(&state.db_pool, &state.jwt_secret, payload).await?;
    Ok((StatusCode::CREATED, Json(resposta)))
}

// POST /auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;
    let resposta = auth_service::login(&state.db_pool, &state.jwt_secret, payload).await?;
    Ok(Json(resposta))
}

// POST /auth/sincronizar — identidade já verificada por provedor externo
pub async fn handle_sincronizar(
    State(state): State<AppState>,
    Json(payload): Json<SincronizarPayload>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;
    let resposta =
        auth_service::sincronizar_externo(&state.db_pool, &state.jwt_secret, payload).await?;
    Ok(Json(resposta))
}

// GET /auth/perfil
pub async fn handle_perfil(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUsuario>,
) -> AppResult<impl IntoResponse> {
    let perfil = usuario_service::buscar_perfil(&state.db_pool, &auth.id).await?;
    Ok(Json(perfil))
}
