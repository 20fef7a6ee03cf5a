// src/web/candidatura_handlers.rs
use crate::{
    error::AppResult,
    models::candidatura::{AtualizarStatusPayload, CriarCandidaturaPayload},
    services::candidatura_service,
    state::AppState,
    web::mw_auth::AuthUsuario,
};
use axum::{
    extract::{Extension, Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

// POST /candidaturas (freelancer)
pub async fn handle_criar_candidatura(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUsuario>,
    Json(payload): Json<CriarCandidaturaPayload>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;
    let candidatura =
        candidatura_service::criar_candidatura(&state.db_pool, &auth.id, payload).await?;
    Ok((StatusCode::CREATED, Json(candidatura)))
}

// GET /candidaturas/minhas (freelancer)
pub async fn handle_minhas_candidaturas(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUsuario>,
) -> AppResult<impl IntoResponse> {
    let candidaturas =
        candidatura_service::listar_do_freelancer(&state.db_pool, &auth.id).await?;
    Ok(Json(candidaturas))
}

// GET /candidaturas/vaga/{vaga_id} (contratante dono da vaga)
pub async fn handle_candidaturas_da_vaga(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUsuario>,
    Path(vaga_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let candidaturas =
        candidatura_service::listar_por_vaga(&state.db_pool, &vaga_id, &auth.id).await?;
    Ok(Json(candidaturas))
}

// PATCH /candidaturas/{id}/status (contratante dono da vaga)
pub async fn handle_atualizar_status(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUsuario>,
    Path(candidatura_id): Path<String>,
    Json(payload): Json<AtualizarStatusPayload>,
) -> AppResult<impl IntoResponse> {
    let candidatura = candidatura_service::atualizar_status(
        &state.db_pool,
        &candidatura_id,
        &auth.id,
        payload.status,
    )
    .await?;
    Ok(Json(candidatura))
}
