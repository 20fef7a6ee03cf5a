// src/web/vaga_handlers.rs
use crate::{
    error::AppResult,
    models::vaga::{AtualizarVagaPayload, CriarVagaPayload, FiltrosVagas},
    services::vaga_service,
    state::AppState,
    web::mw_auth::AuthUsuario,
};
use axum::{
    extract::{Extension, Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use validator::Validate;

// GET /vagas?cidade=&categoria_id=&subcategoria_id=&data=
pub async fn handle_listar_vagas(
    State(state): State<AppState>,
    Query(filtros): Query<FiltrosVagas>,
) -> AppResult<impl IntoResponse> {
    let vagas = vaga_service::listar_vagas(&state.db_pool, filtros).await?;
    Ok(Json(vagas))
}

// GET /vagas/{id}
pub async fn handle_ver_vaga(
    State(state): State<AppState>,
    Path(vaga_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let vaga = vaga_service::buscar_vaga(&state.db_pool, &vaga_id).await?;
    Ok(Json(vaga))
}

// POST /vagas (contratante)
pub async fn handle_criar_vaga(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUsuario>,
    Json(payload): Json<CriarVagaPayload>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;
    let vaga = vaga_service::criar_vaga(
        &state.db_pool,
        &auth.id,
        payload,
        &state.politica_limite,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(vaga)))
}

// GET /vagas/minhas (contratante)
pub async fn handle_minhas_vagas(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUsuario>,
) -> AppResult<impl IntoResponse> {
    let vagas = vaga_service::listar_vagas_do_contratante(&state.db_pool, &auth.id).await?;
    Ok(Json(vagas))
}

// PATCH /vagas/{id} (dono)
pub async fn handle_atualizar_vaga(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUsuario>,
    Path(vaga_id): Path<String>,
    Json(payload): Json<AtualizarVagaPayload>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;
    let vaga = vaga_service::atualizar_vaga(&state.db_pool, &vaga_id, &auth.id, payload).await?;
    Ok(Json(vaga))
}

// DELETE /vagas/{id} (dono)
pub async fn handle_excluir_vaga(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUsuario>,
    Path(vaga_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    vaga_service::excluir_vaga(&state.db_pool, &vaga_id, &auth.id).await?;
    Ok(Json(json!({ "mensagem": "Vaga excluída com sucesso" })))
}
