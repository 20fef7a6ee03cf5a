// src/state.rs
use crate::services::limite_service::PoliticaLimiteSemanal;
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    // Segredo usado para assinar e verificar os tokens JWT
    pub jwt_secret: String,
    // Política de quota injetada no serviço de vagas (trocável por plano)
    pub politica_limite: PoliticaLimiteSemanal,
}

// Permite extrair o pool da DB diretamente
impl axum::extract::FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> SqlitePool {
        state.db_pool.clone()
    }
}
