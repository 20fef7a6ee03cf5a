// src/models/limite.rs
use sqlx::FromRow;

/// Contador de vagas criadas por (usuario, semana do ano).
/// Criado de forma preguiçosa na primeira vaga da semana; uma nova semana
/// simplesmente começa uma linha nova, sem reset explícito.
#[derive(Debug, Clone, FromRow)]
pub struct LimiteVagas {
    pub id: String,
    pub usuario_id: String,
    pub semana: i64,
    pub total_vagas: i64,
}
