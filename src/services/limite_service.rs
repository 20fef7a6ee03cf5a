// src/services/limite_service.rs
use crate::{
    error::AppResult,
    models::{limite::LimiteVagas, usuario::Usuario},
};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

const SEMANA_MS: i64 = 7 * 24 * 60 * 60 * 1000;

/// Número da semana do ano: milissegundos decorridos desde 1º de janeiro,
/// divididos por uma semana e arredondados para cima (dias 1–7 -> semana 1).
/// Função pura do instante recebido; recomeça em 1 a cada virada de ano.
pub fn numero_semana(agora: DateTime<Utc>) -> i64 {
    let inicio_ano = NaiveDate::from_ymd_opt(agora.year(), 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .unwrap_or(agora); // 1º de janeiro sempre existe
    let decorrido_ms = (agora - inicio_ano).num_milliseconds();
    ((decorrido_ms + SEMANA_MS - 1) / SEMANA_MS).max(1)
}

pub fn numero_semana_atual() -> i64 {
    numero_semana(Utc::now())
}

/// Busca o contador da semana para um utilizador, se já existir.
pub async fn buscar_limite(
    db_pool: &SqlitePool,
    usuario_id: &str,
    semana: i64,
) -> AppResult<Option<LimiteVagas>> {
    let limite = sqlx::query_as::<_, LimiteVagas>(
        r#"
        SELECT id, usuario_id, semana, total_vagas
        FROM limites_vagas
        WHERE usuario_id = ?1 AND semana = ?2
        "#,
    )
    .bind(usuario_id)
    .bind(semana)
    .fetch_optional(db_pool)
    .await?;
    Ok(limite)
}

/// Contabiliza mais uma vaga criada na semana. UPSERT atômico: insere a linha
/// com total 1 ou incrementa a existente numa única instrução, fechando a
/// corrida do ler-depois-escrever entre criações concorrentes.
pub async fn registrar_vaga_criada<'e, E>(executor: E, usuario_id: &str, semana: i64) -> AppResult<()>
where
    E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
{
    let id = Uuid::new_v4().to_string();
    sqlx::query(
        r#"
        INSERT INTO limites_vagas (id, usuario_id, semana, total_vagas)
        VALUES (?1, ?2, ?3, 1)
        ON CONFLICT(usuario_id, semana) DO UPDATE SET
            total_vagas = total_vagas + 1
        "#,
    )
    .bind(id)
    .bind(usuario_id)
    .bind(semana)
    .execute(executor)
    .await?;
    Ok(())
}

// --- Política de limite semanal ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisaoLimite {
    Permitida,
    LimiteAtingido { maximo: i64 },
}

/// Política explícita de quota de publicação, injetada no serviço de vagas.
/// Contas premium não passam pela contagem; as demais ficam limitadas a
/// `maximo` vagas por semana do calendário.
#[derive(Debug, Clone)]
pub struct PoliticaLimiteSemanal {
    pub maximo: i64,
}

impl Default for PoliticaLimiteSemanal {
    fn default() -> Self {
        PoliticaLimiteSemanal { maximo: 3 }
    }
}

impl PoliticaLimiteSemanal {
    pub fn avaliar(&self, usuario: &Usuario, total_semana: i64) -> DecisaoLimite {
        if usuario.premium {
            return DecisaoLimite::Permitida;
        }
        if total_semana >= self.maximo {
            DecisaoLimite::LimiteAtingido { maximo: self.maximo }
        } else {
            DecisaoLimite::Permitida
        }
    }
}
