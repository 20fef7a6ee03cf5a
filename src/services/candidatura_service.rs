// src/services/candidatura_service.rs
use crate::{
    error::{AppError, AppResult},
    models::candidatura::{
        Candidatura, CandidaturaComFreelancer, CandidaturaComFreelancerRow,
        CandidaturaDetalhada, CandidaturaDetalhadaRow, CriarCandidaturaPayload,
        StatusCandidatura,
    },
    services::vaga_service,
};
use sqlx::SqlitePool;
use uuid::Uuid;

const COLUNAS_CANDIDATURA: &str = r#"
    id, vaga_id, freelancer_id, valor_proposto, descricao_proposta, status, criado_em
"#;

async fn buscar_por_id(db_pool: &SqlitePool, candidatura_id: &str) -> AppResult<Option<Candidatura>> {
    let candidatura = sqlx::query_as::<_, Candidatura>(&format!(
        "SELECT {COLUNAS_CANDIDATURA} FROM candidaturas WHERE id = ?1"
    ))
    .bind(candidatura_id)
    .fetch_optional(db_pool)
    .await?;
    Ok(candidatura)
}

/// Submete uma proposta a uma vaga. Regras: a vaga tem de existir, o dono
/// não pode candidatar-se à própria vaga e cada freelancer só se candidata
/// uma vez por vaga.
pub async fn criar_candidatura(
    db_pool: &SqlitePool,
    freelancer_id: &str,
    payload: CriarCandidaturaPayload,
) -> AppResult<Candidatura> {
    let vaga = vaga_service::buscar_vaga_por_id(db_pool, &payload.vaga_id)
        .await?
        .ok_or_else(|| AppError::NaoEncontrado("Vaga não encontrada".to_string()))?;

    if vaga.contratante_id == freelancer_id {
        return Err(AppError::Conflito(
            "Não é possível candidatar-se à própria vaga".to_string(),
        ));
    }

    let ja_existe: Option<i64> = sqlx::query_scalar(
        "SELECT 1 FROM candidaturas WHERE vaga_id = ?1 AND freelancer_id = ?2",
    )
    .bind(&payload.vaga_id)
    .bind(freelancer_id)
    .fetch_optional(db_pool)
    .await?;
    if ja_existe.is_some() {
        return Err(AppError::Conflito(
            "Você já se candidatou a esta vaga".to_string(),
        ));
    }

    // Sem valor proposto, assume o valor anunciado da vaga
    let valor_proposto = payload.valor_proposto.unwrap_or(vaga.valor);
    let id = Uuid::new_v4().to_string();

    let resultado = sqlx::query(
        r#"
        INSERT INTO candidaturas (id, vaga_id, freelancer_id, valor_proposto, descricao_proposta)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )
    .bind(&id)
    .bind(&payload.vaga_id)
    .bind(freelancer_id)
    .bind(&valor_proposto)
    .bind(&payload.descricao_proposta)
    .execute(db_pool)
    .await;

    // Corrida entre o check e o INSERT: a UNIQUE(vaga_id, freelancer_id)
    // é a garantia final (códigos 19/2067/1555 no SQLite)
    if let Err(sqlx::Error::Database(db_err)) = &resultado {
        if db_err
            .code()
            .map_or(false, |c| c == "19" || c == "2067" || c == "1555")
        {
            return Err(AppError::Conflito(
                "Você já se candidatou a esta vaga".to_string(),
            ));
        }
    }
    resultado?;

    tracing::info!(
        "✅ Candidatura de {} à vaga {} criada",
        freelancer_id,
        payload.vaga_id
    );

    buscar_por_id(db_pool, &id)
        .await?
        .ok_or(AppError::InternalServerError)
}

/// Candidatos de uma vaga, visíveis apenas ao contratante dono dela.
pub async fn listar_por_vaga(
    db_pool: &SqlitePool,
    vaga_id: &str,
    solicitante_id: &str,
) -> AppResult<Vec<CandidaturaComFreelancer>> {
    let vaga = vaga_service::buscar_vaga_por_id(db_pool, vaga_id)
        .await?
        .ok_or_else(|| AppError::NaoEncontrado("Vaga não encontrada".to_string()))?;
    if vaga.contratante_id != solicitante_id {
        tracing::warn!(
            "User {} tentou listar candidatos da vaga {} de outro contratante",
            solicitante_id,
            vaga_id
        );
        return Err(AppError::AcessoNegado);
    }

    let linhas = sqlx::query_as::<_, CandidaturaComFreelancerRow>(
        r#"
        SELECT
            c.id, c.vaga_id, c.valor_proposto, c.descricao_proposta, c.status, c.criado_em,
            u.id AS freelancer_id, u.nome AS freelancer_nome,
            u.email AS freelancer_email, u.cidade AS freelancer_cidade
        FROM candidaturas c
        JOIN usuarios u ON c.freelancer_id = u.id
        WHERE c.vaga_id = ?1
        ORDER BY c.criado_em DESC
        "#,
    )
    .bind(vaga_id)
    .fetch_all(db_pool)
    .await?;

    Ok(linhas.into_iter().map(Into::into).collect())
}

/// Candidaturas de um freelancer, enriquecidas com a vaga completa.
pub async fn listar_do_freelancer(
    db_pool: &SqlitePool,
    freelancer_id: &str,
) -> AppResult<Vec<CandidaturaDetalhada>> {
    let linhas = sqlx::query_as::<_, CandidaturaDetalhadaRow>(
        r#"
        SELECT
            c.id, c.valor_proposto, c.descricao_proposta, c.status, c.criado_em,
            v.id AS vaga_id, v.titulo AS vaga_titulo, v.descricao AS vaga_descricao,
            v.data AS vaga_data, v.hora AS vaga_hora, v.local_texto AS vaga_local,
            v.valor AS vaga_valor,
            u.id AS contratante_id, u.nome AS contratante_nome,
            u.cidade AS contratante_cidade,
            s.id AS subcategoria_id, s.nome AS subcategoria_nome,
            cat.id AS categoria_id, cat.nome AS categoria_nome
        FROM candidaturas c
        JOIN vagas v ON c.vaga_id = v.id
        JOIN usuarios u ON v.contratante_id = u.id
        JOIN subcategorias s ON v.subcategoria_id = s.id
        JOIN categorias cat ON s.categoria_id = cat.id
        WHERE c.freelancer_id = ?1
        ORDER BY c.criado_em DESC
        "#,
    )
    .bind(freelancer_id)
    .fetch_all(db_pool)
    .await?;

    Ok(linhas.into_iter().map(Into::into).collect())
}

/// Muda o status de uma candidatura. Só o contratante dono da vaga decide;
/// a transição é permissiva (pode re-decidir), semântica de sobrescrita.
pub async fn atualizar_status(
    db_pool: &SqlitePool,
    candidatura_id: &str,
    solicitante_id: &str,
    novo_status: StatusCandidatura,
) -> AppResult<Candidatura> {
    let candidatura = buscar_por_id(db_pool, candidatura_id)
        .await?
        .ok_or_else(|| AppError::NaoEncontrado("Candidatura não encontrada".to_string()))?;

    // A posse é verificada contra a vaga da candidatura, não apenas contra
    // o papel do chamador
    let vaga = vaga_service::buscar_vaga_por_id(db_pool, &candidatura.vaga_id)
        .await?
        .ok_or_else(|| AppError::NaoEncontrado("Vaga não encontrada".to_string()))?;
    if vaga.contratante_id != solicitante_id {
        tracing::warn!(
            "User {} tentou decidir candidatura {} de vaga alheia",
            solicitante_id,
            candidatura_id
        );
        return Err(AppError::AcessoNegado);
    }

    sqlx::query("UPDATE candidaturas SET status = ?1 WHERE id = ?2")
        .bind(novo_status.as_str())
        .bind(candidatura_id)
        .execute(db_pool)
        .await?;

    tracing::info!(
        "✅ Candidatura {} marcada como '{}' por {}",
        candidatura_id,
        novo_status.as_str(),
        solicitante_id
    );

    buscar_por_id(db_pool, candidatura_id)
        .await?
        .ok_or(AppError::InternalServerError)
}
