// src/services/vaga_service.rs
use crate::{
    error::{erro_de_campo, AppError, AppResult},
    models::vaga::{
        AtualizarVagaPayload, CriarVagaPayload, FiltrosVagas, Vaga, VagaDetalhada,
        VagaDetalhadaRow,
    },
    services::{
        limite_service::{self, DecisaoLimite, PoliticaLimiteSemanal},
        usuario_service,
    },
};
use sqlx::SqlitePool;
use uuid::Uuid;

// Leitura enriquecida: vaga + contratante + subcategoria + categoria.
// O destaque já sai derivado (flag ligada E janela de 7 dias em vigor).
const SELECT_VAGA_DETALHADA: &str = r#"
    SELECT
        v.id, v.contratante_id, v.titulo, v.descricao, v.data, v.hora, v.agendas,
        v.local_texto, v.valor,
        COALESCE(v.destaque = 1 AND v.destaque_expira_em > datetime('now'), 0)
            AS destaque_vigente,
        v.criado_em,
        u.nome AS contratante_nome, u.cidade AS contratante_cidade,
        s.id AS subcategoria_id, s.nome AS subcategoria_nome,
        c.id AS categoria_id, c.nome AS categoria_nome
    FROM vagas v
    JOIN usuarios u ON v.contratante_id = u.id
    JOIN subcategorias s ON v.subcategoria_id = s.id
    JOIN categorias c ON s.categoria_id = c.id
"#;

/// Cria uma vaga aplicando a invariante de agendamento e a política de
/// limite semanal. O INSERT da vaga e o incremento do contador correm na
/// mesma transação.
pub async fn criar_vaga(
    db_pool: &SqlitePool,
    contratante_id: &str,
    payload: CriarVagaPayload,
    politica: &PoliticaLimiteSemanal,
) -> AppResult<VagaDetalhada> {
    // Invariante: agendamento simples (data + hora) OU agenda multi-dia
    if !payload.tem_agendamento() {
        return Err(erro_de_campo(
            "agendas",
            "agendamento_obrigatorio",
            "Informe data e hora ou pelo menos um dia de agenda",
        ));
    }

    let contratante = usuario_service::buscar_por_id(db_pool, contratante_id)
        .await?
        .ok_or_else(|| AppError::NaoEncontrado("Contratante não encontrado".to_string()))?;

    let subcategoria_existe: Option<i64> =
        sqlx::query_scalar("SELECT 1 FROM subcategorias WHERE id = ?1")
            .bind(&payload.subcategoria_id)
            .fetch_optional(db_pool)
            .await?;
    if subcategoria_existe.is_none() {
        return Err(AppError::NaoEncontrado(
            "Subcategoria não encontrada".to_string(),
        ));
    }

    // Contas premium não passam pela contagem e não acumulam linhas de limite
    let semana = limite_service::numero_semana_atual();
    if !contratante.premium {
        let total_semana = limite_service::buscar_limite(db_pool, contratante_id, semana)
            .await?
            .map(|l| l.total_vagas)
            .unwrap_or(0);
        if let DecisaoLimite::LimiteAtingido { maximo } =
            politica.avaliar(&contratante, total_semana)
        {
            tracing::warn!(
                "Limite semanal atingido para {} (semana {}, {} vagas)",
                contratante_id,
                semana,
                total_semana
            );
            return Err(AppError::Conflito(format!(
                "Limite semanal de vagas atingido (máximo de {} por semana)",
                maximo
            )));
        }
    }

    let agendas_json = match &payload.agendas {
        Some(agendas) if !agendas.is_empty() => {
            Some(serde_json::to_string(agendas).map_err(|e| {
                tracing::error!("Erro ao serializar agendas: {:?}", e);
                AppError::InternalServerError
            })?)
        }
        _ => None,
    };

    let id = Uuid::new_v4().to_string();
    let destaque = payload.destaque.unwrap_or(false);

    let mut tx = db_pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO vagas
            (id, contratante_id, subcategoria_id, titulo, descricao, data, hora,
             agendas, local_texto, valor, destaque, destaque_expira_em)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11,
                CASE WHEN ?11 THEN datetime('now', '+7 days') ELSE NULL END)
        "#,
    )
    .bind(&id)
    .bind(contratante_id)
    .bind(&payload.subcategoria_id)
    .bind(&payload.titulo)
    .bind(&payload.descricao)
    .bind(&payload.data)
    .bind(&payload.hora)
    .bind(&agendas_json)
    .bind(&payload.local_texto)
    .bind(&payload.valor)
    .bind(destaque)
    .execute(&mut *tx)
    .await?;

    if !contratante.premium {
        limite_service::registrar_vaga_criada(&mut *tx, contratante_id, semana).await?;
    }

    tx.commit().await?;
    tracing::info!("✅ Vaga '{}' criada por {}", id, contratante_id);

    buscar_vaga(db_pool, &id).await
}

/// Lista vagas com filtros opcionais e combináveis. Vagas destacadas vêm
/// primeiro; dentro de cada grupo, as mais recentes.
pub async fn listar_vagas(
    db_pool: &SqlitePool,
    filtros: FiltrosVagas,
) -> AppResult<Vec<VagaDetalhada>> {
    let mut sql = format!("{SELECT_VAGA_DETALHADA} WHERE 1 = 1");
    if filtros.cidade.is_some() {
        sql.push_str(" AND u.cidade = ?");
    }
    if filtros.categoria_id.is_some() {
        sql.push_str(" AND c.id = ?");
    }
    if filtros.subcategoria_id.is_some() {
        sql.push_str(" AND s.id = ?");
    }
    if filtros.data.is_some() {
        sql.push_str(" AND v.data = ?");
    }
    sql.push_str(" ORDER BY destaque_vigente DESC, v.criado_em DESC");

    let mut query = sqlx::query_as::<_, VagaDetalhadaRow>(&sql);
    if let Some(cidade) = &filtros.cidade {
        query = query.bind(cidade);
    }
    if let Some(categoria_id) = &filtros.categoria_id {
        query = query.bind(categoria_id);
    }
    if let Some(subcategoria_id) = &filtros.subcategoria_id {
        query = query.bind(subcategoria_id);
    }
    if let Some(data) = &filtros.data {
        query = query.bind(data);
    }

    let linhas = query.fetch_all(db_pool).await?;
    Ok(linhas.into_iter().map(|l| l.em_detalhada(true)).collect())
}

/// Vaga enriquecida por ID, ou "não encontrada".
pub async fn buscar_vaga(db_pool: &SqlitePool, vaga_id: &str) -> AppResult<VagaDetalhada> {
    let sql = format!("{SELECT_VAGA_DETALHADA} WHERE v.id = ?1");
    let linha = sqlx::query_as::<_, VagaDetalhadaRow>(&sql)
        .bind(vaga_id)
        .fetch_optional(db_pool)
        .await?
        .ok_or_else(|| AppError::NaoEncontrado("Vaga não encontrada".to_string()))?;
    Ok(linha.em_detalhada(true))
}

/// Linha crua da tabela, para checagens de posse.
pub async fn buscar_vaga_por_id(db_pool: &SqlitePool, vaga_id: &str) -> AppResult<Option<Vaga>> {
    let vaga = sqlx::query_as::<_, Vaga>(
        r#"
        SELECT id, contratante_id, subcategoria_id, titulo, descricao, data, hora,
               agendas, local_texto, valor, destaque, destaque_expira_em, criado_em
        FROM vagas
        WHERE id = ?1
        "#,
    )
    .bind(vaga_id)
    .fetch_optional(db_pool)
    .await?;
    Ok(vaga)
}

/// Vagas de um contratante, mais recentes primeiro. O contratante é o
/// próprio chamador, então a vista omite os dados dele.
pub async fn listar_vagas_do_contratante(
    db_pool: &SqlitePool,
    contratante_id: &str,
) -> AppResult<Vec<VagaDetalhada>> {
    let sql = format!("{SELECT_VAGA_DETALHADA} WHERE v.contratante_id = ?1 ORDER BY v.criado_em DESC");
    let linhas = sqlx::query_as::<_, VagaDetalhadaRow>(&sql)
        .bind(contratante_id)
        .fetch_all(db_pool)
        .await?;
    Ok(linhas.into_iter().map(|l| l.em_detalhada(false)).collect())
}

/// Atualização parcial de uma vaga. "Não encontrada" é verificado antes da
/// posse; só o dono altera.
pub async fn atualizar_vaga(
    db_pool: &SqlitePool,
    vaga_id: &str,
    solicitante_id: &str,
    payload: AtualizarVagaPayload,
) -> AppResult<VagaDetalhada> {
    let vaga = buscar_vaga_por_id(db_pool, vaga_id)
        .await?
        .ok_or_else(|| AppError::NaoEncontrado("Vaga não encontrada".to_string()))?;
    if vaga.contratante_id != solicitante_id {
        tracing::warn!(
            "User {} tentou editar vaga {} de outro contratante",
            solicitante_id,
            vaga_id
        );
        return Err(AppError::AcessoNegado);
    }

    if let Some(subcategoria_id) = &payload.subcategoria_id {
        let existe: Option<i64> = sqlx::query_scalar("SELECT 1 FROM subcategorias WHERE id = ?1")
            .bind(subcategoria_id)
            .fetch_optional(db_pool)
            .await?;
        if existe.is_none() {
            return Err(AppError::NaoEncontrado(
                "Subcategoria não encontrada".to_string(),
            ));
        }
    }

    let mut colunas: Vec<&str> = Vec::new();
    let mut valores: Vec<String> = Vec::new();
    if let Some(titulo) = payload.titulo {
        colunas.push("titulo = ?");
        valores.push(titulo);
    }
    if let Some(descricao) = payload.descricao {
        colunas.push("descricao = ?");
        valores.push(descricao);
    }
    if let Some(subcategoria_id) = payload.subcategoria_id {
        colunas.push("subcategoria_id = ?");
        valores.push(subcategoria_id);
    }
    if let Some(data) = payload.data {
        colunas.push("data = ?");
        valores.push(data);
    }
    if let Some(hora) = payload.hora {
        colunas.push("hora = ?");
        valores.push(hora);
    }
    if let Some(local_texto) = payload.local_texto {
        colunas.push("local_texto = ?");
        valores.push(local_texto);
    }
    if let Some(valor) = payload.valor {
        colunas.push("valor = ?");
        valores.push(valor);
    }

    if colunas.is_empty() {
        return buscar_vaga(db_pool, vaga_id).await;
    }

    let sql = format!("UPDATE vagas SET {} WHERE id = ?", colunas.join(", "));
    let mut query = sqlx::query(&sql);
    for valor in &valores {
        query = query.bind(valor);
    }
    query.bind(vaga_id).execute(db_pool).await?;

    tracing::info!("✅ Vaga {} atualizada por {}", vaga_id, solicitante_id);
    buscar_vaga(db_pool, vaga_id).await
}

/// Remove uma vaga (e, por cascata, as candidaturas dela). Só o dono.
pub async fn excluir_vaga(
    db_pool: &SqlitePool,
    vaga_id: &str,
    solicitante_id: &str,
) -> AppResult<()> {
    let vaga = buscar_vaga_por_id(db_pool, vaga_id)
        .await?
        .ok_or_else(|| AppError::NaoEncontrado("Vaga não encontrada".to_string()))?;
    if vaga.contratante_id != solicitante_id {
        tracing::warn!(
            "User {} tentou excluir vaga {} de outro contratante",
            solicitante_id,
            vaga_id
        );
        return Err(AppError::AcessoNegado);
    }

    sqlx::query("DELETE FROM vagas WHERE id = ?1")
        .bind(vaga_id)
        .execute(db_pool)
        .await?;

    tracing::info!("🗑️ Vaga {} excluída por {}", vaga_id, solicitante_id);
    Ok(())
}
