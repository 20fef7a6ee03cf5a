// src/services/usuario_service.rs
use crate::{
    error::{erro_de_campo, AppError, AppResult},
    models::usuario::{
        AtualizarPerfilPayload, ComprarDestaquePayload, EstatisticasContratante,
        EstatisticasFreelancer, PerfilUsuario, Usuario,
    },
    services::vaga_service,
};
use serde::Serialize;
use sqlx::SqlitePool;
use uuid::Uuid;

const COLUNAS_USUARIO: &str = r#"
    id, nome, email, senha_hash, tipo, tipo_pessoa, cpf, cnpj, cidade,
    premium, destaque, destaque_expira_em, id_externo, criado_em
"#;

/// Busca um utilizador pelo seu ID.
pub async fn buscar_por_id(db_pool: &SqlitePool, usuario_id: &str) -> AppResult<Option<Usuario>> {
    tracing::debug!("Buscando utilizador por ID: {}", usuario_id);
    let usuario = sqlx::query_as::<_, Usuario>(&format!(
        "SELECT {COLUNAS_USUARIO} FROM usuarios WHERE id = ?1"
    ))
    .bind(usuario_id)
    .fetch_optional(db_pool)
    .await?;
    Ok(usuario)
}

/// Busca um utilizador pelo email (chave de convergência das duas formas de
/// autenticação).
pub async fn buscar_por_email(db_pool: &SqlitePool, email: &str) -> AppResult<Option<Usuario>> {
    tracing::debug!("Buscando utilizador por email: {}", email);
    let usuario = sqlx::query_as::<_, Usuario>(&format!(
        "SELECT {COLUNAS_USUARIO} FROM usuarios WHERE email = ?1"
    ))
    .bind(email)
    .fetch_optional(db_pool)
    .await?;
    Ok(usuario)
}

pub struct NovoUsuario {
    pub nome: String,
    pub email: String,
    pub senha_hash: Option<String>,
    pub tipo: String,
    pub tipo_pessoa: Option<String>,
    pub cpf: Option<String>,
    pub cnpj: Option<String>,
    pub cidade: Option<String>,
    pub id_externo: Option<String>,
}

pub async fn criar_usuario(db_pool: &SqlitePool, novo: NovoUsuario) -> AppResult<Usuario> {
    let id = Uuid::new_v4().to_string();
    tracing::info!("Criando utilizador {} ({})", novo.email, id);

    let resultado = sqlx::query(
        r#"
        INSERT INTO usuarios
            (id, nome, email, senha_hash, tipo, tipo_pessoa, cpf, cnpj, cidade, id_externo)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
        "#,
    )
    .bind(&id)
    .bind(&novo.nome)
    .bind(&novo.email)
    .bind(&novo.senha_hash)
    .bind(&novo.tipo)
    .bind(&novo.tipo_pessoa)
    .bind(&novo.cpf)
    .bind(&novo.cnpj)
    .bind(&novo.cidade)
    .bind(&novo.id_externo)
    .execute(db_pool)
    .await;

    // Corrida entre o check de duplicado e o INSERT: a constraint UNIQUE
    // do email é a garantia final (códigos 19/2067/1555 no SQLite)
    if let Err(sqlx::Error::Database(db_err)) = &resultado {
        if db_err
            .code()
            .map_or(false, |c| c == "19" || c == "2067" || c == "1555")
        {
            tracing::warn!("Email já registrado: {}", novo.email);
            return Err(AppError::Conflito(
                "Já existe uma conta com este email".to_string(),
            ));
        }
    }
    resultado?;

    buscar_por_id(db_pool, &id)
        .await?
        .ok_or(AppError::InternalServerError)
}

pub async fn vincular_id_externo(
    db_pool: &SqlitePool,
    usuario_id: &str,
    id_externo: &str,
) -> AppResult<()> {
    sqlx::query("UPDATE usuarios SET id_externo = ?1 WHERE id = ?2")
        .bind(id_externo)
        .bind(usuario_id)
        .execute(db_pool)
        .await?;
    Ok(())
}

/// Perfil público de um utilizador (sem hash de senha).
pub async fn buscar_perfil(db_pool: &SqlitePool, usuario_id: &str) -> AppResult<PerfilUsuario> {
    let usuario = buscar_por_id(db_pool, usuario_id)
        .await?
        .ok_or_else(|| AppError::NaoEncontrado("Utilizador não encontrado".to_string()))?;
    Ok(PerfilUsuario::from(usuario))
}

/// Atualização parcial do próprio perfil (nome e/ou cidade).
pub async fn atualizar_perfil(
    db_pool: &SqlitePool,
    usuario_id: &str,
    payload: AtualizarPerfilPayload,
) -> AppResult<PerfilUsuario> {
    let mut colunas: Vec<&str> = Vec::new();
    let mut valores: Vec<String> = Vec::new();

    if let Some(nome) = payload.nome {
        colunas.push("nome = ?");
        valores.push(nome);
    }
    if let Some(cidade) = payload.cidade {
        colunas.push("cidade = ?");
        valores.push(cidade);
    }

    if colunas.is_empty() {
        // Nada para alterar; devolve o perfil atual
        return buscar_perfil(db_pool, usuario_id).await;
    }

    let sql = format!("UPDATE usuarios SET {} WHERE id = ?", colunas.join(", "));
    let mut query = sqlx::query(&sql);
    for valor in &valores {
        query = query.bind(valor);
    }
    let linhas = query.bind(usuario_id).execute(db_pool).await?.rows_affected();

    if linhas == 0 {
        return Err(AppError::NaoEncontrado(
            "Utilizador não encontrado".to_string(),
        ));
    }

    tracing::info!("✅ Perfil atualizado para user: {}", usuario_id);
    buscar_perfil(db_pool, usuario_id).await
}

/// Ativa o plano premium. O processamento de pagamento é simulado: a
/// chamada apenas liga a flag.
pub async fn virar_premium(db_pool: &SqlitePool, usuario_id: &str) -> AppResult<PerfilUsuario> {
    let linhas = sqlx::query("UPDATE usuarios SET premium = 1 WHERE id = ?1")
        .bind(usuario_id)
        .execute(db_pool)
        .await?
        .rows_affected();

    if linhas == 0 {
        return Err(AppError::NaoEncontrado(
            "Utilizador não encontrado".to_string(),
        ));
    }
    tracing::info!("✅ Conta premium ativada para user: {}", usuario_id);
    buscar_perfil(db_pool, usuario_id).await
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum DestaqueComprado {
    Perfil(PerfilUsuario),
    Vaga(crate::models::vaga::VagaDetalhada),
}

/// Compra de destaque (janela de 7 dias). Para 'perfil' destaca a própria
/// conta; para 'vaga' exige o alvo e verifica que pertence ao comprador.
pub async fn comprar_destaque(
    db_pool: &SqlitePool,
    usuario_id: &str,
    payload: ComprarDestaquePayload,
) -> AppResult<DestaqueComprado> {
    match payload.tipo.as_str() {
        "perfil" => {
            let linhas = sqlx::query(
                r#"
                UPDATE usuarios
                SET destaque = 1, destaque_expira_em = datetime('now', '+7 days')
                WHERE id = ?1
                "#,
            )
            .bind(usuario_id)
            .execute(db_pool)
            .await?
            .rows_affected();

            if linhas == 0 {
                return Err(AppError::NaoEncontrado(
                    "Utilizador não encontrado".to_string(),
                ));
            }
            tracing::info!("✅ Destaque de perfil ativado para user: {}", usuario_id);
            Ok(DestaqueComprado::Perfil(
                buscar_perfil(db_pool, usuario_id).await?,
            ))
        }
        "vaga" => {
            let vaga_id = payload.vaga_id.as_deref().ok_or_else(|| {
                erro_de_campo(
                    "vaga_id",
                    "vaga_obrigatoria",
                    "Informe a vaga a destacar",
                )
            })?;

            let vaga = vaga_service::buscar_vaga_por_id(db_pool, vaga_id)
                .await?
                .ok_or_else(|| AppError::NaoEncontrado("Vaga não encontrada".to_string()))?;
            if vaga.contratante_id != usuario_id {
                tracing::warn!(
                    "User {} tentou destacar vaga {} de outro contratante",
                    usuario_id,
                    vaga_id
                );
                return Err(AppError::AcessoNegado);
            }

            sqlx::query(
                r#"
                UPDATE vagas
                SET destaque = 1, destaque_expira_em = datetime('now', '+7 days')
                WHERE id = ?1
                "#,
            )
            .bind(vaga_id)
            .execute(db_pool)
            .await?;

            tracing::info!("✅ Destaque ativado para vaga: {}", vaga_id);
            Ok(DestaqueComprado::Vaga(
                vaga_service::buscar_vaga(db_pool, vaga_id).await?,
            ))
        }
        // O payload já foi validado; qualquer outro valor é bug de chamada
        _ => Err(AppError::InternalServerError),
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Estatisticas {
    Contratante(EstatisticasContratante),
    Freelancer(EstatisticasFreelancer),
}

/// Números do painel, conforme o papel do utilizador.
pub async fn estatisticas(
    db_pool: &SqlitePool,
    usuario_id: &str,
    tipo: &str,
) -> AppResult<Estatisticas> {
    if tipo == "contratante" {
        let vagas_ativas: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM vagas WHERE contratante_id = ?1")
                .bind(usuario_id)
                .fetch_one(db_pool)
                .await?;

        let total_candidatos: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM candidaturas c
            JOIN vagas v ON c.vaga_id = v.id
            WHERE v.contratante_id = ?1
            "#,
        )
        .bind(usuario_id)
        .fetch_one(db_pool)
        .await?;

        let vagas_concluidas: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(DISTINCT v.id)
            FROM vagas v
            JOIN candidaturas c ON c.vaga_id = v.id
            WHERE v.contratante_id = ?1 AND c.status = 'aceita'
            "#,
        )
        .bind(usuario_id)
        .fetch_one(db_pool)
        .await?;

        Ok(Estatisticas::Contratante(EstatisticasContratante {
            vagas_ativas,
            total_candidatos,
            vagas_concluidas,
        }))
    } else {
        let (total_candidaturas, aceitas, pendentes): (i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT
                COUNT(*),
                COALESCE(SUM(status = 'aceita'), 0),
                COALESCE(SUM(status = 'pendente'), 0)
            FROM candidaturas
            WHERE freelancer_id = ?1
            "#,
        )
        .bind(usuario_id)
        .fetch_one(db_pool)
        .await?;

        Ok(Estatisticas::Freelancer(EstatisticasFreelancer {
            total_candidaturas,
            aceitas,
            pendentes,
        }))
    }
}
