// src/services/auth_service.rs
use crate::{
    error::{AppError, AppResult},
    models::usuario::{
        LoginPayload, PerfilUsuario, RegistrarPayload, RespostaAuth, SincronizarPayload,
    },
    services::usuario_service::{self, NovoUsuario},
};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

// Validade do token de sessão (7 dias)
const TOKEN_VALIDADE_SEGUNDOS: i64 = 7 * 24 * 60 * 60;

/// Verifica se a senha fornecida corresponde ao hash guardado.
pub async fn verify_password(password: &str, stored_hash: &str) -> AppResult<bool> {
    let password = password.to_string();
    let stored_hash = stored_hash.to_string();
    tokio::task::spawn_blocking(move || {
        tracing::debug!("Verificando hash bcrypt...");
        bcrypt::verify(&password, &stored_hash)
    })
    .await
    .map_err(|e| {
        tracing::error!("Erro na task spawn_blocking (verify_password): {:?}", e);
        AppError::InternalServerError
    })?
    .map_err(|e| {
        tracing::error!("Erro bcrypt ao verificar senha: {:?}", e);
        AppError::PasswordHashingError
    })
}

/// Gera um hash bcrypt para uma senha.
pub async fn hash_password(password: &str) -> AppResult<String> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || {
        tracing::debug!("Gerando hash bcrypt...");
        bcrypt::hash(&password, bcrypt::DEFAULT_COST)
    })
    .await
    .map_err(|e| {
        tracing::error!("Erro na task spawn_blocking (hash_password): {:?}", e);
        AppError::InternalServerError
    })?
    .map_err(|e| {
        tracing::error!("Erro bcrypt ao gerar hash: {:?}", e);
        AppError::PasswordHashingError
    })
}

// --- Tokens de sessão (JWT) ---

// Conteúdo assinado do token: {userId, email, tipo}
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // id do utilizador
    pub email: String,
    pub tipo: String, // "freelancer" | "contratante"
    pub exp: i64,
    pub iat: i64,
}

pub fn gerar_token(segredo: &str, perfil: &PerfilUsuario) -> AppResult<String> {
    let agora = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: perfil.id.clone(),
        email: perfil.email.clone(),
        tipo: perfil.tipo.clone(),
        exp: agora + TOKEN_VALIDADE_SEGUNDOS,
        iat: agora,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(segredo.as_bytes()),
    )
    .map_err(|e| {
        tracing::error!("Erro ao assinar token JWT: {:?}", e);
        AppError::InternalServerError
    })
}

pub fn verificar_token(segredo: &str, token: &str) -> AppResult<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(segredo.as_bytes()),
        &Validation::default(),
    )
    .map(|dados| dados.claims)
    .map_err(|e| {
        tracing::debug!("Token rejeitado: {:?}", e);
        AppError::TokenInvalido
    })
}

// --- Resolução de identidade ---

/// As duas formas de provar quem se é: senha local ou assinatura já
/// verificada de um provedor externo. Ambas convergem no mesmo registo de
/// utilizador (chaveado por email) e no mesmo formato de token.
pub enum Identidade<'a> {
    Senha { email: &'a str, senha: &'a str },
    Externa {
        id_externo: &'a str,
        email: &'a str,
        nome: &'a str,
        tipo: &'a str,
    },
}

pub async fn resolver_identidade(
    db_pool: &SqlitePool,
    segredo: &str,
    identidade: Identidade<'_>,
) -> AppResult<RespostaAuth> {
    let usuario = match identidade {
        Identidade::Senha { email, senha } => {
            let usuario = usuario_service::buscar_por_email(db_pool, email)
                .await?
                .ok_or(AppError::InvalidCredentials)?;
            // Contas externas não têm senha local; a mensagem continua genérica
            let hash = usuario
                .senha_hash
                .as_deref()
                .ok_or(AppError::InvalidCredentials)?;
            if !verify_password(senha, hash).await? {
                tracing::warn!("Senha incorreta para email: {}", email);
                return Err(AppError::InvalidCredentials);
            }
            usuario
        }
        Identidade::Externa {
            id_externo,
            email,
            nome,
            tipo,
        } => {
            match usuario_service::buscar_por_email(db_pool, email).await? {
                Some(usuario) => {
                    // Garante o vínculo com o provedor externo
                    if usuario.id_externo.as_deref() != Some(id_externo) {
                        usuario_service::vincular_id_externo(db_pool, &usuario.id, id_externo)
                            .await?;
                    }
                    usuario
                }
                None => {
                    tracing::info!("Criando conta local para identidade externa: {}", email);
                    usuario_service::criar_usuario(
                        db_pool,
                        NovoUsuario {
                            nome: nome.to_string(),
                            email: email.to_string(),
                            senha_hash: None,
                            tipo: tipo.to_string(),
                            tipo_pessoa: None,
                            cpf: None,
                            cnpj: None,
                            cidade: None,
                            id_externo: Some(id_externo.to_string()),
                        },
                    )
                    .await?
                }
            }
        }
    };

    let perfil = PerfilUsuario::from(usuario);
    let token = gerar_token(segredo, &perfil)?;
    tracing::info!("✅ Sessão emitida para: {}", perfil.email);
    Ok(RespostaAuth {
        usuario: perfil,
        token,
    })
}

// --- Operações de conta ---

pub async fn registrar(
    db_pool: &SqlitePool,
    segredo: &str,
    payload: RegistrarPayload,
) -> AppResult<RespostaAuth> {
    tracing::info!("Tentativa de registro para email: {}", payload.email);

    if usuario_service::buscar_por_email(db_pool, &payload.email)
        .await?
        .is_some()
    {
        return Err(AppError::Conflito(
            "Já existe uma conta com este email".to_string(),
        ));
    }

    let senha_hash = hash_password(&payload.senha).await?;
    let usuario = usuario_service::criar_usuario(
        db_pool,
        NovoUsuario {
            nome: payload.nome,
            email: payload.email,
            senha_hash: Some(senha_hash),
            tipo: payload.tipo,
            tipo_pessoa: payload.tipo_pessoa,
            cpf: payload.cpf,
            cnpj: payload.cnpj,
            cidade: payload.cidade,
            id_externo: None,
        },
    )
    .await?;

    let perfil = PerfilUsuario::from(usuario);
    let token = gerar_token(segredo, &perfil)?;
    tracing::info!("✅ Conta criada: {}", perfil.email);
    Ok(RespostaAuth {
        usuario: perfil,
        token,
    })
}

pub async fn login(
    db_pool: &SqlitePool,
    segredo: &str,
    payload: LoginPayload,
) -> AppResult<RespostaAuth> {
    tracing::info!("Tentativa de login para email: {}", payload.email);
    resolver_identidade(
        db_pool,
        segredo,
        Identidade::Senha {
            email: &payload.email,
            senha: &payload.senha,
        },
    )
    .await
}

/// Caminho de autenticação delegada: o provedor externo já verificou a
/// identidade; aqui só convergimos para o registo local e emitimos o token.
pub async fn sincronizar_externo(
    db_pool: &SqlitePool,
    segredo: &str,
    payload: SincronizarPayload,
) -> AppResult<RespostaAuth> {
    resolver_identidade(
        db_pool,
        segredo,
        Identidade::Externa {
            id_externo: &payload.id_externo,
            email: &payload.email,
            nome: &payload.nome,
            tipo: &payload.tipo,
        },
    )
    .await
}
