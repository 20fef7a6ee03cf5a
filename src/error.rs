// src/error.rs
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;
use validator::{ValidationError, ValidationErrors};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Erro na base de dados: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Erro de migração da base de dados: {0}")]
    SqlxMigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Erro de variável de ambiente: {0}")]
    EnvVarError(#[from] std::env::VarError),

    #[error("Erro ao processar password")]
    PasswordHashingError,

    // Mensagem genérica: não revela se o email existe ou se a senha falhou
    #[error("Email ou senha inválidos")]
    InvalidCredentials,

    #[error("Token de autenticação inválido ou expirado")]
    TokenInvalido,

    #[error("Não autorizado")]
    Unauthorized,

    #[error("Acesso negado")]
    AcessoNegado,

    #[error("{0}")]
    NaoEncontrado(String),

    // Conflitos de regra de negócio (candidatura duplicada, limite semanal, etc.)
    #[error("{0}")]
    Conflito(String),

    #[error("Dados inválidos")]
    Validacao(#[from] ValidationErrors),

    #[error("Erro interno inesperado")]
    InternalServerError,
}

/// Monta um AppError::Validacao com um único erro de campo.
/// Usado para validações cruzadas que o derive do validator não cobre.
pub fn erro_de_campo(campo: &'static str, codigo: &'static str, mensagem: &str) -> AppError {
    let mut erros = ValidationErrors::new();
    let mut erro = ValidationError::new(codigo);
    erro.message = Some(mensagem.to_string().into());
    erros.add(campo, erro);
    AppError::Validacao(erros)
}

// Como converter AppError numa resposta HTTP (JSON)
impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        // Loga o erro detalhado no servidor
        tracing::error!("Erro processado: {:?}", self);

        let (status, body) = match &self {
            AppError::Validacao(erros) => (
                StatusCode::BAD_REQUEST,
                json!({ "erro": "Dados inválidos", "campos": erros }),
            ),
            AppError::NaoEncontrado(msg) => (StatusCode::NOT_FOUND, json!({ "erro": msg })),
            AppError::Conflito(msg) => (StatusCode::BAD_REQUEST, json!({ "erro": msg })),
            AppError::InvalidCredentials => (
                StatusCode::BAD_REQUEST,
                json!({ "erro": "Email ou senha inválidos" }),
            ),
            AppError::TokenInvalido => (
                StatusCode::UNAUTHORIZED,
                json!({ "erro": "Token de autenticação inválido ou expirado" }),
            ),
            AppError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, json!({ "erro": "Não autorizado" }))
            }
            AppError::AcessoNegado => (StatusCode::FORBIDDEN, json!({ "erro": "Acesso negado" })),
            // Erros internos nunca expõem detalhes ao cliente
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "erro": "Ocorreu um erro inesperado" }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

// Tipo Result padrão para a aplicação
pub type AppResult<T = ()> = Result<T, AppError>;
