// src/web/mw_auth.rs
use crate::{error::AppError, services::auth_service, state::AppState};
use axum::{
    extract::{Extension, Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

// Identidade autenticada, posta nas extensões da requisição para os
// handlers protegidos
#[derive(Clone, Debug)]
pub struct AuthUsuario {
    pub id: String,
    pub email: String,
    pub tipo: String, // "freelancer" | "contratante"
}

/// Middleware que exige um token Bearer válido.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|valor| valor.to_str().ok())
        .and_then(|valor| valor.strip_prefix("Bearer "));

    match token {
        Some(token) => {
            // Token inválido/expirado vira AppError::TokenInvalido (401)
            let claims = auth_service::verificar_token(&state.jwt_secret, token)?;
            tracing::debug!("Autenticação MW: utilizador '{}' autenticado.", claims.sub);
            request.extensions_mut().insert(AuthUsuario {
                id: claims.sub,
                email: claims.email,
                tipo: claims.tipo,
            });
            Ok(next.run(request).await)
        }
        None => {
            tracing::debug!("Autenticação MW: requisição sem token Bearer.");
            Err(AppError::Unauthorized)
        }
    }
}

/// Middleware que exige o papel 'contratante'.
/// Deve ser executado *depois* do middleware `require_auth`.
pub async fn require_contratante(
    Extension(auth): Extension<AuthUsuario>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if auth.tipo == "contratante" {
        Ok(next.run(request).await)
    } else {
        tracing::warn!("Acesso negado para {} (papel '{}').", auth.id, auth.tipo);
        Err(AppError::AcessoNegado)
    }
}

/// Middleware que exige o papel 'freelancer'.
/// Deve ser executado *depois* do middleware `require_auth`.
pub async fn require_freelancer(
    Extension(auth): Extension<AuthUsuario>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if auth.tipo == "freelancer" {
        Ok(next.run(request).await)
    } else {
        tracing::warn!("Acesso negado para {} (papel '{}').", auth.id, auth.tipo);
        Err(AppError::AcessoNegado)
    }
}
