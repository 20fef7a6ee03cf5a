// src/models/usuario.rs
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

// Representa um utilizador lido da tabela 'usuarios'
#[derive(Debug, Clone, FromRow)]
pub struct Usuario {
    pub id: String,
    pub nome: String,
    pub email: String,
    // NULL para contas vindas de provedor de identidade externo
    pub senha_hash: Option<String>,
    pub tipo: String, // "freelancer" | "contratante"
    pub tipo_pessoa: Option<String>,
    pub cpf: Option<String>,
    pub cnpj: Option<String>,
    pub cidade: Option<String>,
    pub premium: bool,
    pub destaque: bool,
    pub destaque_expira_em: Option<String>,
    pub id_externo: Option<String>,
    pub criado_em: Option<String>,
}

/// Campos públicos de um utilizador, como expostos pela API.
/// O `destaque` aqui já é o valor derivado (flag + janela de expiração).
#[derive(Debug, Clone, Serialize)]
pub struct PerfilUsuario {
    pub id: String,
    pub nome: String,
    pub email: String,
    pub tipo: String,
    pub tipo_pessoa: Option<String>,
    pub cidade: Option<String>,
    pub premium: bool,
    pub destaque: bool,
    pub criado_em: Option<String>,
}

impl From<Usuario> for PerfilUsuario {
    fn from(u: Usuario) -> Self {
        let agora = chrono::Utc::now().naive_utc();
        let destaque = super::destaque_vigente(u.destaque, u.destaque_expira_em.as_deref(), agora);
        PerfilUsuario {
            id: u.id,
            nome: u.nome,
            email: u.email,
            tipo: u.tipo,
            tipo_pessoa: u.tipo_pessoa,
            cidade: u.cidade,
            premium: u.premium,
            destaque,
            criado_em: u.criado_em,
        }
    }
}

// --- Payloads de autenticação e perfil ---

pub fn validar_tipo_usuario(tipo: &str) -> Result<(), ValidationError> {
    match tipo {
        "freelancer" | "contratante" => Ok(()),
        _ => Err(ValidationError::new("tipo_invalido")),
    }
}

pub fn validar_tipo_pessoa(tipo_pessoa: &str) -> Result<(), ValidationError> {
    match tipo_pessoa {
        "individual" | "empresa" => Ok(()),
        _ => Err(ValidationError::new("tipo_pessoa_invalido")),
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegistrarPayload {
    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres"))]
    pub nome: String,
    #[validate(email(message = "O e-mail fornecido é inválido"))]
    pub email: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres"))]
    pub senha: String,
    #[validate(custom = "validar_tipo_usuario")]
    pub tipo: String,
    #[validate(custom = "validar_tipo_pessoa")]
    pub tipo_pessoa: Option<String>,
    pub cpf: Option<String>,
    pub cnpj: Option<String>,
    pub cidade: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginPayload {
    #[validate(email(message = "O e-mail fornecido é inválido"))]
    pub email: String,
    #[validate(length(min = 1, message = "A senha é obrigatória"))]
    pub senha: String,
}

/// Assinatura já verificada de um provedor de identidade externo.
#[derive(Debug, Deserialize, Validate)]
pub struct SincronizarPayload {
    #[validate(length(min = 1, message = "O id externo é obrigatório"))]
    pub id_externo: String,
    #[validate(email(message = "O e-mail fornecido é inválido"))]
    pub email: String,
    #[validate(length(min = 1, message = "O nome é obrigatório"))]
    pub nome: String,
    #[validate(custom = "validar_tipo_usuario")]
    pub tipo: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AtualizarPerfilPayload {
    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres"))]
    pub nome: Option<String>,
    pub cidade: Option<String>,
}

pub fn validar_tipo_destaque(tipo: &str) -> Result<(), ValidationError> {
    match tipo {
        "perfil" | "vaga" => Ok(()),
        _ => Err(ValidationError::new("tipo_destaque_invalido")),
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct ComprarDestaquePayload {
    #[validate(custom = "validar_tipo_destaque")]
    pub tipo: String,
    // Obrigatório quando tipo == "vaga"
    pub vaga_id: Option<String>,
}

// Resposta de autenticação: perfil + token de sessão
#[derive(Debug, Serialize)]
pub struct RespostaAuth {
    pub usuario: PerfilUsuario,
    pub token: String,
}

// --- Estatísticas do painel ---

#[derive(Debug, Serialize)]
pub struct EstatisticasContratante {
    pub vagas_ativas: i64,
    pub total_candidatos: i64,
    pub vagas_concluidas: i64,
}

#[derive(Debug, Serialize)]
pub struct EstatisticasFreelancer {
    pub total_candidaturas: i64,
    pub aceitas: i64,
    pub pendentes: i64,
}
