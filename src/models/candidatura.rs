// src/models/candidatura.rs
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::vaga::{ResumoCategoria, ResumoContratante, ResumoSubcategoria};

// Estados possíveis de uma candidatura. As transições são permissivas de
// propósito: o contratante pode re-decidir (aceita -> recusada e vice-versa),
// semântica de sobrescrita idempotente em vez de máquina de estados estrita.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusCandidatura {
    Pendente,
    Aceita,
    Recusada,
}

impl StatusCandidatura {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusCandidatura::Pendente => "pendente",
            StatusCandidatura::Aceita => "aceita",
            StatusCandidatura::Recusada => "recusada",
        }
    }
}

// Representa uma proposta lida da tabela 'candidaturas'
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Candidatura {
    pub id: String,
    pub vaga_id: String,
    pub freelancer_id: String,
    pub valor_proposto: String,
    pub descricao_proposta: String,
    pub status: String,
    pub criado_em: Option<String>,
}

// --- Payloads ---

#[derive(Debug, Deserialize, Validate)]
pub struct CriarCandidaturaPayload {
    #[validate(length(min = 1, message = "A vaga é obrigatória"))]
    pub vaga_id: String,
    // Quando omitido, assume o valor anunciado da vaga
    #[validate(custom = "super::vaga::validar_valor_decimal")]
    pub valor_proposto: Option<String>,
    #[validate(length(min = 1, message = "A descrição da proposta é obrigatória"))]
    pub descricao_proposta: String,
}

#[derive(Debug, Deserialize)]
pub struct AtualizarStatusPayload {
    pub status: StatusCandidatura,
}

// --- Vistas enriquecidas ---

#[derive(Debug, Clone, Serialize)]
pub struct ResumoFreelancer {
    pub id: String,
    pub nome: String,
    pub email: String,
    pub cidade: Option<String>,
}

/// Candidatura vista pelo dono da vaga: inclui a identidade do freelancer.
#[derive(Debug, Serialize)]
pub struct CandidaturaComFreelancer {
    pub id: String,
    pub vaga_id: String,
    pub valor_proposto: String,
    pub descricao_proposta: String,
    pub status: String,
    pub criado_em: Option<String>,
    pub freelancer: ResumoFreelancer,
}

#[derive(Debug, FromRow)]
pub struct CandidaturaComFreelancerRow {
    pub id: String,
    pub vaga_id: String,
    pub valor_proposto: String,
    pub descricao_proposta: String,
    pub status: String,
    pub criado_em: Option<String>,
    pub freelancer_id: String,
    pub freelancer_nome: String,
    pub freelancer_email: String,
    pub freelancer_cidade: Option<String>,
}

impl From<CandidaturaComFreelancerRow> for CandidaturaComFreelancer {
    fn from(r: CandidaturaComFreelancerRow) -> Self {
        CandidaturaComFreelancer {
            id: r.id,
            vaga_id: r.vaga_id,
            valor_proposto: r.valor_proposto,
            descricao_proposta: r.descricao_proposta,
            status: r.status,
            criado_em: r.criado_em,
            freelancer: ResumoFreelancer {
                id: r.freelancer_id,
                nome: r.freelancer_nome,
                email: r.freelancer_email,
                cidade: r.freelancer_cidade,
            },
        }
    }
}

/// Candidatura vista pelo freelancer: inclui a vaga completa com
/// contratante, subcategoria e categoria.
#[derive(Debug, Serialize)]
pub struct CandidaturaDetalhada {
    pub id: String,
    pub valor_proposto: String,
    pub descricao_proposta: String,
    pub status: String,
    pub criado_em: Option<String>,
    pub vaga: ResumoVagaCandidatura,
}

#[derive(Debug, Serialize)]
pub struct ResumoVagaCandidatura {
    pub id: String,
    pub titulo: String,
    pub descricao: String,
    pub data: Option<String>,
    pub hora: Option<String>,
    pub local_texto: String,
    pub valor: String,
    pub contratante: ResumoContratante,
    pub subcategoria: ResumoSubcategoria,
    pub categoria: ResumoCategoria,
}

#[derive(Debug, FromRow)]
pub struct CandidaturaDetalhadaRow {
    pub id: String,
    pub valor_proposto: String,
    pub descricao_proposta: String,
    pub status: String,
    pub criado_em: Option<String>,
    pub vaga_id: String,
    pub vaga_titulo: String,
    pub vaga_descricao: String,
    pub vaga_data: Option<String>,
    pub vaga_hora: Option<String>,
    pub vaga_local: String,
    pub vaga_valor: String,
    pub contratante_id: String,
    pub contratante_nome: String,
    pub contratante_cidade: Option<String>,
    pub subcategoria_id: String,
    pub subcategoria_nome: String,
    pub categoria_id: String,
    pub categoria_nome: String,
}

impl From<CandidaturaDetalhadaRow> for CandidaturaDetalhada {
    fn from(r: CandidaturaDetalhadaRow) -> Self {
        CandidaturaDetalhada {
            id: r.id,
            valor_proposto: r.valor_proposto,
            descricao_proposta: r.descricao_proposta,
            status: r.status,
            criado_em: r.criado_em,
            vaga: ResumoVagaCandidatura {
                id: r.vaga_id,
                titulo: r.vaga_titulo,
                descricao: r.vaga_descricao,
                data: r.vaga_data,
                hora: r.vaga_hora,
                local_texto: r.vaga_local,
                valor: r.vaga_valor,
                contratante: ResumoContratante {
                    id: r.contratante_id,
                    nome: r.contratante_nome,
                    cidade: r.contratante_cidade,
                },
                subcategoria: ResumoSubcategoria {
                    id: r.subcategoria_id,
                    nome: r.subcategoria_nome,
                },
                categoria: ResumoCategoria {
                    id: r.categoria_id,
                    nome: r.categoria_nome,
                },
            },
        }
    }
}
