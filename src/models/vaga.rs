// src/models/vaga.rs
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

// --- Estruturas que espelham as Tabelas da DB ---

#[derive(Debug, Clone, FromRow)]
pub struct Vaga {
    pub id: String,
    pub contratante_id: String,
    pub subcategoria_id: String,
    pub titulo: String,
    pub descricao: String,
    pub data: Option<String>,
    pub hora: Option<String>,
    // JSON com a lista de agendas multi-dia (ou NULL)
    pub agendas: Option<String>,
    pub local_texto: String,
    pub valor: String,
    pub destaque: bool,
    pub destaque_expira_em: Option<String>,
    pub criado_em: Option<String>,
}

/// Um dia de trabalho dentro de uma vaga com agenda multi-dia.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agenda {
    pub dia: String,
    pub nome_dia: String,
    pub hora_inicio: String,
    pub hora_fim: String,
}

// --- Payloads ---

/// Valida um valor decimal guardado como texto (ex: "150.00"); deve ser > 0.
pub fn validar_valor_decimal(valor: &str) -> Result<(), ValidationError> {
    match valor.parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(()),
        _ => Err(ValidationError::new("valor_invalido")),
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CriarVagaPayload {
    #[validate(length(min = 3, message = "O título deve ter no mínimo 3 caracteres"))]
    pub titulo: String,
    #[validate(length(min = 10, message = "A descrição deve ter no mínimo 10 caracteres"))]
    pub descricao: String,
    #[validate(length(min = 1, message = "A subcategoria é obrigatória"))]
    pub subcategoria_id: String,
    #[validate(length(min = 1, message = "O local é obrigatório"))]
    pub local_texto: String,
    #[validate(custom = "validar_valor_decimal")]
    pub valor: String,
    pub data: Option<String>,
    pub hora: Option<String>,
    pub agendas: Option<Vec<Agenda>>,
    pub destaque: Option<bool>,
}

impl CriarVagaPayload {
    /// Invariante de agendamento: data+hora simples OU pelo menos uma agenda.
    pub fn tem_agendamento(&self) -> bool {
        let simples = self.data.as_deref().is_some_and(|d| !d.is_empty())
            && self.hora.as_deref().is_some_and(|h| !h.is_empty());
        let multi = self.agendas.as_ref().is_some_and(|a| !a.is_empty());
        simples || multi
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct AtualizarVagaPayload {
    #[validate(length(min = 3, message = "O título deve ter no mínimo 3 caracteres"))]
    pub titulo: Option<String>,
    #[validate(length(min = 10, message = "A descrição deve ter no mínimo 10 caracteres"))]
    pub descricao: Option<String>,
    pub subcategoria_id: Option<String>,
    pub data: Option<String>,
    pub hora: Option<String>,
    pub local_texto: Option<String>,
    #[validate(custom = "validar_valor_decimal")]
    pub valor: Option<String>,
}

// Filtros de listagem (todos opcionais e combináveis)
#[derive(Debug, Default, Deserialize)]
pub struct FiltrosVagas {
    pub cidade: Option<String>,
    pub categoria_id: Option<String>,
    pub subcategoria_id: Option<String>,
    pub data: Option<String>,
}

// --- Vistas enriquecidas para a API ---

#[derive(Debug, Clone, Serialize)]
pub struct ResumoContratante {
    pub id: String,
    pub nome: String,
    pub cidade: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResumoSubcategoria {
    pub id: String,
    pub nome: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResumoCategoria {
    pub id: String,
    pub nome: String,
}

/// Vaga enriquecida com contratante, subcategoria e categoria.
/// `destaque` é o valor derivado (flag + janela de 7 dias ainda em vigor).
#[derive(Debug, Clone, Serialize)]
pub struct VagaDetalhada {
    pub id: String,
    pub titulo: String,
    pub descricao: String,
    pub data: Option<String>,
    pub hora: Option<String>,
    pub agendas: Option<Vec<Agenda>>,
    pub local_texto: String,
    pub valor: String,
    pub destaque: bool,
    pub criado_em: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contratante: Option<ResumoContratante>,
    pub subcategoria: ResumoSubcategoria,
    pub categoria: ResumoCategoria,
}

/// Linha "achatada" do JOIN vaga + contratante + subcategoria + categoria.
/// `destaque_vigente` já vem calculado no SQL contra datetime('now').
#[derive(Debug, FromRow)]
pub struct VagaDetalhadaRow {
    pub id: String,
    pub contratante_id: String,
    pub titulo: String,
    pub descricao: String,
    pub data: Option<String>,
    pub hora: Option<String>,
    pub agendas: Option<String>,
    pub local_texto: String,
    pub valor: String,
    pub destaque_vigente: bool,
    pub criado_em: Option<String>,
    pub contratante_nome: String,
    pub contratante_cidade: Option<String>,
    pub subcategoria_id: String,
    pub subcategoria_nome: String,
    pub categoria_id: String,
    pub categoria_nome: String,
}

impl VagaDetalhadaRow {
    pub fn em_detalhada(self, incluir_contratante: bool) -> VagaDetalhada {
        // Agendas guardadas como JSON; se o texto estiver corrompido, omite
        let agendas = self
            .agendas
            .as_deref()
            .and_then(|texto| serde_json::from_str::<Vec<Agenda>>(texto).ok());
        let contratante = incluir_contratante.then(|| ResumoContratante {
            id: self.contratante_id.clone(),
            nome: self.contratante_nome.clone(),
            cidade: self.contratante_cidade.clone(),
        });
        VagaDetalhada {
            id: self.id,
            titulo: self.titulo,
            descricao: self.descricao,
            data: self.data,
            hora: self.hora,
            agendas,
            local_texto: self.local_texto,
            valor: self.valor,
            destaque: self.destaque_vigente,
            criado_em: self.criado_em,
            contratante,
            subcategoria: ResumoSubcategoria {
                id: self.subcategoria_id,
                nome: self.subcategoria_nome,
            },
            categoria: ResumoCategoria {
                id: self.categoria_id,
                nome: self.categoria_nome,
            },
        }
    }
}
