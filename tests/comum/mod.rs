// tests/comum/mod.rs
// Infraestrutura partilhada pelos testes de integração: pool SQLite em
// memória (1 conexão, senão cada conexão abriria uma base vazia) com as
// migrações aplicadas, e fábricas de dados de teste.
#![allow(dead_code)]

use contrata_ai::{
    models::{
        usuario::Usuario,
        vaga::{Agenda, CriarVagaPayload, VagaDetalhada},
    },
    services::{
        limite_service::PoliticaLimiteSemanal,
        usuario_service::{self, NovoUsuario},
        vaga_service,
    },
};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

pub async fn criar_pool_teste() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(":memory:")
        .await
        .expect("abrir base em memória");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("aplicar migrações");
    pool
}

pub async fn criar_contratante(pool: &SqlitePool, email: &str, cidade: &str) -> Usuario {
    usuario_service::criar_usuario(
        pool,
        NovoUsuario {
            nome: "Contratante Teste".to_string(),
            email: email.to_string(),
            senha_hash: Some("$2b$12$hashfalsoparatestes000000000000000000000000000000000".to_string()),
            tipo: "contratante".to_string(),
            tipo_pessoa: Some("individual".to_string()),
            cpf: None,
            cnpj: None,
            cidade: Some(cidade.to_string()),
            id_externo: None,
        },
    )
    .await
    .expect("criar contratante")
}

pub async fn criar_freelancer(pool: &SqlitePool, email: &str) -> Usuario {
    usuario_service::criar_usuario(
        pool,
        NovoUsuario {
            nome: "Freelancer Teste".to_string(),
            email: email.to_string(),
            senha_hash: Some("$2b$12$hashfalsoparatestes000000000000000000000000000000000".to_string()),
            tipo: "freelancer".to_string(),
            tipo_pessoa: Some("individual".to_string()),
            cpf: None,
            cnpj: None,
            cidade: Some("São Paulo".to_string()),
            id_externo: None,
        },
    )
    .await
    .expect("criar freelancer")
}

pub fn payload_vaga(subcategoria_id: &str) -> CriarVagaPayload {
    CriarVagaPayload {
        titulo: "Garçom para evento".to_string(),
        descricao: "Serviço de mesa durante festa de casamento".to_string(),
        subcategoria_id: subcategoria_id.to_string(),
        local_texto: "São Paulo - Centro".to_string(),
        valor: "150.00".to_string(),
        data: Some("2026-08-20".to_string()),
        hora: Some("18:00".to_string()),
        agendas: None,
        destaque: None,
    }
}

pub fn agenda_exemplo() -> Agenda {
    Agenda {
        dia: "2026-08-21".to_string(),
        nome_dia: "Sexta".to_string(),
        hora_inicio: "18:00".to_string(),
        hora_fim: "23:00".to_string(),
    }
}

pub async fn criar_vaga_de(pool: &SqlitePool, contratante_id: &str) -> VagaDetalhada {
    vaga_service::criar_vaga(
        pool,
        contratante_id,
        payload_vaga("sub-garcom"),
        &PoliticaLimiteSemanal::default(),
    )
    .await
    .expect("criar vaga")
}
