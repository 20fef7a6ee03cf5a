// tests/candidaturas.rs
// Ciclo de vida das candidaturas: unicidade por (vaga, freelancer), proibição
// de auto-candidatura, decisão restrita ao dono da vaga e estatísticas.
mod comum;

use comum::*;
use contrata_ai::{
    error::AppError,
    models::candidatura::{CriarCandidaturaPayload, StatusCandidatura},
    services::{candidatura_service, usuario_service},
};

fn proposta(vaga_id: &str, valor: Option<&str>) -> CriarCandidaturaPayload {
    CriarCandidaturaPayload {
        vaga_id: vaga_id.to_string(),
        valor_proposto: valor.map(|v| v.to_string()),
        descricao_proposta: "Tenho experiência em eventos deste porte".to_string(),
    }
}

#[tokio::test]
async fn fluxo_completo_de_candidatura() {
    let pool = criar_pool_teste().await;
    let contratante = criar_contratante(&pool, "c@exemplo.com", "São Paulo").await;
    let freelancer = criar_freelancer(&pool, "f@exemplo.com").await;
    let vaga = criar_vaga_de(&pool, &contratante.id).await;

    let candidatura = candidatura_service::criar_candidatura(
        &pool,
        &freelancer.id,
        proposta(&vaga.id, Some("150.00")),
    )
    .await
    .unwrap();
    assert_eq!(candidatura.status, "pendente");
    assert_eq!(candidatura.valor_proposto, "150.00");

    // O dono da vaga vê exatamente uma candidatura, do freelancer, pendente
    let candidatos = candidatura_service::listar_por_vaga(&pool, &vaga.id, &contratante.id)
        .await
        .unwrap();
    assert_eq!(candidatos.len(), 1);
    assert_eq!(candidatos[0].freelancer.id, freelancer.id);
    assert_eq!(candidatos[0].status, "pendente");

    // O contratante aceita; o freelancer vê o novo status com a vaga completa
    candidatura_service::atualizar_status(
        &pool,
        &candidatura.id,
        &contratante.id,
        StatusCandidatura::Aceita,
    )
    .await
    .unwrap();

    let minhas = candidatura_service::listar_do_freelancer(&pool, &freelancer.id)
        .await
        .unwrap();
    assert_eq!(minhas.len(), 1);
    assert_eq!(minhas[0].status, "aceita");
    assert_eq!(minhas[0].vaga.id, vaga.id);
    assert_eq!(minhas[0].vaga.contratante.id, contratante.id);
    assert_eq!(minhas[0].vaga.categoria.nome, "Eventos");
}

#[tokio::test]
async fn segunda_candidatura_na_mesma_vaga_e_recusada() {
    let pool = criar_pool_teste().await;
    let contratante = criar_contratante(&pool, "c@exemplo.com", "São Paulo").await;
    let freelancer = criar_freelancer(&pool, "f@exemplo.com").await;
    let vaga = criar_vaga_de(&pool, &contratante.id).await;

    candidatura_service::criar_candidatura(&pool, &freelancer.id, proposta(&vaga.id, None))
        .await
        .unwrap();
    let erro = candidatura_service::criar_candidatura(&pool, &freelancer.id, proposta(&vaga.id, None))
        .await
        .expect_err("duplicada deveria falhar");
    assert!(matches!(erro, AppError::Conflito(_)));

    // Continua existindo exatamente uma linha para o par (vaga, freelancer)
    let candidatos = candidatura_service::listar_por_vaga(&pool, &vaga.id, &contratante.id)
        .await
        .unwrap();
    assert_eq!(candidatos.len(), 1);
}

#[tokio::test]
async fn dono_nao_se_candidata_a_propria_vaga() {
    let pool = criar_pool_teste().await;
    let contratante = criar_contratante(&pool, "c@exemplo.com", "São Paulo").await;
    let vaga = criar_vaga_de(&pool, &contratante.id).await;

    let erro = candidatura_service::criar_candidatura(
        &pool,
        &contratante.id,
        proposta(&vaga.id, None),
    )
    .await
    .expect_err("auto-candidatura proibida");
    assert!(matches!(erro, AppError::Conflito(_)));
}

#[tokio::test]
async fn candidatura_a_vaga_inexistente_e_nao_encontrada() {
    let pool = criar_pool_teste().await;
    let freelancer = criar_freelancer(&pool, "f@exemplo.com").await;

    let erro = candidatura_service::criar_candidatura(
        &pool,
        &freelancer.id,
        proposta("vaga-inexistente", None),
    )
    .await
    .expect_err("vaga não existe");
    assert!(matches!(erro, AppError::NaoEncontrado(_)));
}

#[tokio::test]
async fn valor_proposto_omitido_assume_o_valor_da_vaga() {
    let pool = criar_pool_teste().await;
    let contratante = criar_contratante(&pool, "c@exemplo.com", "São Paulo").await;
    let freelancer = criar_freelancer(&pool, "f@exemplo.com").await;
    let vaga = criar_vaga_de(&pool, &contratante.id).await;

    let candidatura =
        candidatura_service::criar_candidatura(&pool, &freelancer.id, proposta(&vaga.id, None))
            .await
            .unwrap();
    assert_eq!(candidatura.valor_proposto, vaga.valor);
}

#[tokio::test]
async fn so_o_dono_da_vaga_lista_e_decide() {
    let pool = criar_pool_teste().await;
    let dona = criar_contratante(&pool, "dona@exemplo.com", "São Paulo").await;
    let outra = criar_contratante(&pool, "outra@exemplo.com", "Rio de Janeiro").await;
    let freelancer = criar_freelancer(&pool, "f@exemplo.com").await;
    let vaga = criar_vaga_de(&pool, &dona.id).await;

    let candidatura =
        candidatura_service::criar_candidatura(&pool, &freelancer.id, proposta(&vaga.id, None))
            .await
            .unwrap();

    // Outro contratante (papel certo, vaga errada) não lista nem decide
    let erro = candidatura_service::listar_por_vaga(&pool, &vaga.id, &outra.id)
        .await
        .expect_err("não-dona não lista candidatos");
    assert!(matches!(erro, AppError::AcessoNegado));

    let erro = candidatura_service::atualizar_status(
        &pool,
        &candidatura.id,
        &outra.id,
        StatusCandidatura::Aceita,
    )
    .await
    .expect_err("não-dona não decide");
    assert!(matches!(erro, AppError::AcessoNegado));

    // O status permanece pendente
    let candidatos = candidatura_service::listar_por_vaga(&pool, &vaga.id, &dona.id)
        .await
        .unwrap();
    assert_eq!(candidatos[0].status, "pendente");
}

#[tokio::test]
async fn decisao_pode_ser_revertida() {
    let pool = criar_pool_teste().await;
    let contratante = criar_contratante(&pool, "c@exemplo.com", "São Paulo").await;
    let freelancer = criar_freelancer(&pool, "f@exemplo.com").await;
    let vaga = criar_vaga_de(&pool, &contratante.id).await;

    let candidatura =
        candidatura_service::criar_candidatura(&pool, &freelancer.id, proposta(&vaga.id, None))
            .await
            .unwrap();

    // Transições permissivas: aceita -> recusada -> pendente
    for status in [
        StatusCandidatura::Aceita,
        StatusCandidatura::Recusada,
        StatusCandidatura::Pendente,
    ] {
        let atualizada =
            candidatura_service::atualizar_status(&pool, &candidatura.id, &contratante.id, status)
                .await
                .unwrap();
        assert_eq!(atualizada.status, status.as_str());
    }
}

#[tokio::test]
async fn candidatos_listados_do_mais_recente_para_o_mais_antigo() {
    let pool = criar_pool_teste().await;
    let contratante = criar_contratante(&pool, "c@exemplo.com", "São Paulo").await;
    let primeiro = criar_freelancer(&pool, "primeiro@exemplo.com").await;
    let segundo = criar_freelancer(&pool, "segundo@exemplo.com").await;
    let vaga = criar_vaga_de(&pool, &contratante.id).await;

    let antiga =
        candidatura_service::criar_candidatura(&pool, &primeiro.id, proposta(&vaga.id, None))
            .await
            .unwrap();
    candidatura_service::criar_candidatura(&pool, &segundo.id, proposta(&vaga.id, None))
        .await
        .unwrap();

    // Recua a primeira no tempo para desempatar a ordenação
    sqlx::query("UPDATE candidaturas SET criado_em = datetime('now', '-1 hour') WHERE id = ?1")
        .bind(&antiga.id)
        .execute(&pool)
        .await
        .unwrap();

    let candidatos = candidatura_service::listar_por_vaga(&pool, &vaga.id, &contratante.id)
        .await
        .unwrap();
    assert_eq!(candidatos.len(), 2);
    assert_eq!(candidatos[0].freelancer.id, segundo.id);
    assert_eq!(candidatos[1].freelancer.id, primeiro.id);
}

#[tokio::test]
async fn estatisticas_refletem_vagas_e_candidaturas() {
    let pool = criar_pool_teste().await;
    let contratante = criar_contratante(&pool, "c@exemplo.com", "São Paulo").await;
    let freelancer = criar_freelancer(&pool, "f@exemplo.com").await;
    let vaga_a = criar_vaga_de(&pool, &contratante.id).await;
    let vaga_b = criar_vaga_de(&pool, &contratante.id).await;

    let aceita =
        candidatura_service::criar_candidatura(&pool, &freelancer.id, proposta(&vaga_a.id, None))
            .await
            .unwrap();
    candidatura_service::criar_candidatura(&pool, &freelancer.id, proposta(&vaga_b.id, None))
        .await
        .unwrap();
    candidatura_service::atualizar_status(
        &pool,
        &aceita.id,
        &contratante.id,
        StatusCandidatura::Aceita,
    )
    .await
    .unwrap();

    let do_contratante =
        usuario_service::estatisticas(&pool, &contratante.id, "contratante")
            .await
            .unwrap();
    match do_contratante {
        usuario_service::Estatisticas::Contratante(stats) => {
            assert_eq!(stats.vagas_ativas, 2);
            assert_eq!(stats.total_candidatos, 2);
            // Só a vaga A tem candidatura aceita
            assert_eq!(stats.vagas_concluidas, 1);
        }
        _ => panic!("esperava estatísticas de contratante"),
    }

    let do_freelancer = usuario_service::estatisticas(&pool, &freelancer.id, "freelancer")
        .await
        .unwrap();
    match do_freelancer {
        usuario_service::Estatisticas::Freelancer(stats) => {
            assert_eq!(stats.total_candidaturas, 2);
            assert_eq!(stats.aceitas, 1);
            assert_eq!(stats.pendentes, 1);
        }
        _ => panic!("esperava estatísticas de freelancer"),
    }
}
