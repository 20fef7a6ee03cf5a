// tests/http_api.rs
// Exercita o router completo (middlewares de token e papel + handlers)
// com requisições montadas à mão, sem subir servidor.
mod comum;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use contrata_ai::{
    services::limite_service::PoliticaLimiteSemanal, state::AppState, web,
};
use serde_json::{json, Value};
use tower::ServiceExt;

const SEGREDO: &str = "segredo-de-teste-bem-comprido-para-os-tokens";

async fn montar_app() -> Router {
    let db_pool = comum::criar_pool_teste().await;
    let state = AppState {
        db_pool,
        jwt_secret: SEGREDO.to_string(),
        politica_limite: PoliticaLimiteSemanal::default(),
    };
    web::routes::create_router(state)
}

async fn corpo_json(resposta: Response) -> Value {
    let bytes = axum::body::to_bytes(resposta.into_body(), usize::MAX)
        .await
        .expect("ler corpo");
    serde_json::from_slice(&bytes).expect("corpo JSON")
}

fn requisicao(metodo: &str, uri: &str, token: Option<&str>, corpo: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(metodo).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match corpo {
        Some(corpo) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(corpo.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn registrar(app: &Router, email: &str, tipo: &str) -> (String, String) {
    let resposta = app
        .clone()
        .oneshot(requisicao(
            "POST",
            "/auth/registrar",
            None,
            Some(json!({
                "nome": "Conta de Teste",
                "email": email,
                "senha": "senha-secreta",
                "tipo": tipo,
                "cidade": "São Paulo"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(resposta.status(), StatusCode::CREATED);
    let corpo = corpo_json(resposta).await;
    (
        corpo["usuario"]["id"].as_str().unwrap().to_string(),
        corpo["token"].as_str().unwrap().to_string(),
    )
}

#[tokio::test]
async fn fluxo_de_vagas_pela_api() {
    let app = montar_app().await;
    let (_, token) = registrar(&app, "c@exemplo.com", "contratante").await;

    // Sem token: 401
    let resposta = app
        .clone()
        .oneshot(requisicao("POST", "/vagas", None, Some(json!({}))))
        .await
        .unwrap();
    assert_eq!(resposta.status(), StatusCode::UNAUTHORIZED);

    // Sem agendamento: 400 com detalhe de campo
    let resposta = app
        .clone()
        .oneshot(requisicao(
            "POST",
            "/vagas",
            Some(&token),
            Some(json!({
                "titulo": "Garçom para evento",
                "descricao": "Serviço de mesa durante festa",
                "subcategoria_id": "sub-garcom",
                "local_texto": "São Paulo - Centro",
                "valor": "150.00"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(resposta.status(), StatusCode::BAD_REQUEST);
    let corpo = corpo_json(resposta).await;
    assert!(corpo["campos"]["agendas"].is_array());

    // Com agendamento simples: 201
    let resposta = app
        .clone()
        .oneshot(requisicao(
            "POST",
            "/vagas",
            Some(&token),
            Some(json!({
                "titulo": "Garçom para evento",
                "descricao": "Serviço de mesa durante festa",
                "subcategoria_id": "sub-garcom",
                "local_texto": "São Paulo - Centro",
                "valor": "150.00",
                "data": "2026-08-20",
                "hora": "18:00"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(resposta.status(), StatusCode::CREATED);
    let vaga = corpo_json(resposta).await;
    let vaga_id = vaga["id"].as_str().unwrap();
    assert_eq!(vaga["categoria"]["nome"], "Eventos");

    // Listagem pública enxerga a vaga
    let resposta = app
        .clone()
        .oneshot(requisicao("GET", "/vagas", None, None))
        .await
        .unwrap();
    assert_eq!(resposta.status(), StatusCode::OK);
    let lista = corpo_json(resposta).await;
    assert_eq!(lista.as_array().unwrap().len(), 1);

    // Detalhe por id e 404 para id desconhecido
    let resposta = app
        .clone()
        .oneshot(requisicao("GET", &format!("/vagas/{vaga_id}"), None, None))
        .await
        .unwrap();
    assert_eq!(resposta.status(), StatusCode::OK);

    let resposta = app
        .clone()
        .oneshot(requisicao("GET", "/vagas/nao-existe", None, None))
        .await
        .unwrap();
    assert_eq!(resposta.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn papel_errado_e_barrado_pelo_middleware() {
    let app = montar_app().await;
    let (_, token_contratante) = registrar(&app, "c@exemplo.com", "contratante").await;
    let (_, token_freelancer) = registrar(&app, "f@exemplo.com", "freelancer").await;

    // Freelancer não publica vaga
    let resposta = app
        .clone()
        .oneshot(requisicao(
            "POST",
            "/vagas",
            Some(&token_freelancer),
            Some(json!({})),
        ))
        .await
        .unwrap();
    assert_eq!(resposta.status(), StatusCode::FORBIDDEN);

    // Contratante publica; freelancer candidata-se; contratante não
    let resposta = app
        .clone()
        .oneshot(requisicao(
            "POST",
            "/vagas",
            Some(&token_contratante),
            Some(json!({
                "titulo": "Pedreiro para reforma",
                "descricao": "Reforma de muro residencial",
                "subcategoria_id": "sub-pedreiro",
                "local_texto": "GPS:-23.55,-46.63",
                "valor": "300.00",
                "data": "2026-08-25",
                "hora": "08:00"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(resposta.status(), StatusCode::CREATED);
    let vaga = corpo_json(resposta).await;
    let vaga_id = vaga["id"].as_str().unwrap();

    let proposta = json!({
        "vaga_id": vaga_id,
        "descricao_proposta": "Quinze anos de experiência em alvenaria"
    });
    let resposta = app
        .clone()
        .oneshot(requisicao(
            "POST",
            "/candidaturas",
            Some(&token_contratante),
            Some(proposta.clone()),
        ))
        .await
        .unwrap();
    assert_eq!(resposta.status(), StatusCode::FORBIDDEN);

    let resposta = app
        .clone()
        .oneshot(requisicao(
            "POST",
            "/candidaturas",
            Some(&token_freelancer),
            Some(proposta),
        ))
        .await
        .unwrap();
    assert_eq!(resposta.status(), StatusCode::CREATED);
    let candidatura = corpo_json(resposta).await;
    assert_eq!(candidatura["status"], "pendente");

    // O dono da vaga lista os candidatos; o freelancer não
    let rota = format!("/candidaturas/vaga/{vaga_id}");
    let resposta = app
        .clone()
        .oneshot(requisicao("GET", &rota, Some(&token_freelancer), None))
        .await
        .unwrap();
    assert_eq!(resposta.status(), StatusCode::FORBIDDEN);

    let resposta = app
        .clone()
        .oneshot(requisicao("GET", &rota, Some(&token_contratante), None))
        .await
        .unwrap();
    assert_eq!(resposta.status(), StatusCode::OK);
    let candidatos = corpo_json(resposta).await;
    assert_eq!(candidatos.as_array().unwrap().len(), 1);
}
