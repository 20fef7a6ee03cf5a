// src/web/routes.rs
use crate::{
    state::AppState,
    web::{
        auth_handlers, candidatura_handlers, categoria_handlers, mw_auth, usuario_handlers,
        vaga_handlers,
    },
};
use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};

pub fn create_router(app_state: AppState) -> Router {
    // --- Rotas Públicas ---
    // Autenticação e leituras abertas (listagem/detalhe de vagas, catálogos)
    let rotas_publicas = Router::new()
        .route("/auth/registrar", post(auth_handlers::handle_registrar))
        .route("/auth/login", post(auth_handlers::handle_login))
        .route("/auth/sincronizar", post(auth_handlers::handle_sincronizar))
        .route("/vagas", get(vaga_handlers::handle_listar_vagas))
        .route("/vagas/{id}", get(vaga_handlers::handle_ver_vaga))
        .route("/categorias", get(categoria_handlers::handle_listar_categorias))
        .route(
            "/subcategorias",
            get(categoria_handlers::handle_listar_subcategorias),
        );

    // --- Rotas de Contratante ---
    // Exigem login E papel 'contratante'; a posse do recurso específico é
    // verificada dentro do serviço
    let rotas_contratante = Router::new()
        .route("/vagas", post(vaga_handlers::handle_criar_vaga))
        .route("/vagas/minhas", get(vaga_handlers::handle_minhas_vagas))
        .route(
            "/vagas/{id}",
            patch(vaga_handlers::handle_atualizar_vaga)
                .delete(vaga_handlers::handle_excluir_vaga),
        )
        .route(
            "/candidaturas/vaga/{vaga_id}",
            get(candidatura_handlers::handle_candidaturas_da_vaga),
        )
        .route(
            "/candidaturas/{id}/status",
            patch(candidatura_handlers::handle_atualizar_status),
        )
        .route_layer(middleware::from_fn(mw_auth::require_contratante));

    // --- Rotas de Freelancer ---
    let rotas_freelancer = Router::new()
        .route(
            "/candidaturas",
            post(candidatura_handlers::handle_criar_candidatura),
        )
        .route(
            "/candidaturas/minhas",
            get(candidatura_handlers::handle_minhas_candidaturas),
        )
        .route_layer(middleware::from_fn(mw_auth::require_freelancer));

    // --- Rotas Autenticadas (qualquer papel) ---
    let rotas_autenticadas = Router::new()
        .route("/auth/perfil", get(auth_handlers::handle_perfil))
        .route(
            "/usuarios/perfil",
            patch(usuario_handlers::handle_atualizar_perfil),
        )
        .route(
            "/usuarios/premium",
            post(usuario_handlers::handle_virar_premium),
        )
        .route(
            "/usuarios/destaque",
            post(usuario_handlers::handle_comprar_destaque),
        )
        .route(
            "/usuarios/estatisticas",
            get(usuario_handlers::handle_estatisticas),
        )
        .merge(rotas_contratante)
        .merge(rotas_freelancer)
        // Aplica o require_auth a TODAS as rotas acima (incluindo as de papel)
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            mw_auth::require_auth,
        ));

    // --- Router Final ---
    Router::new()
        .merge(rotas_publicas)
        .merge(rotas_autenticadas)
        .with_state(app_state)
}
