//src/main.rs

use axum::{middleware as axum_middleware, routing::get, Router};
use tokio::net::TcpListener;
use tokio::time::MissedTickBehavior;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use vendas_backend::{
    config::AppState,
    docs::ApiDoc,
    handlers,
    middleware::auth::session_guard,
};

#[tokio::main]
async fn main() {
    // Inicializa o logger.
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Sincronização inicial: falha não derruba o servidor, o timer tenta de novo.
    if let Err(erro) = app_state.sync_service.sincronizar().await {
        tracing::error!("❌ Erro na sincronização inicial: {erro}");
    }

    // Sincronização automática periódica (o ciclo é enfileirado no serviço,
    // então o timer nunca atropela uma sincronização em andamento).
    let sync_service = app_state.sync_service.clone();
    let intervalo = app_state.sync_interval;
    tokio::spawn(async move {
        let mut timer = tokio::time::interval(intervalo);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        timer.tick().await; // o primeiro tick dispara imediatamente
        loop {
            timer.tick().await;
            if let Err(erro) = sync_service.sincronizar().await {
                tracing::error!("❌ Erro na sincronização automática: {erro}");
            }
        }
    });

    // Rotas de vendas (protegidas pelo token de sessão do portal)
    let vendas_routes = Router::new()
        .route("/sync", get(handlers::vendas::sync))
        .route("/vendas", get(handlers::vendas::listar_vendas))
        .route("/dashboard", get(handlers::vendas::dashboard))
        .route("/relatorio", get(handlers::vendas::relatorio_mensal))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            session_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/api/health", get(handlers::vendas::health))
        .nest("/api", vendas_routes)
        .with_state(app_state.clone());

    // Inicia o servidor
    let addr = format!("0.0.0.0:{}", app_state.porta);
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    tracing::info!("📊 Vendas Consolidada - Sistema de Monitoramento");
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
