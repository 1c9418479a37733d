// src/config.rs

use crate::{db::VendasRepository, services::SyncService};
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, sync::Arc, time::Duration};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_secret: String,
    pub sync_service: Arc<SyncService>,
    pub sync_interval: Duration,
    pub porta: u16,
}

impl AppState {
    // A assinatura retorna um Result: se a configuração falhar, quem chama
    // decide encerrar.
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        // Vendedores acompanhados. O padrão é a equipe atual; a variável
        // existe para não precisar recompilar quando a equipe mudar.
        let vendedores: Vec<String> = env::var("VENDEDORES")
            .unwrap_or_else(|_| "ROBERTO,ISAQUE,MIGUEL".to_string())
            .split(',')
            .map(|v| v.trim().to_uppercase())
            .filter(|v| !v.is_empty())
            .collect();

        let sync_interval = Duration::from_secs(env_u64("SYNC_INTERVAL_SECS", 300));
        let timeout_fonte = Duration::from_secs(env_u64("FONTE_TIMEOUT_SECS", 10));
        let porta = env_u64("PORT", 10000) as u16;

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let vendas_repo = VendasRepository::new(db_pool.clone());
        let sync_service = Arc::new(SyncService::new(Arc::new(vendas_repo), vendedores, timeout_fonte));

        Ok(Self {
            db_pool,
            jwt_secret,
            sync_service,
            sync_interval,
            porta,
        })
    }
}

fn env_u64(nome: &str, padrao: u64) -> u64 {
    env::var(nome)
        .ok()
        .and_then(|valor| valor.parse().ok())
        .unwrap_or(padrao)
}
