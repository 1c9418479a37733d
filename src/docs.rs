// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::vendas::health,
        handlers::vendas::sync,
        handlers::vendas::listar_vendas,
        handlers::vendas::dashboard,
        handlers::vendas::relatorio_mensal,
    ),
    components(
        schemas(
            models::venda::Origem,
            models::venda::StatusVenda,
            models::venda::VendaConsolidada,
            models::venda::VendaView,
            models::relatorio::DashboardStats,
            models::relatorio::RelatorioMensal,
            models::relatorio::ResultadoSync,
            models::relatorio::FalhaVendedor,
        )
    ),
    tags(
        (name = "Vendas", description = "Vendas consolidadas, dashboard e relatório mensal")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "session_token",
            SecurityScheme::ApiKey(
                ApiKey::Header(ApiKeyValue::new("X-Session-Token"))
            ),
        );
    }
}
