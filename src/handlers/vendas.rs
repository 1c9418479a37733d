// src/handlers/vendas.rs

use axum::{extract::Query, extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::SessaoAutenticada,
    models::relatorio::{DashboardStats, RelatorioMensal, ResultadoSync},
    models::venda::{StatusVenda, VendaView},
    services::relatorio,
};

#[derive(Debug, Deserialize, Validate)]
pub struct VendasQuery {
    /// Recorte do mês pela data de emissão (exige ano + mes)
    pub ano: Option<i32>,
    #[validate(range(min = 1, max = 12))]
    pub mes: Option<u32>,
    /// Busca livre por número de NF ou órgão
    pub busca: Option<String>,
    /// Filtro pelo status derivado (PAGO, ENTREGUE, EM_TRANSITO, ...)
    pub status: Option<StatusVenda>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct DashboardQuery {
    pub ano: Option<i32>,
    #[validate(range(min = 1, max = 12))]
    pub mes: Option<u32>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RelatorioQuery {
    pub ano: i32,
    #[validate(range(min = 1, max = 12))]
    pub mes: u32,
    pub busca: Option<String>,
}

// GET /api/health
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Vendas",
    responses(
        (status = 200, description = "Serviço no ar")
    )
)]
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "timestamp": chrono::Utc::now() }))
}

// GET /api/sync - dispara um ciclo de sincronização
#[utoipa::path(
    get,
    path = "/api/sync",
    tag = "Vendas",
    responses(
        (status = 200, description = "Ciclo executado (pode conter falhas parciais)", body = ResultadoSync),
        (status = 401, description = "Não autorizado"),
        (status = 503, description = "Nenhum vendedor pôde ser sincronizado")
    ),
    security(("session_token" = []))
)]
pub async fn sync(
    State(app_state): State<AppState>,
    SessaoAutenticada(_sessao): SessaoAutenticada,
) -> Result<Json<ResultadoSync>, AppError> {
    let resultado = app_state.sync_service.sincronizar().await?;
    Ok(Json(resultado))
}

// GET /api/vendas - listagem consolidada, com recorte e filtros opcionais
#[utoipa::path(
    get,
    path = "/api/vendas",
    tag = "Vendas",
    params(
        ("ano" = Option<i32>, Query, description = "Ano do recorte por emissão"),
        ("mes" = Option<u32>, Query, description = "Mês do recorte por emissão (1-12)"),
        ("busca" = Option<String>, Query, description = "Busca por NF ou órgão"),
        ("status" = Option<StatusVenda>, Query, description = "Filtro pelo status derivado")
    ),
    responses(
        (status = 200, description = "Vendas consolidadas com status derivado", body = [VendaView]),
        (status = 400, description = "Parâmetros inválidos"),
        (status = 401, description = "Não autorizado"),
        (status = 503, description = "Fontes de dados indisponíveis")
    ),
    security(("session_token" = []))
)]
pub async fn listar_vendas(
    State(app_state): State<AppState>,
    SessaoAutenticada(_sessao): SessaoAutenticada,
    Query(params): Query<VendasQuery>,
) -> Result<Json<Vec<VendaView>>, AppError> {
    params.validate()?;

    // Sincroniza antes de listar: latência trocada por dado fresco.
    let vendas = app_state.sync_service.listar().await?;

    let recorte_mes = params.ano.zip(params.mes);
    let base = match recorte_mes {
        Some((ano, mes)) => relatorio::filtrar_por_mes(&vendas, ano, mes),
        None => vendas.as_ref().clone(),
    };

    // Sem nenhum filtro, mantém a ordenação por NF do conjunto consolidado.
    let tem_filtros = recorte_mes.is_some() || params.busca.is_some() || params.status.is_some();
    let resultado = if tem_filtros {
        relatorio::filtrar_vendas(base, params.busca.as_deref(), params.status)
    } else {
        base
    };

    Ok(Json(relatorio::com_status(resultado)))
}

// GET /api/dashboard - totais dos cards
#[utoipa::path(
    get,
    path = "/api/dashboard",
    tag = "Vendas",
    params(
        ("ano" = Option<i32>, Query, description = "Ano do recorte por emissão"),
        ("mes" = Option<u32>, Query, description = "Mês do recorte por emissão (1-12)")
    ),
    responses(
        (status = 200, description = "Totais do conjunto (ou do mês selecionado)", body = DashboardStats),
        (status = 400, description = "Parâmetros inválidos"),
        (status = 401, description = "Não autorizado"),
        (status = 503, description = "Fontes de dados indisponíveis")
    ),
    security(("session_token" = []))
)]
pub async fn dashboard(
    State(app_state): State<AppState>,
    SessaoAutenticada(_sessao): SessaoAutenticada,
    Query(params): Query<DashboardQuery>,
) -> Result<Json<DashboardStats>, AppError> {
    params.validate()?;

    let vendas = app_state.sync_service.listar().await?;

    let stats = match params.ano.zip(params.mes) {
        Some((ano, mes)) => relatorio::calcular_dashboard(&relatorio::filtrar_por_mes(&vendas, ano, mes)),
        None => relatorio::calcular_dashboard(&vendas),
    };

    Ok(Json(stats))
}

// GET /api/relatorio - vendas pagas do mês, pela data de pagamento
#[utoipa::path(
    get,
    path = "/api/relatorio",
    tag = "Vendas",
    params(
        ("ano" = i32, Query, description = "Ano do relatório"),
        ("mes" = u32, Query, description = "Mês do relatório (1-12)"),
        ("busca" = Option<String>, Query, description = "Busca por NF ou órgão")
    ),
    responses(
        (status = 200, description = "Relatório do mês (vazio é válido)", body = RelatorioMensal),
        (status = 400, description = "Parâmetros inválidos"),
        (status = 401, description = "Não autorizado")
    ),
    security(("session_token" = []))
)]
pub async fn relatorio_mensal(
    State(app_state): State<AppState>,
    SessaoAutenticada(_sessao): SessaoAutenticada,
    Query(params): Query<RelatorioQuery>,
) -> Result<Json<RelatorioMensal>, AppError> {
    params.validate()?;

    // O relatório lê o snapshot corrente; o frescor fica por conta do timer
    // periódico e dos outros endpoints.
    let vendas = app_state.sync_service.snapshot().await;
    let relatorio = relatorio::relatorio_mensal_pago(&vendas, params.ano, params.mes, params.busca.as_deref());

    Ok(Json(relatorio))
}
