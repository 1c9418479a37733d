// src/models/relatorio.rs

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::venda::VendaView;

// Os Cards do Topo: totais do conjunto consolidado (ou do mês selecionado).
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Soma das vendas com conta paga
    #[schema(example = "1000.00")]
    pub pago: Decimal,

    /// Soma das vendas entregues e ainda não pagas
    #[schema(example = "500.00")]
    pub a_receber: Decimal,

    /// Quantas vendas já foram entregues (pagas ou não)
    #[schema(example = 2)]
    pub entregue: u32,

    /// Soma de todas as vendas do conjunto, sem exceção
    #[schema(example = "1500.00")]
    pub faturado: Decimal,
}

// Relatório Mês: vendas pagas dentro do mês, ordenadas pela data de pagamento.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RelatorioMensal {
    pub vendas: Vec<VendaView>,
    #[schema(example = "1000.00")]
    pub total_pago: Decimal,
}

/// Vendedor que ficou de fora de um ciclo de sincronização e o motivo.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FalhaVendedor {
    #[schema(example = "MIGUEL")]
    pub vendedor: String,
    #[schema(example = "tempo esgotado ao consultar a fonte")]
    pub motivo: String,
}

/// Resultado de um ciclo de sincronização.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResultadoSync {
    /// Registros consolidados produzidos pelo ciclo
    #[schema(example = 42)]
    pub count: usize,
    /// Vazio quando todos os vendedores sincronizaram
    pub falhas: Vec<FalhaVendedor>,
}
