// src/services/relatorio.rs

use chrono::{Datelike, NaiveDate};

use crate::models::relatorio::{DashboardStats, RelatorioMensal};
use crate::models::venda::{StatusVenda, VendaConsolidada, VendaView};
use crate::services::status::resolver_status;

/// Anexa o status derivado a cada venda no momento da leitura.
pub fn com_status(vendas: Vec<VendaConsolidada>) -> Vec<VendaView> {
    vendas
        .into_iter()
        .map(|venda| {
            let status = resolver_status(&venda);
            VendaView { venda, status }
        })
        .collect()
}

/// Totais dos cards do dashboard, em uma única passada.
///
/// `faturado` soma TODAS as vendas do conjunto. `pago` e `aReceber` são
/// partições disjuntas (pago = conta vencedora; aReceber = frete entregue e
/// não pago), mas não esgotam o conjunto: frete em trânsito só conta no
/// faturado. `entregue` conta cada venda que caiu em um dos dois baldes,
/// uma única vez.
pub fn calcular_dashboard(vendas: &[VendaConsolidada]) -> DashboardStats {
    let mut stats = DashboardStats::default();
    for venda in vendas {
        stats.faturado += venda.valor_nf;
        match resolver_status(venda) {
            StatusVenda::Pago => {
                stats.pago += venda.valor_nf;
                stats.entregue += 1;
            }
            StatusVenda::Entregue => {
                stats.a_receber += venda.valor_nf;
                stats.entregue += 1;
            }
            _ => {}
        }
    }
    stats
}

/// Recorte do mês para a tabela principal: filtra pela data de EMISSÃO.
/// (O relatório mensal usa a data de pagamento; são recortes diferentes.)
pub fn filtrar_por_mes(vendas: &[VendaConsolidada], ano: i32, mes: u32) -> Vec<VendaConsolidada> {
    vendas
        .iter()
        .filter(|venda| mesmo_mes(venda.data_emissao, ano, mes))
        .cloned()
        .collect()
}

/// Camada de consulta da tabela: busca livre, filtro de status derivado e
/// ordenação estável crescente por data de emissão.
pub fn filtrar_vendas(
    base: Vec<VendaConsolidada>,
    busca: Option<&str>,
    status: Option<StatusVenda>,
) -> Vec<VendaConsolidada> {
    let mut resultado: Vec<VendaConsolidada> = base
        .into_iter()
        .filter(|venda| busca.is_none_or(|texto| combina_busca(venda, texto)))
        .filter(|venda| status.is_none_or(|s| resolver_status(venda) == s))
        .collect();
    resultado.sort_by_key(|venda| venda.data_emissao);
    resultado
}

/// Relatório Mês: vendas pagas dentro do mês (pela data de pagamento),
/// com busca opcional, ordenadas pela data de pagamento. Resultado vazio é
/// um relatório válido com total zero, não um erro.
pub fn relatorio_mensal_pago(
    vendas: &[VendaConsolidada],
    ano: i32,
    mes: u32,
    busca: Option<&str>,
) -> RelatorioMensal {
    let mut pagas: Vec<VendaConsolidada> = vendas
        .iter()
        .filter(|venda| resolver_status(venda) == StatusVenda::Pago)
        .filter(|venda| mesmo_mes(venda.data_pagamento, ano, mes))
        .filter(|venda| busca.is_none_or(|texto| combina_busca(venda, texto)))
        .cloned()
        .collect();
    pagas.sort_by_key(|venda| venda.data_pagamento);

    let total_pago = pagas.iter().map(|venda| venda.valor_nf).sum();
    RelatorioMensal {
        vendas: com_status(pagas),
        total_pago,
    }
}

fn mesmo_mes(data: Option<NaiveDate>, ano: i32, mes: u32) -> bool {
    data.is_some_and(|d| d.year() == ano && d.month() == mes)
}

fn combina_busca(venda: &VendaConsolidada, texto: &str) -> bool {
    let texto = texto.to_lowercase();
    venda.numero_nf.to_lowercase().contains(&texto)
        || venda
            .nome_orgao
            .as_deref()
            .is_some_and(|orgao| orgao.to_lowercase().contains(&texto))
}
