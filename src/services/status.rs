// src/services/status.rs

use crate::models::venda::{Origem, StatusVenda, VendaConsolidada};

/// Deriva o status exibido de uma venda consolidada.
///
/// Este é o ÚNICO lugar que conhece a regra: conta a receber vencedora
/// significa pago; frete é classificado pelo sub-status livre de entrega.
/// Tabela, dashboard e relatório passam todos por aqui.
pub fn resolver_status(venda: &VendaConsolidada) -> StatusVenda {
    match venda.origem {
        Origem::ContasReceber => StatusVenda::Pago,
        Origem::ControleFrete => venda
            .status_frete
            .as_deref()
            .map(normalizar_status_frete)
            .unwrap_or(StatusVenda::EmTransito),
    }
}

/// Classifica o sub-status livre da planilha de frete.
///
/// O campo chega inconsistente: maiúsculas e minúsculas misturadas, espaço
/// ou underscore como separador, com e sem acento. Normaliza antes de
/// comparar; qualquer valor desconhecido cai em EM_TRANSITO.
pub fn normalizar_status_frete(bruto: &str) -> StatusVenda {
    let chave = bruto.trim().to_uppercase().replace(' ', "_");
    match chave.as_str() {
        "ENTREGUE" => StatusVenda::Entregue,
        "EM_TRANSITO" | "EM_TRÂNSITO" => StatusVenda::EmTransito,
        "AGUARDANDO_COLETA" => StatusVenda::AguardandoColeta,
        "EXTRAVIADO" => StatusVenda::Extraviado,
        "DEVOLVIDO" => StatusVenda::Devolvido,
        _ => StatusVenda::EmTransito,
    }
}
