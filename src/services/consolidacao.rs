// src/services/consolidacao.rs

use indexmap::IndexMap;
use std::collections::HashSet;

use crate::models::venda::{Origem, RegistroConta, RegistroFrete, VendaConsolidada};

/// Normaliza uma conta a receber paga para o formato consolidado.
pub fn normalizar_conta(conta: &RegistroConta) -> VendaConsolidada {
    VendaConsolidada {
        id: conta.id,
        numero_nf: nf_limpa(&conta.numero_nf),
        origem: Origem::ContasReceber,
        prioridade: Origem::ContasReceber.prioridade(),
        data_emissao: conta.data_emissao,
        valor_nf: conta.valor.unwrap_or_default(),
        tipo_nf: conta.tipo_nf.clone(),
        nome_orgao: conta.orgao.clone(),
        vendedor: conta.vendedor.clone(),
        banco: conta.banco.clone(),
        data_vencimento: conta.data_vencimento,
        data_pagamento: conta.data_pagamento,
        status_pagamento: conta.status.clone(),
        observacoes: conta.observacoes.clone(),
        id_contas_receber: Some(conta.id),
        documento: None,
        contato_orgao: None,
        transportadora: None,
        valor_frete: None,
        data_coleta: None,
        cidade_destino: None,
        previsao_entrega: None,
        status_frete: None,
        id_controle_frete: None,
    }
}

/// Normaliza um registro de frete para o formato consolidado.
pub fn normalizar_frete(frete: &RegistroFrete) -> VendaConsolidada {
    VendaConsolidada {
        id: frete.id,
        numero_nf: nf_limpa(&frete.numero_nf),
        origem: Origem::ControleFrete,
        prioridade: Origem::ControleFrete.prioridade(),
        data_emissao: frete.data_emissao,
        valor_nf: frete.valor_nf.unwrap_or_default(),
        tipo_nf: frete.tipo_nf.clone(),
        nome_orgao: frete.nome_orgao.clone(),
        vendedor: frete.vendedor.clone(),
        banco: None,
        data_vencimento: None,
        data_pagamento: None,
        status_pagamento: None,
        observacoes: None,
        id_contas_receber: None,
        documento: frete.documento.clone(),
        contato_orgao: frete.contato_orgao.clone(),
        transportadora: frete.transportadora.clone(),
        valor_frete: frete.valor_frete,
        data_coleta: frete.data_coleta,
        cidade_destino: frete.cidade_destino.clone(),
        previsao_entrega: frete.previsao_entrega,
        status_frete: frete.status.clone(),
        id_controle_frete: Some(frete.id),
    }
}

/// Consolida os registros de um vendedor em um conjunto sem NF duplicada.
///
/// Regra de precedência: uma conta marcada "PAGO" com data de pagamento
/// vence o frete da mesma NF: a venda já foi paga e o detalhe de entrega
/// deixa de interessar. Fretes sem conta paga entram como estão. Contas
/// pendentes não entram e também não bloqueiam o frete correspondente.
pub fn consolidar_vendedor(
    vendedor: &str,
    fretes: &[RegistroFrete],
    contas: &[RegistroConta],
) -> Vec<VendaConsolidada> {
    // 1. Mapa de NFs pagas, na ordem em que chegam da fonte (NF crescente).
    //    Para NF repetida dentro da fonte, a última linha vence.
    let mut pagas: IndexMap<&str, &RegistroConta> = IndexMap::new();
    for conta in contas {
        let Some(nf) = nf_valida(&conta.numero_nf) else {
            tracing::warn!("Conta sem numero_nf descartada (vendedor {vendedor}, id {})", conta.id);
            continue;
        };
        if conta.status.as_deref() == Some("PAGO") && conta.data_pagamento.is_some() {
            pagas.insert(nf, conta);
        }
    }

    let mut consolidadas = Vec::with_capacity(pagas.len() + fretes.len());
    let mut processadas: HashSet<&str> = HashSet::with_capacity(pagas.len() + fretes.len());

    // 2. Contas pagas primeiro (prioridade 2)
    for (nf, conta) in &pagas {
        consolidadas.push(normalizar_conta(conta));
        processadas.insert(*nf);
    }

    // 3. Fretes cuja NF ainda não apareceu (prioridade 1). Inserir no
    //    conjunto também aqui absorve NF duplicada dentro da própria fonte.
    for frete in fretes {
        let Some(nf) = nf_valida(&frete.numero_nf) else {
            tracing::warn!("Frete sem numero_nf descartado (vendedor {vendedor}, id {})", frete.id);
            continue;
        };
        if processadas.insert(nf) {
            consolidadas.push(normalizar_frete(frete));
        }
    }

    consolidadas
}

fn nf_valida(numero_nf: &Option<String>) -> Option<&str> {
    match numero_nf.as_deref().map(str::trim) {
        Some(nf) if !nf.is_empty() => Some(nf),
        _ => None,
    }
}

fn nf_limpa(numero_nf: &Option<String>) -> String {
    numero_nf.as_deref().unwrap_or_default().trim().to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn frete(nf: &str, valor: i64, status: &str) -> RegistroFrete {
        RegistroFrete {
            id: Uuid::new_v4(),
            numero_nf: Some(nf.into()),
            vendedor: "ROBERTO".into(),
            data_emissao: NaiveDate::from_ymd_opt(2025, 3, 1),
            valor_nf: Some(Decimal::from(valor)),
            status: Some(status.into()),
            ..Default::default()
        }
    }

    fn conta(nf: &str, valor: i64, status: &str, pagamento: Option<NaiveDate>) -> RegistroConta {
        RegistroConta {
            id: Uuid::new_v4(),
            numero_nf: Some(nf.into()),
            vendedor: "ROBERTO".into(),
            data_emissao: NaiveDate::from_ymd_opt(2025, 3, 1),
            valor: Some(Decimal::from(valor)),
            status: Some(status.into()),
            data_pagamento: pagamento,
            ..Default::default()
        }
    }

    fn dia(d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2025, 3, d)
    }

    #[test]
    fn conta_paga_prevalece_sobre_o_frete_da_mesma_nf() {
        let fretes = vec![frete("NF-001", 1000, "ENTREGUE")];
        let contas = vec![
            conta("NF-001", 1000, "PAGO", dia(10)),
            conta("NF-002", 300, "PENDENTE", None),
        ];

        let vendas = consolidar_vendedor("ROBERTO", &fretes, &contas);

        assert_eq!(vendas.len(), 1);
        assert_eq!(vendas[0].numero_nf, "NF-001");
        assert_eq!(vendas[0].origem, Origem::ContasReceber);
        assert_eq!(vendas[0].valor_nf, Decimal::from(1000));
        // NF-002 não tem frete nem pagamento confirmado: fica invisível.
    }

    #[test]
    fn conta_pendente_nao_bloqueia_o_frete() {
        let fretes = vec![frete("NF-005", 700, "EM TRÂNSITO")];
        let contas = vec![conta("NF-005", 700, "PENDENTE", None)];

        let vendas = consolidar_vendedor("ROBERTO", &fretes, &contas);

        assert_eq!(vendas.len(), 1);
        assert_eq!(vendas[0].origem, Origem::ControleFrete);
    }

    #[test]
    fn conta_paga_sem_data_de_pagamento_nao_conta_como_paga() {
        let fretes = vec![frete("NF-006", 450, "ENTREGUE")];
        let contas = vec![conta("NF-006", 450, "PAGO", None)];

        let vendas = consolidar_vendedor("ROBERTO", &fretes, &contas);

        assert_eq!(vendas.len(), 1);
        assert_eq!(vendas[0].origem, Origem::ControleFrete);
    }

    #[test]
    fn frete_sem_conta_entra_como_esta() {
        let fretes = vec![frete("NF-010", 500, "AGUARDANDO COLETA")];

        let vendas = consolidar_vendedor("ROBERTO", &fretes, &[]);

        assert_eq!(vendas.len(), 1);
        assert_eq!(vendas[0].origem, Origem::ControleFrete);
        assert_eq!(vendas[0].prioridade, 1);
        assert_eq!(vendas[0].status_frete.as_deref(), Some("AGUARDANDO COLETA"));
    }

    #[test]
    fn nf_duplicada_no_frete_aparece_uma_unica_vez() {
        let fretes = vec![frete("NF-020", 100, "ENTREGUE"), frete("NF-020", 100, "EM TRÂNSITO")];

        let vendas = consolidar_vendedor("ROBERTO", &fretes, &[]);

        assert_eq!(vendas.len(), 1);
        // Primeira linha vence (a fonte entrega ordenado por NF).
        assert_eq!(vendas[0].status_frete.as_deref(), Some("ENTREGUE"));
    }

    #[test]
    fn nf_repetida_nas_contas_pagas_usa_a_ultima_linha() {
        let mut primeira = conta("NF-030", 100, "PAGO", dia(5));
        primeira.banco = Some("BB".into());
        let mut segunda = conta("NF-030", 100, "PAGO", dia(9));
        segunda.banco = Some("CAIXA".into());

        let vendas = consolidar_vendedor("ROBERTO", &[], &[primeira, segunda]);

        assert_eq!(vendas.len(), 1);
        assert_eq!(vendas[0].banco.as_deref(), Some("CAIXA"));
        assert_eq!(vendas[0].data_pagamento, dia(9));
    }

    #[test]
    fn registro_sem_numero_nf_e_descartado() {
        let mut sem_nf = frete("NF-040", 900, "ENTREGUE");
        sem_nf.numero_nf = Some("   ".into());
        let mut conta_sem_nf = conta("NF-041", 10, "PAGO", dia(2));
        conta_sem_nf.numero_nf = None;

        let vendas = consolidar_vendedor("ROBERTO", &[sem_nf], &[conta_sem_nf]);

        assert!(vendas.is_empty());
    }

    #[test]
    fn valor_ausente_vira_zero() {
        let mut sem_valor = frete("NF-050", 0, "ENTREGUE");
        sem_valor.valor_nf = None;

        let vendas = consolidar_vendedor("ROBERTO", &[sem_valor], &[]);

        assert_eq!(vendas[0].valor_nf, Decimal::ZERO);
    }

    #[test]
    fn id_consolidado_e_o_id_da_linha_vencedora() {
        let f = frete("NF-060", 10, "ENTREGUE");
        let c = conta("NF-060", 10, "PAGO", dia(1));
        let id_conta = c.id;

        let vendas = consolidar_vendedor("ROBERTO", &[f], &[c]);

        assert_eq!(vendas[0].id, id_conta);
        assert_eq!(vendas[0].id_contas_receber, Some(id_conta));
        assert_eq!(vendas[0].id_controle_frete, None);
    }

    #[test]
    fn contas_pagas_vem_antes_dos_fretes() {
        let fretes = vec![frete("NF-001", 10, "ENTREGUE")];
        let contas = vec![conta("NF-002", 20, "PAGO", dia(3))];

        let vendas = consolidar_vendedor("ROBERTO", &fretes, &contas);

        assert_eq!(vendas.len(), 2);
        assert_eq!(vendas[0].origem, Origem::ContasReceber);
        assert_eq!(vendas[1].origem, Origem::ControleFrete);
    }
}
