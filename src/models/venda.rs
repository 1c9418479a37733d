// src/models/venda.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Enums ---

/// Qual fonte "venceu" para uma venda consolidada.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Origem {
    ContasReceber, // Conta paga prevalece sobre o frete
    ControleFrete,
}

impl Origem {
    /// Prioridade do registro no conjunto consolidado (conta paga > frete).
    pub fn prioridade(&self) -> i16 {
        match self {
            Origem::ContasReceber => 2,
            Origem::ControleFrete => 1,
        }
    }
}

/// Status exibido de uma venda, derivado de origem + sub-status bruto.
/// Nunca é armazenado: calculado na leitura (ver `services::status`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusVenda {
    Pago,
    Entregue,
    EmTransito,
    AguardandoColeta,
    Extraviado,
    Devolvido,
}

// --- Registros brutos das fontes externas ---

// Linha da tabela `controle_frete`. Os campos de texto chegam como vieram
// da planilha de origem, inclusive o sub-status livre de entrega.
#[derive(Debug, Clone, Default, FromRow)]
pub struct RegistroFrete {
    pub id: Uuid,
    pub numero_nf: Option<String>,
    pub vendedor: String,
    pub data_emissao: Option<NaiveDate>,
    pub valor_nf: Option<Decimal>,
    pub tipo_nf: Option<String>,
    pub nome_orgao: Option<String>,
    pub documento: Option<String>,
    pub contato_orgao: Option<String>,
    pub transportadora: Option<String>,
    pub valor_frete: Option<Decimal>,
    pub data_coleta: Option<NaiveDate>,
    pub cidade_destino: Option<String>,
    pub previsao_entrega: Option<NaiveDate>,
    /// Sub-status livre: "ENTREGUE", "EM TRÂNSITO", "AGUARDANDO COLETA"...
    pub status: Option<String>,
}

// Linha da tabela `contas_receber`.
#[derive(Debug, Clone, Default, FromRow)]
pub struct RegistroConta {
    pub id: Uuid,
    pub numero_nf: Option<String>,
    pub vendedor: String,
    pub data_emissao: Option<NaiveDate>,
    pub valor: Option<Decimal>,
    pub tipo_nf: Option<String>,
    pub orgao: Option<String>,
    pub banco: Option<String>,
    pub data_vencimento: Option<NaiveDate>,
    pub data_pagamento: Option<NaiveDate>,
    /// "PAGO" quando quitada; qualquer outro valor conta como pendente.
    pub status: Option<String>,
    pub observacoes: Option<String>,
}

// --- Registro consolidado ---

/// Uma venda no conjunto consolidado. Imutável dentro de um ciclo de
/// sincronização; a chave natural é (numero_nf, vendedor). O `id` é o id da
/// linha de origem vencedora, então ciclos sobre dados inalterados produzem
/// conjuntos idênticos.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VendaConsolidada {
    pub id: Uuid,

    #[schema(example = "NF-001")]
    pub numero_nf: String,

    pub origem: Origem,
    pub prioridade: i16,

    #[schema(value_type = Option<String>, format = Date, example = "2025-03-01")]
    pub data_emissao: Option<NaiveDate>,

    #[schema(example = "1000.00")]
    pub valor_nf: Decimal,

    pub tipo_nf: Option<String>,

    #[schema(example = "Prefeitura de Campinas")]
    pub nome_orgao: Option<String>,

    #[schema(example = "ROBERTO")]
    pub vendedor: String,

    // Campos presentes somente quando a origem é CONTAS_RECEBER
    pub banco: Option<String>,
    pub data_vencimento: Option<NaiveDate>,
    pub data_pagamento: Option<NaiveDate>,
    pub status_pagamento: Option<String>,
    pub observacoes: Option<String>,
    pub id_contas_receber: Option<Uuid>,

    // Campos presentes somente quando a origem é CONTROLE_FRETE
    pub documento: Option<String>,
    pub contato_orgao: Option<String>,
    pub transportadora: Option<String>,
    pub valor_frete: Option<Decimal>,
    pub data_coleta: Option<NaiveDate>,
    pub cidade_destino: Option<String>,
    pub previsao_entrega: Option<NaiveDate>,
    pub status_frete: Option<String>,
    pub id_controle_frete: Option<Uuid>,
}

/// Venda serializada para a API junto com o status derivado no momento da
/// leitura.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct VendaView {
    #[serde(flatten)]
    pub venda: VendaConsolidada,
    pub status: StatusVenda,
}
