// src/db/vendas_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::venda::{RegistroConta, RegistroFrete},
    services::sync_service::FonteVendas,
};

// As duas tabelas pertencem a outro sistema: este serviço só lê, nunca
// escreve. As consultas devolvem as linhas ordenadas por NF, igual à fonte
// original.
#[derive(Clone)]
pub struct VendasRepository {
    pool: PgPool,
}

impl VendasRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FonteVendas for VendasRepository {
    async fn buscar_fretes(&self, vendedor: &str) -> Result<Vec<RegistroFrete>, AppError> {
        let registros = sqlx::query_as::<_, RegistroFrete>(
            r#"
            SELECT id, numero_nf, vendedor, data_emissao, valor_nf, tipo_nf,
                   nome_orgao, documento, contato_orgao, transportadora,
                   valor_frete, data_coleta, cidade_destino, previsao_entrega,
                   status
            FROM controle_frete
            WHERE vendedor = $1
            ORDER BY numero_nf ASC
            "#,
        )
        .bind(vendedor)
        .fetch_all(&self.pool)
        .await?;

        Ok(registros)
    }

    async fn buscar_contas(&self, vendedor: &str) -> Result<Vec<RegistroConta>, AppError> {
        let registros = sqlx::query_as::<_, RegistroConta>(
            r#"
            SELECT id, numero_nf, vendedor, data_emissao, valor, tipo_nf,
                   orgao, banco, data_vencimento, data_pagamento, status,
                   observacoes
            FROM contas_receber
            WHERE vendedor = $1
            ORDER BY numero_nf ASC
            "#,
        )
        .bind(vendedor)
        .fetch_all(&self.pool)
        .await?;

        Ok(registros)
    }
}
