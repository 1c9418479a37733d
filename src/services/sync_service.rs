// src/services/sync_service.rs

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};

use crate::common::error::AppError;
use crate::models::relatorio::{FalhaVendedor, ResultadoSync};
use crate::models::venda::{RegistroConta, RegistroFrete, VendaConsolidada};
use crate::services::consolidacao::consolidar_vendedor;

/// Fonte dos registros brutos, consultável por vendedor. Em produção é o
/// banco (`db::VendasRepository`); nos testes, uma fonte em memória.
#[async_trait]
pub trait FonteVendas: Send + Sync {
    async fn buscar_fretes(&self, vendedor: &str) -> Result<Vec<RegistroFrete>, AppError>;
    async fn buscar_contas(&self, vendedor: &str) -> Result<Vec<RegistroConta>, AppError>;
}

/// Dono do conjunto consolidado e do ciclo de sincronização.
///
/// O conjunto é reconstruído inteiro a cada ciclo e trocado de uma vez:
/// quem lê vê o conjunto anterior completo ou o novo completo, nunca uma
/// mistura. O mutex `ciclo` enfileira ciclos concorrentes: dois gatilhos
/// simultâneos executam um após o outro, nunca em paralelo.
pub struct SyncService {
    fonte: Arc<dyn FonteVendas>,
    vendedores: Vec<String>,
    timeout_fonte: Duration,
    vendas: RwLock<Arc<Vec<VendaConsolidada>>>,
    ciclo: Mutex<()>,
}

impl SyncService {
    pub fn new(fonte: Arc<dyn FonteVendas>, vendedores: Vec<String>, timeout_fonte: Duration) -> Self {
        Self {
            fonte,
            vendedores,
            timeout_fonte,
            vendas: RwLock::new(Arc::new(Vec::new())),
            ciclo: Mutex::new(()),
        }
    }

    /// Executa um ciclo completo de sincronização.
    ///
    /// Cada vendedor é buscado e consolidado isoladamente: falha ou estouro
    /// de tempo em um vendedor vira um aviso no resultado e o ciclo segue
    /// para o próximo. Só é erro quando NENHUM vendedor respondeu; nesse
    /// caso o conjunto anterior é preservado.
    pub async fn sincronizar(&self) -> Result<ResultadoSync, AppError> {
        let _guarda = self.ciclo.lock().await;
        tracing::info!("🔄 Sincronizando dados de todos os vendedores...");

        let mut consolidadas: Vec<VendaConsolidada> = Vec::new();
        let mut falhas: Vec<FalhaVendedor> = Vec::new();

        for vendedor in &self.vendedores {
            match tokio::time::timeout(self.timeout_fonte, self.buscar_vendedor(vendedor)).await {
                Ok(Ok((fretes, contas))) => {
                    consolidadas.extend(consolidar_vendedor(vendedor, &fretes, &contas));
                }
                Ok(Err(erro)) => {
                    tracing::error!("Erro ao buscar dados de {vendedor}: {erro}");
                    falhas.push(FalhaVendedor {
                        vendedor: vendedor.clone(),
                        motivo: erro.to_string(),
                    });
                }
                Err(_) => {
                    tracing::error!("Tempo esgotado ao buscar dados de {vendedor}");
                    falhas.push(FalhaVendedor {
                        vendedor: vendedor.clone(),
                        motivo: "tempo esgotado ao consultar a fonte".into(),
                    });
                }
            }
        }

        if !self.vendedores.is_empty() && falhas.len() == self.vendedores.len() {
            return Err(AppError::SourceUnavailable);
        }

        // Mesma ordenação da listagem original: NF crescente. A chave
        // natural é (numero_nf, vendedor), então o vendedor desempata.
        consolidadas.sort_by(|a, b| {
            a.numero_nf
                .cmp(&b.numero_nf)
                .then_with(|| a.vendedor.cmp(&b.vendedor))
        });

        let count = consolidadas.len();
        *self.vendas.write().await = Arc::new(consolidadas);

        if falhas.is_empty() {
            tracing::info!("✅ Sincronização concluída: {count} registros");
        } else {
            tracing::warn!(
                "⚠️ Sincronização parcial: {count} registros, {} vendedor(es) fora",
                falhas.len()
            );
        }

        Ok(ResultadoSync { count, falhas })
    }

    /// Conjunto consolidado atual, sem disparar sincronização.
    pub async fn snapshot(&self) -> Arc<Vec<VendaConsolidada>> {
        self.vendas.read().await.clone()
    }

    /// Sincroniza e devolve o conjunto recém-consolidado (a listagem
    /// original sempre sincronizava antes de responder).
    pub async fn listar(&self) -> Result<Arc<Vec<VendaConsolidada>>, AppError> {
        self.sincronizar().await?;
        Ok(self.snapshot().await)
    }

    // As duas buscas de um vendedor compartilham o mesmo limite de tempo.
    async fn buscar_vendedor(
        &self,
        vendedor: &str,
    ) -> Result<(Vec<RegistroFrete>, Vec<RegistroConta>), AppError> {
        let fretes = self.fonte.buscar_fretes(vendedor).await?;
        let contas = self.fonte.buscar_contas(vendedor).await?;
        Ok((fretes, contas))
    }
}
