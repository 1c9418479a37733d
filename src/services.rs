pub mod consolidacao;
pub mod relatorio;
pub mod status;
pub mod sync_service;
pub use sync_service::{FonteVendas, SyncService};
