pub mod venda;
pub use venda::{Origem, RegistroConta, RegistroFrete, StatusVenda, VendaConsolidada, VendaView};
pub mod relatorio;
pub use relatorio::{DashboardStats, FalhaVendedor, RelatorioMensal, ResultadoSync};
