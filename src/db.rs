pub mod vendas_repo;
pub use vendas_repo::VendasRepository;
