pub mod sku_repo;
pub use sku_repo::{PgSkuRepository, SkuRepository};
pub mod memory;
pub use memory::InMemorySkuRepository;
