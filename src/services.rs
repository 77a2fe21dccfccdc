pub mod sku_service;
pub use sku_service::SkuService;
