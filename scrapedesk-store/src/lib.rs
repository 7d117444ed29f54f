pub mod client;
pub mod company;
pub mod config;
pub mod error;

pub use client::{HttpStore, RecordStore};
pub use company::{Company, CompanyId};
pub use config::{DEFAULT_BASE_URL, StoreConfig};
pub use error::StoreError;
