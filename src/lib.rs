pub mod config;
pub mod core;
pub mod domain;
pub mod http;
pub mod utils;

pub use config::ServerConfig;
pub use core::store::StubInfoStore;
pub use http::{router, AppState};
pub use utils::error::{ApiError, Result};
