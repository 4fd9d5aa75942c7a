use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_socket_addr, Validate};
use clap::Parser;
use std::net::SocketAddr;

#[derive(Debug, Clone, Parser)]
#[command(name = "info-api")]
#[command(about = "REST facade returning address records for an identifier")]
pub struct ServerConfig {
    #[arg(long, default_value = "127.0.0.1:8080")]
    pub bind_addr: String,

    #[arg(long, help = "Fixed session date (%d-%m-%Y) overriding the host clock")]
    pub session_date: Option<String>,

    #[arg(long, default_value = "admin")]
    pub admin_user: String,

    #[arg(long, default_value = "admin-pass")]
    pub admin_password: String,

    #[arg(long, default_value = "api-user")]
    pub api_user: String,

    #[arg(long, default_value = "api-pass")]
    pub api_password: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit JSON log lines")]
    pub json_logs: bool,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        validate_socket_addr("bind_addr", &self.bind_addr)
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<()> {
        validate_socket_addr("bind_addr", &self.bind_addr)?;
        validate_non_empty_string("admin_user", &self.admin_user)?;
        validate_non_empty_string("admin_password", &self.admin_password)?;
        validate_non_empty_string("api_user", &self.api_user)?;
        validate_non_empty_string("api_password", &self.api_password)?;
        Ok(())
    }
}
