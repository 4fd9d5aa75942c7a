use crate::utils::error::{ApiError, Result};
use std::net::SocketAddr;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ApiError::internal(format!(
            "invalid value for {field_name}: cannot be empty or whitespace-only"
        )));
    }
    Ok(())
}

pub fn validate_socket_addr(field_name: &str, value: &str) -> Result<SocketAddr> {
    value.parse::<SocketAddr>().map_err(|e| {
        ApiError::internal(format!(
            "invalid value for {field_name}: {value} is not a socket address"
        ))
        .with_source(e)
    })
}
