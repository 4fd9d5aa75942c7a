use crate::core::{AddressRecord, InfoResponse, InfoStore, Result};
use crate::utils::date::{current_tax_year, Clock};
use crate::utils::error::{ApiError, BoxError};
use async_trait::async_trait;
use std::time::Instant;

// Placeholder data-access layer: stands in for the real data source and
// returns a single fixed record for every identifier.
pub struct StubInfoStore<C: Clock> {
    clock: C,
}

impl<C: Clock> StubInfoStore<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    fn scan(&self, _id: &str) -> std::result::Result<Vec<AddressRecord>, BoxError> {
        // Attempt to obtain data here
        // ...
        Ok(vec![AddressRecord {
            name: "name".to_string(),
            address_line_1: Some("al1".to_string()),
            address_line_2: Some("al2".to_string()),
            address_line_3: Some("al3".to_string()),
            address_line_4: Some("al4".to_string()),
            address_line_5: Some("al5".to_string()),
            postcode: Some("pc".to_string()),
        }])
    }
}

#[async_trait]
impl<C: Clock> InfoStore for StubInfoStore<C> {
    async fn get_info(&self, id: &str) -> Result<InfoResponse> {
        tracing::debug!("data call started for identifier {}", id);
        let start = Instant::now();

        // Where no tax year has been specified, retrieve for the current one.
        let tax_year = current_tax_year(&self.clock);
        tracing::debug!("retrieving records for tax year {}", tax_year);

        let rows = self
            .scan(id)
            .map_err(|e| ApiError::service_unavailable("Unable to retrieve data").with_source(e))?;

        if rows.is_empty() {
            return Err(ApiError::not_found(format!(
                "No data available for this id: {id}"
            )));
        }

        tracing::info!("completed data scan in {}ms", start.elapsed().as_millis());
        tracing::debug!("data call ended for identifier {}", id);

        Ok(InfoResponse { models: rows })
    }
}
