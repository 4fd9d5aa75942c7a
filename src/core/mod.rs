pub mod store;

pub use crate::domain::model::{AddressRecord, InfoResponse};
pub use crate::domain::ports::InfoStore;
pub use crate::utils::error::Result;
