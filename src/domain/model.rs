use serde::{Deserialize, Serialize};

// Wire shape of a single looked-up record. Absent address lines are omitted
// from the JSON body rather than serialized as null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressRecord {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line_1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line_2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line_3: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line_4: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line_5: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoResponse {
    pub models: Vec<AddressRecord>,
}
