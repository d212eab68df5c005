use crate::error::Result;
use crate::framework::{serialize_params, Attributes, Resource, ResourceEntity};
use serde::Serialize;

/// A business whose registration is verified.
pub struct Company;

impl ResourceEntity for Company {
    const NAME: &'static str = "company";
    const PATH: &'static str = "/companies";
}

/// Payload for creating a company.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CompanyParams {
    pub entity_name: String,
    pub tax_id: String,
    pub incorporation_day: u32,
    pub incorporation_month: u32,
    pub incorporation_year: u32,
    pub incorporation_state: String,
    pub incorporation_country_code: String,
    /// e.g. `corporation`, `llc`, `partnership`.
    pub incorporation_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dbas: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    pub address_street1: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_street2: Option<String>,
    pub address_city: String,
    pub address_subdivision: String,
    pub address_postal_code: String,
    pub address_country_code: String,
}

impl CompanyParams {
    pub fn into_attributes(self) -> Result<Attributes> {
        serialize_params(&self)
    }
}

impl Resource<Company> {
    pub fn entity_name(&self) -> Option<&str> {
        self.get_str("entity_name")
    }

    pub fn tax_id(&self) -> Option<&str> {
        self.get_str("tax_id")
    }

    pub fn status(&self) -> Option<&str> {
        self.get_str("status")
    }

    pub fn is_valid(&self) -> bool {
        self.status() == Some("valid")
    }
}
