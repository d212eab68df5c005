use crate::association::HasMany;
use crate::error::Result;
use crate::framework::{serialize_params, Attributes, Resource, ResourceEntity};
use crate::model::QuestionSet;
use serde::Serialize;

/// An individual whose identity is verified.
///
/// People own question sets: the ids are embedded under `question_sets` and each
/// question set points back through `person_id`.
pub struct Person;

impl ResourceEntity for Person {
    const NAME: &'static str = "person";
    const PATH: &'static str = "/people";
}

impl HasMany<QuestionSet> for Person {}

/// Payload for creating a person.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PersonParams {
    pub name_first: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_middle: Option<String>,
    pub name_last: String,
    pub birth_day: u32,
    pub birth_month: u32,
    pub birth_year: u32,
    /// `ssn` or `passport`.
    pub document_type: String,
    pub document_value: String,
    pub address_street1: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_street2: Option<String>,
    pub address_city: String,
    pub address_subdivision: String,
    pub address_postal_code: String,
    pub address_country_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl PersonParams {
    pub fn into_attributes(self) -> Result<Attributes> {
        serialize_params(&self)
    }
}

impl Resource<Person> {
    pub fn first_name(&self) -> Option<&str> {
        self.get_str("name_first")
    }

    pub fn last_name(&self) -> Option<&str> {
        self.get_str("name_last")
    }

    /// `valid` or `invalid`.
    pub fn status(&self) -> Option<&str> {
        self.get_str("status")
    }

    pub fn is_valid(&self) -> bool {
        self.status() == Some("valid")
    }

    /// Ids of the question sets embedded in this person.
    pub fn question_set_ids(&self) -> Vec<String> {
        self.get_ids(&<Person as HasMany<QuestionSet>>::embedded_ids_key())
    }
}
