//! # BlockScore Demo
//!
//! Walks through the person and question set flow against the API configured in the
//! environment:
//! 1.  Building a [`BlockScore`] context from `BLOCKSCORE_API_KEY`.
//! 2.  Drafting a person and a question set without touching the network.
//! 3.  Saving the question set, which creates the person first.
//! 4.  Listing the person's question sets.

use blockscore::clients::ApiClient;
use blockscore::framework::Resource;
use blockscore::model::{Person, PersonParams};
use blockscore::runtime::setup_tracing;
use blockscore::BlockScore;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    info!("Starting BlockScore demo");
    let client = BlockScore::from_env().map_err(|e| e.to_string())?;
    let people = client.people();

    let params = PersonParams {
        name_first: "John".to_string(),
        name_last: "Doe".to_string(),
        birth_day: 23,
        birth_month: 8,
        birth_year: 1980,
        document_type: "ssn".to_string(),
        document_value: "0000".to_string(),
        address_street1: "1 Infinite Loop".to_string(),
        address_city: "Cupertino".to_string(),
        address_subdivision: "CA".to_string(),
        address_postal_code: "95014".to_string(),
        address_country_code: "US".to_string(),
        ..Default::default()
    };
    let person = Resource::<Person>::new(params.into_attributes().map_err(|e| e.to_string())?)
        .into_shared();

    let span = tracing::info_span!("question_set_creation");
    let result = async {
        let mut question_sets = people.question_sets(&person).await?;
        question_sets.build(Default::default())?;
        let saved = question_sets.save(0).await?;
        info!(question_set_id = ?saved.id(), "Question set created");
        Ok::<_, blockscore::Error>(question_sets)
    }
    .instrument(span)
    .await;

    let question_sets = match result {
        Ok(question_sets) => question_sets,
        Err(e) => {
            error!(error = %e, "Question set creation failed");
            return Err(e.to_string());
        }
    };

    let person_id = person
        .read()
        .map_err(|e| e.to_string())?
        .id()
        .map(str::to_owned)
        .unwrap_or_default();
    info!(person_id = %person_id, "Person created");

    let fetched = people.retrieve(&person_id).await.map_err(|e| e.to_string())?;
    info!(
        status = ?fetched.status(),
        question_sets = fetched.question_set_ids().len(),
        "Person retrieved"
    );

    for question_set in &question_sets {
        info!(
            id = ?question_set.id(),
            questions = question_set.questions().len(),
            "Question set"
        );
    }

    info!("Demo completed successfully");
    Ok(())
}
