use blockscore::association::Association;
use blockscore::clients::ApiClient;
use blockscore::framework::mock::MockTransport;
use blockscore::framework::{to_attributes, Attributes, Resource, SharedResource, Value};
use blockscore::model::{Person, QuestionSet};
use blockscore::{BlockScore, Config, Error, TransportError};
use serde_json::json;
use std::sync::Arc;

fn context(mock: &MockTransport) -> BlockScore {
    BlockScore::with_transport(Config::new("sk_test_123"), Arc::new(mock.clone()))
        .expect("valid config")
}

fn params(json: serde_json::Value) -> Attributes {
    to_attributes(json).expect("object params")
}

fn person(json: serde_json::Value) -> SharedResource<Person> {
    Resource::<Person>::from_json(json)
        .expect("person json")
        .into_shared()
}

async fn question_sets(
    client: &BlockScore,
    person: &SharedResource<Person>,
) -> Association<Person, QuestionSet> {
    client
        .association::<Person, QuestionSet>(person)
        .await
        .expect("load question sets")
}

/// Embedded ids are fetched one by one when the collection is loaded.
#[tokio::test]
async fn test_embedded_ids_are_materialized_in_order() {
    let mock = MockTransport::new();
    mock.expect_get("/question_sets/qs_1")
        .return_ok(json!({ "id": "qs_1", "person_id": "p_1" }));
    mock.expect_get("/question_sets/qs_2")
        .return_ok(json!({ "id": "qs_2", "person_id": "p_1" }));
    let client = context(&mock);

    let parent = person(json!({ "id": "p_1", "question_sets": ["qs_1", "qs_2"] }));
    let collection = question_sets(&client, &parent).await;

    let ids: Vec<_> = collection.all().iter().map(|qs| qs.id()).collect();
    assert_eq!(ids, vec![Some("qs_1"), Some("qs_2")]);
    assert_eq!(collection.member_ids(), ["qs_1", "qs_2"]);
    assert_eq!(mock.request_count(), 2);
    mock.verify();
}

/// `all()` on an already loaded collection issues no requests.
#[tokio::test]
async fn test_all_is_a_pure_accessor() {
    let mock = MockTransport::new();
    mock.expect_get("/question_sets/qs_1")
        .return_ok(json!({ "id": "qs_1", "person_id": "p_1" }));
    let client = context(&mock);

    let parent = person(json!({ "id": "p_1", "question_sets": ["qs_1"] }));
    let collection = question_sets(&client, &parent).await;

    assert_eq!(collection.all().len(), 1);
    assert_eq!(collection.all().len(), 1);
    assert_eq!(mock.request_count(), 1);
}

/// Creating under an unpersisted parent fails locally.
#[tokio::test]
async fn test_create_without_parent_id_fails_with_precedence() {
    let mock = MockTransport::new();
    let client = context(&mock);

    let parent = Resource::<Person>::new(params(json!({ "name_first": "John" }))).into_shared();
    let mut collection = question_sets(&client, &parent).await;

    for attempt in [json!({ "answer": "yes" }), json!({}), json!({ "person_id": "p_9" })] {
        let err = collection.create(params(attempt)).await.unwrap_err();
        assert!(matches!(err, Error::Precedence { parent: "person" }));
    }

    assert!(collection.member_ids().is_empty());
    assert!(collection.is_empty());
    assert_eq!(mock.request_count(), 0);
}

/// Creating injects the foreign key and caches the result.
#[tokio::test]
async fn test_create_injects_foreign_key_and_caches() {
    let mock = MockTransport::new();
    mock.expect_post("/question_sets")
        .return_ok(json!({ "id": "qs_9", "answer": "yes", "person_id": "p_1" }));
    let client = context(&mock);

    let parent = person(json!({ "id": "p_1" }));
    let mut collection = question_sets(&client, &parent).await;

    let created = collection
        .create(params(json!({ "answer": "yes" })))
        .await
        .unwrap();
    assert_eq!(created.id(), Some("qs_9"));

    let body = mock.requests()[0].body.clone().unwrap();
    assert_eq!(body, params(json!({ "answer": "yes", "person_id": "p_1" })));
    assert_eq!(collection.member_ids(), ["qs_9"]);
    assert_eq!(collection.len(), 1);
    mock.verify();
}

/// Retrieving a freshly created member is served from the cache.
#[tokio::test]
async fn test_retrieve_after_create_hits_cache() {
    let mock = MockTransport::new();
    mock.expect_post("/question_sets")
        .return_ok(json!({ "id": "qs_9", "answer": "yes", "person_id": "p_1" }));
    let client = context(&mock);

    let parent = person(json!({ "id": "p_1" }));
    let mut collection = question_sets(&client, &parent).await;

    let created = collection
        .create(params(json!({ "answer": "yes" })))
        .await
        .unwrap()
        .clone();
    let cached = collection.retrieve("qs_9").await.unwrap();

    assert_eq!(*cached, created);
    assert_eq!(mock.request_count(), 1);
}

/// Every loaded id is cached; repeated lookups never reach the network.
#[tokio::test]
async fn test_retrieve_known_ids_issues_no_requests() {
    let mock = MockTransport::new();
    for id in ["qs_1", "qs_2", "qs_3"] {
        mock.expect_get(format!("/question_sets/{id}"))
            .return_ok(json!({ "id": id, "person_id": "p_1" }));
    }
    let client = context(&mock);

    let parent = person(json!({ "id": "p_1", "question_sets": ["qs_1", "qs_2", "qs_3"] }));
    let mut collection = question_sets(&client, &parent).await;
    let loaded = mock.request_count();

    for id in ["qs_3", "qs_1", "qs_2", "qs_1"] {
        let member = collection.retrieve(id).await.unwrap();
        assert_eq!(member.id(), Some(id));
    }
    assert_eq!(mock.request_count(), loaded);
}

/// A fetched child of another parent is rejected and not cached.
#[tokio::test]
async fn test_retrieve_rejects_foreign_child() {
    let mock = MockTransport::new();
    mock.expect_get("/question_sets/qs_x")
        .return_ok(json!({ "id": "qs_x", "person_id": "p_2" }));
    let client = context(&mock);

    let parent = person(json!({ "id": "p_1" }));
    let mut collection = question_sets(&client, &parent).await;

    let err = collection.retrieve("qs_x").await.unwrap_err();
    match err {
        Error::ForeignKeyMismatch {
            parent_id,
            child_id,
            foreign_key,
            found,
            ..
        } => {
            assert_eq!(parent_id, "p_1");
            assert_eq!(child_id, "qs_x");
            assert_eq!(foreign_key, "person_id");
            assert_eq!(found.as_deref(), Some("p_2"));
        }
        other => panic!("expected foreign key mismatch, got {other:?}"),
    }
    assert!(collection.member_ids().is_empty());
    assert!(collection.is_empty());
}

/// A child without any foreign key is rejected too.
#[tokio::test]
async fn test_retrieve_rejects_child_without_foreign_key() {
    let mock = MockTransport::new();
    mock.expect_get("/question_sets/qs_x")
        .return_ok(json!({ "id": "qs_x" }));
    let client = context(&mock);

    let parent = person(json!({ "id": "p_1" }));
    let mut collection = question_sets(&client, &parent).await;

    let err = collection.retrieve("qs_x").await.unwrap_err();
    assert!(matches!(err, Error::ForeignKeyMismatch { found: None, .. }));
}

/// Uncached ids are fetched once, then served from the cache.
#[tokio::test]
async fn test_retrieve_unknown_id_fetches_once() {
    let mock = MockTransport::new();
    mock.expect_get("/question_sets/qs_5")
        .return_ok(json!({ "id": "qs_5", "person_id": "p_1" }));
    let client = context(&mock);

    let parent = person(json!({ "id": "p_1" }));
    let mut collection = question_sets(&client, &parent).await;

    collection.retrieve("qs_5").await.unwrap();
    collection.retrieve("qs_5").await.unwrap();

    assert_eq!(collection.member_ids(), ["qs_5"]);
    assert_eq!(collection.len(), 1);
    assert_eq!(mock.request_count(), 1);
}

/// Transport failures propagate unchanged and leave the cache untouched.
#[tokio::test]
async fn test_failed_create_and_retrieve_leave_state_unchanged() {
    let mock = MockTransport::new();
    mock.expect_post("/question_sets")
        .return_status(400, json!({ "error": { "message": "person_id is invalid", "param": "person_id" } }));
    mock.expect_get("/question_sets/qs_1")
        .return_err(TransportError::Network("connection refused".into()));
    let client = context(&mock);

    let parent = person(json!({ "id": "p_1" }));
    let mut collection = question_sets(&client, &parent).await;

    let err = collection.create(Attributes::new()).await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    let err = collection.retrieve("qs_1").await.unwrap_err();
    assert!(matches!(err, Error::Transport(TransportError::Network(_))));

    assert!(collection.member_ids().is_empty());
    assert!(collection.is_empty());
    mock.verify();
}

/// Drafts carry the parent id as foreign key and keep every other param.
#[tokio::test]
async fn test_build_preserves_params_and_sets_foreign_key() {
    let mock = MockTransport::new();
    let client = context(&mock);

    let persisted = person(json!({ "id": "p_1" }));
    let mut collection = question_sets(&client, &persisted).await;
    let draft = collection
        .build(params(json!({ "time_limit": 120, "notes": ["a", "b"] })))
        .unwrap();
    assert_eq!(draft.get_str("person_id"), Some("p_1"));
    assert_eq!(draft.get_i64("time_limit"), Some(120));
    assert_eq!(draft.get_list("notes").len(), 2);
    assert!(!draft.is_persisted());

    let unsaved = Resource::<Person>::new(Attributes::new()).into_shared();
    let mut collection = question_sets(&client, &unsaved).await;
    let draft = collection.build(params(json!({ "time_limit": 120 }))).unwrap();
    assert!(draft.get("person_id").unwrap().is_null());

    assert_eq!(collection.len(), 1);
    assert!(collection.member_ids().is_empty());
    assert_eq!(mock.request_count(), 0);
}

/// Saving a draft under a draft parent creates the parent first.
#[tokio::test]
async fn test_draft_save_creates_parent_first() {
    let mock = MockTransport::new();
    mock.expect_post("/people")
        .return_ok(json!({ "id": "p_1", "name_first": "John", "question_sets": [] }));
    mock.expect_post("/question_sets")
        .return_ok(json!({ "id": "qs_1", "person_id": "p_1" }));
    let client = context(&mock);

    let parent = Resource::<Person>::new(params(json!({ "name_first": "John" }))).into_shared();
    let mut collection = question_sets(&client, &parent).await;
    collection.build(Attributes::new()).unwrap();

    let saved = collection.save(0).await.unwrap();
    assert_eq!(saved.id(), Some("qs_1"));
    assert_eq!(saved.person_id(), Some("p_1"));
    assert_eq!(parent.read().unwrap().id(), Some("p_1"));
    assert_eq!(collection.member_ids(), ["qs_1"]);

    let requests = mock.requests();
    assert_eq!(requests[0].path, "/people");
    assert_eq!(requests[1].path, "/question_sets");
    assert_eq!(
        requests[1].body.as_ref().unwrap()["person_id"].as_str(),
        Some("p_1")
    );
    mock.verify();
}

/// A persisted parent is not saved again.
#[tokio::test]
async fn test_draft_save_under_persisted_parent_skips_parent() {
    let mock = MockTransport::new();
    mock.expect_post("/question_sets")
        .return_ok(json!({ "id": "qs_2", "person_id": "p_1" }));
    let client = context(&mock);

    let parent = person(json!({ "id": "p_1" }));
    let mut collection = question_sets(&client, &parent).await;
    collection.build(Attributes::new()).unwrap();
    collection.save(0).await.unwrap();

    assert_eq!(mock.request_count(), 1);
    mock.verify();
}

/// Saving a persisted member sends an update.
#[tokio::test]
async fn test_save_persisted_member_updates() {
    let mock = MockTransport::new();
    mock.expect_get("/question_sets/qs_1")
        .return_ok(json!({ "id": "qs_1", "person_id": "p_1", "time_limit": 60 }));
    mock.expect_patch("/question_sets/qs_1")
        .return_ok(json!({ "id": "qs_1", "person_id": "p_1", "time_limit": 90 }));
    let client = context(&mock);

    let parent = person(json!({ "id": "p_1", "question_sets": ["qs_1"] }));
    let mut collection = question_sets(&client, &parent).await;
    collection.get_mut(0).unwrap().set("time_limit", 90);

    let saved = collection.save(0).await.unwrap();
    assert_eq!(saved.time_limit(), Some(90));
    assert_eq!(collection.member_ids(), ["qs_1"]);
    mock.verify();
}

/// Refreshing twice yields the same ids and attributes.
#[tokio::test]
async fn test_refresh_is_idempotent() {
    let mock = MockTransport::new();
    for _ in 0..3 {
        mock.expect_get("/question_sets/qs_1")
            .return_ok(json!({ "id": "qs_1", "person_id": "p_1", "score": 80.0 }));
        mock.expect_get("/question_sets/qs_2")
            .return_ok(json!({ "id": "qs_2", "person_id": "p_1" }));
    }
    let client = context(&mock);

    let parent = person(json!({ "id": "p_1", "question_sets": ["qs_1", "qs_2"] }));
    let mut collection = question_sets(&client, &parent).await;

    collection.refresh().await.unwrap();
    let first_ids = collection.member_ids().to_vec();
    let first_members = collection.members().to_vec();

    collection.refresh().await.unwrap();
    assert_eq!(collection.member_ids(), first_ids.as_slice());
    assert_eq!(collection.members(), first_members.as_slice());
    mock.verify();
}

/// Refresh drops drafts and picks up ids added to the parent.
#[tokio::test]
async fn test_refresh_rereads_parent() {
    let mock = MockTransport::new();
    mock.expect_get("/people/p_1")
        .return_ok(json!({ "id": "p_1", "question_sets": [] }));
    mock.expect_get("/question_sets/qs_7")
        .return_ok(json!({ "id": "qs_7", "person_id": "p_1" }));
    let client = context(&mock);

    let parent = client.people().retrieve("p_1").await.unwrap().into_shared();
    let mut collection = client.people().question_sets(&parent).await.unwrap();
    collection.build(Attributes::new()).unwrap();
    assert_eq!(collection.len(), 1);

    parent
        .write()
        .unwrap()
        .set("question_sets", vec![Value::from("qs_7")]);
    collection.refresh().await.unwrap();

    assert_eq!(collection.member_ids(), ["qs_7"]);
    assert_eq!(collection.len(), 1);
    assert!(collection.iter().all(|qs| qs.is_persisted()));
    mock.verify();
}

/// The collection reports its parent name and foreign key.
#[tokio::test]
async fn test_collection_metadata() {
    let mock = MockTransport::new();
    let client = context(&mock);

    let parent = person(json!({ "id": "p_1" }));
    let collection = question_sets(&client, &parent).await;

    assert_eq!(collection.parent_name(), "person");
    assert_eq!(collection.foreign_key(), "person_id");
    assert_eq!((&collection).into_iter().count(), 0);
}

/// A create answered with an already cached id replaces that member.
#[tokio::test]
async fn test_create_with_known_id_keeps_ids_unique() {
    let mock = MockTransport::new();
    mock.expect_get("/question_sets/qs_1")
        .return_ok(json!({ "id": "qs_1", "person_id": "p_1" }));
    mock.expect_post("/question_sets")
        .return_ok(json!({ "id": "qs_1", "person_id": "p_1", "time_limit": 90 }));
    let client = context(&mock);

    let parent = person(json!({ "id": "p_1", "question_sets": ["qs_1"] }));
    let mut collection = question_sets(&client, &parent).await;
    collection.create(Attributes::new()).await.unwrap();

    assert_eq!(collection.len(), 1);
    assert_eq!(collection.member_ids(), ["qs_1"]);
    assert_eq!(collection.all()[0].time_limit(), Some(90));
    mock.verify();
}

/// A lookup whose response carries a cached id under another spelling is not duplicated.
#[tokio::test]
async fn test_retrieve_alias_of_cached_id_keeps_ids_unique() {
    let mock = MockTransport::new();
    mock.expect_get("/question_sets/qs_1")
        .return_ok(json!({ "id": "qs_1", "person_id": "p_1" }));
    mock.expect_get("/question_sets/QS_1")
        .return_ok(json!({ "id": "qs_1", "person_id": "p_1" }));
    let client = context(&mock);

    let parent = person(json!({ "id": "p_1", "question_sets": ["qs_1"] }));
    let mut collection = question_sets(&client, &parent).await;
    let member = collection.retrieve("QS_1").await.unwrap();
    assert_eq!(member.id(), Some("qs_1"));

    let ids: Vec<_> = collection.all().iter().map(|qs| qs.id()).collect();
    assert_eq!(ids, vec![Some("qs_1")]);
    assert_eq!(collection.member_ids(), ["qs_1"]);
    mock.verify();
}
