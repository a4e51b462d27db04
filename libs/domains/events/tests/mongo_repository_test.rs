//! MongoEventRepository against a real MongoDB
//!
//! Run with `cargo test -p domain_events -- --ignored` (requires Docker).

use domain_events::*;
use mongodb::bson::{Document, doc};
use std::collections::HashSet;
use std::sync::Arc;
use test_utils::{TestDataBuilder, TestMongo};
use uuid::Uuid;

fn event(builder: &TestDataBuilder, index: u64) -> Event {
    Event {
        id: builder.event_id(index),
        name: builder.name("event", &index.to_string()),
        price: builder.price(index),
        artist: "House Band".to_string(),
        date: builder.date(index),
        description: "Integration".to_string(),
        image_url: String::new(),
    }
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_save_get_and_list() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("mongo_save_get_list");
    let repo = MongoEventRepository::with_defaults(&mongo.database("catalog"));

    assert!(repo.get_all().await.unwrap().is_empty());
    assert!(repo.get_by_id(Uuid::new_v4()).await.unwrap().is_none());

    let mut expected = HashSet::new();
    for i in 0..4 {
        let saved = repo.save(event(&builder, i)).await.unwrap();
        expected.insert(saved.id);

        let fetched = repo.get_by_id(saved.id).await.unwrap();
        assert_eq!(fetched, Some(saved));
    }

    let ids: HashSet<Uuid> = repo
        .get_all()
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.id)
        .collect();
    assert_eq!(ids, expected);
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_duplicate_id_is_conflict() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("mongo_duplicate");
    let repo = MongoEventRepository::with_defaults(&mongo.database("catalog"));

    let original = repo.save(event(&builder, 0)).await.unwrap();

    let mut duplicate = event(&builder, 1);
    duplicate.id = original.id;
    assert!(matches!(
        repo.save(duplicate).await,
        Err(EventError::Conflict(id)) if id == original.id
    ));

    let stored = repo.get_by_id(original.id).await.unwrap().unwrap();
    assert_eq!(stored.name, original.name);
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_concurrent_same_id_exactly_one_wins() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("mongo_concurrent");
    let repo = Arc::new(MongoEventRepository::with_defaults(&mongo.database("catalog")));
    let shared_id = builder.event_id(0);

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let repo = Arc::clone(&repo);
            let mut e = event(&builder, i);
            e.id = shared_id;
            tokio::spawn(async move { repo.save(e).await })
        })
        .collect();

    let mut ok = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => ok += 1,
            Err(EventError::Conflict(_)) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
    assert_eq!(ok, 1);
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_partitions_are_isolated_and_corrupt_records_skipped() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("mongo_partitions");
    let database = mongo.database("catalog");

    let tickets = MongoEventRepository::new(&database, "events", "tickets");
    let archive = MongoEventRepository::new(&database, "events", "archive");

    let kept = tickets.save(event(&builder, 0)).await.unwrap();
    archive.save(event(&builder, 1)).await.unwrap();

    // A record in the same partition that cannot be decoded
    let bad_id = builder.event_id(2);
    database
        .collection::<Document>("events")
        .insert_one(doc! {
            "_id": { "partition_key": "tickets", "row_key": bad_id.to_string() },
            "name": "Broken",
        })
        .await
        .unwrap();

    let listed = tickets.get_all().await.unwrap();
    assert_eq!(listed, vec![kept]);

    assert!(matches!(
        tickets.get_by_id(bad_id).await,
        Err(EventError::CorruptRecord { .. })
    ));
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_connects_through_database_crate() {
    let mongo = TestMongo::new().await;

    let client = database::mongodb::connect(mongo.connection_string())
        .await
        .unwrap();
    assert!(database::mongodb::check_health(&client).await);

    let repo = MongoEventRepository::with_defaults(&client.database("catalog"));
    let builder = TestDataBuilder::from_test_name("mongo_connector");
    let saved = repo.save(event(&builder, 0)).await.unwrap();
    assert!(repo.get_by_id(saved.id).await.unwrap().is_some());
}
