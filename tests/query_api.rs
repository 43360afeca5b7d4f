//! Query and duplicates behavior through the facade, with the exact byte
//! matcher so test images either match or do not.

mod common;

use chrono::Duration;
use common::{new_target, png_bytes, Harness};
use vumock::{IncludeTargetData, QueryOptions, StoreError};

/// Two targets sharing an image, both past processing. Returns their ids.
fn seed_twins(harness: &Harness, image: &[u8]) -> (String, String) {
    let a = harness
        .mock
        .add_target("test-db", new_target("twin-a", image.to_vec(), 0.0))
        .expect("add");
    let b = harness
        .mock
        .add_target("test-db", new_target("twin-b", image.to_vec(), 0.0))
        .expect("add");
    harness.clock.advance(Duration::seconds(1));
    (a, b)
}

#[test]
fn default_options_return_the_first_match_with_data() {
    let harness = Harness::new();
    let image = png_bytes(40, 80, 120);
    let (first, _second) = seed_twins(&harness, &image);

    let hits = harness
        .mock
        .query("test-db", &image, &QueryOptions::default())
        .expect("query");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].target_id, first);
    let data = hits[0].target_data.as_ref().expect("top match carries data");
    assert_eq!(data.name, "twin-a");
}

#[test]
fn include_target_data_variants() {
    let harness = Harness::new();
    let image = png_bytes(1, 2, 3);
    seed_twins(&harness, &image);

    let hits = harness
        .mock
        .query(
            "test-db",
            &image,
            &QueryOptions {
                max_num_results: 10,
                include_target_data: IncludeTargetData::All,
            },
        )
        .expect("query");
    assert_eq!(hits.len(), 2);
    assert!(hits.iter().all(|h| h.target_data.is_some()));

    let hits = harness
        .mock
        .query(
            "test-db",
            &image,
            &QueryOptions {
                max_num_results: 10,
                include_target_data: IncludeTargetData::None,
            },
        )
        .expect("query");
    assert_eq!(hits.len(), 2);
    assert!(hits.iter().all(|h| h.target_data.is_none()));

    let hits = harness
        .mock
        .query(
            "test-db",
            &image,
            &QueryOptions {
                max_num_results: 10,
                include_target_data: IncludeTargetData::Top,
            },
        )
        .expect("query");
    assert!(hits[0].target_data.is_some());
    assert!(hits[1].target_data.is_none());
}

#[test]
fn target_data_carries_the_stored_metadata() {
    use base64::engine::general_purpose::STANDARD as BASE64;
    use base64::Engine;

    let harness = Harness::new();
    let image = png_bytes(50, 60, 70);
    let mut params = new_target("tagged", image.clone(), 0.0);
    params.application_metadata = Some(BASE64.encode(b"shelf=7"));
    harness.mock.add_target("test-db", params).expect("add");
    harness.clock.advance(Duration::seconds(1));

    let hits = harness
        .mock
        .query("test-db", &image, &QueryOptions::default())
        .expect("query");
    let data = hits[0].target_data.as_ref().expect("top match carries data");
    let metadata = data.application_metadata.as_ref().expect("metadata stored");
    assert_eq!(BASE64.decode(metadata).expect("valid base64"), b"shelf=7");
}

#[test]
fn non_matching_image_finds_nothing() {
    let harness = Harness::new();
    seed_twins(&harness, &png_bytes(1, 2, 3));

    let hits = harness
        .mock
        .query("test-db", &png_bytes(200, 200, 200), &QueryOptions::default())
        .expect("query");
    assert!(hits.is_empty());
}

#[test]
fn processing_and_deleted_targets_never_match() {
    let harness = Harness::new();
    let image = png_bytes(7, 7, 7);

    let slow = harness
        .mock
        .add_target("test-db", new_target("slow", image.clone(), 60.0))
        .expect("add");
    let doomed = harness
        .mock
        .add_target("test-db", new_target("doomed", image.clone(), 0.0))
        .expect("add");
    harness.clock.advance(Duration::seconds(1));
    harness.mock.delete_target("test-db", &doomed).expect("delete");

    let options = QueryOptions {
        max_num_results: 10,
        ..QueryOptions::default()
    };
    let hits = harness.mock.query("test-db", &image, &options).expect("query");
    assert!(hits.is_empty());

    // Once the slow target finishes processing it becomes queryable.
    harness.clock.advance(Duration::seconds(60));
    let hits = harness.mock.query("test-db", &image, &options).expect("query");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].target_id, slow);
}

#[test]
fn deactivated_target_never_matches() {
    let harness = Harness::new();
    let image = png_bytes(3, 1, 4);
    let mut params = new_target("dark", image.clone(), 0.0);
    params.active_flag = Some(false);
    harness.mock.add_target("test-db", params).expect("add");
    harness.clock.advance(Duration::seconds(1));

    let hits = harness
        .mock
        .query("test-db", &image, &QueryOptions::default())
        .expect("query");
    assert!(hits.is_empty());
}

#[test]
fn duplicates_report_other_targets_with_the_same_image() {
    let harness = Harness::new();
    let image = png_bytes(11, 22, 33);
    let (a, b) = seed_twins(&harness, &image);
    harness
        .mock
        .add_target("test-db", new_target("loner", png_bytes(99, 99, 99), 0.0))
        .expect("add");
    harness.clock.advance(Duration::seconds(1));

    assert_eq!(harness.mock.duplicates("test-db", &a).expect("dups"), vec![b.clone()]);
    assert_eq!(harness.mock.duplicates("test-db", &b).expect("dups"), vec![a]);
}

#[test]
fn duplicates_of_an_unknown_or_deleted_target_fail() {
    let harness = Harness::new();
    let image = png_bytes(6, 6, 6);
    let (a, _b) = seed_twins(&harness, &image);

    assert_eq!(
        harness.mock.duplicates("test-db", "missing"),
        Err(StoreError::UnknownTarget)
    );

    harness.mock.delete_target("test-db", &a).expect("delete");
    assert_eq!(
        harness.mock.duplicates("test-db", &a),
        Err(StoreError::UnknownTarget)
    );
}
