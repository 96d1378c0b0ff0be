//! Integration tests for the conversion pipeline.

use tlm_cli::pipeline::convert;
use tlm_cli::types::NamespaceSummary;
use tlm_ingest::parse_namespaces;
use tlm_model::{AttributeValue, Compression, ConversionOptions, LayoutMode, Namespace};
use tlm_store::{RecordingStore, StoreError, ZarrStore};

fn namespaces(json: &str) -> Vec<Namespace> {
    parse_namespaces(json).unwrap()
}

#[test]
fn duplicate_categories_are_suffixed() {
    let input = namespaces(
        r#"[[
            {"c": "x", "v": [[1000, 1]]},
            {"c": "x", "v": [[2000, 2]]},
            {"c": "x", "v": [[3000, 3]]}
        ]]"#,
    );
    let mut store = RecordingStore::new();

    let summary = convert(input, &mut store, &ConversionOptions::new()).unwrap();

    assert_eq!(store.dataset_paths(), vec!["/x", "/x_1", "/x_2"]);
    assert!(store.attribute("/x", "original_name").is_none());
    assert_eq!(
        store.attribute("/x_1", "original_name"),
        Some(&AttributeValue::text("x"))
    );
    assert_eq!(
        store.attribute("/x_2", "original_name"),
        Some(&AttributeValue::text("x"))
    );
    assert_eq!(store.matrix("/x_2"), Some(&[3.0, 3.0][..]));
    assert_eq!(summary.namespaces[0].renamed, 2);
}

#[test]
fn empty_records_are_skipped_entirely() {
    let input = namespaces(
        r#"[[
            {"c": "a", "l": {"unit": "s"}, "v": []},
            {"c": "a", "v": [[1000, 5]]},
            {"c": "b"}
        ]]"#,
    );
    let mut store = RecordingStore::new();

    let summary = convert(input, &mut store, &ConversionOptions::new()).unwrap();

    assert_eq!(store.dataset_paths(), vec!["/a"]);
    assert!(store.attribute("/a", "l_unit").is_none());
    assert!(store.attribute("/a", "original_name").is_none());
    assert_eq!(
        summary.namespaces,
        vec![NamespaceSummary {
            index: 0,
            records: 3,
            written: 1,
            skipped_empty: 2,
            renamed: 0,
            warnings: 0,
        }]
    );
}

#[test]
fn activity_record_end_to_end() {
    let input = namespaces(
        r#"[[{"c": "fleet.s3p.activity", "l": {"driver": "7"}, "a": {"slot": 2}, "la": 1,
              "v": [["1000", "R"], ["2000", "r"]]}]]"#,
    );
    let mut store = RecordingStore::new();

    convert(input, &mut store, &ConversionOptions::new()).unwrap();

    insta::assert_snapshot!(store.log(), @r#"
    dataset /fleet.s3p.activity shape=[2, 2] chunks=[2, 1] gzip(9)
    attr /fleet.s3p.activity l_driver="7"
    attr /fleet.s3p.activity a_slot=2
    attr /fleet.s3p.activity a_state_A=3
    attr /fleet.s3p.activity a_state_D=7
    attr /fleet.s3p.activity a_state_R=1
    attr /fleet.s3p.activity a_state_W=5
    attr /fleet.s3p.activity a_state_a=2
    attr /fleet.s3p.activity a_state_d=6
    attr /fleet.s3p.activity a_state_r=0
    attr /fleet.s3p.activity a_state_w=4
    attr /fleet.s3p.activity la=1
    matrix /fleet.s3p.activity [2.0, 0.0, 1.0, 1.0]
    "#);
}

#[test]
fn coercion_warnings_are_counted() {
    let input = namespaces(r#"[[{"c": "x", "v": [[1000, "abc"], [2000, null]]}]]"#);
    let mut store = RecordingStore::new();

    let summary = convert(input, &mut store, &ConversionOptions::new()).unwrap();

    assert_eq!(summary.total_warnings(), 2);
    assert_eq!(store.matrix("/x"), Some(&[2.0, 0.0, 1.0, 0.0][..]));
}

#[test]
fn flat_layout_rejects_cross_namespace_collisions() {
    let input = namespaces(r#"[[{"c": "x", "v": [[1]]}], [{"c": "x", "v": [[2]]}]]"#);
    let mut store = RecordingStore::new();

    let err = convert(input, &mut store, &ConversionOptions::new()).unwrap_err();

    assert!(matches!(err, StoreError::AlreadyExists { ref path } if path == "/x"));
    assert_eq!(store.dataset_paths(), vec!["/x"]);
}

#[test]
fn grouped_layout_scopes_names_per_namespace() {
    let input = namespaces(
        r#"[
            [{"c": "x", "a": {"k": 4}, "v": [[1000, 1, 9]]}, {"c": "x", "v": [[2000]]}],
            [{"c": "x", "v": [[3000, 3]]}]
        ]"#,
    );
    let options = ConversionOptions::new().with_layout(LayoutMode::Grouped);
    let mut store = RecordingStore::new();

    convert(input, &mut store, &options).unwrap();

    assert_eq!(
        store.dataset_paths(),
        vec![
            "/dataset_0/x/values",
            "/dataset_0/x_1/values",
            "/dataset_1/x/values"
        ]
    );
    assert_eq!(store.matrix("/dataset_0/x/values"), Some(&[1.0, 1.0][..]));
    assert_eq!(store.matrix("/dataset_0/x_1/values"), Some(&[2.0, 0.0][..]));
    assert_eq!(
        store.attribute("/dataset_0/x", "a_k"),
        Some(&AttributeValue::text("4"))
    );
    assert_eq!(
        store.attribute("/dataset_0/x_1", "original_name"),
        Some(&AttributeValue::text("x"))
    );
    let plan = store.plan("/dataset_1/x/values").unwrap();
    assert_eq!(plan.compression, Compression::None);
    assert_eq!(plan.chunk_shape, [1, 2]);
}

#[test]
fn writes_zarr_hierarchy() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("telemetry.zarr");
    let input = namespaces(r#"[[{"c": "s3p.speed", "v": [[1000, 12.5], [2000, 13.0]]}]]"#);
    let options = ConversionOptions::new().with_compression(Compression::Gzip { level: 4 });

    let mut store = ZarrStore::create(&out).unwrap();
    let summary = convert(input, &mut store, &options).unwrap();

    assert_eq!(summary.total_written(), 1);
    assert!(out.join("zarr.json").is_file());
    let metadata = std::fs::read_to_string(out.join("s3p.speed").join("zarr.json")).unwrap();
    assert!(metadata.contains("\"gzip\""), "metadata was: {metadata}");
}
