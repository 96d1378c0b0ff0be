//! Call order the record writer issues against a store.

use std::collections::BTreeMap;

use tlm_model::{Compression, LayoutPlan, Matrix, NormalizedRecord};
use tlm_store::{
    DatasetWrite, RecordingStore, create_namespace_group, write_flat_record, write_grouped_record,
};

fn sample_record() -> NormalizedRecord {
    NormalizedRecord {
        category: "x".to_string(),
        labels: BTreeMap::from([("unit".to_string(), "km/h".to_string())]),
        attributes: BTreeMap::from([("flag".to_string(), 3)]),
        scalar_flag: 1,
        matrix: Matrix::from_rows(vec![vec![2.0, 0.0, 5.0], vec![1.0, 1.0, 6.0]]).unwrap(),
        warnings: Vec::new(),
    }
}

#[test]
fn flat_layout_call_order() {
    let record = sample_record();
    let plan = LayoutPlan {
        shape: [2, 3],
        chunk_shape: [2, 1],
        compression: Compression::max(),
    };
    let mut store = RecordingStore::new();
    let write = DatasetWrite::new(&record, "x_1", &plan).with_original_name("x");

    write_flat_record(&mut store, &write).unwrap();

    insta::assert_snapshot!(store.log(), @r#"
    dataset /x_1 shape=[2, 3] chunks=[2, 1] gzip(9)
    attr /x_1 original_name="x"
    attr /x_1 l_unit="km/h"
    attr /x_1 a_flag=3
    attr /x_1 la=1
    matrix /x_1 [2.0, 0.0, 5.0, 1.0, 1.0, 6.0]
    "#);
}

#[test]
fn grouped_layout_call_order() {
    let record = sample_record();
    let plan = LayoutPlan {
        shape: [2, 2],
        chunk_shape: [2, 2],
        compression: Compression::None,
    };
    let mut store = RecordingStore::new();
    let parent = create_namespace_group(&mut store, 0).unwrap();

    write_grouped_record(&mut store, &parent, &DatasetWrite::new(&record, "x", &plan)).unwrap();

    insta::assert_snapshot!(store.log(), @r#"
    group /dataset_0
    group /dataset_0/x
    attr /dataset_0/x l_unit="km/h"
    attr /dataset_0/x a_flag="3"
    attr /dataset_0/x la=1
    dataset /dataset_0/x/values shape=[2, 2] chunks=[2, 2] none
    matrix /dataset_0/x/values [2.0, 0.0, 1.0, 1.0]
    "#);
}

#[test]
fn narrow_records_are_padded_in_grouped_layout() {
    let mut record = sample_record();
    record.matrix = Matrix::from_rows(vec![vec![4.0], vec![3.0]]).unwrap();
    let plan = LayoutPlan {
        shape: [2, 2],
        chunk_shape: [2, 2],
        compression: Compression::None,
    };
    let mut store = RecordingStore::new();
    let parent = create_namespace_group(&mut store, 1).unwrap();

    write_grouped_record(&mut store, &parent, &DatasetWrite::new(&record, "x", &plan)).unwrap();

    assert_eq!(
        store.matrix("/dataset_1/x/values"),
        Some(&[4.0, 0.0, 3.0, 0.0][..])
    );
}
