//! Conversion pipeline: normalize, name, plan and write every record.
//!
//! Namespaces and records are processed strictly in input order. Each
//! namespace owns a fresh [`NameRegistry`], so generated names are unique
//! within a namespace only.

use std::time::Instant;

use tlm_model::{ConversionOptions, LayoutMode, Namespace, RawRecord};
use tlm_store::{
    DatasetWrite, ROOT_PATH, Store, create_namespace_group, write_flat_record,
    write_grouped_record,
};
use tlm_transform::{NameRegistry, plan_for, resolve, transform};
use tracing::{debug, info, info_span};

use crate::types::{ConversionSummary, NamespaceSummary};

/// Converts every namespace into `store`.
///
/// The first store error aborts the run; whatever was already written stays
/// in the store.
pub fn convert<S: Store>(
    namespaces: Vec<Namespace>,
    store: &mut S,
    options: &ConversionOptions,
) -> tlm_store::Result<ConversionSummary> {
    let start = Instant::now();
    let mut summary = ConversionSummary::default();
    for (index, namespace) in namespaces.into_iter().enumerate() {
        let span = info_span!("namespace", index);
        let namespace_summary =
            span.in_scope(|| convert_namespace(index, namespace, store, options))?;
        summary.namespaces.push(namespace_summary);
    }
    info!(
        namespaces = summary.namespaces.len(),
        records = summary.total_records(),
        written = summary.total_written(),
        warnings = summary.total_warnings(),
        duration_ms = start.elapsed().as_millis(),
        "conversion complete"
    );
    Ok(summary)
}

fn convert_namespace<S: Store>(
    index: usize,
    namespace: Namespace,
    store: &mut S,
    options: &ConversionOptions,
) -> tlm_store::Result<NamespaceSummary> {
    let start = Instant::now();
    let mut summary = NamespaceSummary {
        index,
        records: namespace.len(),
        ..NamespaceSummary::default()
    };
    let parent = match options.layout {
        LayoutMode::Flat => ROOT_PATH.to_string(),
        LayoutMode::Grouped => create_namespace_group(store, index)?,
    };
    let mut registry = NameRegistry::new();

    for raw in namespace.records {
        convert_record(raw, &parent, &mut registry, store, options, &mut summary)?;
    }

    info!(
        records = summary.records,
        written = summary.written,
        skipped_empty = summary.skipped_empty,
        renamed = summary.renamed,
        duration_ms = start.elapsed().as_millis(),
        "namespace complete"
    );
    Ok(summary)
}

fn convert_record<S: Store>(
    raw: RawRecord,
    parent: &str,
    registry: &mut NameRegistry,
    store: &mut S,
    options: &ConversionOptions,
    summary: &mut NamespaceSummary,
) -> tlm_store::Result<()> {
    let record = transform(raw);
    summary.warnings += record.warnings.len();
    if record.is_empty() {
        debug!(category = %record.category, "skipping record with empty matrix");
        summary.skipped_empty += 1;
        return Ok(());
    }

    let resolved = resolve(&record.category, registry);
    let plan = plan_for(record.matrix.rows(), record.matrix.cols(), options);
    let mut write = DatasetWrite::new(&record, &resolved.name, &plan);
    if resolved.renamed {
        write = write.with_original_name(&record.category);
        summary.renamed += 1;
    }
    match options.layout {
        LayoutMode::Flat => write_flat_record(store, &write)?,
        LayoutMode::Grouped => write_grouped_record(store, parent, &write)?,
    }
    summary.written += 1;
    Ok(())
}
