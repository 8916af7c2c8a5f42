use std::fs;
use tempfile::TempDir;
use outputdiff::export::{ComparisonExport, ReportExporter};
use outputdiff::{
    ComparisonSession, DiffCache, DiffFormat, DocumentLoader, IngestConfig, LineChange,
};

fn write_outputs(dir: &TempDir) {
    fs::write(dir.path().join("1-base.md"), "# Answer\nThe sky is blue.\nDone.").unwrap();
    fs::write(dir.path().join("2-same.md"), "# Answer\nThe sky is blue.\nDone.").unwrap();
    fs::write(dir.path().join("3-reworded.md"), "# Answer\nThe sky is very blue.\nDone.").unwrap();
    fs::write(dir.path().join("4-longer.md"), "# Answer\nThe sky is blue.\nDone.\nExtra.").unwrap();
}

#[test]
fn test_compare_directory_of_outputs() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    write_outputs(&temp_dir);

    let outcome = DocumentLoader::default()
        .load_paths(&[temp_dir.path()])
        .expect("Failed to load documents");
    assert_eq!(outcome.documents.len(), 4);

    let mut session = ComparisonSession::new();
    session.add_documents(outcome.documents);
    assert_eq!(session.base().map(|d| d.name()), Some("1-base.md"));

    let reports = session.compute_diffs(&mut DiffCache::new(16));
    assert_eq!(reports.len(), 3);
    assert_eq!(reports[&1].change_count, 0);
    assert_eq!(reports[&2].change_count, 1);
    assert_eq!(reports[&3].change_count, 1);

    match &reports[&2].entries[1].change {
        LineChange::Modified { word_diff, .. } => {
            let added: Vec<&str> = word_diff
                .iter()
                .filter(|w| !w.in_old())
                .map(|w| w.word())
                .collect();
            assert_eq!(added, vec!["very"]);
        }
        other => panic!("Expected modified line, got {:?}", other),
    }
}

#[test]
fn test_switching_base_and_removing_documents() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    write_outputs(&temp_dir);

    let outcome = DocumentLoader::new(IngestConfig::default())
        .load_paths(&[temp_dir.path()])
        .unwrap();
    let mut session = ComparisonSession::new();
    session.add_documents(outcome.documents);
    let mut cache = DiffCache::new(16);

    session.set_base(3).unwrap();
    let reports = session.compute_diffs(&mut cache);
    assert_eq!(reports.keys().copied().collect::<Vec<_>>(), vec![0, 1, 2]);
    assert!(matches!(reports[&0].entries[3].change, LineChange::Removed { .. }));

    session.remove(0).unwrap();
    assert_eq!(session.base_index(), Some(2));
    assert_eq!(session.base().map(|d| d.name()), Some("4-longer.md"));

    let reports = session.compute_diffs(&mut cache);
    assert_eq!(reports.len(), 2);
    // 1-base.md and 2-same.md share content, so the first pass computes two
    // pairs; after the removal both remaining pairs come from the cache.
    assert_eq!(cache.misses(), 2);
    assert_eq!(cache.hits(), 3);
}

#[test]
fn test_json_export_of_comparison() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    write_outputs(&temp_dir);

    let outcome = DocumentLoader::default().load_paths(&[temp_dir.path()]).unwrap();
    let mut session = ComparisonSession::new();
    session.add_documents(outcome.documents);
    let reports = session.compute_diffs(&mut DiffCache::default());

    let export = ComparisonExport::from_session(&session, &reports).unwrap();
    let output_path = temp_dir.path().join("out").with_extension("json");
    ReportExporter::with_format(DiffFormat::Json)
        .export_to_file(&export, &output_path)
        .unwrap();

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&output_path).unwrap()).unwrap();
    assert_eq!(value["base"], "1-base.md");
    assert_eq!(value["comparisons"][1]["report"]["changeCount"], 1);
    assert_eq!(value["comparisons"][1]["report"]["diff"][1]["type"], "modified");
    assert_eq!(value["comparisons"][2]["report"]["diff"][3]["type"], "added");
}
