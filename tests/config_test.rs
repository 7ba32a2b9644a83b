//! Integration tests for configuration resolution.

use std::fs;

use thesis_text::config::{ConfigSource, Row, RowSelector, SectionConfig, SectionConfigs};
use thesis_text::convert::{MemorySink, PipelineOptions, SegmentationPipeline};
use thesis_text::error::Error;
use thesis_text::source::MemorySource;

const ROWS_CSV: &str = "\
Student,AbstractPresent,AbstractFP,AbstractLP,TOCPresent,TOCFP,TOCLP,Ch1Present,Ch1FP,Ch1LP,Ch2Present,Ch2FP,Ch2LP
Ada,TRUE,3,3,TRUE,5,6,TRUE,10,20,FALSE,,
Grace,TRUE,2,2,FALSE,,,TRUE,8,15,TRUE,abc,5
";

#[test]
fn test_yaml_source_resolves() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("thesis_config.yaml");
    fs::write(&path, "abstract:\n  start_page: 3\n  roman: true\nchapter_1: {}\n").unwrap();

    let configs = ConfigSource::Yaml(path).resolve().unwrap();
    assert_eq!(configs.len(), 2);
    assert_eq!(configs.numbering("abstract").page_string(0), "iii");
    assert_eq!(configs.numbering("chapter_1").page_string(0), "1");
}

#[test]
fn test_csv_row_source_resolves() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("theses.csv");
    fs::write(&path, ROWS_CSV).unwrap();

    let source = ConfigSource::Rows {
        path,
        selector: RowSelector::Index(0),
    };
    let configs = source.resolve().unwrap();

    let ids: Vec<_> = configs.ids().collect();
    assert_eq!(ids, vec!["abstract", "toc", "chapter_1"]);
    assert_eq!(
        configs.get("chapter_1"),
        Some(&SectionConfig {
            start_page: 10,
            end_page: Some(20),
            roman: false,
        })
    );
    assert!(configs.get("toc").unwrap().roman);
}

#[test]
fn test_csv_row_with_bad_bounds_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("theses.csv");
    fs::write(&path, ROWS_CSV).unwrap();

    let source = ConfigSource::Rows {
        path,
        selector: RowSelector::parse_match("Student=Grace").unwrap(),
    };
    let err = source.resolve().unwrap_err();
    assert!(matches!(err, Error::InvalidPageBounds { .. }));
    assert!(err.to_string().contains("Chapter 2"));
}

#[test]
fn test_json_row_source_resolves() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("row.json");
    fs::write(
        &path,
        r#"{"AcknowledgmentsPresent": true, "AcknowledgmentsFP": 4, "AcknowledgmentsLP": 4}"#,
    )
    .unwrap();

    let configs = ConfigSource::Rows {
        path,
        selector: RowSelector::default(),
    }
    .resolve()
    .unwrap();
    assert_eq!(configs.numbering("acknowledgments").page_string(0), "iv");
}

#[test]
fn test_generated_yaml_round_trips() {
    let row = Row::new()
        .with("Ch1Present", "true")
        .with("Ch1FP", "10")
        .with("Ch1LP", "20")
        .with("AbstractPresent", "true")
        .with("AbstractFP", "2")
        .with("AbstractLP", "3");
    let configs = SectionConfigs::from_row(&row).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("generated.yaml");
    configs.write_yaml(&path).unwrap();

    let reloaded = SectionConfigs::from_yaml_file(&path).unwrap();
    assert_eq!(reloaded, configs);
    assert_eq!(reloaded.ids().collect::<Vec<_>>(), vec!["abstract", "chapter_1"]);
}

#[test]
fn test_pipeline_from_row_configuration() {
    let row = Row::new()
        .with("TOCPresent", "yes")
        .with("TOCFP", "5")
        .with("TOCLP", "5")
        .with("Ch1Present", "yes")
        .with("Ch1FP", "9")
        .with("Ch1LP", "10");

    let source = ConfigSource::Inline(SectionConfigs::from_row(&row).unwrap());
    let pipeline =
        SegmentationPipeline::from_config_source(&source, PipelineOptions::default()).unwrap();

    let pages = MemorySource::new()
        .with_section("toc", ["Results ..... 9"])
        .with_section("chapter_1", ["First.", "Second."]);
    let mut sink = MemorySink::new();
    let sections: Vec<String> = pipeline.configs().ids().map(String::from).collect();

    let report = pipeline.run(&sections, &pages, &mut sink);

    assert!(report.is_success());
    assert!(sink.get("toc").unwrap().contains("| Results | 9 |"));
    let chapter = sink.get("chapter_1").unwrap();
    assert!(chapter.contains("[Page 9]\nFirst."));
    assert!(chapter.contains("[Page 10]\nSecond."));
}

#[test]
fn test_missing_config_file() {
    let source = ConfigSource::Yaml("does/not/exist.yaml".into());
    assert!(matches!(source.resolve(), Err(Error::Io(_))));
}
