mod common;

use scorefeed::config::{Config, LineEnding, MissingKeyPolicy};
use scorefeed::model::Scalar;
use scorefeed::output::{CsvSink, JsonSink};
use scorefeed::{ExportError, ExportStats, Exporter};

fn export_csv(
    exporter: &Exporter,
    feed: &str,
    line_ending: LineEnding,
) -> (scorefeed::Result<ExportStats>, String) {
    let mut out = Vec::new();
    let buf = &mut out;
    let result = exporter.export(feed, move || Ok(CsvSink::new(buf, line_ending)));
    (result, String::from_utf8(out).unwrap())
}

#[test]
fn exports_one_joined_row() {
    let exporter = Exporter::with_preset().unwrap();
    let (result, out) = export_csv(&exporter, &common::feed(7), LineEnding::Lf);

    assert_eq!(result.unwrap().records_written, 1);
    assert_eq!(out, format!("{}\n{}\n", common::HEADER, common::ROW));
}

#[test]
fn crlf_output() {
    let exporter = Exporter::with_preset().unwrap();
    let (result, out) = export_csv(&exporter, &common::feed(7), LineEnding::CrLf);

    result.unwrap();
    assert_eq!(out, format!("{}\r\n{}\r\n", common::HEADER, common::ROW));
}

#[test]
fn unknown_country_aborts_without_output() {
    let exporter = Exporter::with_preset().unwrap();
    let (result, out) = export_csv(&exporter, &common::feed(8), LineEnding::Lf);

    match result {
        Err(ExportError::Join { row, source }) => {
            assert_eq!(row, 0);
            assert!(matches!(*source, ExportError::KeyNotFound { key: 8 }));
        }
        other => panic!("expected join error, got {:?}", other),
    }
    assert!(out.is_empty());
}

#[test]
fn unknown_country_skipped_when_configured() {
    let config = Config::default().with_missing_key(MissingKeyPolicy::Skip);
    let exporter = Exporter::with_preset().unwrap().configured(&config);
    let (result, out) = export_csv(&exporter, &common::feed(8), LineEnding::Lf);

    let stats = result.unwrap();
    assert_eq!(stats.records_written, 0);
    assert_eq!(stats.records_skipped, 1);
    assert_eq!(out, format!("{}\n", common::HEADER));
}

#[test]
fn joined_record_carries_all_named_columns() {
    let exporter = Exporter::with_preset().unwrap();
    let store = exporter.parse(&common::feed(7)).unwrap();
    let record = exporter
        .plan()
        .join(&store, MissingKeyPolicy::Abort)
        .next()
        .unwrap()
        .unwrap();

    assert_eq!(record.len(), exporter.plan().output_columns().count());
    assert_eq!(record.get("sclassid"), Some(&Scalar::from("SC")));
    assert_eq!(record.get("Color?"), Some(&Scalar::from("")));
    assert_eq!(record.get("Link?"), Some(&Scalar::from("")));
    assert_eq!(record.get("Month"), Some(&Scalar::Int(4)));
    assert_eq!(record.get("Leauge_Country"), Some(&Scalar::from("Testland")));
}

#[test]
fn json_output() {
    let exporter = Exporter::with_preset().unwrap();
    let mut out = Vec::new();
    let buf = &mut out;
    exporter
        .export(&common::feed(7), move || Ok(JsonSink::compact(buf)))
        .unwrap();

    let out = String::from_utf8(out).unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    let first = &value[0];
    assert_eq!(first["League_Short"], "Short");
    assert_eq!(first["Leauge_Country"], "Testland");
    assert_eq!(first["Month"], 5);
    assert_eq!(first["Home"], "Alpha");
}

#[test]
fn dangling_league_row_skipped_when_configured() {
    // row 0 names league 5, which the feed never assigns
    let feed = [
        "var A=Array(2);",
        "var B=Array(1);",
        "C[0]=[7,'Testland'];",
        "B[0]=['SC','Short','Long','','','',,];",
        common::match_row(0, 5, 7).as_str(),
        common::match_row(1, 0, 7).as_str(),
    ]
    .join("\r\n");

    let exporter = Exporter::with_preset().unwrap();
    let (result, out) = export_csv(&exporter, &feed, LineEnding::Lf);
    match result {
        Err(ExportError::Join { row, source }) => {
            assert_eq!(row, 0);
            assert!(matches!(*source, ExportError::MissingField { .. }));
        }
        other => panic!("expected join error, got {:?}", other),
    }
    assert!(out.is_empty());

    let config = Config::default().with_missing_key(MissingKeyPolicy::Skip);
    let exporter = Exporter::with_preset().unwrap().configured(&config);
    let (result, out) = export_csv(&exporter, &feed, LineEnding::Lf);

    let stats = result.unwrap();
    assert_eq!(stats.records_written, 1);
    assert_eq!(stats.records_skipped, 1);
    assert_eq!(out, format!("{}\n{}\n", common::HEADER, common::ROW));
}
