//! Reading route files from disk and rendering them

use cuesheet::cue::records::{read_route_file, InputFormat, RecordError};
use cuesheet::cue::transforms::standard::{SOURCE_TO_LATEX, SOURCE_TO_TEXT};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write route file");
    path
}

const CSV_EXPORT: &str = "\
type,notes,distance,elevation,description
Start,Start of route,0.0,100,
Right,Turn right onto Foo St.,1.0,110,
Food,Cafe,1.5,120,Best pie in town
Generic,[end] Back at the car,1.9,105,
End,End of route,2.0,100,
";

#[test]
fn test_csv_file_to_text() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "6260667.csv", CSV_EXPORT);

    let source = read_route_file(&path, None).unwrap();
    assert_eq!(source.metadata.id, "6260667");
    assert_eq!(source.records.len(), 5);

    let text = SOURCE_TO_TEXT.run(source).unwrap();
    insta::assert_snapshot!(text, @r"
    [START |  0.00 |  1.00 | Start of route |  | None]
    [R |  1.00 |  0.50 | Foo St. |  | Gray]
    [PIT |  1.50 |  0.50 | Cafe | Best pie in town | Yellow]
    [END |  2.00 |       | Back at the car |  | None]
    ");
}

#[test]
fn test_csv_file_to_latex() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "6260667.csv", CSV_EXPORT);

    let latex = SOURCE_TO_LATEX.run(read_route_file(&path, None).unwrap()).unwrap();
    assert!(latex.contains(r"\rhead{\small \emph{Route \#6260667} \emph{(2.0 mi)}}"));
    assert!(latex.contains(
        r"\rowcolor{yellow} \textbf{PIT} &   1.5 & Cafe \newline \textbf{Note:} Best pie in town &   0.5 \\ \hline"
    ));
}

#[test]
fn test_json_file() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "ride.json",
        r#"{
            "id": 99,
            "name": "Harbor Loop",
            "elevation_gain_ft": 450.5,
            "records": [
                {"type": "Start", "note": "Start of route", "absolute_distance": 0},
                {"type": "Left", "note": "Turn left onto Dock St.", "absolute_distance": "3.2"},
                {"type": "End", "note": "End of route", "absolute_distance": 6.4}
            ]
        }"#,
    );

    let latex = SOURCE_TO_LATEX.run(read_route_file(&path, None).unwrap()).unwrap();
    assert!(latex.contains(r"\lhead{\small \emph{Harbor Loop (6.4 mi / 450 ft)}}"));
    assert!(latex.contains(r"\rhead{\small \emph{Route \#99}}"));
    assert!(latex.contains(r" \textbf{L} &   3.2 & Dock St. &   3.2 \\ \hline"));
}

#[test]
fn test_yaml_file_with_explicit_format() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "ride.txt",
        "\
- type: Start
  note: Start of route
  absolute_distance: 0.0
- type: End
  note: End of route
  absolute_distance: 1.0
",
    );

    assert!(matches!(
        read_route_file(&path, None),
        Err(RecordError::UnknownFormat(ext)) if ext == "txt"
    ));
    let source = read_route_file(&path, Some(InputFormat::Yaml)).unwrap();
    assert_eq!(source.metadata.id, "ride");
    assert_eq!(source.records.len(), 2);
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.json");
    assert!(matches!(
        read_route_file(&path, None),
        Err(RecordError::Io(_))
    ));
}

#[test]
fn test_malformed_json() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "broken.json", "{\"records\": [");
    let err = read_route_file(&path, None).unwrap_err();
    assert!(err.to_string().starts_with("Invalid JSON route data"));
}
