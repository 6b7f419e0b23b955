use std::fs;
use std::path::Path;

use brat2i2b2::{ConvertOptions, CursorPolicy, UnicodeSegmenter, convert_directory};
use tempfile::tempdir;

fn write_pair(dir: &Path, id: &str, text: &str, ann: &str) {
    fs::write(dir.join(format!("{id}.txt")), text).expect("write txt");
    fs::write(dir.join(format!("{id}.ann")), ann).expect("write ann");
}

fn corpus(dir: &Path) {
    write_pair(
        dir,
        "note1",
        "Patient seen 01/02/2020 today.",
        "T1\tDATE 13 23\t01/02/2020\n",
    );
    write_pair(
        dir,
        "note2",
        "John Hill was admitted to Mercy Hospital. He left on 03/04/2021.\n",
        "T1\tNAME 0 9\tJohn Hill\nT2\tHOSPITAL 26 40\tMercy Hospital\nT3\tDATE 53 63\t03/04/2021\n",
    );
    write_pair(dir, "note3", "Nothing annotated here.", "");
    fs::write(dir.join("annotation.conf"), "[entities]\nDATE\nNAME\n").expect("write conf");
}

fn read(path: impl AsRef<Path>) -> Vec<u8> {
    fs::read(path).expect("read output")
}

#[test]
fn concrete_scenario_end_to_end() {
    let input = tempdir().expect("input");
    let output = tempdir().expect("output");
    corpus(input.path());

    let report = convert_directory(
        input.path(),
        output.path(),
        &UnicodeSegmenter,
        &ConvertOptions::default(),
    )
    .expect("batch runs");
    assert_eq!(report.converted, vec!["note1", "note2"]);
    assert_eq!(report.skipped_empty, vec!["note3"]);
    assert!(report.is_clean());

    assert_eq!(
        read(output.path().join("con/note1.con")),
        b"c=\"01/02/2020\" 1:2 1:2||t=\"DATE\"\n"
    );
    assert_eq!(
        read(output.path().join("txt/note1.txt")),
        b"Patient seen 01/02/2020 today .\n"
    );
    assert_eq!(
        String::from_utf8(read(output.path().join("con/note2.con"))).expect("utf-8"),
        "c=\"John Hill\" 1:0 1:1||t=\"NAME\"\n\
         c=\"Mercy Hospital\" 1:5 1:6||t=\"HOSPITAL\"\n\
         c=\"03/04/2021\" 2:3 2:3||t=\"DATE\"\n"
    );
}

#[test]
fn repeated_runs_are_byte_identical() {
    let input = tempdir().expect("input");
    corpus(input.path());
    let first = tempdir().expect("first");
    let second = tempdir().expect("second");
    let options = ConvertOptions {
        parallel: true,
        ..ConvertOptions::default()
    };

    convert_directory(input.path(), first.path(), &UnicodeSegmenter, &options).expect("first run");
    convert_directory(input.path(), second.path(), &UnicodeSegmenter, &options).expect("second run");
    // Rerunning over an existing output replaces files in place.
    convert_directory(input.path(), first.path(), &UnicodeSegmenter, &options).expect("rerun");

    for name in ["con/note1.con", "txt/note1.txt", "con/note2.con", "txt/note2.txt"] {
        assert_eq!(
            read(first.path().join(name)),
            read(second.path().join(name)),
            "{name} differs between runs"
        );
    }
}

#[test]
fn empty_annotation_file_produces_no_outputs() {
    let input = tempdir().expect("input");
    let output = tempdir().expect("output");
    corpus(input.path());

    convert_directory(
        input.path(),
        output.path(),
        &UnicodeSegmenter,
        &ConvertOptions::default(),
    )
    .expect("batch runs");
    assert!(!output.path().join("con/note3.con").exists());
    assert!(!output.path().join("txt/note3.txt").exists());
}

#[test]
fn legacy_cursor_reproduces_missed_adjacent_span() {
    let input = tempdir().expect("input");
    write_pair(
        input.path(),
        "adjacent",
        "John Smith Mercy",
        "T1\tNAME 0 4\tJohn\nT2\tNAME 5 10\tSmith\n",
    );

    let retry_out = tempdir().expect("retry");
    convert_directory(
        input.path(),
        retry_out.path(),
        &UnicodeSegmenter,
        &ConvertOptions::default(),
    )
    .expect("retry run");
    assert_eq!(
        read(retry_out.path().join("con/adjacent.con")),
        b"c=\"John\" 1:0 1:0||t=\"NAME\"\nc=\"Smith\" 1:1 1:1||t=\"NAME\"\n"
    );

    let legacy_out = tempdir().expect("legacy");
    let legacy = ConvertOptions {
        cursor: CursorPolicy::Legacy,
        ..ConvertOptions::default()
    };
    convert_directory(input.path(), legacy_out.path(), &UnicodeSegmenter, &legacy)
        .expect("legacy run");
    assert_eq!(
        read(legacy_out.path().join("con/adjacent.con")),
        b"c=\"John\" 1:0 1:0||t=\"NAME\"\n"
    );
}

#[test]
fn rerun_removes_output_of_skipped_and_failed_documents() {
    let input = tempdir().expect("input");
    let output = tempdir().expect("output");
    corpus(input.path());
    let options = ConvertOptions::default();

    convert_directory(input.path(), output.path(), &UnicodeSegmenter, &options).expect("first run");
    assert!(output.path().join("con/note1.con").exists());
    assert!(output.path().join("con/note2.con").exists());

    fs::write(input.path().join("note1.ann"), "").expect("empty ann");
    fs::write(input.path().join("note2.ann"), "T1\tDATE five 10\ttoday\n").expect("corrupt ann");
    let report =
        convert_directory(input.path(), output.path(), &UnicodeSegmenter, &options).expect("rerun");

    assert_eq!(report.skipped_empty, vec!["note1", "note3"]);
    let failed: Vec<&str> = report.failures.iter().map(|f| f.doc_id.as_str()).collect();
    assert_eq!(failed, vec!["note2"]);
    for name in ["con/note1.con", "txt/note1.txt", "con/note2.con", "txt/note2.txt"] {
        assert!(!output.path().join(name).exists(), "{name} survived the rerun");
    }
}
