use std::fs;
use std::hint::black_box;

use brat2i2b2::{
    ConvertOptions, SourceDocument, UnicodeSegmenter, WhitespaceSegmenter, convert_directory,
    convert_document,
};
use criterion::{Criterion, criterion_group, criterion_main};

const NOTE: &str = "Patient John Hill was seen on 01/02/2020 at Mercy Hospital. \
He is a 72 y/o male with a history of hypertension.\n";

fn synthetic_document(id: &str, repeats: usize) -> SourceDocument {
    let note_chars = NOTE.chars().count();
    let mut annotations = String::new();
    for rep in 0..repeats {
        let base = rep * note_chars;
        annotations.push_str(&format!("T{}\tNAME {} {}\tJohn Hill\n", rep * 3 + 1, base + 8, base + 17));
        annotations.push_str(&format!("T{}\tDATE {} {}\t01/02/2020\n", rep * 3 + 2, base + 30, base + 40));
        annotations.push_str(&format!(
            "T{}\tHOSPITAL {} {}\tMercy Hospital\n",
            rep * 3 + 3,
            base + 44,
            base + 58
        ));
    }
    SourceDocument::new(id, NOTE.repeat(repeats), annotations)
}

fn document_bench(c: &mut Criterion) {
    let doc = synthetic_document("bench", 200);
    let options = ConvertOptions::default();

    c.bench_function("convert_document_unicode_200_notes", |b| {
        b.iter(|| {
            let rendered = convert_document(black_box(&doc), &UnicodeSegmenter, &options)
                .expect("bench conversion");
            black_box(rendered);
        });
    });

    c.bench_function("convert_document_whitespace_200_notes", |b| {
        b.iter(|| {
            let rendered = convert_document(black_box(&doc), &WhitespaceSegmenter, &options)
                .expect("bench conversion");
            black_box(rendered);
        });
    });
}

fn directory_bench(c: &mut Criterion) {
    let input = tempfile::tempdir().expect("bench input");
    for idx in 0..64 {
        let doc = synthetic_document(&format!("note{idx}"), 20);
        fs::write(input.path().join(format!("{}.txt", doc.doc_id)), &doc.text).expect("write txt");
        fs::write(input.path().join(format!("{}.ann", doc.doc_id)), &doc.annotations)
            .expect("write ann");
    }
    let output = tempfile::tempdir().expect("bench output");

    for parallel in [false, true] {
        let options = ConvertOptions {
            parallel,
            ..ConvertOptions::default()
        };
        let name = if parallel {
            "convert_directory_64_docs_parallel"
        } else {
            "convert_directory_64_docs_sequential"
        };
        c.bench_function(name, |b| {
            b.iter(|| {
                let report =
                    convert_directory(input.path(), output.path(), &UnicodeSegmenter, &options)
                        .expect("bench batch");
                black_box(report);
            });
        });
    }
}

criterion_group!(benches, document_bench, directory_bench);
criterion_main!(benches);
