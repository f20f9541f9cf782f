//! PDF loader tests over generated documents

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId, Stream, dictionary};
use prc_domain::ports::providers::DocumentLoader;
use prc_providers::loader::PdfLoader;
use std::path::Path;
use tempfile::TempDir;

fn text_page(doc: &mut Document, pages_id: ObjectId, resources_id: ObjectId, lines: &[&str]) -> ObjectId {
    let mut operations = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        let y = 750 - 20 * i as i64;
        operations.extend([
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 12.into()]),
            Operation::new("Td", vec![50.into(), y.into()]),
            Operation::new("Tj", vec![Object::string_literal(*line)]),
            Operation::new("ET", vec![]),
        ]);
    }
    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
    doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    })
}

fn write_pdf(path: &Path, pages: &[&[&str]]) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let kids: Vec<Object> = pages
        .iter()
        .map(|lines| text_page(&mut doc, pages_id, resources_id, lines).into())
        .collect();
    let count = i64::try_from(kids.len()).unwrap();
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path).unwrap();
}

#[tokio::test]
async fn sections_carry_forward_across_pages() {
    let dir = TempDir::new().unwrap();
    write_pdf(
        &dir.path().join("guide.pdf"),
        &[
            &["Chapter 1: Getting Started", "Install the app first."],
            &["Then sign in with your account."],
            &["2.1 Advanced Settings", "Tune the sync interval."],
        ],
    );

    let loader = PdfLoader::new(dir.path());
    let pages = loader.load_all().await.unwrap();
    assert_eq!(pages.len(), 3);

    assert_eq!(pages[0].metadata.page, 1);
    assert_eq!(pages[0].metadata.section, "Chapter 1: Getting Started");
    assert_eq!(pages[0].metadata.source, "guide.pdf");

    // Page 2 has no heading; the last seen section carries forward.
    assert_eq!(pages[1].metadata.section, "Chapter 1: Getting Started");
    assert!(pages[1].content.contains("sign in"));

    assert_eq!(pages[2].metadata.section, "2.1 Advanced Settings");
}

#[tokio::test]
async fn first_page_without_heading_defaults_to_introduction() {
    let dir = TempDir::new().unwrap();
    write_pdf(
        &dir.path().join("notes.pdf"),
        &[&["Plain prose without any heading at all."]],
    );

    let loader = PdfLoader::new(dir.path());
    let pages = loader.load_all().await.unwrap();
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].metadata.section, "Introduction");
}

#[tokio::test]
async fn missing_directory_loads_nothing() {
    let dir = TempDir::new().unwrap();
    let loader = PdfLoader::new(dir.path().join("absent"));
    assert!(loader.load_all().await.unwrap().is_empty());
    assert!(loader.document_list().unwrap().is_empty());
}

#[tokio::test]
async fn corrupt_file_fails_load_file_but_not_load_all() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("broken.pdf"), b"not a pdf").unwrap();
    write_pdf(&dir.path().join("good.pdf"), &[&["Chapter 1: Ok", "Body."]]);

    let loader = PdfLoader::new(dir.path());
    assert!(loader.load_file(&dir.path().join("broken.pdf")).await.is_err());

    // The batch skips the corrupt file and still loads the good one.
    let pages = loader.load_all().await.unwrap();
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].metadata.source, "good.pdf");
}

#[tokio::test]
async fn document_list_is_sorted_with_sizes() {
    let dir = TempDir::new().unwrap();
    write_pdf(&dir.path().join("b.pdf"), &[&["Content b."]]);
    write_pdf(&dir.path().join("a.pdf"), &[&["Content a."]]);
    std::fs::write(dir.path().join("ignored.txt"), b"x").unwrap();

    let loader = PdfLoader::new(dir.path());
    let list = loader.document_list().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].filename, "a.pdf");
    assert_eq!(list[1].filename, "b.pdf");
    assert!(list[0].size_bytes > 0);
    assert!(list[0].size_mb >= 0.0);
}
