//! End-to-end assembly tests against in-memory fixture templates

use lopdf::dictionary;
use report_fill::{Assembler, DocKind, FillError, FormData};

/// Create a minimal valid PDF template with the given number of A4 pages
fn create_template(page_count: usize) -> Vec<u8> {
    let mut doc = lopdf::Document::new();

    let pages_id = doc.add_object(lopdf::Object::Dictionary(lopdf::dictionary! {
        "Type" => "Pages",
        "Count" => page_count as i32,
        "Kids" => vec![], // Updated below
    }));

    let mut page_ids = Vec::new();
    for _ in 0..page_count {
        let contents_id = doc.add_object(lopdf::Object::Stream(lopdf::Stream::new(
            lopdf::dictionary! {},
            vec![],
        )));

        let page_id = doc.add_object(lopdf::Object::Dictionary(lopdf::dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.28.into(), 841.89.into()],
            "Resources" => lopdf::dictionary! {},
            "Contents" => contents_id,
        }));
        page_ids.push(page_id);
    }

    let mut pages_dict = doc.get_object(pages_id).unwrap().as_dict().unwrap().clone();
    pages_dict.set(
        "Kids",
        lopdf::Object::Array(page_ids.into_iter().map(|id| id.into()).collect()),
    );
    doc.objects.insert(pages_id, pages_dict.into());

    let catalog_id = doc.add_object(lopdf::Object::Dictionary(lopdf::dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    }));

    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

#[test]
fn test_assemble_empty_form() {
    let template = create_template(2);
    let assembler = Assembler::new();

    // No values means no placements, so no fonts are needed
    let completed = assembler
        .assemble(&template, DocKind::Report, &FormData::new())
        .expect("Empty assembly should succeed");

    assert_eq!(completed.page(), 1);

    let bytes = completed.into_bytes().expect("Serialization failed");
    assert!(!bytes.is_empty());
}

#[test]
fn test_assemble_statement_targets_page_two() {
    let template = create_template(2);
    let assembler = Assembler::new();

    let completed = assembler
        .assemble(&template, DocKind::Statement, &FormData::new())
        .expect("Empty assembly should succeed");

    assert_eq!(completed.page(), 2);
}

#[test]
fn test_statement_needs_two_pages() {
    let template = create_template(1);
    let assembler = Assembler::new();

    let result = assembler.assemble(&template, DocKind::Statement, &FormData::new());
    match result {
        Err(FillError::PageMissing {
            kind,
            required,
            have,
        }) => {
            assert_eq!(kind, DocKind::Statement);
            assert_eq!(required, 2);
            assert_eq!(have, 1);
        }
        _ => panic!("Expected PageMissing error"),
    }
}

#[test]
fn test_report_fits_single_page_template() {
    let template = create_template(1);
    let assembler = Assembler::new();

    assembler
        .assemble(&template, DocKind::Report, &FormData::new())
        .expect("Report only needs page 1");
}

#[test]
fn test_bad_template_bytes() {
    let assembler = Assembler::new();

    let result = assembler.assemble(b"not a pdf", DocKind::Report, &FormData::new());
    assert!(matches!(result, Err(FillError::Template(_))));
}

#[test]
fn test_assembled_output_reopens() {
    let template = create_template(2);
    let assembler = Assembler::new();

    let bytes = assembler
        .assemble(&template, DocKind::Report, &FormData::new())
        .and_then(|completed| completed.into_bytes())
        .expect("Assembly failed");

    // The output must still be a well-formed two page document
    let reopened = lopdf::Document::load_mem(&bytes).expect("Output did not reopen");
    assert_eq!(reopened.get_pages().len(), 2);
}

#[test]
fn test_placement_without_fonts_is_rejected() {
    let template = create_template(2);
    let assembler = Assembler::new();

    let mut form = FormData::new();
    form.set("location", "서울외곽순환선");

    let result = assembler.assemble(&template, DocKind::Report, &form);
    match result {
        Err(FillError::Render(pdf_fill::PdfError::FontNotLoaded)) => {}
        _ => panic!("Expected FontNotLoaded render error"),
    }
}
