use crate::document::extract::{extract_text, DocumentError, DocumentFormat};

#[test]
fn test_format_from_filename() {
    assert_eq!(DocumentFormat::from_filename("notes.pdf"), Ok(DocumentFormat::Pdf));
    assert_eq!(DocumentFormat::from_filename("NOTES.PDF"), Ok(DocumentFormat::Pdf));
    assert_eq!(DocumentFormat::from_filename("chapter.1.txt"), Ok(DocumentFormat::Text));
    assert!(matches!(
        DocumentFormat::from_filename("slides.docx"),
        Err(DocumentError::UnsupportedFormat(_))
    ));
    assert!(matches!(
        DocumentFormat::from_filename("README"),
        Err(DocumentError::UnsupportedFormat(_))
    ));
}

#[actix_web::test]
async fn test_empty_payload_is_empty_document_for_any_suffix() {
    for filename in ["a.pdf", "b.txt", "c.docx", "no-extension"] {
        assert!(
            matches!(
                extract_text(filename, Vec::new()).await,
                Err(DocumentError::EmptyDocument(_))
            ),
            "{}",
            filename
        );
    }
}

#[actix_web::test]
async fn test_plain_text_is_returned_verbatim() {
    let text = extract_text("notes.txt", "Cells are the unit of life.\n".as_bytes().to_vec())
        .await
        .unwrap();
    assert_eq!(text, "Cells are the unit of life.\n");
}

#[actix_web::test]
async fn test_plain_text_blank_or_invalid_utf8() {
    assert!(matches!(
        extract_text("blank.txt", b"  \n\t ".to_vec()).await,
        Err(DocumentError::EmptyDocument(_))
    ));
    assert_eq!(
        extract_text("latin1.txt", vec![0x66, 0x6f, 0xff, 0xfe]).await,
        Err(DocumentError::InvalidEncoding)
    );
}

#[actix_web::test]
async fn test_unsupported_suffix_with_content() {
    assert!(matches!(
        extract_text("slides.pptx", b"binary".to_vec()).await,
        Err(DocumentError::UnsupportedFormat(_))
    ));
}

#[actix_web::test]
async fn test_garbage_pdf_is_unreadable() {
    let result = extract_text("broken.pdf", b"this is not a pdf at all".to_vec()).await;
    assert!(matches!(result, Err(DocumentError::UnreadableDocument(_))));
}

/// Builds a minimal PDF with one Helvetica text line per page.
fn text_pdf(pages: &[&str]) -> Vec<u8> {
    let page_count = pages.len();
    let font_id = 3 + page_count;
    let first_content_id = font_id + 1;

    let mut objects: Vec<String> = Vec::new();
    objects.push("<< /Type /Catalog /Pages 2 0 R >>".to_string());
    let kids: Vec<String> = (0..page_count).map(|i| format!("{} 0 R", 3 + i)).collect();
    objects.push(format!(
        "<< /Type /Pages /Kids [{}] /Count {} >>",
        kids.join(" "),
        page_count
    ));
    for i in 0..page_count {
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 {} 0 R >> >> /Contents {} 0 R >>",
            font_id,
            first_content_id + i
        ));
    }
    objects.push("<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string());
    for text in pages {
        let content = format!("BT /F1 18 Tf 72 720 Td ({}) Tj ET", text);
        objects.push(format!(
            "<< /Length {} >>\nstream\n{}\nendstream",
            content.len(),
            content
        ));
    }

    let mut pdf = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::new();
    for (index, object) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", index + 1, object).as_bytes());
    }

    let xref_offset = pdf.len();
    pdf.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    pdf.extend_from_slice(b"0000000000 65535 f \n");
    for offset in offsets {
        pdf.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
    }
    pdf.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_offset
        )
        .as_bytes(),
    );
    pdf
}

#[actix_web::test]
async fn test_pdf_text_from_every_page_in_order() {
    let pdf = text_pdf(&["Mitochondria page one", "Chloroplast page two"]);

    let text = extract_text("Biology.PDF", pdf).await.unwrap();

    let first = text.find("Mitochondria page one").expect("first page text missing");
    let second = text.find("Chloroplast page two").expect("second page text missing");
    assert!(first < second);
}
