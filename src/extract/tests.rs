use super::*;

#[test]
fn invalid_bytes_are_an_extraction_error() {
    let result = extract_text_from_bytes(b"this is not a pdf");
    assert!(matches!(result, Err(PdfChatError::Extraction(_))));
}

#[test]
fn missing_file_is_an_extraction_error() {
    let result = extract_text(Path::new("/nonexistent/document.pdf"));
    assert!(matches!(result, Err(PdfChatError::Extraction(_))));
}

#[test]
fn a_failing_document_aborts_the_batch() {
    let paths = vec![PathBuf::from("/nonexistent/document.pdf")];
    let result = extract_documents(&paths);
    assert!(matches!(result, Err(PdfChatError::Extraction(_))));
}

#[test]
fn empty_batch_yields_empty_text() {
    let text = extract_documents(&[]).expect("empty batch should succeed");
    assert!(text.is_empty());
}
