//! PDF text extraction. Thin wrapper over pdf-extract that joins per-page
//! text into one document string for the section matcher.

use std::path::Path;

use crate::errors::AppError;

/// Extracts the full text of a PDF, page by page, joined with newlines.
/// Blocking; call under `spawn_blocking` from async contexts.
pub fn extract_document_text(path: &Path) -> Result<String, AppError> {
    let pages = pdf_extract::extract_text_by_pages(path).map_err(|e| AppError::Pdf(e.to_string()))?;
    Ok(pages.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    /// Builds a minimal one-page PDF containing `text`, using lopdf directly.
    fn make_test_pdf(text: &str) -> Vec<u8> {
        use lopdf::dictionary;
        use lopdf::{Document, Object, Stream};

        let mut doc = Document::with_version("1.4");

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });

        let content = format!("BT /F1 12 Tf 100 700 Td ({text}) Tj ET");
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));

        let resources = dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        };

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Contents" => content_id,
            "Resources" => resources,
        });

        let pages_id = doc.add_object(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        });

        if let Ok(Object::Dictionary(ref mut dict)) = doc.get_object_mut(page_id) {
            dict.set("Parent", pages_id);
        }

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();
        buf
    }

    fn write_temp_pdf(bytes: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        file.write_all(bytes).unwrap();
        file
    }

    #[test]
    fn test_extracts_text_from_digital_pdf() {
        let file = write_temp_pdf(&make_test_pdf("Device Description"));
        let text = extract_document_text(file.path()).unwrap();
        assert!(
            text.contains("Device") || text.contains("Description"),
            "extracted: {text}"
        );
    }

    #[test]
    fn test_invalid_pdf_is_an_extraction_error() {
        let file = write_temp_pdf(b"not a pdf at all");
        let result = extract_document_text(file.path());
        assert!(matches!(result, Err(AppError::Pdf(_))));
    }
}
