//! CV text extraction from uploaded PDF files.
//!
//! Pulls the text layer of every page in document order. Scanned-image PDFs
//! are out of scope — there is no OCR, so a page without a text layer simply
//! contributes nothing.

use axum::extract::Multipart;
use axum::Json;
use serde::Serialize;

use crate::errors::AppError;

/// Maximum accepted upload size (10 MB).
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Extracts the concatenated text of all pages from a PDF byte stream.
///
/// Fails with `Validation` when the input exceeds the size cap and with
/// `Extraction` when the bytes are not a parseable PDF or the whole document
/// yields no extractable text.
pub fn extract_cv_text(bytes: &[u8]) -> Result<String, AppError> {
    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(AppError::Validation(format!(
            "file size ({:.1} MB) exceeds the maximum allowed size (10 MB)",
            bytes.len() as f64 / (1024.0 * 1024.0)
        )));
    }

    let text = pdf_extract::extract_text_from_mem(bytes).map_err(|e| {
        AppError::Extraction(format!(
            "could not extract text from the PDF ({e}); try a different file or paste the text directly"
        ))
    })?;

    if text.trim().is_empty() {
        return Err(AppError::Extraction(
            "the PDF has no extractable text layer; try a different file or paste the text directly"
                .to_string(),
        ));
    }

    Ok(text)
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub text: String,
}

/// POST /api/v1/cv/extract
///
/// Accepts a multipart upload with a `file` field containing a PDF and
/// returns the extracted text.
pub async fn handle_extract(mut multipart: Multipart) -> Result<Json<ExtractResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("failed to read upload: {e}")))?;
            let text = extract_cv_text(&data)?;
            return Ok(Json(ExtractResponse { text }));
        }
    }

    Err(AppError::Validation(
        "missing `file` field in upload".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a minimal uncompressed PDF. `None` entries become pages with no
    /// content stream, i.e. no text layer.
    fn build_pdf(pages: &[Option<&str>]) -> Vec<u8> {
        let mut bodies: Vec<String> = vec![
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            String::new(), // pages dict, filled in once kid ids are known
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
        ];

        let mut page_ids = Vec::new();
        for text in pages {
            let page_id = bodies.len() + 1;
            page_ids.push(page_id);
            let contents_ref = match text {
                Some(_) => format!(" /Contents {} 0 R", page_id + 1),
                None => String::new(),
            };
            bodies.push(format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
                 /Resources << /Font << /F1 3 0 R >> >>{contents_ref} >>"
            ));
            if let Some(t) = text {
                let stream = format!("BT /F1 12 Tf 72 720 Td ({t}) Tj ET");
                bodies.push(format!(
                    "<< /Length {} >>\nstream\n{stream}\nendstream",
                    stream.len()
                ));
            }
        }

        let kids = page_ids
            .iter()
            .map(|id| format!("{id} 0 R"))
            .collect::<Vec<_>>()
            .join(" ");
        bodies[1] = format!("<< /Type /Pages /Kids [{kids}] /Count {} >>", pages.len());

        let mut pdf = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::new();
        for (i, body) in bodies.iter().enumerate() {
            offsets.push(pdf.len());
            pdf.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", i + 1).as_bytes());
        }

        let xref_offset = pdf.len();
        let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", bodies.len() + 1);
        for offset in &offsets {
            xref.push_str(&format!("{offset:010} 00000 n \n"));
        }
        pdf.extend_from_slice(xref.as_bytes());
        pdf.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n",
                bodies.len() + 1
            )
            .as_bytes(),
        );
        pdf
    }

    #[test]
    fn test_three_page_pdf_concatenates_in_page_order() {
        let pdf = build_pdf(&[Some("First page"), Some("Second page"), Some("Third page")]);
        let text = extract_cv_text(&pdf).unwrap();

        let first = text.find("First page").expect("first page text present");
        let second = text.find("Second page").expect("second page text present");
        let third = text.find("Third page").expect("third page text present");
        assert!(first < second && second < third);
    }

    #[test]
    fn test_page_without_text_layer_contributes_empty_segment() {
        let pdf = build_pdf(&[Some("Before"), None, Some("After")]);
        let text = extract_cv_text(&pdf).unwrap();

        assert!(text.contains("Before"));
        assert!(text.contains("After"));
    }

    #[test]
    fn test_pdf_with_no_text_at_all_is_an_extraction_error() {
        let pdf = build_pdf(&[None, None]);
        let err = extract_cv_text(&pdf).unwrap_err();
        assert!(matches!(err, AppError::Extraction(_)));
    }

    #[test]
    fn test_garbage_bytes_are_an_extraction_error() {
        let err = extract_cv_text(b"definitely not a pdf").unwrap_err();
        assert!(matches!(err, AppError::Extraction(_)));
    }

    #[test]
    fn test_oversized_upload_is_rejected_before_parsing() {
        let bytes = vec![0u8; MAX_UPLOAD_BYTES + 1];
        let err = extract_cv_text(&bytes).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
