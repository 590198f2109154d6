// src/generation/content.rs

use super::GenerationError;

/// Declared content types accepted for a syllabus upload, besides `text/*`.
const TEXTUAL_APPLICATION_TYPES: [&str; 2] = ["application/json", "application/xml"];

const UTF8_BOM: &str = "\u{feff}";

/// Decodes an uploaded syllabus into plain text.
///
/// Rejects anything that is not text: a declared non-textual content type,
/// bytes that are not valid UTF-8, or embedded NUL bytes (a strong sign of a
/// binary document such as a PDF or DOCX). An absent or generic
/// `application/octet-stream` type is judged by the bytes alone.
pub fn decode_syllabus(
    bytes: &[u8],
    content_type: Option<&str>,
) -> Result<String, GenerationError> {
    if let Some(declared) = content_type.map(essence) {
        if !is_textual(&declared) {
            return Err(GenerationError::UnsupportedContent(format!(
                "Syllabus must be a plain text file (got {})",
                declared
            )));
        }
    }

    let text = std::str::from_utf8(bytes).map_err(|_| {
        GenerationError::UnsupportedContent("Syllabus is not valid UTF-8 text".to_string())
    })?;

    if text.contains('\0') {
        return Err(GenerationError::UnsupportedContent(
            "Syllabus appears to be a binary file".to_string(),
        ));
    }

    let text = text.strip_prefix(UTF8_BOM).unwrap_or(text);

    if text.trim().is_empty() {
        return Err(GenerationError::InputMissing(
            "Syllabus file is empty".to_string(),
        ));
    }

    Ok(text.to_string())
}

/// Lowercased media type without parameters, e.g. `text/plain; charset=utf-8` -> `text/plain`.
fn essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

fn is_textual(media_type: &str) -> bool {
    media_type.is_empty()
        || media_type == "application/octet-stream"
        || media_type.starts_with("text/")
        || TEXTUAL_APPLICATION_TYPES.contains(&media_type)
}
