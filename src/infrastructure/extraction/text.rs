//! Plain-text extraction with encoding fallback

use encoding_rs::{UTF_16BE, UTF_16LE, WINDOWS_1252};

use crate::domain::extraction::{
    DocumentExtractor, DocumentKind, ExtractedDocument, ExtractionError, TextEncoding,
};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];
const UTF16_LE_BOM: &[u8] = &[0xFF, 0xFE];
const UTF16_BE_BOM: &[u8] = &[0xFE, 0xFF];

/// Decodes `.txt` uploads, trying each encoding of `TextEncoding::FALLBACK_ORDER`
#[derive(Debug, Clone, Default)]
pub struct PlainTextExtractor;

impl PlainTextExtractor {
    pub fn new() -> Self {
        Self
    }

    fn decode(bytes: &[u8]) -> Result<(String, TextEncoding), ExtractionError> {
        TextEncoding::FALLBACK_ORDER
            .iter()
            .find_map(|&encoding| decode_as(bytes, encoding).map(|text| (text, encoding)))
            .ok_or(ExtractionError::UnreadableEncoding)
    }
}

/// Strict decode; `None` means the bytes are not valid in this encoding.
fn decode_as(bytes: &[u8], encoding: TextEncoding) -> Option<String> {
    match encoding {
        TextEncoding::Utf8 => {
            let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
            std::str::from_utf8(body).ok().map(str::to_string)
        }
        // Without a byte-order mark almost any even-length input is "valid"
        // UTF-16, so it is only attempted when one is present.
        TextEncoding::Utf16 => {
            let (codec, body) = if let Some(body) = bytes.strip_prefix(UTF16_LE_BOM) {
                (UTF_16LE, body)
            } else if let Some(body) = bytes.strip_prefix(UTF16_BE_BOM) {
                (UTF_16BE, body)
            } else {
                return None;
            };
            codec
                .decode_without_bom_handling_and_without_replacement(body)
                .map(|text| text.into_owned())
        }
        // ISO-8859-1 maps every byte to U+0000..U+00FF. Bytes 0x80..0x9F are
        // C1 controls there, which in practice means the file is CP1252.
        TextEncoding::Latin1 => {
            if bytes.iter().any(|b| (0x80..=0x9F).contains(b)) {
                return None;
            }
            Some(bytes.iter().map(|&b| b as char).collect())
        }
        TextEncoding::Cp1252 => WINDOWS_1252
            .decode_without_bom_handling_and_without_replacement(bytes)
            .map(|text| text.into_owned()),
    }
}

impl DocumentExtractor for PlainTextExtractor {
    fn kind(&self) -> DocumentKind {
        DocumentKind::Text
    }

    fn extract(&self, bytes: &[u8]) -> Result<ExtractedDocument, ExtractionError> {
        if bytes.is_empty() {
            return Err(ExtractionError::NoTextFound);
        }

        let (text, encoding) = Self::decode(bytes)?;

        ExtractedDocument::new(text, DocumentKind::Text)
            .map(|doc| doc.with_encoding(encoding))
            .ok_or(ExtractionError::NoTextFound)
    }

    fn name(&self) -> &'static str {
        "plain_text"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(bytes: &[u8]) -> Result<ExtractedDocument, ExtractionError> {
        PlainTextExtractor::new().extract(bytes)
    }

    #[test]
    fn test_utf8_round_trip() {
        let text = "Grüße aus Zürich, see you at 9:00 ✓";
        let doc = extract(text.as_bytes()).unwrap();

        assert_eq!(doc.text(), text);
        assert_eq!(doc.encoding(), Some(TextEncoding::Utf8));
    }

    #[test]
    fn test_utf8_bom_stripped() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice("Hello team".as_bytes());

        let doc = extract(&bytes).unwrap();
        assert_eq!(doc.text(), "Hello team");
        assert_eq!(doc.encoding(), Some(TextEncoding::Utf8));
    }

    #[test]
    fn test_utf16_le_round_trip() {
        let text = "Café meeting — agenda attached";
        let mut bytes = UTF16_LE_BOM.to_vec();
        for unit in text.encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }

        let doc = extract(&bytes).unwrap();
        assert_eq!(doc.text(), text);
        assert_eq!(doc.encoding(), Some(TextEncoding::Utf16));
    }

    #[test]
    fn test_utf16_be_round_trip() {
        let text = "Quarterly review";
        let mut bytes = UTF16_BE_BOM.to_vec();
        for unit in text.encode_utf16() {
            bytes.extend_from_slice(&unit.to_be_bytes());
        }

        let doc = extract(&bytes).unwrap();
        assert_eq!(doc.text(), text);
        assert_eq!(doc.encoding(), Some(TextEncoding::Utf16));
    }

    #[test]
    fn test_latin1_round_trip() {
        let text = "Señor Muñoz, voilà le résumé";
        let bytes: Vec<u8> = text.chars().map(|c| c as u32 as u8).collect();

        let doc = extract(&bytes).unwrap();
        assert_eq!(doc.text(), text);
        assert_eq!(doc.encoding(), Some(TextEncoding::Latin1));
    }

    #[test]
    fn test_cp1252_round_trip() {
        let text = "Budget: 500€ – “final” version";
        let (bytes, _, unmappable) = WINDOWS_1252.encode(text);
        assert!(!unmappable);

        let doc = extract(&bytes).unwrap();
        assert_eq!(doc.text(), text);
        assert_eq!(doc.encoding(), Some(TextEncoding::Cp1252));
    }

    #[test]
    fn test_empty_and_whitespace() {
        assert_eq!(extract(b"").unwrap_err(), ExtractionError::NoTextFound);
        assert_eq!(extract(b" \n\t ").unwrap_err(), ExtractionError::NoTextFound);
    }

    #[test]
    fn test_text_is_trimmed() {
        let doc = extract(b"\n\n  Hello  \n").unwrap();
        assert_eq!(doc.text(), "Hello");
    }
}
