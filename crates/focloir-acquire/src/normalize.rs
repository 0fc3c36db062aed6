use unicode_normalization::UnicodeNormalization;

/// Normalize scraped text to NFC and collapse runs of whitespace.
///
/// Dictionary markup splits entries across lines and nested spans; the
/// result is a single trimmed line with precomposed fadas (á, é, í, ó, ú).
pub fn normalize_text(input: &str) -> String {
    let nfc: String = input.nfc().collect();
    nfc.split_whitespace().collect::<Vec<_>>().join(" ")
}
