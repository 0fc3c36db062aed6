use crate::client::{absence_from, get_ok};
use crate::normalize::normalize_text;
use crate::sources::TranslationSource;
use async_trait::async_trait;
use focloir_model::{Absence, Fetched};
use scraper::{Html, Selector};

/// Foclóir Gaeilge–Béarla (Ó Dónaill) lookup pages on teanglann.ie.
pub const LOOKUP_BASE: &str = "https://www.teanglann.ie/en/fgb/";

/// Fetches the first English translation of a word from the dictionary site.
pub struct DictionaryTranslator {
    client: reqwest::Client,
    base_url: String,
}

impl DictionaryTranslator {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// The word is appended verbatim; reqwest percent-encodes non-ASCII
    /// characters when it parses the URL.
    pub fn lookup_url(&self, word: &str) -> String {
        format!("{}{word}", self.base_url)
    }
}

#[async_trait]
impl TranslationSource for DictionaryTranslator {
    async fn translate(&self, word: &str) -> Fetched<String> {
        let url = self.lookup_url(word);
        tracing::debug!(url = %url, "Fetching dictionary entry");

        let response = get_ok(&self.client, &url).await?;
        let html = response.text().await.map_err(|e| {
            tracing::warn!(word = %word, error = %e, "Failed to read dictionary page");
            absence_from(&e)
        })?;
        tracing::debug!(word = %word, bytes = html.len(), "Received HTML");

        parse_translation(&html).ok_or(Absence::NotFound)
    }
}

/// Extract the text of the first `span.trans` on a dictionary page.
///
/// Returns `None` when the page has no translation span or the first one
/// is empty.
pub fn parse_translation(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let trans_sel = Selector::parse("span.trans").expect("valid selector");

    let span = document.select(&trans_sel).next()?;
    let text = normalize_text(&span.text().collect::<String>());
    (!text.is_empty()).then_some(text)
}
