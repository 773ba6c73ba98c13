use anyhow::{Context, Result, anyhow};
use log::warn;
use serde::Deserialize;
use serde_json::json;

use crate::models::Quote;

const ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const API_KEY_ENV: &str = "GEMINI_API_KEY";

const PROMPT: &str = "Provide 10 authentic hadiths in English about the importance \
of prayer (salah) and fasting (sawm). Format the response as a valid JSON array of \
objects. Each object must have two keys: \"hadith\" (the hadith text) and \"source\" \
(the reference, e.g. 'Sahih al-Bukhari 1'). Do not include any text outside of the \
JSON array.";

/// Shown when the generative API is unreachable or returns garbage.
pub fn fallback_quote() -> Quote {
    Quote::new(
        "Verily, in the remembrance of Allah do hearts find rest.",
        "Al-Qur'an 13:28",
    )
}

/// Client for the generative-text API that produces the quote carousel.
///
/// Quotes are decoration, so unlike the prayer-time client this one never
/// returns an error: every failure collapses to a one-element fallback list
/// and is logged, not shown.
#[derive(Clone)]
pub struct QuoteApi {
    client: reqwest::blocking::Client,
    model: String,
}

impl QuoteApi {
    pub fn new(client: reqwest::blocking::Client, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    pub fn fetch(&self) -> Vec<Quote> {
        match self.try_fetch() {
            Ok(quotes) => quotes,
            Err(e) => {
                warn!("quote fetch failed: {:#}", e);
                vec![fallback_quote()]
            }
        }
    }

    fn try_fetch(&self) -> Result<Vec<Quote>> {
        let key = std::env::var(API_KEY_ENV)
            .map_err(|_| anyhow!("{} is not set", API_KEY_ENV))?;

        // Structured-output request: the schema constrains the reply to a
        // bare JSON array of {hadith, source} objects.
        let request = json!({
            "contents": [{"parts": [{"text": PROMPT}]}],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "hadith": {"type": "STRING"},
                            "source": {"type": "STRING"}
                        },
                        "required": ["hadith", "source"]
                    }
                }
            }
        });

        let response: GenerateResponse = self
            .client
            .post(format!("{}/{}:generateContent", ENDPOINT, self.model))
            .query(&[("key", key.as_str())])
            .json(&request)
            .send()
            .context("sending generate request")?
            .error_for_status()
            .context("generate request rejected")?
            .json()
            .context("reading generate response")?;

        let text = response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| anyhow!("response carried no text part"))?;

        parse_quotes(&text).ok_or_else(|| anyhow!("response text was not a quote array"))
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct HadithEntry {
    hadith: String,
    source: String,
}

/// Parse the model's text reply as a quote array. `None` on malformed JSON
/// or an empty array, both of which mean "use the fallback".
fn parse_quotes(text: &str) -> Option<Vec<Quote>> {
    let entries: Vec<HadithEntry> = serde_json::from_str(text.trim()).ok()?;
    if entries.is_empty() {
        return None;
    }
    Some(
        entries
            .into_iter()
            .map(|e| Quote::new(e.hadith, e.source))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_quote_array() {
        let text = r#"[
            {"hadith": "Actions are judged by intentions.", "source": "Sahih al-Bukhari 1"},
            {"hadith": "Prayer is the pillar of religion.", "source": "Bayhaqi"}
        ]"#;
        let quotes = parse_quotes(text).unwrap();
        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0].source, "Sahih al-Bukhari 1");
        assert_eq!(quotes[1].text, "Prayer is the pillar of religion.");
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        let text = "\n  [{\"hadith\": \"a\", \"source\": \"b\"}]  \n";
        assert_eq!(parse_quotes(text).unwrap().len(), 1);
    }

    #[test]
    fn empty_array_means_fallback() {
        assert!(parse_quotes("[]").is_none());
    }

    #[test]
    fn prose_reply_means_fallback() {
        assert!(parse_quotes("Here are your hadiths: ...").is_none());
    }

    #[test]
    fn decodes_generate_response_shape() {
        let body = r#"{
            "candidates": [{
                "content": {
                    "parts": [{"text": "[{\"hadith\": \"x\", \"source\": \"y\"}]"}],
                    "role": "model"
                },
                "finishReason": "STOP"
            }]
        }"#;
        let response: GenerateResponse = serde_json::from_str(body).unwrap();
        let text = &response.candidates[0].content.parts[0].text;
        assert_eq!(parse_quotes(text).unwrap()[0].source, "y");
    }
}
