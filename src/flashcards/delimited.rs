//! Delimited-text (CSV) import and export of deck words
//!
//! Column order is `word, definition, partOfSpeech, example, synonyms`.
//! Synonyms are `;`-separated inside their field. A header row is optional
//! and recognized by the words "word" or "definition" in the first row.

use std::fmt;

use serde::Serialize;

use super::models::{Deck, VocabularyItem, WordFields};

/// Header written on export
pub const EXPORT_HEADER: [&str; 5] = ["word", "definition", "partOfSpeech", "example", "synonyms"];

/// A row that could not be turned into a word
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectedRow {
    /// 1-based line number in the source text
    pub line: u64,
    pub reason: String,
}

impl fmt::Display for RejectedRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line {}: {}", self.line, self.reason)
    }
}

/// First row recognized as column names and skipped
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderRow {
    pub line: u64,
    pub fields: Vec<String>,
}

impl HeaderRow {
    /// Whether this is the header written by [`export_to_delimited_text`]
    pub fn is_export_header(&self) -> bool {
        self.fields.len() == EXPORT_HEADER.len()
            && self
                .fields
                .iter()
                .zip(EXPORT_HEADER)
                .all(|(f, h)| f.eq_ignore_ascii_case(h))
    }
}

/// Outcome of parsing delimited text
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub items: Vec<VocabularyItem>,
    pub rejected: Vec<RejectedRow>,
    /// Set when the first row was taken for column names
    pub header: Option<HeaderRow>,
}

impl ImportReport {
    pub fn is_success(&self) -> bool {
        !self.items.is_empty()
    }
}

/// Parse delimited text into words
///
/// Bad rows never abort the batch; they are collected in
/// [`ImportReport::rejected`].
pub fn import_from_delimited_text(text: &str) -> ImportReport {
    let mut report = ImportReport::default();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut first_row = true;
    for result in reader.records() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or(0);
                log::warn!("Skipping unreadable row at line {}: {}", line, e);
                report.rejected.push(RejectedRow {
                    line,
                    reason: format!("Unreadable row ({})", e),
                });
                continue;
            }
        };

        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let fields: Vec<&str> = record.iter().map(str::trim).collect();

        if fields.iter().all(|f| f.is_empty()) {
            continue;
        }

        if first_row {
            first_row = false;
            let joined = fields.join(",").to_lowercase();
            if joined.contains("word") || joined.contains("definition") {
                log::debug!("Treating line {} as a header row", line);
                report.header = Some(HeaderRow {
                    line,
                    fields: fields.iter().map(|f| f.to_string()).collect(),
                });
                continue;
            }
        }

        match parse_row(&fields) {
            Ok(fields) => report.items.push(VocabularyItem::new(fields)),
            Err(reason) => {
                log::warn!("Rejected import line {}: {}", line, reason);
                report.rejected.push(RejectedRow {
                    line,
                    reason: reason.to_string(),
                });
            }
        }
    }

    report
}

fn parse_row(fields: &[&str]) -> Result<WordFields, &'static str> {
    if fields.len() < 2 {
        return Err("Not enough fields (need at least word and definition)");
    }

    let optional = |idx: usize| fields.get(idx).map(|f| f.to_string());

    WordFields {
        term: fields[0].to_string(),
        definition: fields[1].to_string(),
        part_of_speech: optional(2),
        example: optional(3),
        synonyms: optional(4).into_iter().collect(),
    }
    .normalized()
}

/// Serialize a deck's words; every field is quoted and embedded quotes doubled
pub fn export_to_delimited_text(deck: &Deck) -> Result<String, csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(EXPORT_HEADER)?;
    for word in &deck.words {
        let synonyms = word.synonyms.join(";");
        writer.write_record([
            word.term.as_str(),
            word.definition.as_str(),
            word.part_of_speech.as_str(),
            word.example.as_str(),
            synonyms.as_str(),
        ])?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    let text = String::from_utf8_lossy(&bytes);
    Ok(text.strip_suffix('\n').unwrap_or(&text).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deck_with(words: Vec<WordFields>) -> Deck {
        let mut deck = Deck::new("Test".to_string(), String::new());
        deck.words = words.into_iter().map(VocabularyItem::new).collect();
        deck
    }

    #[test]
    fn test_import_with_header_and_defaults() {
        let text = "word,definition,partOfSpeech,example,synonyms\n\
                    Laconic,Using very few words\n\
                    Garrulous,Excessively talkative,adjective,\"He was \"\"very\"\" garrulous.\",chatty; verbose\n";

        let report = import_from_delimited_text(text);
        assert!(report.rejected.is_empty());
        assert_eq!(report.items.len(), 2);

        let laconic = &report.items[0];
        assert_eq!(laconic.term, "Laconic");
        assert_eq!(laconic.part_of_speech, "noun");
        assert_eq!(
            laconic.example,
            "The word \"Laconic\" is commonly used in academic contexts."
        );
        assert!(laconic.synonyms.is_empty());

        let garrulous = &report.items[1];
        assert_eq!(garrulous.part_of_speech, "adjective");
        assert_eq!(garrulous.example, "He was \"very\" garrulous.");
        assert_eq!(garrulous.synonyms, vec!["chatty", "verbose"]);
        assert_ne!(laconic.id, garrulous.id);
    }

    #[test]
    fn test_import_reports_skipped_header() {
        let report = import_from_delimited_text("Password,A secret string\nKey,Opens a lock\n");
        assert_eq!(report.items.len(), 1);
        assert_eq!(report.items[0].term, "Key");

        let header = report.header.unwrap();
        assert_eq!(header.line, 1);
        assert_eq!(header.fields, vec!["Password", "A secret string"]);
        assert!(!header.is_export_header());

        let exported = import_from_delimited_text(
            "\"word\",\"definition\",\"partOfSpeech\",\"example\",\"synonyms\"\nA,b",
        );
        assert!(exported.header.unwrap().is_export_header());
    }

    #[test]
    fn test_import_without_header() {
        let report = import_from_delimited_text("Terse,Sparing in speech\nPithy,Concise and forceful");
        assert!(report.header.is_none());
        assert_eq!(report.items.len(), 2);
        assert_eq!(report.items[0].term, "Terse");
    }

    #[test]
    fn test_import_rejects_bad_rows_without_aborting() {
        let text = "Alpha,First letter\nlonely\n,missing term\n\nBeta,Second letter\n";
        let report = import_from_delimited_text(text);

        assert_eq!(report.items.len(), 2);
        assert_eq!(report.rejected.len(), 2);
        assert_eq!(report.rejected[0].line, 2);
        assert_eq!(
            report.rejected[0].to_string(),
            "Line 2: Not enough fields (need at least word and definition)"
        );
        assert_eq!(report.rejected[1].line, 3);
        assert_eq!(report.rejected[1].reason, "Missing word or definition");
    }

    #[test]
    fn test_import_quoted_delimiter() {
        let report = import_from_delimited_text("\"Ergo\",\"Therefore, consequently\"");
        assert_eq!(report.items.len(), 1);
        assert_eq!(report.items[0].definition, "Therefore, consequently");
    }

    #[test]
    fn test_export_quotes_everything() {
        let mut fields = WordFields::new("Quote", "Say \"this\", then that");
        fields.part_of_speech = Some("verb".to_string());
        fields.example = Some("Quote me.".to_string());
        fields.synonyms = vec!["cite".to_string(), "repeat".to_string()];
        let deck = deck_with(vec![fields]);

        let text = export_to_delimited_text(&deck).unwrap();
        assert_eq!(
            text,
            "\"word\",\"definition\",\"partOfSpeech\",\"example\",\"synonyms\"\n\
             \"Quote\",\"Say \"\"this\"\", then that\",\"verb\",\"Quote me.\",\"cite;repeat\""
        );
    }

    #[test]
    fn test_export_import_round_trip() {
        let mut first = WordFields::new("Sesquipedalian", "Given to using long words");
        first.synonyms = vec!["long-winded".to_string(), "verbose".to_string()];
        let mut second = WordFields::new("Aplomb", "Self-confidence, \"poise\"");
        second.part_of_speech = Some("noun".to_string());
        second.example = Some("She handled it with aplomb,\nas always.".to_string());
        let deck = deck_with(vec![first, second]);

        let exported = export_to_delimited_text(&deck).unwrap();
        let report = import_from_delimited_text(&exported);
        assert!(report.rejected.is_empty());

        let mut reimported = Deck::new("Copy".to_string(), String::new());
        reimported.words = report.items;
        assert_eq!(export_to_delimited_text(&reimported).unwrap(), exported);

        for (original, copy) in deck.words.iter().zip(&reimported.words) {
            assert_eq!(WordFields::from(original).term, copy.term);
            assert_eq!(original.definition, copy.definition);
            assert_eq!(original.part_of_speech, copy.part_of_speech);
            assert_eq!(original.example, copy.example);
            assert_eq!(original.synonyms, copy.synonyms);
        }
    }
}
