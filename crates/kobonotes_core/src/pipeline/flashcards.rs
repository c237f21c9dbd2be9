//! Flashcard rendering and CSV serialization.
//!
//! Cards target Anki's HTML field rendering: the question is a heading, the
//! answer enumerates senses between separator rules.

use super::resolve::capitalize_first;
use crate::model::vocab::{DefinedTerm, DefinitionSense, NormalizedTerm};
use html_escape::encode_text;
use log::info;
use std::io::{Read, Write};

const SEPARATOR: &str = "----------------------------------------";

/// One question/answer pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flashcard {
    pub question: String,
    pub answer: String,
}

/// Question text: the highlighted form, trimmed of punctuation and capitalized.
///
/// Falls back to the canonical form when nothing is left of the original.
pub fn format_question(term: &NormalizedTerm) -> String {
    let display = term
        .original
        .trim_matches(|c: char| c.is_whitespace() || c.is_ascii_punctuation() || is_quote_mark(c))
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    let display = if display.is_empty() {
        term.canonical.clone()
    } else {
        display
    };
    format!("<h1>{}</h1>", encode_text(&capitalize_first(&display)))
}

fn is_quote_mark(c: char) -> bool {
    matches!(c, '“' | '”' | '‘' | '’' | '«' | '»')
}

fn format_sense(number: usize, sense: &DefinitionSense) -> String {
    let mut block = format!("\n{SEPARATOR}<large> {number} </large>{SEPARATOR}\n");
    block.push_str(&format!(
        "<em><b>\n{}</b> - ({})</em>",
        encode_text(&sense.definition),
        sense.part_of_speech.label()
    ));
    if !sense.examples.is_empty() {
        block.push_str("<small><u>\n\nExamples:</u>\n");
        for example in &sense.examples {
            block.push_str(&format!("<em>\"{}\"</em>\n", encode_text(example)));
        }
        block.push_str("</small>");
    }
    block
}

/// Answer text: senses numbered from 1, closed by a final separator.
pub fn format_answer(senses: &[DefinitionSense]) -> String {
    let blocks: Vec<String> = senses
        .iter()
        .enumerate()
        .map(|(index, sense)| format_sense(index + 1, sense))
        .collect();
    format!("{}\n{SEPARATOR}---{SEPARATOR}", blocks.join("\n"))
}

pub fn format_flashcards(defined: &[DefinedTerm]) -> Vec<Flashcard> {
    defined
        .iter()
        .map(|entry| Flashcard {
            question: format_question(&entry.term),
            answer: format_answer(&entry.senses),
        })
        .collect()
}

/// Writes cards as a two-column CSV without a header row.
pub fn write_flashcards<W: Write>(writer: W, cards: &[Flashcard]) -> csv::Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    for card in cards {
        csv_writer.write_record([card.question.as_str(), card.answer.as_str()])?;
    }
    csv_writer.flush()?;
    info!(
        "event=write_flashcards module=pipeline status=ok cards={}",
        cards.len()
    );
    Ok(())
}

/// Reads a two-column CSV written by [`write_flashcards`].
pub fn read_flashcards<R: Read>(reader: R) -> csv::Result<Vec<Flashcard>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(reader);
    csv_reader
        .deserialize::<(String, String)>()
        .map(|row| row.map(|(question, answer)| Flashcard { question, answer }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{format_answer, format_question, SEPARATOR};
    use crate::model::vocab::{DefinitionSense, NormalizedTerm, PartOfSpeech};

    #[test]
    fn question_uses_cleaned_original_form() {
        assert_eq!(
            format_question(&NormalizedTerm::new("  Inchoate, ", "inchoate")),
            "<h1>Inchoate</h1>"
        );
        assert_eq!(
            format_question(&NormalizedTerm::new("RUNNING", "run")),
            "<h1>Running</h1>"
        );
        assert_eq!(format_question(&NormalizedTerm::new("...", "")), "<h1></h1>");
    }

    #[test]
    fn answer_numbers_senses_and_lists_examples() {
        let senses = vec![
            DefinitionSense {
                definition: "Only partly in existence".to_string(),
                part_of_speech: PartOfSpeech::AdjectiveSatellite,
                examples: vec!["An incipient tumor".to_string()],
            },
            DefinitionSense {
                definition: "Just begun".to_string(),
                part_of_speech: PartOfSpeech::Adjective,
                examples: Vec::new(),
            },
        ];
        let expected = format!(
            "\n{SEPARATOR}<large> 1 </large>{SEPARATOR}\n\
             <em><b>\nOnly partly in existence</b> - (Adjective Satellite)</em>\
             <small><u>\n\nExamples:</u>\n<em>\"An incipient tumor\"</em>\n</small>\n\
             \n{SEPARATOR}<large> 2 </large>{SEPARATOR}\n\
             <em><b>\nJust begun</b> - (Adjective)</em>\n\
             {SEPARATOR}---{SEPARATOR}"
        );
        assert_eq!(format_answer(&senses), expected);
    }

    #[test]
    fn answer_escapes_markup_in_definitions() {
        let senses = vec![DefinitionSense {
            definition: "Less than <b> & more".to_string(),
            part_of_speech: PartOfSpeech::Noun,
            examples: Vec::new(),
        }];
        assert!(format_answer(&senses).contains("Less than &lt;b&gt; &amp; more"));
    }
}
