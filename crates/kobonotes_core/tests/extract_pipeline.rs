mod common;

use common::{standard_wordnet, write_kobo_db, Highlight};
use kobonotes_core::{
    classify, normalize_texts, read_flashcards, AnnotationQuery, AnnotationRecord, ExtractService,
    InMemoryDictionary, OrgHeader, OutputPaths, RunConfig, ServiceError, UndefinedReason,
    WordClass, WordNet,
};
use std::path::Path;

fn dictionary() -> InMemoryDictionary {
    InMemoryDictionary::new()
        .with_lemma("running", WordClass::Noun)
        .with_exception("running", WordClass::Verb, "run")
        .with_sense("run", 'v', "move fast by using one's feet", &["don't run"])
        .with_sense("run", 'n', "a score in baseball", &[])
        .with_sense("inchoate", 's', "only partly in existence, imperfectly formed", &[])
}

fn config(dir: &Path) -> RunConfig {
    RunConfig {
        max_word_len: 2,
        org: OrgHeader {
            title: "Highlights".to_string(),
            user: "reader".to_string(),
            date: "2024-02-01".to_string(),
            visibility: "fold".to_string(),
        },
        output: OutputPaths {
            org_file: dir.join("quotes.org"),
            anki_csv: dir.join("anki.csv"),
        },
        strict: false,
    }
}

fn quote(text: &str, title: &str, date: Option<&str>) -> AnnotationRecord {
    AnnotationRecord::new(text, title, "Author", date)
}

fn word(text: &str) -> AnnotationRecord {
    AnnotationRecord::new(text, "Book", "Author", Some("2024-01-02"))
}

#[test]
fn run_writes_quotes_and_flashcards() {
    let dir = tempfile::tempdir().unwrap();
    let service = ExtractService::new(dictionary(), config(dir.path()));
    let records = vec![
        quote("Second book quote that is long.", "Later", Some("2024-03-01")),
        word("Run."),
        quote("First   quote\nof the  earlier book.", "Earlier", Some("2024-01-05")),
        word("running"),
        quote("Second quote of the earlier book.", "Earlier", Some("2024-01-05")),
        word("xyzzycode"),
        word("Inchoate,"),
    ];

    let report = service.run(&records).unwrap();

    assert_eq!(report.annotations, 7);
    assert_eq!(report.word_candidates, 4);
    assert_eq!(report.quotes, 3);
    assert_eq!(report.quote_groups, 2);
    assert_eq!(report.defined_terms, 2);
    assert_eq!(report.dropped_duplicates.len(), 1);
    assert_eq!(report.dropped_duplicates[0].original, "running");
    assert_eq!(report.dropped_duplicates[0].kept, "Run.");
    assert_eq!(report.undefined_terms.len(), 1);
    assert_eq!(report.undefined_terms[0].term, "xyzzycode");
    assert_eq!(report.undefined_terms[0].reason, UndefinedReason::NoSenses);

    let document = std::fs::read_to_string(dir.path().join("quotes.org")).unwrap();
    assert!(document.starts_with(
        "#+TITLE: Highlights\n#+AUTHOR: reader\n#+DATE: 2024-02-01\n#+STARTUP: fold\n"
    ));
    let earlier = document.find("* Earlier").unwrap();
    let later = document.find("* Later").unwrap();
    assert!(earlier < later);
    let first = document.find(" + /\"First quote of the earlier book.\"/").unwrap();
    let second = document.find(" + /\"Second quote of the earlier book.\"/").unwrap();
    assert!(earlier < first && first < second && second < later);
    assert_eq!(document.matches("* Earlier").count(), 1);

    let file = std::fs::File::open(dir.path().join("anki.csv")).unwrap();
    let cards = read_flashcards(file).unwrap();
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0].question, "<h1>Run</h1>");
    assert!(cards[0].answer.contains("Move fast by using one's feet</b> - (Verb)"));
    assert!(cards[0].answer.contains("<em>\"Don't run\"</em>"));
    assert!(cards[0].answer.contains("A score in baseball</b> - (Noun)"));
    assert_eq!(cards[1].question, "<h1>Inchoate</h1>");
    assert!(cards[1]
        .answer
        .contains("Only partly in existence, imperfectly formed</b> - (Adjective Satellite)"));
}

#[test]
fn flashcard_csv_round_trips_exactly() {
    let dir = tempfile::tempdir().unwrap();
    let service = ExtractService::new(dictionary(), config(dir.path()));

    service.run(&[word("inchoate"), word("run")]).unwrap();

    let raw = std::fs::read_to_string(dir.path().join("anki.csv")).unwrap();
    let cards = read_flashcards(raw.as_bytes()).unwrap();
    assert_eq!(cards.len(), 2);
    assert!(cards[0].answer.contains("existence, imperfectly"));
    assert!(cards.iter().all(|card| card.question.starts_with("<h1>")));

    let mut rewritten = Vec::new();
    kobonotes_core::write_flashcards(&mut rewritten, &cards).unwrap();
    assert_eq!(String::from_utf8(rewritten).unwrap(), raw);
}

#[test]
fn bad_quote_date_aborts_before_any_output() {
    let dir = tempfile::tempdir().unwrap();
    let service = ExtractService::new(dictionary(), config(dir.path()));
    let records = vec![
        word("run"),
        quote("A quote with a broken reading date.", "Broken", Some("yesterday")),
    ];

    let err = service.run(&records).unwrap_err();
    match err {
        ServiceError::Format(format_error) => {
            assert!(format_error.to_string().contains("Broken"));
            assert!(format_error.to_string().contains("yesterday"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!dir.path().join("quotes.org").exists());
    assert!(!dir.path().join("anki.csv").exists());
}

#[test]
fn provider_failures_are_recorded_unless_strict() {
    let dir = tempfile::tempdir().unwrap();
    let failing = dictionary().with_failure("flaky");
    let records = vec![word("flaky"), word("run")];

    let report = ExtractService::new(failing.clone(), config(dir.path()))
        .run(&records)
        .unwrap();
    assert_eq!(report.defined_terms, 1);
    assert_eq!(report.provider_failures(), 1);
    assert!(matches!(
        report.undefined_terms[0].reason,
        UndefinedReason::ProviderFailure(_)
    ));

    let strict_dir = tempfile::tempdir().unwrap();
    let mut strict = config(strict_dir.path());
    strict.strict = true;
    let err = ExtractService::new(failing, strict).run(&records).unwrap_err();
    assert!(matches!(err, ServiceError::Provider { ref term, .. } if term == "flaky"));
    assert!(!strict_dir.path().join("anki.csv").exists());
}

#[test]
fn run_without_quotes_skips_the_org_file() {
    let dir = tempfile::tempdir().unwrap();
    let service = ExtractService::new(dictionary(), config(dir.path()));

    let report = service.run(&[word("run")]).unwrap();
    assert_eq!(report.org_file, None);
    assert!(!dir.path().join("quotes.org").exists());
    assert!(dir.path().join("anki.csv").exists());
}

#[test]
fn unwritable_output_is_reported_with_path() {
    let dir = tempfile::tempdir().unwrap();
    let mut run_config = config(dir.path());
    run_config.output.anki_csv = dir.path().join("missing").join("anki.csv");
    let service = ExtractService::new(dictionary(), run_config);

    let err = service.run(&[word("run")]).unwrap_err();
    assert!(matches!(err, ServiceError::Output { .. }));
}

#[test]
fn normalization_is_idempotent() {
    let dictionary = dictionary().with_lemma("cat", WordClass::Noun);
    let texts = ["Run.", "Cats", "running", "  Hello\nWorld ", "xyzzycode", "cat"];

    let once = normalize_texts(&dictionary, texts);
    let canonical: Vec<&str> = once.terms.iter().map(|t| t.canonical.as_str()).collect();
    let twice = normalize_texts(&dictionary, canonical.iter().copied());
    let canonical_twice: Vec<&str> = twice.terms.iter().map(|t| t.canonical.as_str()).collect();

    assert_eq!(canonical, vec!["run", "cat", "hello world", "xyzzycode"]);
    assert_eq!(canonical_twice, canonical);
    assert!(twice.dropped.is_empty());
}

#[test]
fn noun_headword_that_inflects_a_verb_reduces_fully() {
    let dictionary = InMemoryDictionary::new()
        .with_lemma("feeling", WordClass::Noun)
        .with_lemma("feel", WordClass::Verb);

    let once = normalize_texts(&dictionary, ["feelings"]);
    let twice = normalize_texts(&dictionary, [once.terms[0].canonical.as_str()]);
    assert_eq!(once.terms[0].canonical, "feel");
    assert_eq!(twice.terms[0].canonical, "feel");

    let outcome = normalize_texts(&dictionary, ["feeling", "feelings"]);
    assert_eq!(outcome.terms.len(), 1);
    assert_eq!(outcome.terms[0].original, "feeling");
    assert_eq!(outcome.dropped.len(), 1);
    assert_eq!(outcome.dropped[0].original, "feelings");
    assert_eq!(outcome.dropped[0].kept, "feeling");
}

#[test]
fn two_word_highlight_stays_one_term() {
    let records = vec![word("  Hello\nWorld  ")];
    let classified = classify(&records, 2);
    assert_eq!(classified.words.len(), 1);

    let outcome = normalize_texts(&dictionary(), classified.words.iter().map(|r| r.text.as_str()));
    assert_eq!(outcome.terms.len(), 1);
    assert_eq!(outcome.terms[0].canonical, "hello world");
}

#[test]
fn run_from_db_uses_wordnet_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = write_kobo_db(
        dir.path(),
        &[
            Highlight {
                text: Some("Running"),
                title: "Book",
                attribution: "Author",
                date_last_read: Some("2024-01-02T09:30:00.000"),
            },
            Highlight {
                text: Some("Quotes are longer than two words."),
                title: "Book",
                attribution: "Author",
                date_last_read: Some("2024-01-02T09:30:00.000"),
            },
        ],
    );
    let wordnet = WordNet::open(&standard_wordnet(dir.path()).dir).unwrap();
    let service = ExtractService::new(wordnet, config(dir.path()));

    let report = service
        .run_from_db(&db_path, &AnnotationQuery::Bundled)
        .unwrap();
    assert_eq!(report.quotes, 1);
    assert_eq!(report.defined_terms, 1);

    let document = std::fs::read_to_string(dir.path().join("quotes.org")).unwrap();
    assert!(document.contains(":DATE_LAST_READ: 2024-01-02\n"));

    let file = std::fs::File::open(dir.path().join("anki.csv")).unwrap();
    let cards = read_flashcards(file).unwrap();
    assert_eq!(cards[0].question, "<h1>Running</h1>");
    assert!(cards[0].answer.contains("<large> 1 </large>"));
    assert!(cards[0].answer.contains("(Noun)"));
    assert!(cards[0].answer.contains("<large> 2 </large>"));
    assert!(cards[0].answer.contains("(Verb)"));
}

#[test]
fn missing_column_in_custom_query_aborts_run() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = write_kobo_db(dir.path(), &[]);
    let service = ExtractService::new(dictionary(), config(dir.path()));

    let err = service
        .run_from_db(
            &db_path,
            &AnnotationQuery::Inline("SELECT Text, 'T' AS Title FROM Bookmark;".to_string()),
        )
        .unwrap_err();
    assert!(matches!(err, ServiceError::Source(_)));
    assert!(!dir.path().join("anki.csv").exists());
}
