#![allow(dead_code)]

use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};

/// One highlight row for the fixture device database.
pub struct Highlight<'a> {
    pub text: Option<&'a str>,
    pub title: &'a str,
    pub attribution: &'a str,
    pub date_last_read: Option<&'a str>,
}

/// Writes a database with the Kobo `content` and `Bookmark` tables.
pub fn write_kobo_db(dir: &Path, highlights: &[Highlight<'_>]) -> PathBuf {
    let path = dir.join("KoboReader.sqlite");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE content (
            ContentID TEXT PRIMARY KEY,
            Title TEXT,
            Attribution TEXT,
            DateLastRead TEXT
        );
        CREATE TABLE Bookmark (
            BookmarkID TEXT PRIMARY KEY,
            VolumeID TEXT,
            Text TEXT,
            DateCreated TEXT
        );",
    )
    .unwrap();

    for (index, highlight) in highlights.iter().enumerate() {
        let volume_id = format!("{}|{}|{:?}", highlight.title, highlight.attribution, highlight.date_last_read);
        conn.execute(
            "INSERT OR IGNORE INTO content (ContentID, Title, Attribution, DateLastRead)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                volume_id,
                highlight.title,
                highlight.attribution,
                highlight.date_last_read
            ],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO Bookmark (BookmarkID, VolumeID, Text, DateCreated)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                format!("bookmark-{index}"),
                volume_id,
                highlight.text,
                format!("2024-01-01T00:00:{index:02}")
            ],
        )
        .unwrap();
    }
    path
}

/// Synset written to a fixture `data.*` file.
pub struct FixtureSynset<'a> {
    pub ss_type: char,
    pub word: &'a str,
    pub gloss: &'a str,
}

/// Minimal WordNet `dict/` directory builder with real byte offsets.
pub struct WordNetFixture {
    pub dir: PathBuf,
}

impl WordNetFixture {
    pub fn new(dir: &Path) -> Self {
        let dir = dir.join("dict");
        std::fs::create_dir_all(&dir).unwrap();
        for stem in ["noun", "verb", "adj", "adv"] {
            std::fs::write(dir.join(format!("index.{stem}")), "").unwrap();
        }
        Self { dir }
    }

    /// Writes `data.<stem>` and returns the offset of each synset.
    pub fn data(&self, stem: &str, synsets: &[FixtureSynset<'_>]) -> Vec<u64> {
        let mut content = String::from("  1 This software and database is provided as-is.\n");
        let mut offsets = Vec::new();
        for synset in synsets {
            let offset = content.len() as u64;
            offsets.push(offset);
            content.push_str(&format!(
                "{offset:08} 00 {} 01 {} 0 000 | {}\n",
                synset.ss_type, synset.word, synset.gloss
            ));
        }
        std::fs::write(self.dir.join(format!("data.{stem}")), content).unwrap();
        offsets
    }

    /// Writes `index.<stem>` from `(lemma, offsets)` entries.
    pub fn index(&self, stem: &str, pos: char, entries: &[(&str, Vec<u64>)]) {
        let mut content = String::from("  1 This software and database is provided as-is.\n");
        for (lemma, offsets) in entries {
            let joined = offsets
                .iter()
                .map(|offset| format!("{offset:08}"))
                .collect::<Vec<_>>()
                .join(" ");
            content.push_str(&format!(
                "{lemma} {pos} {count} 0 {count} 0 {joined}\n",
                count = offsets.len()
            ));
        }
        std::fs::write(self.dir.join(format!("index.{stem}")), content).unwrap();
    }

    pub fn exceptions(&self, stem: &str, lines: &[&str]) {
        let mut content = lines.join("\n");
        content.push('\n');
        std::fs::write(self.dir.join(format!("{stem}.exc")), content).unwrap();
    }
}

/// A small dictionary covering "run", "running", "inchoate" and "cat".
pub fn standard_wordnet(dir: &Path) -> WordNetFixture {
    let fixture = WordNetFixture::new(dir);

    let nouns = fixture.data(
        "noun",
        &[
            FixtureSynset {
                ss_type: 'n',
                word: "run",
                gloss: "a score in baseball made by a runner touching all four bases; \"the Yankees scored 3 runs\"",
            },
            FixtureSynset {
                ss_type: 'n',
                word: "running",
                gloss: "the act of running; traveling on foot at a fast pace",
            },
            FixtureSynset {
                ss_type: 'n',
                word: "cat",
                gloss: "feline mammal usually having thick soft fur",
            },
        ],
    );
    let verbs = fixture.data(
        "verb",
        &[FixtureSynset {
            ss_type: 'v',
            word: "run",
            gloss: "move fast by using one's feet; \"Don't run--you'll be out of breath\"; \"The children ran to the store\"",
        }],
    );
    let adjectives = fixture.data(
        "adj",
        &[FixtureSynset {
            ss_type: 's',
            word: "inchoate",
            gloss: "only partly in existence; imperfectly formed; \"a vague inchoate idea\"",
        }],
    );

    fixture.index(
        "noun",
        'n',
        &[
            ("cat", vec![nouns[2]]),
            ("run", vec![nouns[0]]),
            ("running", vec![nouns[1]]),
        ],
    );
    fixture.index("verb", 'v', &[("run", vec![verbs[0]])]);
    fixture.index("adj", 'a', &[("inchoate", vec![adjectives[0]])]);
    fixture.exceptions("verb", &["ran run", "running run"]);
    fixture
}
