//! WordNet dictionary backend over a `dict/` directory of the database files.
//!
//! # Responsibility
//! - Load lemma indexes and exception lists once at open time.
//! - Read synsets from the data files by byte offset on demand.
//!
//! # Invariants
//! - Index files are mandatory; exception lists are optional.
//! - A synset is reported at most once per lookup.

use super::morphy::morphy;
use super::{DictionaryError, DictionaryProvider, Lexicon, ProviderError, RawSense, WordClass};
use log::info;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind, Seek, SeekFrom};
use std::path::{Path, PathBuf};

static QUOTED_EXAMPLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""([^"]*)""#).expect("valid example regex"));

fn file_stem(class: WordClass) -> &'static str {
    match class {
        WordClass::Noun => "noun",
        WordClass::Verb => "verb",
        WordClass::Adjective => "adj",
        WordClass::Adverb => "adv",
    }
}

/// WordNet 3.x database opened from disk.
#[derive(Debug)]
pub struct WordNet {
    dict_dir: PathBuf,
    index: HashMap<(String, WordClass), Vec<u64>>,
    exceptions: HashMap<(String, WordClass), Vec<String>>,
}

impl WordNet {
    /// Loads `index.*` and `*.exc` files from `dict_dir`.
    ///
    /// # Errors
    /// - `MissingDirectory` when `dict_dir` is not a directory.
    /// - `Io` when an index file is missing or unreadable.
    /// - `MalformedIndex` when an index line cannot be parsed.
    pub fn open(dict_dir: impl AsRef<Path>) -> Result<Self, DictionaryError> {
        let dict_dir = dict_dir.as_ref().to_path_buf();
        if !dict_dir.is_dir() {
            return Err(DictionaryError::MissingDirectory(dict_dir));
        }

        let mut index = HashMap::new();
        let mut exceptions = HashMap::new();
        for class in WordClass::ALL {
            load_index(&dict_dir, class, &mut index)?;
            load_exceptions(&dict_dir, class, &mut exceptions)?;
        }

        info!(
            "event=dictionary_open module=dictionary status=ok provider=wordnet dir={} lemmas={} exceptions={}",
            dict_dir.display(),
            index.len(),
            exceptions.len()
        );
        Ok(Self {
            dict_dir,
            index,
            exceptions,
        })
    }

    fn read_synset(&self, class: WordClass, offset: u64) -> Result<RawSense, ProviderError> {
        let path = self.dict_dir.join(format!("data.{}", file_stem(class)));
        let io_error = |source| ProviderError::Io {
            path: path.clone(),
            source,
        };

        let file = File::open(&path).map_err(io_error)?;
        let mut reader = BufReader::new(file);
        reader.seek(SeekFrom::Start(offset)).map_err(io_error)?;
        let mut line = String::new();
        reader.read_line(&mut line).map_err(io_error)?;

        parse_data_line(&line, offset).map_err(|message| ProviderError::Corrupt {
            file: path.clone(),
            offset,
            message,
        })
    }
}

impl Lexicon for WordNet {
    fn has_lemma(&self, lemma: &str, class: WordClass) -> bool {
        self.index.contains_key(&(lemma.to_string(), class))
    }

    fn exceptions(&self, form: &str, class: WordClass) -> &[String] {
        self.exceptions
            .get(&(form.to_string(), class))
            .map_or(&[], Vec::as_slice)
    }
}

impl DictionaryProvider for WordNet {
    fn provider_id(&self) -> &str {
        "wordnet"
    }

    fn senses(&self, lemma: &str) -> Result<Vec<RawSense>, ProviderError> {
        let form = lemma.trim().to_lowercase().replace(' ', "_");
        if form.is_empty() {
            return Ok(Vec::new());
        }

        let mut seen = HashSet::new();
        let mut senses = Vec::new();
        for class in WordClass::ALL {
            for base in morphy(self, &form, class) {
                let Some(offsets) = self.index.get(&(base, class)) else {
                    continue;
                };
                for &offset in offsets {
                    if seen.insert((class, offset)) {
                        senses.push(self.read_synset(class, offset)?);
                    }
                }
            }
        }
        Ok(senses)
    }
}

fn load_index(
    dict_dir: &Path,
    class: WordClass,
    index: &mut HashMap<(String, WordClass), Vec<u64>>,
) -> Result<(), DictionaryError> {
    let path = dict_dir.join(format!("index.{}", file_stem(class)));
    let content = std::fs::read_to_string(&path).map_err(|source| DictionaryError::Io {
        path: path.clone(),
        source,
    })?;

    for (line_number, line) in content.lines().enumerate() {
        if line.starts_with(' ') || line.trim().is_empty() {
            continue;
        }
        let malformed = |message: &str| DictionaryError::MalformedIndex {
            path: path.clone(),
            line: line_number + 1,
            message: message.to_string(),
        };

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(malformed("too few fields"));
        }
        let synset_count: usize = parts[2]
            .parse()
            .map_err(|_| malformed("synset_cnt is not a number"))?;
        if synset_count > parts.len() - 4 {
            return Err(malformed("synset_cnt exceeds the number of fields"));
        }
        let offsets = parts[parts.len() - synset_count..]
            .iter()
            .map(|value| value.parse::<u64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| malformed("synset offset is not a number"))?;

        index.insert((parts[0].to_string(), class), offsets);
    }
    Ok(())
}

fn load_exceptions(
    dict_dir: &Path,
    class: WordClass,
    exceptions: &mut HashMap<(String, WordClass), Vec<String>>,
) -> Result<(), DictionaryError> {
    let path = dict_dir.join(format!("{}.exc", file_stem(class)));
    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(()),
        Err(source) => return Err(DictionaryError::Io { path, source }),
    };

    for line in content.lines() {
        let mut parts = line.split_whitespace();
        let Some(form) = parts.next() else {
            continue;
        };
        let bases: Vec<String> = parts.map(str::to_string).collect();
        if !bases.is_empty() {
            exceptions.insert((form.to_string(), class), bases);
        }
    }
    Ok(())
}

/// Parses `offset lex_filenum ss_type ... | gloss`.
fn parse_data_line(line: &str, offset: u64) -> Result<RawSense, String> {
    let (columns, gloss) = line
        .split_once(" | ")
        .ok_or_else(|| "missing gloss separator".to_string())?;
    let mut fields = columns.split_whitespace();

    let line_offset = fields
        .next()
        .and_then(|value| value.parse::<u64>().ok())
        .ok_or_else(|| "missing synset offset".to_string())?;
    if line_offset != offset {
        return Err(format!("line starts with offset {line_offset}"));
    }
    let pos_code = fields
        .nth(1)
        .and_then(|value| value.chars().next())
        .ok_or_else(|| "missing ss_type".to_string())?;

    let (definition, examples) = split_gloss(gloss.trim());
    Ok(RawSense {
        definition,
        pos_code,
        examples,
    })
}

fn split_gloss(gloss: &str) -> (String, Vec<String>) {
    let examples = QUOTED_EXAMPLE
        .captures_iter(gloss)
        .filter_map(|captures| captures.get(1))
        .map(|example| example.as_str().to_string())
        .collect();
    let definition = QUOTED_EXAMPLE
        .replace_all(gloss, "")
        .trim_matches(|c| c == ';' || c == ' ')
        .to_string();
    (definition, examples)
}
