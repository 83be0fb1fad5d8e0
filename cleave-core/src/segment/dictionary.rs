//! Dictionary word-breaking for locales without interword spacing
//!
//! Chinese (with its Cantonese and script variants), Japanese, Thai, Lao,
//! Khmer, and Burmese segment words by longest-prefix match over a compiled
//! word trie instead of by break rules. Word lists live in the packaged data
//! directory, one word per line with an optional tab-separated weight, and
//! are loaded lazily into a process-wide cache on first use.

use crate::error::{CoreError, Result};
use crate::locale::Locale;
use crate::segment::rule::first_codepoint;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock, RwLock};

/// Languages with a packaged word list, keyed by canonical code.
pub const DICTIONARY_LANGUAGES: &[&str] = &["km", "lo", "my", "th", "zh"];

/// Environment variable overriding the packaged dictionary directory.
pub const DICTIONARY_DIR_VAR: &str = "CLEAVE_DICTIONARY_DIR";

/// Lookup verdict for a codepoint sequence against the trie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixMatch {
    /// The sequence is a complete word (it may extend further too).
    Word,
    /// The sequence is a strict prefix of at least one word, not a word.
    Prefix,
    /// No word starts with the sequence.
    Absent,
}

#[derive(Debug, Clone, Default)]
struct TrieNode {
    children: HashMap<char, TrieNode>,
    is_word: bool,
    weight: i64,
}

/// A word list compiled into a codepoint trie.
#[derive(Debug, Clone, Default)]
pub struct WordTrie {
    root: TrieNode,
    word_count: usize,
}

impl WordTrie {
    /// Create an empty trie.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of words inserted.
    pub fn len(&self) -> usize {
        self.word_count
    }

    /// Whether the trie contains no words.
    pub fn is_empty(&self) -> bool {
        self.word_count == 0
    }

    /// Insert one word. Weights are retained but play no role in breaking.
    pub fn insert(&mut self, word: &str, weight: i64) {
        if word.is_empty() {
            return;
        }
        let mut node = &mut self.root;
        for ch in word.chars() {
            node = node.children.entry(ch).or_default();
        }
        if !node.is_word {
            self.word_count += 1;
        }
        node.is_word = true;
        node.weight = weight;
    }

    /// Classify `sequence` as a word, a strict prefix of a word, or absent.
    pub fn find_prefix(&self, sequence: &str) -> PrefixMatch {
        let mut node = &self.root;
        for ch in sequence.chars() {
            match node.children.get(&ch) {
                Some(child) => node = child,
                None => return PrefixMatch::Absent,
            }
        }
        if node.is_word {
            PrefixMatch::Word
        } else {
            PrefixMatch::Prefix
        }
    }

    /// The stored weight of `word`, when it is present as a word.
    pub fn weight(&self, word: &str) -> Option<i64> {
        let mut node = &self.root;
        for ch in word.chars() {
            node = node.children.get(&ch)?;
        }
        node.is_word.then_some(node.weight)
    }

    /// The next segment of `text`: the longest leading word in the trie, or
    /// the first codepoint when no leading word exists.
    pub fn next_word<'t>(&self, text: &'t str) -> &'t str {
        let mut node = &self.root;
        let mut best_end = 0;
        for (idx, ch) in text.char_indices() {
            match node.children.get(&ch) {
                Some(child) => {
                    if child.is_word {
                        best_end = idx + ch.len_utf8();
                    }
                    node = child;
                }
                None => break,
            }
        }
        if best_end > 0 {
            &text[..best_end]
        } else {
            first_codepoint(text)
        }
    }

    /// Parse a packaged word list: one word per line, optional tab-separated
    /// integer weight, `#` comment lines (optionally indented or preceded by
    /// a BOM), blank lines ignored.
    pub fn parse(content: &str) -> Self {
        let mut trie = Self::new();
        for line in content.lines() {
            let line = line.strip_prefix('\u{FEFF}').unwrap_or(line);
            let trimmed = line.trim_start();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let (word, weight) = match trimmed.split_once('\t') {
                Some((word, rest)) => {
                    let weight = rest.trim().parse().unwrap_or(0);
                    (word.trim_end(), weight)
                }
                None => (trimmed.trim_end(), 0),
            };
            trie.insert(word, weight);
        }
        trie
    }

    /// Load a word list from disk.
    pub fn load(path: &Path) -> std::io::Result<Self> {
        Ok(Self::parse(&std::fs::read_to_string(path)?))
    }
}

/// Canonical dictionary language for a locale, if it is a dictionary locale.
///
/// Cantonese and the Chinese script/region variants fold to `zh`; Japanese
/// shares the Chinese dictionary.
pub fn dictionary_language(locale: &Locale) -> Option<&'static str> {
    match locale.language() {
        "zh" | "yue" | "ja" => Some("zh"),
        "th" => Some("th"),
        "lo" => Some("lo"),
        "km" => Some("km"),
        "my" => Some("my"),
        _ => None,
    }
}

fn dictionary_dir() -> PathBuf {
    match std::env::var_os(DICTIONARY_DIR_VAR) {
        Some(dir) => PathBuf::from(dir),
        None => Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("data")
            .join("dictionaries"),
    }
}

fn dictionary_cache() -> &'static RwLock<HashMap<&'static str, Arc<WordTrie>>> {
    static CACHE: OnceLock<RwLock<HashMap<&'static str, Arc<WordTrie>>>> = OnceLock::new();
    CACHE.get_or_init(|| RwLock::new(HashMap::new()))
}

/// The compiled trie for a canonical dictionary language, loading it on
/// first use. Entries are never evicted.
pub(crate) fn dictionary(language: &'static str) -> Result<Arc<WordTrie>> {
    if let Some(trie) = dictionary_cache()
        .read()
        .expect("dictionary cache poisoned")
        .get(language)
    {
        return Ok(Arc::clone(trie));
    }

    let path = dictionary_dir().join(format!("{language}.txt"));
    let trie = WordTrie::load(&path).map_err(|source| CoreError::DictionaryUnavailable {
        language: language.to_string(),
        path: path.clone(),
        source,
    })?;
    let trie = Arc::new(trie);

    let mut cache = dictionary_cache().write().expect("dictionary cache poisoned");
    // A racing loader may have stored the same language; keep the first.
    Ok(Arc::clone(
        cache.entry(language).or_insert_with(|| Arc::clone(&trie)),
    ))
}

/// Canonical languages whose tries are currently resident.
pub fn loaded_dictionaries() -> Vec<&'static str> {
    let mut loaded: Vec<&'static str> = dictionary_cache()
        .read()
        .expect("dictionary cache poisoned")
        .keys()
        .copied()
        .collect();
    loaded.sort_unstable();
    loaded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_find_prefix() {
        let mut trie = WordTrie::new();
        trie.insert("你好", 0);
        trie.insert("你们", 0);

        assert_eq!(trie.find_prefix("你"), PrefixMatch::Prefix);
        assert_eq!(trie.find_prefix("你好"), PrefixMatch::Word);
        assert_eq!(trie.find_prefix("他"), PrefixMatch::Absent);
        assert_eq!(trie.find_prefix("你好吗"), PrefixMatch::Absent);
    }

    #[test]
    fn test_prefix_consistency() {
        // If a sequence is a word, every strict prefix is prefix-or-word.
        let mut trie = WordTrie::new();
        trie.insert("ประเทศไทย", 0);
        trie.insert("ประเทศ", 0);

        assert_eq!(trie.find_prefix("ประเทศไทย"), PrefixMatch::Word);
        assert_eq!(trie.find_prefix("ประเทศ"), PrefixMatch::Word);
        assert_eq!(trie.find_prefix("ประ"), PrefixMatch::Prefix);
    }

    #[test]
    fn test_next_word_takes_longest_match() {
        let mut trie = WordTrie::new();
        trie.insert("中", 0);
        trie.insert("中国", 0);
        trie.insert("中国人", 0);

        assert_eq!(trie.next_word("中国人民"), "中国人");
        assert_eq!(trie.next_word("中华"), "中");
    }

    #[test]
    fn test_next_word_falls_back_to_single_codepoint() {
        let mut trie = WordTrie::new();
        trie.insert("你们", 0);

        // "你好" walks into the trie but ends in a prefix that is not a
        // word, so the segment is the initial codepoint.
        assert_eq!(trie.next_word("你好"), "你");
        // Absent entirely.
        assert_eq!(trie.next_word("布鲁"), "布");
    }

    #[test]
    fn test_parse_word_list() {
        let content = "\u{FEFF}# header comment\n  # indented comment\n\n你好\t500\n你们\n中国 \n";
        let trie = WordTrie::parse(content);
        assert_eq!(trie.len(), 3);
        assert_eq!(trie.find_prefix("你好"), PrefixMatch::Word);
        assert_eq!(trie.weight("你好"), Some(500));
        assert_eq!(trie.weight("你们"), Some(0));
        assert_eq!(trie.find_prefix("中国"), PrefixMatch::Word);
    }

    #[test]
    fn test_dictionary_language_folding() {
        let lang = |s: &str| dictionary_language(&Locale::parse(s).unwrap());
        assert_eq!(lang("zh"), Some("zh"));
        assert_eq!(lang("zh-Hant-HK"), Some("zh"));
        assert_eq!(lang("yue-Hant"), Some("zh"));
        assert_eq!(lang("ja"), Some("zh"));
        assert_eq!(lang("th"), Some("th"));
        assert_eq!(lang("en"), None);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let missing = Path::new("/nonexistent/zz.txt");
        assert!(WordTrie::load(missing).is_err());
    }
}
