use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

use super::config::{parse_romaji_toml, RomajiConfigError};
use super::table::DEFAULT_TOML;

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

struct Node {
    children: HashMap<char, Node>,
    latin: Option<String>,
}

impl Node {
    fn new() -> Self {
        Self {
            children: HashMap::new(),
            latin: None,
        }
    }
}

/// Character trie over kana sequences, used for longest-match transliteration.
pub struct KanaTrie {
    root: Node,
}

impl KanaTrie {
    /// Set custom TOML before first `global()` call.
    pub fn init_custom(toml_content: String) -> Result<(), RomajiConfigError> {
        // Validate eagerly
        parse_romaji_toml(&toml_content)?;
        CUSTOM_TOML
            .set(toml_content)
            .map_err(|_| RomajiConfigError::AlreadyInitialized)
    }

    /// Get or initialize the global singleton.
    pub fn global() -> &'static KanaTrie {
        static INSTANCE: OnceLock<KanaTrie> = OnceLock::new();
        INSTANCE.get_or_init(|| {
            let toml_str = CUSTOM_TOML
                .get()
                .map(|s| s.as_str())
                .unwrap_or(DEFAULT_TOML);
            let map = parse_romaji_toml(toml_str).expect("romaji TOML must be valid");
            KanaTrie::from_mappings(&map)
        })
    }

    pub fn from_mappings(map: &BTreeMap<String, String>) -> Self {
        let mut trie = KanaTrie { root: Node::new() };
        for (kana, latin) in map {
            trie.insert(kana, latin);
        }
        trie
    }

    /// Longest table entry that is a prefix of `chars`.
    ///
    /// Returns the number of characters consumed and the Latin spelling.
    pub fn longest_match(&self, chars: &[char]) -> Option<(usize, &str)> {
        let mut node = &self.root;
        let mut best = None;
        for (i, c) in chars.iter().enumerate() {
            match node.children.get(c) {
                Some(child) => node = child,
                None => break,
            }
            if let Some(latin) = &node.latin {
                best = Some((i + 1, latin.as_str()));
            }
        }
        best
    }

    /// Exact lookup of a whole kana sequence.
    pub fn get(&self, kana: &str) -> Option<&str> {
        let mut node = &self.root;
        for c in kana.chars() {
            node = node.children.get(&c)?;
        }
        node.latin.as_deref()
    }

    fn insert(&mut self, kana: &str, latin: &str) {
        let mut node = &mut self.root;
        for c in kana.chars() {
            node = node.children.entry(c).or_insert_with(Node::new);
        }
        node.latin = Some(latin.to_string());
    }
}
