// Arabic stopword filtering.
//
// The set combines the Arabic list shipped by the `stop-words` crate with a
// fixed list of common function words that the standard list misses. It is
// built once per process and only ever read afterwards.

use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use stop_words::{get, LANGUAGE};
use tracing::debug;

/// Function words removed in addition to the standard Arabic list.
pub const CUSTOM_STOPWORDS: &[&str] = &[
    "و", "في", "على", "من", "إلى", "عن", "مع", "إن", "إلا", "هذا", "تلك",
    "ذلك", "التي", "هو", "هي", "هم", "أو", "أي", "أيضا", "كان", "تكون",
    "عندما", "لذلك", "لكن", "لأن", "هذه", "أن", "أنت", "نحن", "أنتِ", "له",
    "لها", "علي", "لن", "فيما", "مما", "منذ", "إحدى", "لا", "ال", "أكثر",
    "أقل", "أولا", "سوف", "عند", "الذي", "الذين", "ثم", "لم", "لو", "ماذا",
    "بين", "إذا", "بعد", "قبل", "داخل", "خارج", "بعض", "كل", "أول", "ثاني",
    "آخر", "الأخرى", "نعم", "بينما",
];

static GLOBAL: LazyLock<Arc<StopwordSet>> = LazyLock::new(|| Arc::new(StopwordSet::arabic()));

/// An immutable set of words to drop from token streams.
#[derive(Debug, Clone, Default)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    /// The standard Arabic list plus [`CUSTOM_STOPWORDS`].
    pub fn arabic() -> Self {
        let standard: Vec<String> = get(LANGUAGE::Arabic);
        let mut words: HashSet<String> = standard.into_iter().collect();
        words.extend(CUSTOM_STOPWORDS.iter().map(|w| w.to_string()));

        debug!(count = words.len(), "Built Arabic stopword set");
        Self { words }
    }

    /// A set containing exactly the given words.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// The process-wide Arabic set, built on first use and shared after.
    pub fn global() -> Arc<Self> {
        Arc::clone(&GLOBAL)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// All words in the set, for handing to extractors that take a list.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// Split cleaned text on whitespace and keep the tokens not in the set.
    ///
    /// Order and duplicates are preserved.
    pub fn filter(&self, cleaned: &str) -> Vec<String> {
        cleaned
            .split_whitespace()
            .filter(|token| !self.contains(token))
            .map(str::to_string)
            .collect()
    }
}

/// Filter cleaned text against the process-wide Arabic stopword set.
pub fn filter_stopwords(cleaned: &str) -> Vec<String> {
    StopwordSet::global().filter(cleaned)
}
