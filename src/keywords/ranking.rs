// Ranked keyword lists and the reductions shared by every extractor.
//
// Extractors disagree on what a good score is: TF-IDF weights and cosine
// similarities are better when higher, YAKE costs are better when lower.
// `ScoreOrder` carries that direction so deduplication and sorting can be
// written once and tested without any extractor involved.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One keyword with the score a strategy assigned to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordScore {
    pub keyword: String,
    pub score: f64,
}

impl KeywordScore {
    pub fn new(keyword: impl Into<String>, score: f64) -> Self {
        Self {
            keyword: keyword.into(),
            score,
        }
    }
}

/// Which direction of the score axis ranks first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreOrder {
    /// Larger scores are better (weights, similarities, fused sums).
    HigherIsBetter,
    /// Smaller scores are better (statistical costs).
    LowerIsBetter,
}

impl ScoreOrder {
    /// True when `candidate` should replace `current` as the best score.
    pub fn prefers(self, candidate: f64, current: f64) -> bool {
        match self {
            Self::HigherIsBetter => candidate > current,
            Self::LowerIsBetter => candidate < current,
        }
    }

    /// Compare two entries so the best one sorts first. Equal scores fall
    /// back to the keyword text so output is deterministic.
    fn compare(self, a: &KeywordScore, b: &KeywordScore) -> Ordering {
        let by_score = match self {
            Self::HigherIsBetter => b.score.total_cmp(&a.score),
            Self::LowerIsBetter => a.score.total_cmp(&b.score),
        };
        by_score.then_with(|| a.keyword.cmp(&b.keyword))
    }
}

/// The output of one strategy: entries in rank order, best first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedKeywords {
    pub order: ScoreOrder,
    pub entries: Vec<KeywordScore>,
}

impl RankedKeywords {
    /// Deduplicate, sort and truncate raw `(keyword, score)` pairs.
    pub fn from_scores<I>(scores: I, order: ScoreOrder, top_n: usize) -> Self
    where
        I: IntoIterator<Item = (String, f64)>,
    {
        let mut entries = dedup_best(scores, order);
        sort_entries(&mut entries, order);
        entries.truncate(top_n);
        Self { order, entries }
    }

    pub fn empty(order: ScoreOrder) -> Self {
        Self {
            order,
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.keyword.as_str())
    }

    /// Score of an exact keyword, if present.
    pub fn score_of(&self, keyword: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.keyword == keyword)
            .map(|e| e.score)
    }

    /// Whether entries respect `order` from first to last.
    pub fn is_ranked(&self) -> bool {
        self.entries.windows(2).all(|pair| match self.order {
            ScoreOrder::HigherIsBetter => pair[0].score >= pair[1].score,
            ScoreOrder::LowerIsBetter => pair[0].score <= pair[1].score,
        })
    }
}

/// Collapse repeated keywords, keeping the best score for each.
///
/// The result keeps first-seen order; callers sort afterwards.
pub fn dedup_best<I>(scores: I, order: ScoreOrder) -> Vec<KeywordScore>
where
    I: IntoIterator<Item = (String, f64)>,
{
    let mut position: HashMap<String, usize> = HashMap::new();
    let mut entries: Vec<KeywordScore> = Vec::new();

    for (keyword, score) in scores {
        match position.get(&keyword) {
            Some(&idx) => {
                if order.prefers(score, entries[idx].score) {
                    entries[idx].score = score;
                }
            }
            None => {
                position.insert(keyword.clone(), entries.len());
                entries.push(KeywordScore { keyword, score });
            }
        }
    }

    entries
}

/// Sort best-first according to `order`, ties broken by keyword text.
pub fn sort_entries(entries: &mut [KeywordScore], order: ScoreOrder) {
    entries.sort_by(|a, b| order.compare(a, b));
}
