// Text preparation: normalization and stopword filtering.

pub mod normalize;
pub mod stopwords;

pub use normalize::normalize;
pub use stopwords::{filter_stopwords, StopwordSet};
