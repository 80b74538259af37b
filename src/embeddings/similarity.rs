// Vector helpers shared by the embedding strategies.

/// Cosine similarity between two vectors, in -1.0..=1.0.
///
/// Negative values are kept. Mismatched or empty inputs and zero vectors
/// give 0.0.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let mag_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let mag_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    let denom = mag_a * mag_b;
    if denom < f64::EPSILON {
        0.0
    } else {
        (dot / denom).clamp(-1.0, 1.0)
    }
}

/// Mean of the components of one vector; 0.0 when empty.
pub fn component_mean(v: &[f64]) -> f64 {
    if v.is_empty() {
        0.0
    } else {
        v.iter().sum::<f64>() / v.len() as f64
    }
}

/// Round to four decimal places, the precision similarity scores are reported at.
pub fn round4(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}
