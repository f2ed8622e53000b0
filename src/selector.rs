//! Greedy randomized selection from the sample corpus.

use crate::corpus::SampleCorpus;
use crate::error::SelectionError;
use crate::i18n::Language;
use crate::text::CandidateText;
use rand::Rng;
use tracing::{debug, info};

/// Selection stops once the accumulated count reaches this share of the target
pub const FALLBACK_FLOOR_RATIO: f64 = 0.9;

/// Accepted entries never push the accumulated count above this share of the target
pub const FALLBACK_CEILING_RATIO: f64 = 1.1;

/// Pick corpus entries for `language` until their combined word count lands
/// in the band around `target`.
///
/// Entries are drawn uniformly at random without replacement. An entry that
/// would overshoot the ceiling is discarded for good. If the pool runs dry
/// before the floor is reached, whatever was accepted is returned.
pub fn select_fallback<R: Rng + ?Sized>(
    corpus: &SampleCorpus,
    language: Language,
    target: u32,
    rng: &mut R,
) -> Result<Vec<CandidateText>, SelectionError> {
    let mut pool: Vec<&CandidateText> = corpus.texts_for(language).iter().collect();
    if pool.is_empty() {
        return Err(SelectionError::EmptyCorpus {
            language: language.code().to_string(),
        });
    }

    let floor = f64::from(target) * FALLBACK_FLOOR_RATIO;
    let ceiling = f64::from(target) * FALLBACK_CEILING_RATIO;

    let mut selected = Vec::new();
    let mut accumulated = 0u32;

    while f64::from(accumulated) < floor && !pool.is_empty() {
        let entry = pool.swap_remove(rng.gen_range(0..pool.len()));
        let count = entry.word_count.unwrap_or(0);

        if f64::from(accumulated + count) <= ceiling {
            accumulated += count;
            selected.push(entry.clone());
        } else {
            debug!(
                "Skipping fallback text \"{}\" ({} words would exceed {:.0})",
                entry.title.as_deref().unwrap_or_default(),
                count,
                ceiling
            );
        }
    }

    if f64::from(accumulated) < floor {
        info!(
            "Fallback corpus for {} exhausted at {} of {} words",
            language, accumulated, target
        );
    }

    Ok(selected)
}
