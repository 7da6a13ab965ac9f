//! Random phrase selection over the catalog matrices

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

use crate::catalog::{Catalog, LookupError, COLOR_TOKEN};

/// Pick one attire template and fill in the color name
pub fn attire_phrase<R: Rng + ?Sized>(
    catalog: &Catalog,
    category: &str,
    presentation: &str,
    color: &str,
    rng: &mut R,
) -> Result<String, LookupError> {
    let templates = catalog.attire.templates(category, presentation)?;
    let template = templates
        .choose(rng)
        .ok_or_else(|| LookupError::NoTemplates {
            category: category.to_string(),
            presentation: presentation.to_string(),
        })?;
    Ok(template.replace(COLOR_TOKEN, color))
}

/// Pick one background phrase
pub fn background_phrase<R: Rng + ?Sized>(
    catalog: &Catalog,
    category: &str,
    rng: &mut R,
) -> Result<String, LookupError> {
    catalog
        .backgrounds
        .phrases(category)?
        .choose(rng)
        .cloned()
        .ok_or_else(|| LookupError::UnknownBackground(category.to_string()))
}

/// Draw `count` phrases, diverse first.
///
/// With at least `count` phrases available this samples without replacement.
/// Otherwise whole shuffled rounds of the available phrases are emitted until
/// `count` is reached, so every phrase shows up once before any repeats.
pub fn sample_variations<R: Rng + ?Sized>(
    phrases: &[String],
    count: usize,
    rng: &mut R,
) -> Vec<String> {
    if phrases.is_empty() {
        return Vec::new();
    }
    if phrases.len() >= count {
        return phrases.choose_multiple(rng, count).cloned().collect();
    }

    let mut picked = Vec::with_capacity(count);
    while picked.len() < count {
        let mut round: Vec<&String> = phrases.iter().collect();
        round.shuffle(rng);
        let remaining = count - picked.len();
        picked.extend(round.into_iter().take(remaining).cloned());
    }
    picked
}

/// Catalog plus the random source used to pick phrases.
///
/// The random source is injectable so tests can seed it; production uses an
/// entropy-seeded [`StdRng`].
pub struct PromptComposer<R = StdRng> {
    catalog: Arc<Catalog>,
    rng: Mutex<R>,
}

impl PromptComposer<StdRng> {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self::with_rng(catalog, StdRng::from_entropy())
    }
}

impl<R: Rng> PromptComposer<R> {
    pub fn with_rng(catalog: Arc<Catalog>, rng: R) -> Self {
        Self {
            catalog,
            rng: Mutex::new(rng),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn compose_attire_phrase(
        &self,
        category: &str,
        presentation: &str,
        color: &str,
    ) -> Result<String, LookupError> {
        attire_phrase(&self.catalog, category, presentation, color, &mut *self.rng.lock())
    }

    pub fn compose_background_phrase(&self, category: &str) -> Result<String, LookupError> {
        background_phrase(&self.catalog, category, &mut *self.rng.lock())
    }

    /// Exactly `count` phrases for one background category
    pub fn background_variations(
        &self,
        category: &str,
        count: usize,
    ) -> Result<Vec<String>, LookupError> {
        let phrases = self.catalog.backgrounds.phrases(category)?;
        Ok(sample_variations(phrases, count, &mut *self.rng.lock()))
    }
}
