//! Expansion of user selections into individual generation requests

use rand::Rng;
use serde::Serialize;

use super::{build_prompt, PromptComposer};
use crate::catalog::LookupError;

/// Number of requests produced per background in fixed-variant mode
pub const VARIATIONS_PER_BACKGROUND: usize = 5;

/// Who is in the photo and what color they wear
#[derive(Debug, Clone)]
pub struct Subject {
    pub presentation: String,
    pub color: String,
}

/// One generation request ready to submit
#[derive(Debug, Clone, Serialize)]
pub struct RequestSpec {
    pub attire: String,
    pub background: String,
    pub color: String,
    pub prompt: String,
}

/// One request per (attire, background) pair, attire-major.
/// Every pair draws its phrases independently.
pub fn combinatorial<R: Rng>(
    composer: &PromptComposer<R>,
    subject: &Subject,
    attire: &[String],
    backgrounds: &[String],
) -> Result<Vec<RequestSpec>, LookupError> {
    let mut specs = Vec::with_capacity(attire.len() * backgrounds.len());

    for clothing in attire {
        for background in backgrounds {
            let attire_phrase =
                composer.compose_attire_phrase(clothing, &subject.presentation, &subject.color)?;
            let background_phrase = composer.compose_background_phrase(background)?;

            specs.push(RequestSpec {
                attire: clothing.clone(),
                background: background.clone(),
                color: subject.color.clone(),
                prompt: build_prompt(&subject.presentation, &attire_phrase, &background_phrase),
            });
        }
    }

    Ok(specs)
}

/// Exactly [`VARIATIONS_PER_BACKGROUND`] requests per background category
/// for a single attire selection.
pub fn fixed_variants<R: Rng>(
    composer: &PromptComposer<R>,
    subject: &Subject,
    attire: &str,
    backgrounds: &[String],
) -> Result<Vec<RequestSpec>, LookupError> {
    let mut specs = Vec::with_capacity(backgrounds.len() * VARIATIONS_PER_BACKGROUND);

    for background in backgrounds {
        let variations = composer.background_variations(background, VARIATIONS_PER_BACKGROUND)?;
        for background_phrase in variations {
            let attire_phrase =
                composer.compose_attire_phrase(attire, &subject.presentation, &subject.color)?;

            specs.push(RequestSpec {
                attire: attire.to_string(),
                background: background.clone(),
                color: subject.color.clone(),
                prompt: build_prompt(&subject.presentation, &attire_phrase, &background_phrase),
            });
        }
    }

    Ok(specs)
}
