//! Prompt composition - phrase selection, fan-out and final prompt text

pub mod composer;
pub mod edits;
pub mod fanout;

pub use composer::PromptComposer;
pub use edits::EditKind;
pub use fanout::{RequestSpec, Subject, VARIATIONS_PER_BACKGROUND};

/// Instruction keeping the generated subject faithful to the input photo
pub const SUBJECT_FIDELITY_CLAUSE: &str = "Maintain precise replication of subject's pose, head tilt, and eye line, \
     angle toward the camera, skin tone, and any jewelry.";

/// Final prompt sent to the generation model
pub fn build_prompt(presentation: &str, attire_phrase: &str, background_phrase: &str) -> String {
    let presentation = presentation.trim().to_lowercase();
    let background_phrase = background_phrase.trim().trim_end_matches('.');

    format!(
        "Put this {} subject in professional studio lighting, wearing {}, background is {}. {}",
        presentation, attire_phrase, background_phrase, SUBJECT_FIDELITY_CLAUSE
    )
}
