//! Prompt builders and the deterministic fallback template.
//!
//! The system instruction pins down length, tone, and how often the child's
//! name must appear, so that adapter output stays interchangeable across
//! vendors. The fallback template produces a usable (if short) story when
//! the text adapter is unavailable or returns nothing.

use crate::Language;

/// System instruction for story text generation.
///
/// Fixes the target length (900–1200 words), tone (warm, 4–8-year-old
/// audience), and required use of the child's name (6–8 occurrences).
pub fn story_system_instruction(lang: Language) -> String {
    format!(
        "You are a children's story writer. Write a single complete story of \
         900 to 1200 words in {language}, with a warm, gentle tone suitable \
         for children aged 4 to 8. Use the child's name naturally 6 to 8 \
         times throughout the story. Do not include headings, notes, or \
         anything except the story prose itself.",
        language = lang.name()
    )
}

/// User prompt for story text generation.
///
/// # Examples
///
/// ```
/// use taleweaver_core::story_user_prompt;
///
/// let prompt = story_user_prompt("Mia", "Ocean");
/// assert!(prompt.contains("Mia"));
/// assert!(prompt.contains("Ocean"));
/// ```
pub fn story_user_prompt(child_name: &str, theme: &str) -> String {
    format!("Write a story about {child_name} going on a {theme} adventure.")
}

/// Prompt for the illustration generated during image enrichment.
pub fn image_prompt(child_name: &str, theme: &str) -> String {
    format!(
        "A child-friendly, colorful illustration of {child_name} on a {theme} \
         adventure, storybook style, appropriate for children."
    )
}

/// Deterministic theme-based story text, used when the text adapter is
/// unavailable or returns empty output.
///
/// # Examples
///
/// ```
/// use taleweaver_core::fallback_story_text;
///
/// let text = fallback_story_text("Mia", "Ocean");
/// assert!(text.contains("Mia"));
/// assert!(text.contains("under the sea"));
/// ```
pub fn fallback_story_text(child_name: &str, theme: &str) -> String {
    let mut text = format!(
        "Once upon a time, {child_name} went on an amazing {theme} adventure. "
    );

    match theme {
        "Space" => text.push_str(&format!(
            "{child_name} blasted off in a rocket ship to explore the stars. \
             The universe was full of wonders!"
        )),
        "Ocean" => text.push_str(&format!(
            "{child_name} dove deep under the sea and discovered colorful fish \
             and hidden treasures."
        )),
        "Forest" => text.push_str(&format!(
            "{child_name} walked through the enchanted forest, talking to \
             friendly animals and magical creatures."
        )),
        _ => text.push_str(&format!(
            "It was the most exciting day of {child_name}'s life, filled with \
             wonder and joy."
        )),
    }

    text
}
