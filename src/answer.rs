//! Answer formatting: the fixed template wrapped around retrieved context.

/// Prefix prepended to every answer.
pub const ANSWER_PREFIX: &str = "Based on the document: ";

/// Wrap retrieved context in the answer template.
///
/// The context is included verbatim; no generation or paraphrasing happens
/// here, so answers are exactly as reproducible as retrieval is.
///
/// ```
/// use ragprobe::answer::format_answer;
///
/// assert_eq!(
///     format_answer("The Eiffel Tower is in Paris."),
///     "Based on the document: The Eiffel Tower is in Paris."
/// );
/// ```
#[must_use]
pub fn format_answer(context: &str) -> String {
    format!("{ANSWER_PREFIX}{context}")
}
