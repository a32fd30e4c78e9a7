// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// Appended to every research prompt. The model tends to emit `[1]`-style
/// source markers unless told not to.
pub const NO_CITATIONS_INSTRUCTION: &str = "Do NOT include any reference citations like [1], [2], etc. \
    at the end of sentences or paragraphs.";
