// Shared prompt fragments. Each feature that calls the model keeps its own
// prompts.rs alongside it and composes these.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "Only respond with a single valid JSON object matching the required schema. \
    No prose, no markdown, no code fences.";

/// Delimiter used to fence user-supplied documents inside prompts.
pub const TEXT_FENCE: &str = "\"\"\"";
