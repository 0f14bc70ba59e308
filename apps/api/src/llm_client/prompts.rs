// Shared prompt constants.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt for all regulatory analysis calls. The chat persona extends
/// this identity with formatting rules of its own (see chat::prompts).
pub const REGULATORY_EXPERT_SYSTEM: &str = "You are an FDA regulatory compliance expert.";
