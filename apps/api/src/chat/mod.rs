// Compliance chat: stateless relay of user questions to the model under a
// fixed regulatory-expert persona. No conversation history, no session state.

pub mod handlers;
pub mod prompts;
