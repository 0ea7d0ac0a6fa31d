// Slash commands
pub mod leave;
pub mod responder;
pub mod welcome;
