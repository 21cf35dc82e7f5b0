pub mod handlers;
pub mod learning;
pub mod prompts;
pub mod youtube;
