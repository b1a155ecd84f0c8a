// HTTP server modules
pub mod handlers;
pub mod models;
pub mod routes;

// Settings, logging and errors
pub mod config;
pub mod errors;
pub mod logger;

// LLM abstraction layer
pub mod llm;
