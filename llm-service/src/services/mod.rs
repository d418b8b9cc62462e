//! Provider service implementations.

pub mod open_ai_service;
