//! Configuration types for the LLM service.

pub mod llm_model_config;
