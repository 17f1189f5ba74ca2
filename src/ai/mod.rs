//! LLM companions for a scraped day: per-reading synopses and a unified
//! reflection with Catechism citations.

pub mod client;
pub mod models;
pub mod prompts;
