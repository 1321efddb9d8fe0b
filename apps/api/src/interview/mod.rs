// Candidate interview flow.
// Welcome → ProfileCapture → Questioning (×5) → Complete, driven by a pure
// transition function; all completion calls go through the gateway.

pub mod gateway;
pub mod handlers;
pub mod machine;
pub mod models;
pub mod prompts;
pub mod scoring;
pub mod service;
pub mod view;
