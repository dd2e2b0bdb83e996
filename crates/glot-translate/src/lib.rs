//! Multi-target translation with provider fallback and bounded fan-out.
//!
//! # Architecture
//!
//! ```text
//! TranslationRequest → dedup targets → script-detect source
//! → identity partition (target == source: verbatim copy, no provider)
//! → bounded fan-out (one task per target, HTTP cap 5 / local-model cap 3)
//!   each task: provider fallback chain in priority order
//! → aggregate keyed by target → TranslationOutcome
//! ```
//!
//! Per-target and per-provider failures degrade (fall through the chain,
//! then echo the source text); the only surfaced error is needing providers
//! and having none.
//!
//! ## Crate Position
//!
//! Depends on: glot-core (language tables, script detection, word budget).
//! Depended on by: glot-pipeline.

pub mod chain;
pub mod orchestrator;
pub mod provider;
pub mod rest;
pub mod types;

pub use chain::{ChainOutcome, FallbackChain};
pub use orchestrator::{Orchestrator, OrchestratorConfig};
pub use provider::{ProviderError, ProviderKind, TranslationProvider};
pub use rest::RestTranslator;
pub use types::{TranslateError, TranslationOutcome, TranslationRequest};
