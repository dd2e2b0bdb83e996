//! # glot-core
//!
//! Foundation vocabulary for the glot media-translation pipeline.
//!
//! This crate provides the shared pieces every other glot crate depends on:
//!
//! - **Language tables**: [`lang`] — the supported-language set, recognizer
//!   name normalization, and the short↔model code table, validated at startup
//! - **Detection**: [`detect::LanguageDetector`] trait and the script-based
//!   [`detect::ScriptDetector`] heuristic
//! - **Text**: [`text::word_budget`] for the translation size guard
//! - **Logging**: [`logging::init_logging`] tracing-subscriber setup
//!
//! ## Crate Position
//!
//! Foundation crate. Depended on by all other glot crates.

#![deny(unsafe_code)]

pub mod detect;
pub mod lang;
pub mod logging;
pub mod text;
