//! Mimir - HTTP gateway for pretrained NLP models
//!
//! Mimir loads a set of text-analysis models at startup, works out which
//! capabilities they add up to for each language or domain, and serves
//! each capability as a command.
//!
//! The core (registry, resolution, commands, response encoding) is a plain
//! synchronous library. The `server` feature adds the HTTP surface and the
//! `mimird` daemon.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//!
//! use mimir::registry::ModelsConfig;
//! use mimir::{Mimir, RequestContext};
//!
//! fn main() -> mimir::Result<()> {
//!     let gateway = Mimir::builder()
//!         .models(ModelsConfig {
//!             tokenizers: Some(PathBuf::from("/models/tokenizers")),
//!             language_detector: Some(PathBuf::from("/models/langid.json")),
//!             ..ModelsConfig::default()
//!         })
//!         .build()?;
//!
//!     let tokenized = gateway.tokenize(&RequestContext::new("Hello there. How are you?"))?;
//!     println!("{} sentences in {}", tokenized.sentences.len(), tokenized.language);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod format;
pub mod gateway;
pub mod models;
pub mod registry;
pub mod resolve;
#[cfg(feature = "server")]
pub mod server;
pub mod telemetry;
pub mod types;
pub mod version;

// Re-export main types at crate root
pub use error::{ErrorKind, MimirError, Result};
pub use gateway::{CompareConfig, Gateway, Mimir, MimirBuilder, RequestContext};
pub use registry::{Capability, CapabilityRegistry, RegistryBuilder};
pub use version::{PKG_VERSION, version_string};

pub use types::{
    Candidate, CandidateId, Capabilities, CapabilityKind, Classification, Comparison, Detection,
    Domain, DomainOutput, Frame, Language, LanguageScore, Location, LocationMatch, Locations,
    Parsed, Similarity, Summarized, Summary, Tagged, TokenLanguage, Tokenized,
};
