//! Public types for the Mimir API.

mod analysis;
mod capabilities;
mod compare;
mod domain;
mod language;
mod location;
mod output;
mod summary;
pub mod text;

pub use analysis::{
    Classification, DomainOutput, Frame, LabelScore, LabeledToken, Labels, ParsedSentence,
    ParsedToken, SlotFill, Tagged,
};
pub(crate) use analysis::top;
pub use capabilities::{Capabilities, CapabilityKind};
pub use compare::{Candidate, CandidateId, Similarity};
pub use domain::Domain;
pub use language::{Language, LanguageScore};
pub use location::{Location, LocationMatch};
pub use output::{Comparison, Detection, Locations, Parsed, Summarized, TokenLanguage, Tokenized};
pub use summary::{Itemset, SentenceScore, Summary, TermScore};
pub use text::{Sentence, Token};
