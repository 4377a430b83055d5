//! Model implementations behind the capability traits.
//!
//! Each model is loaded from one file and is immutable afterwards. The
//! algorithms are small and deterministic; anything implementing the
//! traits in [`traits`] can replace them through the registry builder.

mod classifier;
mod comparator;
mod detector;
mod embeddings;
mod frames;
mod labeler;
mod loader;
mod locations;
mod morphology;
mod parser;
mod phrase;
mod pipeline;
mod scoring;
mod summarizer;
mod tokenizer;
pub mod traits;

pub use classifier::{ClassifierModel, KeywordClassifier};
pub use comparator::{TextComparator, rank};
pub use detector::{DetectorModel, TrigramDetector};
pub use embeddings::{EmbeddingsModel, WordEmbeddings};
pub use frames::{FrameModel, PatternFrameExtractor};
pub use labeler::{GazetteerLabeler, LabelerModel};
pub(crate) use labeler::labeled_spans;
pub use locations::{GazetteerLocations, LocationsModel};
pub use morphology::{MorphologyDictionary, MorphologyModel};
pub use parser::{LexiconParser, ParserModel};
pub use pipeline::{ParsePipeline, SummarizePipeline};
pub use scoring::{KeywordSet, cosine};
pub use summarizer::{FrequencySummarizer, SummarizerModel};
pub use tokenizer::{RuleTokenizer, TokenizerModel};
pub use traits::{
    Classifier, Comparator, DependencyParser, Embeddings, FrameExtractor, Labeler, LanguageDetector,
    LocationsDictionary, Morphology, Summarizer, Tokenizer,
};
