//! Response encodings.
//!
//! Every command renders as JSON. Parse output can also be rendered as
//! CoNLL: one line per token with tab-separated columns
//!
//! ```text
//! ID  FORM  LEMMA  UPOS  XPOS  FEATS  HEAD  DEPREL  DEPS  MISC
//! ```
//!
//! where lemma, features and the multi-word columns are `_`, both tag
//! columns carry the same tag, and sentences are separated by a blank line.

use std::fmt::Write;

use serde::Serialize;

use crate::Result;
use crate::types::ParsedSentence;

/// How a parse result is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParseFormat {
    #[default]
    Json,
    Conll,
}

impl ParseFormat {
    /// Parse a `format` request value (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "conll" | "conllu" => Some(Self::Conll),
            _ => None,
        }
    }
}

/// Encode `value` as JSON.
///
/// Pretty output is indented and ends with a newline; compact output has
/// neither. Both carry the same value.
pub fn to_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String> {
    if pretty {
        let mut out = serde_json::to_string_pretty(value)?;
        out.push('\n');
        Ok(out)
    } else {
        Ok(serde_json::to_string(value)?)
    }
}

/// Render parsed sentences as CoNLL blocks.
pub fn to_conll(sentences: &[ParsedSentence]) -> String {
    let mut out = String::new();
    for (i, sentence) in sentences.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        for token in &sentence.tokens {
            // Writing into a String cannot fail.
            let _ = writeln!(
                out,
                "{}\t{}\t_\t{}\t{}\t_\t{}\t{}\t_\t_",
                token.id, token.form, token.tag, token.tag, token.head, token.relation
            );
        }
    }
    out
}
