//! Deterministic embedding stand-ins.
//!
//! Both embedders are pure functions of their input text, so anything built
//! on top of them (store contents, search results, test assertions) is
//! reproducible without calling a real embedding model.

/// A text embedder producing fixed-length vectors.
///
/// Implementors must return a vector of exactly [`dimension`](Embedder::dimension)
/// values from every [`embed`](Embedder::embed) call. Embedding never fails;
/// malformed input degrades to a placeholder vector instead of an error.
pub trait Embedder {
    /// Fixed length of every vector this embedder produces.
    fn dimension(&self) -> usize;

    /// Maps one text to a vector of exactly `dimension()` values.
    fn embed(&self, text: &str) -> Vec<f32>;

    /// Embeds many texts, one vector per input, preserving input order.
    fn embed_batch(&self, texts: &[String]) -> Vec<Vec<f32>> {
        texts.iter().map(|text| self.embed(text)).collect()
    }
}

/// Output dimension of [`CharCodeEmbedder`].
pub const CHAR_CODE_DIM: usize = 100;

/// Embeds text from its character codes.
///
/// The first 100 code points become the vector components, followed by a
/// sentinel `1.0` and zero padding up to 100 values, then the whole thing is
/// L2-normalized. The sentinel keeps the norm at least 1 for any input
/// shorter than 100 characters, so `embed("")` is the one-hot vector at
/// index 0.
///
/// Known quirk, kept on purpose: for inputs of 100 or more characters the
/// final truncation drops the sentinel again, so a 100-character run of NUL
/// characters normalizes against a zero norm and yields non-finite
/// components.
pub struct CharCodeEmbedder;

impl Embedder for CharCodeEmbedder {
    fn dimension(&self) -> usize {
        CHAR_CODE_DIM
    }

    fn embed(&self, text: &str) -> Vec<f32> {
        let mut values: Vec<f32> = text.chars()
            .take(CHAR_CODE_DIM)
            .map(|c| c as u32 as f32)
            .collect();

        values.push(1.0);
        if values.len() < CHAR_CODE_DIM {
            values.resize(CHAR_CODE_DIM, 0.0);
        }
        values.truncate(CHAR_CODE_DIM);

        let norm = crate::vector::magnitude(&values);
        values.iter().map(|x| x / norm).collect()
    }
}

/// Embeds text by parsing it as a JSON number array.
///
/// Lets a caller control the exact embedding value end-to-end: the "text" is
/// the vector, serialized. Input that fails to parse, or parses to the wrong
/// length, is logged and replaced with an all-zero vector of the configured
/// dimension, so batch embedding of mixed valid/invalid texts never aborts.
pub struct ParserEmbedder {
    dimension: usize,
}

impl ParserEmbedder {
    pub fn new(dimension: usize) -> ParserEmbedder {
        ParserEmbedder { dimension }
    }
}

impl Embedder for ParserEmbedder {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn embed(&self, text: &str) -> Vec<f32> {
        match serde_json::from_str::<Vec<f32>>(text) {
            Ok(values) if values.len() == self.dimension => values,
            Ok(values) => {
                tracing::warn!(
                    got = values.len(),
                    expected = self.dimension,
                    "text parsed to the wrong dimension, returning zeros"
                );
                vec![0.0; self.dimension]
            }
            Err(error) => {
                tracing::warn!(%error, "text could not be parsed as a vector, returning zeros");
                vec![0.0; self.dimension]
            }
        }
    }
}
