//! # TVDB - A Deterministic Text Vector Store
//!
//! TVDB is a small in-memory vector store over texts, built for exercising
//! vector-search behavior without a hosted database or a real embedding
//! model. Texts are embedded through pluggable, fully deterministic
//! embedders and ranked by cosine similarity or euclidean distance, so
//! every run of a test or script produces the same vectors and the same
//! search results.
//!
//! ## Example
//!
//! ```
//! use tvdb::{CharCodeEmbedder, Metric, TextStore};
//!
//! let mut store = TextStore::new(Box::new(CharCodeEmbedder), Metric::Cosine);
//!
//! // Insert texts (embedded on the way in)
//! store.add_texts(
//!     &["doc_0".to_string(), "doc_1".to_string()],
//!     &["the first document".to_string(), "the second document".to_string()],
//! ).unwrap();
//!
//! // Search for similar texts
//! let hits = store.similarity_search("the first document", 1).unwrap();
//! assert_eq!(hits[0].0, "doc_0"); // Most similar text
//! ```

pub mod vector;
pub mod embed;
pub mod timer;
mod store;

// Re-export the primary public API
pub use embed::{CHAR_CODE_DIM, CharCodeEmbedder, Embedder, ParserEmbedder};
pub use store::{Metric, TextStore};
pub use timer::ScopedTimer;
