//! The text store module
//! Provide CRUD and top-k search over texts embedded through an `Embedder`

use crate::embed::Embedder;
use crate::vector::{dot_product, euclidean_distance, magnitude};
use serde::{Serialize, Deserialize};
use std:: {
    fs::File,
    io::{
        BufReader,
        BufWriter,
    }
};

/// Scoring rule used to rank stored vectors against a query.
///
/// Scores are "higher is better" for both variants: euclidean distance is
/// negated so a single descending sort serves either metric.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Metric {
    Cosine,
    Euclidean,
}

impl Metric {
    /// Score of a stored vector against a query vector.
    ///
    /// Cosine similarity of anything against a zero vector is defined as
    /// 0.0 here, because zero vectors legitimately appear as the parser
    /// embedder's fallback output.
    fn score(&self, stored: &[f32], query: &[f32]) -> Result<f32, String> {
        match self {
            Metric::Cosine => {
                let dot = dot_product(stored, query)?;
                let denom = magnitude(stored) * magnitude(query);
                if denom == 0.0 {
                    Ok(0.0)
                } else {
                    Ok(dot / denom)
                }
            }
            Metric::Euclidean => Ok(-euclidean_distance(stored, query)?),
        }
    }
}

/// Everything that survives a save/load round trip. The embedder itself is
/// not serializable; it is reattached on load and checked for dimension.
#[derive(Serialize, Deserialize)]
struct StoreData {
    ids: Vec<String>,
    texts: Vec<String>,
    vectors: Vec<f32>,
    dimension: usize,
    metric: Metric,
}

/// An in-memory vector store over texts.
///
/// Texts are embedded on insertion through the configured [`Embedder`] and
/// stored raw (un-normalized) in a flat array, so both cosine and euclidean
/// scoring stay meaningful. Any embedder works; the store only relies on
/// the fixed output dimension.
pub struct TextStore {
    embedder: Box<dyn Embedder>,
    data: StoreData,
}

impl TextStore {
    /// Creates an empty store around an embedder and a metric.
    ///
    /// The store dimension is fixed to the embedder's output dimension.
    ///
    /// # Examples
    ///
    /// ```
    /// use tvdb::{CharCodeEmbedder, Metric, TextStore};
    ///
    /// let store = TextStore::new(Box::new(CharCodeEmbedder), Metric::Cosine);
    /// assert_eq!(store.count(), 0);
    /// assert_eq!(store.dimension(), 100);
    /// ```
    pub fn new(embedder: Box<dyn Embedder>, metric: Metric) -> TextStore {
        let dimension = embedder.dimension();
        TextStore {
            embedder,
            data: StoreData {
                ids: Vec::new(),
                texts: Vec::new(),
                vectors: Vec::new(),
                dimension,
                metric,
            },
        }
    }

    /// Embeds and upserts a batch of texts under the given ids.
    ///
    /// Each text is embedded through the store's embedder; an existing id is
    /// overwritten in place. Returns the number of rows written.
    ///
    /// # Errors
    ///
    /// Fails if `ids` and `texts` differ in length, or if the embedder
    /// breaks its dimension contract.
    ///
    /// # Examples
    ///
    /// ```
    /// use tvdb::{CharCodeEmbedder, Metric, TextStore};
    ///
    /// let mut store = TextStore::new(Box::new(CharCodeEmbedder), Metric::Cosine);
    /// let written = store.add_texts(
    ///     &["doc_0".to_string(), "doc_1".to_string()],
    ///     &["first text".to_string(), "second text".to_string()],
    /// ).unwrap();
    /// assert_eq!(written, 2);
    /// assert_eq!(store.count(), 2);
    /// ```
    pub fn add_texts(&mut self, ids: &[String], texts: &[String]) -> Result<usize, String> {
        if ids.len() != texts.len() {
            return Err(format!(
                "Got {} ids for {} texts", ids.len(), texts.len()
            ));
        }

        let vectors = self.embedder.embed_batch(texts);

        for ((id, text), vector) in ids.iter().zip(texts.iter()).zip(vectors) {
            if vector.len() != self.data.dimension {
                return Err(format!(
                    "Embedder produced dimension {} instead of {}",
                    vector.len(), self.data.dimension
                ));
            }

            // Check if ID exists and update instead
            if let Some(index) = self.data.ids.iter().position(|x| x == id) {
                let start = index * self.data.dimension;
                self.data.vectors.splice(start..start + self.data.dimension, vector);
                self.data.texts[index] = text.clone();
            } else {
                self.data.ids.push(id.clone());
                self.data.texts.push(text.clone());
                self.data.vectors.extend(vector);
            }
        }

        Ok(ids.len())
    }

    /// Searches for the `top_k` stored texts most similar to `query_text`.
    ///
    /// The query is embedded with the store's embedder and scored against
    /// every stored vector under the store's metric. Results come back as
    /// `(id, text, score)` in descending score order. An empty store yields
    /// an empty result, not an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use tvdb::{CharCodeEmbedder, Metric, TextStore};
    ///
    /// let mut store = TextStore::new(Box::new(CharCodeEmbedder), Metric::Cosine);
    /// store.add_texts(
    ///     &["a".to_string(), "b".to_string()],
    ///     &["alpha".to_string(), "bravo".to_string()],
    /// ).unwrap();
    ///
    /// let hits = store.similarity_search("alpha", 1).unwrap();
    /// assert_eq!(hits.len(), 1);
    /// assert_eq!(hits[0].0, "a"); // exact text, score ~1.0
    /// ```
    pub fn similarity_search(
        &self,
        query_text: &str,
        top_k: usize,
    ) -> Result<Vec<(String, String, f32)>, String> {
        if self.data.ids.is_empty() || top_k == 0 {
            return Ok(Vec::new());
        }

        let query = self.embedder.embed(query_text);

        let mut top: Vec<(usize, f32)> = Vec::with_capacity(top_k + 1);
        for i in 0..self.data.ids.len() {
            let score = self.data.metric.score(self.vector_at(i), &query)?;
            let insert_index = top.partition_point(|&(_, s)| s >= score);
            if insert_index < top_k {
                top.insert(insert_index, (i, score));
                top.truncate(top_k);
            }
        }

        let result = top.iter()
            .map(|(i, score)| (self.data.ids[*i].clone(), self.data.texts[*i].clone(), *score))
            .collect();

        Ok(result)
    }

    /// Retrieves the stored text and raw embedding for an id.
    pub fn get(&self, id: &str) -> Option<(String, Vec<f32>)> {
        self.data.ids.iter()
            .position(|x| x == id)
            .map(|i| (self.data.texts[i].clone(), self.vector_at(i).to_vec()))
    }

    /// Deletes one row by its ID.
    ///
    /// # Errors
    ///
    /// Fails if the store is empty or the ID does not exist.
    pub fn delete(&mut self, id: &str) -> Result<String, String> {
        if self.data.ids.is_empty() {
            return Err("Cannot delete on empty store".to_string());
        }

        match self.data.ids.iter().position(|x| x == id) {
            Some(i) => {
                self.data.vectors.splice(
                    (i * self.data.dimension)..((i + 1) * self.data.dimension),
                    std::iter::empty()
                );
                self.data.ids.remove(i);
                self.data.texts.remove(i);
                Ok("Success Delete".to_string())
            }
            None => Err("ID not found".to_string()),
        }
    }

    /// Deletes many rows by ID, skipping ids that do not exist.
    ///
    /// Returns how many rows were actually deleted.
    ///
    /// # Examples
    ///
    /// ```
    /// use tvdb::{CharCodeEmbedder, Metric, TextStore};
    ///
    /// let mut store = TextStore::new(Box::new(CharCodeEmbedder), Metric::Cosine);
    /// store.add_texts(
    ///     &["a".to_string(), "b".to_string()],
    ///     &["one".to_string(), "two".to_string()],
    /// ).unwrap();
    ///
    /// let ids = vec!["a".to_string(), "b".to_string(), "missing".to_string()];
    /// assert_eq!(store.delete_many(&ids), 2);
    /// assert_eq!(store.count(), 0);
    /// ```
    pub fn delete_many(&mut self, ids: &[String]) -> usize {
        ids.iter()
            .filter(|id| self.delete(id).is_ok())
            .count()
    }

    /// Removes every row. The dimension and metric stay fixed.
    pub fn clear(&mut self) {
        self.data.ids.clear();
        self.data.texts.clear();
        self.data.vectors.clear();
    }

    /// Returns all rows as (ID, text) pairs.
    pub fn list(&self) -> Vec<(String, String)> {
        self.data.ids.iter()
            .cloned()
            .zip(self.data.texts.iter().cloned())
            .collect()
    }

    /// Returns the number of rows in the store.
    pub fn count(&self) -> usize {
        self.data.ids.len()
    }

    /// Fixed vector dimension, taken from the embedder at construction.
    pub fn dimension(&self) -> usize {
        self.data.dimension
    }

    /// The metric this store scores with.
    pub fn metric(&self) -> Metric {
        self.data.metric
    }

    /// Vector slice at `index` in the flat array.
    ///
    /// Vectors are stored contiguously as `[v1_d1, v1_d2, ..., v2_d1, ...]`.
    /// Panics if the index is out of bounds.
    fn vector_at(&self, index: usize) -> &[f32] {
        let start = index * self.data.dimension;
        &self.data.vectors[start..start + self.data.dimension]
    }

    /// Saves the store's rows to a file using bincode serialization.
    ///
    /// Only the data goes to disk (ids, texts, vectors, dimension, metric);
    /// the embedder is supplied again on [`load`](TextStore::load).
    pub fn save(&self, path: &str) -> Result<(), String> {
        let file = File::create(path)
            .map_err(|e| format!("Fail to create file for saving '{}': {}", path, e))?;

        let writer = BufWriter::new(file);
        bincode::serialize_into(writer, &self.data)
            .map_err(|e| format!("Serialization failed: {}", e))?;

        Ok(())
    }

    /// Loads a store previously saved with [`save`](TextStore::save).
    ///
    /// # Errors
    ///
    /// Fails if the file is missing or corrupt, or if `embedder` does not
    /// produce the dimension recorded in the file.
    pub fn load(path: &str, embedder: Box<dyn Embedder>) -> Result<TextStore, String> {
        if !std::path::Path::new(path).exists() {
            return Err("File not found!".to_string());
        }

        let file = File::open(path)
            .map_err(|e| format!("Fail to open file for loading '{}': {}", path, e))?;

        let reader = BufReader::new(file);

        let data: StoreData = bincode::deserialize_from(reader)
            .map_err(|e| format!("Deserialization failed: {}", e))?;

        if embedder.dimension() != data.dimension {
            return Err(format!(
                "Embedder dimension {} does not match stored dimension {}",
                embedder.dimension(), data.dimension
            ));
        }

        Ok(TextStore { embedder, data })
    }
}
