// Service exports
pub mod cache;
pub mod catalog;
pub mod embedding;
pub mod history;
pub mod llm;
pub mod vector_store;

pub use cache::EmbeddingCache;
pub use catalog::{CatalogClient, CatalogError};
pub use embedding::{EmbeddingClient, EmbeddingError};
pub use history::{HistoryError, HistoryStore};
pub use llm::{LlmClient, LlmError};
pub use vector_store::{VectorStoreClient, VectorStoreError};
