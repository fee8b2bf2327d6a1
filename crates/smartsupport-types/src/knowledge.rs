//! Knowledge-base management result types.
//!
//! These operations are stateless pass-throughs to the backend; the client
//! only decodes their results.

use serde::{Deserialize, Serialize};

/// Result of ingesting documents or raw text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestResult {
    pub chunks_added: u64,
    pub message: String,
}

/// Size and name of the backend's document collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeBaseStats {
    pub total_documents: u64,
    pub collection_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_deserialize() {
        let stats: KnowledgeBaseStats =
            serde_json::from_str(r#"{"total_documents": 42, "collection_name": "documents"}"#)
                .unwrap();
        assert_eq!(stats.total_documents, 42);
        assert_eq!(stats.collection_name, "documents");
    }
}
