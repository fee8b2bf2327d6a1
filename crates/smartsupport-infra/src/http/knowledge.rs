//! Knowledge-base management calls under `/api/documents`.
//!
//! These are stateless one-shot requests; they never touch a chat session.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use reqwest::Response;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, info};

use smartsupport_types::error::ClientError;
use smartsupport_types::knowledge::{IngestResult, KnowledgeBaseStats};

use super::client::HttpBackend;
use super::error::{self, fixed, with_status};
use super::types::{AddTextBody, ClearBody, LoadDirectoryBody};

impl HttpBackend {
    /// Upload a local document (PDF, TXT, DOCX, MD) for ingestion.
    ///
    /// The multipart `file` part carries the file name; the backend picks a
    /// loader from its extension.
    pub async fn upload_document(&self, file: &Path) -> Result<IngestResult, ClientError> {
        let bytes = tokio::fs::read(file)
            .await
            .map_err(|e| ClientError::new(format!("Failed to read {}: {e}", file.display())))?;
        let file_name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        let url = self.url("/documents/upload");
        debug!(url = %url, file = %file_name, bytes = bytes.len(), "POST upload");

        let form = Form::new().part("file", Part::bytes(bytes).file_name(file_name));
        let response = self
            .http()
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(ClientError::network)?;

        let result: IngestResult =
            decode(response, with_status("Upload error")).await?;
        info!(chunks = result.chunks_added, "document uploaded");
        Ok(result)
    }

    /// Add raw text snippets, optionally with one metadata object per text.
    pub async fn add_text(
        &self,
        texts: &[String],
        metadatas: Option<&[Map<String, Value>]>,
    ) -> Result<IngestResult, ClientError> {
        let url = self.url("/documents/add-text");
        debug!(url = %url, texts = texts.len(), "POST add-text");

        let response = self
            .http()
            .post(&url)
            .json(&AddTextBody { texts, metadatas })
            .send()
            .await
            .map_err(ClientError::network)?;

        decode(response, with_status("Error")).await
    }

    /// Ingest every supported document in a directory on the backend host.
    pub async fn load_directory(&self, directory_path: &str) -> Result<IngestResult, ClientError> {
        let url = self.url("/documents/load-directory");
        debug!(url = %url, directory = directory_path, "POST load-directory");

        let response = self
            .http()
            .post(&url)
            .json(&LoadDirectoryBody { directory_path })
            .send()
            .await
            .map_err(ClientError::network)?;

        decode(response, with_status("Error")).await
    }

    pub async fn knowledge_base_stats(&self) -> Result<KnowledgeBaseStats, ClientError> {
        let url = self.url("/documents/stats");
        debug!(url = %url, "GET stats");

        let response = self
            .http()
            .get(&url)
            .send()
            .await
            .map_err(ClientError::network)?;

        decode(response, fixed("Failed to get stats")).await
    }

    /// Remove every document from the knowledge base.
    ///
    /// Returns the backend's acknowledgement message, if it sent one.
    pub async fn clear_knowledge_base(&self) -> Result<Option<String>, ClientError> {
        let url = self.url("/documents/clear");
        debug!(url = %url, "DELETE clear");

        let response = self
            .http()
            .delete(&url)
            .send()
            .await
            .map_err(ClientError::network)?;

        if !response.status().is_success() {
            return Err(error::from_response(response, fixed("Failed to clear knowledge base")).await);
        }

        info!("knowledge base cleared");
        let body = response.text().await.map_err(ClientError::decode)?;
        if body.trim().is_empty() {
            return Ok(None);
        }
        let ack: ClearBody = serde_json::from_str(&body).map_err(ClientError::decode)?;
        Ok(ack.message)
    }
}

async fn decode<T: DeserializeOwned>(
    response: Response,
    fallback: impl FnOnce(reqwest::StatusCode) -> String,
) -> Result<T, ClientError> {
    if !response.status().is_success() {
        return Err(error::from_response(response, fallback).await);
    }
    response.json().await.map_err(ClientError::decode)
}
