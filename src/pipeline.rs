/*!
 * Document-level translation driver.
 *
 * Chunks a document, fans the chunks out to the translator concurrently,
 * and routes each chunk's failure through its own fallback cascade. One
 * chunk's escalation never aborts the rest of the document.
 */

use anyhow::{anyhow, Result};
use futures::stream::{self, StreamExt};
use log::{debug, warn};
use std::sync::Arc;
use tokio::sync::Semaphore;

use crate::chunking::{Chunk, Chunker};
use crate::fallback::{FallbackOrchestrator, FallbackRequest};
use crate::translator::{PromptOptions, TranslationOutcome, Translator};

/// A chunk paired with its final translation outcome
#[derive(Debug, Clone)]
pub struct TranslatedChunk {
    /// The source chunk
    pub chunk: Chunk,

    /// The outcome, from the translator or from a fallback strategy
    pub outcome: TranslationOutcome,
}

/// Drives a whole document through chunking, translation and fallback
pub struct DocumentTranslator {
    /// Document chunker
    chunker: Chunker,

    /// Translator collaborator
    translator: Arc<dyn Translator>,

    /// Fallback cascade, run per failing chunk
    orchestrator: Arc<FallbackOrchestrator>,

    /// Maximum chunks translated concurrently
    max_concurrent_chunks: usize,
}

impl DocumentTranslator {
    /// Create a driver from its components
    pub fn new(
        chunker: Chunker,
        translator: Arc<dyn Translator>,
        orchestrator: Arc<FallbackOrchestrator>,
        max_concurrent_chunks: usize,
    ) -> Self {
        Self {
            chunker,
            translator,
            orchestrator,
            max_concurrent_chunks: max_concurrent_chunks.max(1),
        }
    }

    /// Translate a document, returning one outcome per chunk in source order
    pub async fn translate_document(
        &self,
        text: &str,
        options: &PromptOptions,
    ) -> Result<Vec<TranslatedChunk>> {
        let chunks = self.chunker.chunk(text);
        debug!("Translating document as {} chunks", chunks.len());

        // Each chunk's failure independently triggers its own cascade; the
        // semaphore bounds concurrent translator calls
        let semaphore = Arc::new(Semaphore::new(self.max_concurrent_chunks));

        let results = stream::iter(chunks.into_iter())
            .map(|chunk| {
                let translator = self.translator.clone();
                let orchestrator = self.orchestrator.clone();
                let semaphore = semaphore.clone();
                let options = options.clone();

                async move {
                    let _permit = semaphore.acquire().await.expect("semaphore closed");

                    let outcome = match translator.translate(&chunk.text, &options).await {
                        Ok(outcome) => Ok(outcome),
                        Err(error) => {
                            warn!(
                                "Chunk {} failed ({}), entering fallback cascade",
                                chunk.id, error
                            );
                            let request = FallbackRequest::from_chunk(&chunk, &options, &error);
                            orchestrator
                                .execute_fallback(request, &error)
                                .await
                                .map_err(|e| anyhow!("chunk {}: {}", chunk.id, e))
                        }
                    };

                    (chunk, outcome)
                }
            })
            .buffer_unordered(self.max_concurrent_chunks)
            .collect::<Vec<_>>()
            .await;

        // Restore source order
        let mut results = results;
        results.sort_by_key(|(chunk, _)| chunk.id);

        let mut translated = Vec::with_capacity(results.len());
        let mut errors = Vec::new();

        for (chunk, outcome) in results {
            match outcome {
                Ok(outcome) => translated.push(TranslatedChunk { chunk, outcome }),
                Err(error) => errors.push(error.to_string()),
            }
        }

        if !errors.is_empty() {
            return Err(anyhow!(
                "Failed to translate document: {}",
                errors.join("; ")
            ));
        }

        Ok(translated)
    }
}
