//! FastEmbed Local Embedding Provider
//!
//! Implements the `EmbeddingProvider` port using the fastembed library for
//! local embedding generation. Uses ONNX models for inference without
//! external API calls.

use async_trait::async_trait;
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use tokio::sync::{OnceCell, mpsc, oneshot};

use prc_domain::error::{Error, Result};
use prc_domain::ports::providers::EmbeddingProvider;
use prc_domain::value_objects::Embedding;

use crate::constants::EMBEDDING_DIMENSION_FASTEMBED_DEFAULT;

/// Messages for the FastEmbed actor
enum FastEmbedMessage {
    EmbedBatch {
        texts: Vec<String>,
        tx: oneshot::Sender<Result<Vec<Embedding>>>,
    },
}

/// FastEmbed local embedding provider using the Actor pattern
///
/// The actor owns the ONNX model on a dedicated blocking thread, which
/// eliminates locks and keeps inference off the async executor. The model
/// is loaded lazily on the first embed call rather than at construction:
/// startup stays cheap and offline-mode environment configuration can
/// still take effect before anything is downloaded. A load failure is
/// fatal and surfaces on that first call.
pub struct FastEmbedProvider {
    model: EmbeddingModel,
    model_name: String,
    dimensions: usize,
    sender: OnceCell<mpsc::Sender<FastEmbedMessage>>,
}

impl FastEmbedProvider {
    /// Create a provider with the default model (AllMiniLML6V2)
    pub fn new() -> Self {
        Self::with_model(EmbeddingModel::AllMiniLML6V2)
    }

    /// Create a provider for a configured model identifier
    ///
    /// An unrecognized identifier is a configuration error, not a
    /// fallback: silently substituting a different model would change the
    /// vector dimensionality out from under an existing store.
    pub fn from_model_name(name: &str) -> Result<Self> {
        Ok(Self::with_model(parse_embedding_model(name)?))
    }

    /// Create a provider with a specific FastEmbed model
    pub fn with_model(model: EmbeddingModel) -> Self {
        let model_name = format!("{model:?}");
        let dimensions = model_dimensions(&model);
        Self {
            model,
            model_name,
            dimensions,
            sender: OnceCell::new(),
        }
    }

    /// Get the model name
    pub fn model(&self) -> &str {
        &self.model_name
    }

    /// Lazily spawn the actor, loading the model on first use
    async fn sender(&self) -> Result<&mpsc::Sender<FastEmbedMessage>> {
        self.sender
            .get_or_try_init(|| async {
                let model = self.model.clone();
                let model_name = self.model_name.clone();
                let (tx, rx) = mpsc::channel(100);
                let (ready_tx, ready_rx) = oneshot::channel();

                tokio::task::spawn_blocking(move || {
                    run_actor(rx, ready_tx, model, model_name);
                });

                match ready_rx.await {
                    Ok(Ok(())) => Ok(tx),
                    Ok(Err(e)) => Err(e),
                    Err(_) => Err(Error::embedding(
                        "FastEmbed actor exited before initialization completed",
                    )),
                }
            })
            .await
    }
}

impl Default for FastEmbedProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmbeddingProvider for FastEmbedProvider {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        let sender = self.sender().await?;
        let (tx, rx) = oneshot::channel();
        sender
            .send(FastEmbedMessage::EmbedBatch {
                texts: texts.to_vec(),
                tx,
            })
            .await
            .map_err(|_| Error::embedding("FastEmbed actor channel closed"))?;

        rx.await
            .unwrap_or_else(|_| Err(Error::embedding("FastEmbed actor closed")))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn provider_name(&self) -> &str {
        "fastembed"
    }
}

/// Actor loop: owns the model, answers embed requests until all senders drop
fn run_actor(
    mut receiver: mpsc::Receiver<FastEmbedMessage>,
    ready: oneshot::Sender<Result<()>>,
    model: EmbeddingModel,
    model_name: String,
) {
    let init_options = InitOptions::new(model).with_show_download_progress(false);
    let text_embedding = match TextEmbedding::try_new(init_options) {
        Ok(m) => {
            let _ = ready.send(Ok(()));
            m
        }
        Err(e) => {
            let _ = ready.send(Err(Error::embedding(format!(
                "Failed to initialize FastEmbed model: {e}"
            ))));
            return;
        }
    };

    while let Some(msg) = receiver.blocking_recv() {
        match msg {
            FastEmbedMessage::EmbedBatch { texts, tx } => {
                let text_refs: Vec<&str> = texts.iter().map(String::as_str).collect();
                let result = match text_embedding.embed(text_refs, None) {
                    Ok(vectors) => Ok(vectors
                        .into_iter()
                        .map(|vector| {
                            let dimensions = vector.len();
                            Embedding {
                                vector,
                                model: model_name.clone(),
                                dimensions,
                            }
                        })
                        .collect()),
                    Err(e) => Err(Error::embedding(format!("FastEmbed embedding failed: {e}"))),
                };
                let _ = tx.send(result);
            }
        }
    }
}

/// Parse a configured model identifier to a FastEmbed model
fn parse_embedding_model(name: &str) -> Result<EmbeddingModel> {
    match name.to_lowercase().as_str() {
        "all-minilm-l6-v2" | "allminilml6v2" | "sentence-transformers/all-minilm-l6-v2" => {
            Ok(EmbeddingModel::AllMiniLML6V2)
        }
        "bge-small-en" | "bgesmallen" => Ok(EmbeddingModel::BGESmallENV15),
        "bge-base-en" | "bgebaseen" => Ok(EmbeddingModel::BGEBaseENV15),
        "multilingual-e5-small" => Ok(EmbeddingModel::MultilingualE5Small),
        other => Err(Error::config(format!(
            "Unknown embedding model: {other}. Supported: all-minilm-l6-v2, \
             bge-small-en, bge-base-en, multilingual-e5-small"
        ))),
    }
}


/// Output dimensionality per supported model
fn model_dimensions(model: &EmbeddingModel) -> usize {
    match model {
        EmbeddingModel::BGEBaseENV15 => 768,
        _ => EMBEDDING_DIMENSION_FASTEMBED_DEFAULT,
    }
}
