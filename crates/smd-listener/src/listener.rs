//! The capture pipeline.
//!
//! Each captured transaction is classified, decoded and appended to the
//! store in one go. Nothing here returns an error to the interceptor: misses
//! and malformed messages end at a defined drop point and the next
//! transaction is processed normally.

use std::sync::Arc;

use smd_core::DecodedMessage;
use smd_protocol_saml::{classify, CapturedRequest, Classification, MissReason, SamlError, WireDecoder};
use smd_store::{MessageStore, StoreError};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// What happened to a captured transaction.
#[derive(Debug)]
pub enum Outcome {
    /// A SAML message was decoded and appended to the store.
    Stored(DecodedMessage),
    /// The transaction does not carry a SAML message.
    Ignored(MissReason),
    /// The transaction carries a SAML message that failed to decode.
    Dropped(SamlError),
    /// The message decoded but the history could not be saved.
    NotStored(StoreError),
}

impl Outcome {
    /// Returns the stored message, if any.
    #[must_use]
    pub fn into_message(self) -> Option<DecodedMessage> {
        match self {
            Self::Stored(message) => Some(message),
            Self::Ignored(_) | Self::Dropped(_) | Self::NotStored(_) => None,
        }
    }
}

/// Counters for a listener run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListenerStats {
    /// Transactions received.
    pub received: usize,
    /// Messages stored.
    pub stored: usize,
    /// Transactions without a SAML message.
    pub ignored: usize,
    /// SAML messages dropped because they failed to decode.
    pub dropped: usize,
    /// Decoded messages that could not be saved.
    pub not_stored: usize,
}

impl ListenerStats {
    /// Counts one outcome.
    pub fn record(&mut self, outcome: &Outcome) {
        self.received += 1;
        match outcome {
            Outcome::Stored(_) => self.stored += 1,
            Outcome::Ignored(_) => self.ignored += 1,
            Outcome::Dropped(_) => self.dropped += 1,
            Outcome::NotStored(_) => self.not_stored += 1,
        }
    }
}

/// Feeds captured traffic through classification and decoding into the store.
#[derive(Debug, Clone)]
pub struct SamlListener {
    store: Arc<MessageStore>,
    decoder: WireDecoder,
}

impl SamlListener {
    /// Creates a listener with the default decoder.
    #[must_use]
    pub fn new(store: Arc<MessageStore>) -> Self {
        Self::with_decoder(store, WireDecoder::new())
    }

    /// Creates a listener with a custom decoder.
    #[must_use]
    pub fn with_decoder(store: Arc<MessageStore>, decoder: WireDecoder) -> Self {
        Self { store, decoder }
    }

    /// Returns the store messages are appended to.
    #[must_use]
    pub fn store(&self) -> &Arc<MessageStore> {
        &self.store
    }

    /// Processes one captured transaction.
    pub fn handle(&self, request: &CapturedRequest) -> Outcome {
        let recognized = match classify(request) {
            Classification::Recognized(recognized) => recognized,
            Classification::NotRecognized(reason) => {
                tracing::trace!(method = %request.method, url = %request.url, %reason, "not a SAML message");
                return Outcome::Ignored(reason);
            }
        };

        let parameter = recognized.parameter;
        let binding = recognized.binding;

        let message = match self.decoder.decode_message(recognized) {
            Ok(message) => message,
            Err(e) => {
                tracing::warn!(
                    url = %request.url,
                    %parameter,
                    %binding,
                    stage = e.stage(),
                    error = %e,
                    "dropping malformed SAML message"
                );
                return Outcome::Dropped(e);
            }
        };

        match self.store.append(message) {
            Ok(stored) => {
                tracing::debug!(%parameter, %binding, url = %request.url, "SAML message captured");
                Outcome::Stored(stored)
            }
            Err(e) => {
                tracing::warn!(%parameter, %binding, error = %e, "failed to persist message history");
                Outcome::NotStored(e)
            }
        }
    }

    /// Processes transactions until the channel closes.
    ///
    /// Each transaction is handled on the blocking pool, since appending
    /// may write the history to disk. Transactions are still handled one at
    /// a time, in arrival order.
    pub async fn run(&self, mut requests: mpsc::Receiver<CapturedRequest>) -> ListenerStats {
        let mut stats = ListenerStats::default();

        while let Some(request) = requests.recv().await {
            let listener = self.clone();
            match tokio::task::spawn_blocking(move || listener.handle(&request)).await {
                Ok(outcome) => stats.record(&outcome),
                Err(e) => tracing::error!(error = %e, "capture handler task failed"),
            }
        }

        tracing::debug!(?stats, "capture channel closed");
        stats
    }

    /// Runs the listener on a background task.
    #[must_use]
    pub fn spawn(self, requests: mpsc::Receiver<CapturedRequest>) -> JoinHandle<ListenerStats> {
        tokio::spawn(async move { self.run(requests).await })
    }
}
