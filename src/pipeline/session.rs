//! Latest-wins generate session
//!
//!     Every request takes the next revision. The synchronous stages run inline, formatting
//!     runs on tokio's blocking pool, and when it comes back the result is only delivered if
//!     no newer request was made in the meantime. There is no cancellation: a superseded
//!     formatter run finishes and its result is discarded.

use super::{GenerateOutput, Pipeline};
use crate::format::{format_or_fallback, FormatOutcome};
use crate::transpile::Mode;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Clone)]
pub struct GenerateSession {
    pipeline: Arc<Pipeline>,
    revision: Arc<AtomicUsize>,
}

impl GenerateSession {
    pub fn new(pipeline: Arc<Pipeline>) -> Self {
        Self {
            pipeline,
            revision: Arc::new(AtomicUsize::default()),
        }
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Revision of the most recent request.
    pub fn revision(&self) -> usize {
        self.revision.load(Ordering::SeqCst)
    }

    /// Editor generate. `None` when a newer request superseded this one.
    pub async fn generate(&self, input: &str) -> Option<GenerateOutput> {
        self.run(input, Mode::Document).await
    }

    pub async fn run(&self, input: &str, mode: Mode) -> Option<GenerateOutput> {
        let revision = self.revision.fetch_add(1, Ordering::SeqCst) + 1;
        let source = self.pipeline.prepare(input, mode);

        let formatter = self.pipeline.formatter();
        let unformatted = source.clone();
        let outcome =
            match tokio::task::spawn_blocking(move || format_or_fallback(formatter.as_ref(), &source))
                .await
            {
                Ok(outcome) => outcome,
                Err(err) => {
                    log::warn!("formatter task failed: {err}");
                    FormatOutcome::unformatted(unformatted, Some(err.to_string()))
                }
            };

        let latest = self.revision();
        if latest != revision {
            log::debug!("generate: dropped stale revision {revision} (latest {latest})");
            return None;
        }
        Some(outcome.into())
    }
}
