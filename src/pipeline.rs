use std::sync::Arc;

use futures::stream::{self, Stream, StreamExt};
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::error::{Error, Result};
use crate::fetch::Fetcher;
use crate::model::Address;
use crate::outcome::Outcome;
use crate::path::local_path;
use crate::persist::Persister;
use crate::report::Reporter;

pub const DEFAULT_CONCURRENCY: usize = 16;

/// Running totals over every outcome a pipeline produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub succeeded: usize,
    pub failed: usize,
    pub bytes: u64,
    /// Set when the run stopped before its address source was exhausted.
    pub cancelled: bool,
}

impl Summary {
    pub fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Success { bytes, .. } => {
                self.succeeded += 1;
                self.bytes += bytes;
            }
            _ => self.failed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }

    /// Every address was taken on and every one of them was saved.
    pub fn is_clean(&self) -> bool {
        self.failed == 0 && !self.cancelled
    }
}

/// Fetches and stores addresses with at most `concurrency` of them in flight.
///
/// Addresses are pulled from the source only when a slot is free, so a lazy generator is never
/// run ahead of the work. Each address ends in exactly one [`Outcome`]; a failing address never
/// stops the others. Cancelling stops the pull of new addresses while the ones already in
/// flight run to completion.
pub struct Pipeline {
    fetcher: Arc<dyn Fetcher>,
    persister: Persister,
    concurrency: usize,
    cancel: CancellationToken,
}

impl Pipeline {
    pub fn new(fetcher: Arc<dyn Fetcher>, persister: Persister, concurrency: usize) -> Result<Self> {
        if concurrency == 0 {
            return Err(Error::ZeroConcurrency);
        }

        Ok(Pipeline { fetcher, persister, concurrency, cancel: CancellationToken::new() })
    }

    /// Shares an externally owned token, e.g. one wired to Ctrl-C.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Token that stops the pipeline from taking on new addresses once cancelled.
    pub fn cancellation(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Outcomes in completion order.
    pub fn outcomes<I>(&self, addresses: I) -> impl Stream<Item = Outcome> + Send + 'static
    where
        I: IntoIterator<Item = Address>,
        I::IntoIter: Send + 'static,
    {
        let cancel = self.cancel.clone();
        let fetcher = Arc::clone(&self.fetcher);
        let persister = self.persister.clone();

        stream::iter(addresses)
            .take_until(async move { cancel.cancelled().await })
            .map(move |address| dispatch(Arc::clone(&fetcher), persister.clone(), address))
            .buffer_unordered(self.concurrency)
    }

    /// Drives every address to a terminal state and hands each outcome to `reporter`.
    pub async fn run<I>(&self, addresses: I, reporter: &mut dyn Reporter) -> Result<Summary>
    where
        I: IntoIterator<Item = Address>,
        I::IntoIter: Send + 'static,
    {
        tracing::info!(
            concurrency = self.concurrency,
            root = %self.persister.root().display(),
            "starting front page retrieval"
        );

        let mut summary = Summary::default();
        let mut outcomes = std::pin::pin!(self.outcomes(addresses));
        while let Some(outcome) = outcomes.next().await {
            if !outcome.is_success() {
                tracing::warn!(path = %outcome.path().display(), "{outcome}");
            }
            summary.record(&outcome);
            reporter.report(&outcome, &summary)?;
        }

        if self.cancel.is_cancelled() {
            summary.cancelled = true;
            tracing::warn!(processed = summary.total(), "retrieval cancelled before the last address");
        }
        tracing::info!(
            succeeded = summary.succeeded,
            failed = summary.failed,
            bytes = summary.bytes,
            "front page retrieval finished"
        );
        reporter.finish(&summary)?;

        Ok(summary)
    }
}

/// Runs one address on its own task so a panic stays with that address.
async fn dispatch(fetcher: Arc<dyn Fetcher>, persister: Persister, address: Address) -> Outcome {
    let path = local_path(&address);
    let task = tokio::spawn(retrieve(fetcher, persister, address, path.clone()));

    match task.await {
        Ok(outcome) => outcome,
        Err(e) => Outcome::IoError { path, reason: format!("retrieval task failed: {e}") },
    }
}

async fn retrieve(
    fetcher: Arc<dyn Fetcher>,
    persister: Persister,
    address: Address,
    path: std::path::PathBuf,
) -> Outcome {
    tracing::debug!(url = %address.url, variant = %address.variant, "fetching");

    let bytes = match fetcher.fetch(&address.url).await {
        Ok(bytes) => bytes,
        Err(e) => return Outcome::from_fetch(path, e),
    };

    match persister.persist(&path, &bytes).await {
        Ok(size) => Outcome::Success { path, bytes: size },
        Err(e) => Outcome::from_persist(path, e),
    }
}
