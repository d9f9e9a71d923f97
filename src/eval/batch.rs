use rayon::prelude::*;

use crate::eval::interpolator::Interpolator;
use crate::foundation::error::{MorphyteError, MorphyteResult};
use crate::state::model::Snapshot;
use crate::timeline::resolve::Timeline;

impl Interpolator {
    /// Compute the snapshots for many instants in parallel.
    ///
    /// Each instant is an independent pure computation, so frames split
    /// across rayon workers with nothing shared but the read-only
    /// timeline and the deterministic morph cache. Output order matches
    /// `times`.
    #[tracing::instrument(skip(self, timeline, times), fields(frames = times.len()))]
    pub fn states_at(&self, timeline: &Timeline, times: &[f64]) -> Vec<Snapshot> {
        times
            .par_iter()
            .map(|&t| self.state_at(timeline, t))
            .collect()
    }

    /// Like [`Interpolator::states_at`], but on a dedicated thread pool
    /// of `threads` workers (`None` uses rayon's default sizing).
    pub fn states_at_pooled(
        &self,
        timeline: &Timeline,
        times: &[f64],
        threads: Option<usize>,
    ) -> MorphyteResult<Vec<Snapshot>> {
        let mut builder = rayon::ThreadPoolBuilder::new();
        if let Some(threads) = threads {
            builder = builder.num_threads(threads);
        }
        let pool = builder.build().map_err(|e| {
            MorphyteError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}"))
        })?;
        Ok(pool.install(|| self.states_at(timeline, times)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/batch.rs"]
mod tests;
