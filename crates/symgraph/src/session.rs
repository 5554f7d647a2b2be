//! Long-lived holder of the current graph.
//!
//! A session lets callers distinguish "not built yet", "built (possibly with
//! diagnostics)" and "build failed" and keeps at most one build in flight.
//! Readers never observe a half-built graph: a finished build is swapped in
//! whole.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;
use serde::Serialize;

use crate::builder::{GraphBuild, GraphBuilder};
use crate::resolver::AliasMap;
use crate::source::FileIndex;
use crate::tracer::{Direction, Trace, trace_with_distances};
use crate::{Error, Result};

/// Current graph availability.
#[derive(Debug, Clone, Default)]
pub enum GraphState {
    /// No build has finished yet.
    #[default]
    NotReady,
    /// The last build finished; per-file problems are in its diagnostics.
    Ready(Arc<GraphBuild>),
    /// The last build aborted.
    Failed(String),
}

impl GraphState {
    pub fn is_ready(&self) -> bool {
        matches!(self, GraphState::Ready(_))
    }

    fn label(&self) -> &'static str {
        match self {
            GraphState::NotReady => "notReady",
            GraphState::Ready(_) => "ready",
            GraphState::Failed(_) => "failed",
        }
    }
}

/// Result of [`GraphSession::rebuild`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RebuildOutcome {
    Built { diagnostics: usize },
    Failed(String),
    /// Another rebuild was running; nothing was done.
    AlreadyBuilding,
}

/// Snapshot of a session for status displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatus {
    pub state: &'static str,
    pub building: bool,
    pub diagnostics: usize,
    pub error: Option<String>,
}

/// Shared graph with a single-flight rebuild.
#[derive(Debug, Default)]
pub struct GraphSession {
    aliases: AliasMap,
    state: RwLock<GraphState>,
    building: AtomicBool,
}

/// Clears the building flag even if the build panics.
struct BuildingGuard<'s>(&'s AtomicBool);

impl Drop for BuildingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl GraphSession {
    pub fn new(aliases: AliasMap) -> Self {
        Self {
            aliases,
            ..Self::default()
        }
    }

    pub fn is_building(&self) -> bool {
        self.building.load(Ordering::Acquire)
    }

    pub fn state(&self) -> GraphState {
        self.state.read().clone()
    }

    /// The current graph, if the last build finished.
    pub fn graph(&self) -> Option<Arc<GraphBuild>> {
        match &*self.state.read() {
            GraphState::Ready(build) => Some(Arc::clone(build)),
            _ => None,
        }
    }

    /// Rebuild from `index` and swap the result in.
    ///
    /// Returns [`RebuildOutcome::AlreadyBuilding`] without doing anything when
    /// another rebuild is in flight. The previous graph stays readable until
    /// the new one is ready; a failed build replaces it with `Failed`.
    pub async fn rebuild(&self, index: &FileIndex) -> RebuildOutcome {
        if self
            .building
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("graph rebuild already in flight");
            return RebuildOutcome::AlreadyBuilding;
        }
        let _guard = BuildingGuard(&self.building);

        let result = match GraphBuilder::new(index.paths(), &self.aliases) {
            Ok(mut builder) => {
                let sources = builder.load(index).await;
                panic::catch_unwind(AssertUnwindSafe(move || builder.build(sources)))
                    .map_err(|_| "graph build panicked".to_string())
            }
            Err(err) => Err(err.to_string()),
        };

        match result {
            Ok(build) => {
                let diagnostics = build.diagnostics.len();
                *self.state.write() = GraphState::Ready(Arc::new(build));
                RebuildOutcome::Built { diagnostics }
            }
            Err(error) => {
                tracing::error!(%error, "graph build failed");
                *self.state.write() = GraphState::Failed(error.clone());
                RebuildOutcome::Failed(error)
            }
        }
    }

    /// Trace over the current graph.
    ///
    /// Fails with [`Error::GraphUnavailable`] unless a build has finished, so
    /// callers can fall back to working without a graph.
    pub fn trace(&self, start: &str, direction: Direction, max_hops: usize) -> Result<Trace> {
        match &*self.state.read() {
            GraphState::Ready(build) => Ok(trace_with_distances(
                &build.graph,
                start,
                direction,
                max_hops,
            )),
            GraphState::NotReady => Err(Error::GraphUnavailable("graph not built yet".into())),
            GraphState::Failed(error) => Err(Error::GraphUnavailable(format!(
                "last graph build failed: {error}"
            ))),
        }
    }

    pub fn status(&self) -> SessionStatus {
        let state = self.state.read();
        SessionStatus {
            state: state.label(),
            building: self.is_building(),
            diagnostics: match &*state {
                GraphState::Ready(build) => build.diagnostics.len(),
                _ => 0,
            },
            error: match &*state {
                GraphState::Failed(error) => Some(error.clone()),
                _ => None,
            },
        }
    }
}
