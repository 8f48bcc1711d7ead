//! Runs the dependency analyzer CLI and caches its output per checkout

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde_json::Value;
use tokio::process::Command;
use tokio::sync::Mutex;

use crate::error::{AnalysisError, Result};
use crate::source::{AnalysisSource, AnalysisTarget};

/// Which analyzer to run and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvokerConfig {
    /// Executable to spawn.
    pub program: String,
    /// Arguments, run with the checkout as working directory.
    pub args: Vec<String>,
}

impl Default for InvokerConfig {
    fn default() -> Self {
        Self {
            program: "npx".to_string(),
            args: ["depcruise", ".", "--output-type", "json"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Output of one successful run.
#[derive(Debug, Clone)]
struct CachedOutput {
    value: Value,
    produced_at: DateTime<Utc>,
}

type Slot = Arc<Mutex<Option<CachedOutput>>>;

/// Runs the analyzer at most once per `(repository, branch)`.
///
/// Concurrent loads for the same target queue on that target's slot and
/// all but the first receive the cached document. Different targets run
/// independently.
pub struct CliInvoker {
    config: InvokerConfig,
    slots: DashMap<AnalysisTarget, Slot>,
}

impl CliInvoker {
    pub fn new(config: InvokerConfig) -> Self {
        Self {
            config,
            slots: DashMap::new(),
        }
    }

    /// When the cached output for `target` was produced, if any.
    pub async fn cached_at(&self, target: &AnalysisTarget) -> Option<DateTime<Utc>> {
        let slot = self.slots.get(target).map(|r| Arc::clone(r.value()))?;
        let guard = slot.lock().await;
        guard.as_ref().map(|cached| cached.produced_at)
    }

    /// Forget the cached output for `target` so the next load reruns.
    pub fn invalidate(&self, target: &AnalysisTarget) {
        if self.slots.remove(target).is_some() {
            tracing::debug!("Invalidated analysis cache for {}@{}", target.repo.display(), target.branch);
        }
    }

    async fn run(&self, target: &AnalysisTarget) -> Result<Value> {
        tracing::info!(
            "Running {} {} in {}",
            self.config.program,
            self.config.args.join(" "),
            target.repo.display()
        );

        let output = Command::new(&self.config.program)
            .args(&self.config.args)
            .current_dir(&target.repo)
            .output()
            .await?;

        if !output.status.success() {
            return Err(AnalysisError::CommandFailed {
                program: self.config.program.clone(),
                status: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(serde_json::from_slice(&output.stdout)?)
    }
}

#[async_trait::async_trait]
impl AnalysisSource for CliInvoker {
    async fn load(&self, target: &AnalysisTarget) -> Result<Value> {
        let slot = Arc::clone(self.slots.entry(target.clone()).or_default().value());
        let mut guard = slot.lock().await;

        if let Some(cached) = guard.as_ref() {
            tracing::debug!(
                "Using cached analysis for {}@{} from {}",
                target.repo.display(),
                target.branch,
                cached.produced_at.to_rfc3339()
            );
            return Ok(cached.value.clone());
        }

        let value = self.run(target).await?;
        *guard = Some(CachedOutput {
            value: value.clone(),
            produced_at: Utc::now(),
        });
        Ok(value)
    }

    fn name(&self) -> &str {
        &self.config.program
    }
}
