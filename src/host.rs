//! Async entry points for hosts that drive transforms from async code.
//!
//! Each call moves one synchronous invocation onto tokio's blocking pool.
//! Nothing is shared between invocations beyond the injected sink.

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::core::{MacroOptions, Outcome, PageConfig, SourceUnit, WarningSink};

pub async fn transform_async(
    id: String,
    code: String,
    options: Arc<MacroOptions>,
    sink: Arc<dyn WarningSink>,
) -> Result<Outcome> {
    tokio::task::spawn_blocking(move || {
        crate::core::transform(SourceUnit::new(&id, &code), &options, sink.as_ref())
    })
    .await
    .context("transform task did not complete")
}

pub async fn extract_config_async(
    code: String,
    path: String,
    options: Arc<MacroOptions>,
    sink: Arc<dyn WarningSink>,
) -> Result<Option<PageConfig>> {
    tokio::task::spawn_blocking(move || {
        crate::core::extract_config(&code, &path, &options, sink.as_ref())
    })
    .await
    .context("extract task did not complete")
}
