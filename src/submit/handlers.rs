//! Built-in submit handlers

use super::traits::SubmitHandler;
use crate::config::FormConfig;
use crate::state::FormData;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

/// Human-readable summary of a submission
fn summary(data: &FormData) -> String {
    format!(
        "email: {}\njazyk: {}\nJméno: {}\nčíslo: {}",
        data.email, data.language, data.name, data.telephone
    )
}

/// Shows the submitted values back to the user and logs them
#[derive(Debug, Clone, Default)]
pub struct AlertHandler;

#[async_trait]
impl SubmitHandler for AlertHandler {
    async fn submit(&self, data: &FormData) -> Result<String> {
        tracing::info!(
            name = %data.name,
            email = %data.email,
            language = %data.language,
            "Form submitted"
        );
        Ok(summary(data))
    }
}

/// Appends every submission as one JSON object per line
#[derive(Debug, Clone)]
pub struct JsonLinesHandler {
    path: PathBuf,
}

impl JsonLinesHandler {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SubmitHandler for JsonLinesHandler {
    async fn submit(&self, data: &FormData) -> Result<String> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let mut line = serde_json::to_string(data)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .with_context(|| format!("Failed to open {}", self.path.display()))?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        tracing::info!(path = %self.path.display(), "Submission appended");
        Ok(format!(
            "{}\n\nUloženo do {}",
            summary(data),
            self.path.display()
        ))
    }
}

/// Pick the handler the config asks for
pub fn handler_from_config(config: &FormConfig) -> Arc<dyn SubmitHandler> {
    match &config.submissions_file {
        Some(path) => Arc::new(JsonLinesHandler::new(path.clone())),
        None => Arc::new(AlertHandler),
    }
}
