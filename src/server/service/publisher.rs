//! Submission of passed proposals to the external voting ledger.
//!
//! The ledger client is a separate executable. It receives the proposal text as positional
//! arguments and the ledger settings through its environment, and prints a JSON receipt
//! `{"id": "..."}` as the last line of its standard output.

use serde::Deserialize;
use serenity::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

use crate::server::{
    config::PublisherConfig,
    error::{publisher::PublisherError, AppError},
    model::{proposal::Proposal, vote::VoteChoice},
    util::retry::{retry_with_backoff, Backoff},
};

/// Submits a passed proposal somewhere outside Discord and returns a link to it.
#[async_trait]
pub trait ProposalPublisher: Send + Sync {
    async fn submit(&self, proposal: &Proposal) -> Result<String, AppError>;
}

#[derive(Deserialize)]
struct LedgerReceipt {
    id: String,
}

/// Publisher that runs the configured ledger client as a child process.
pub struct ScriptPublisher {
    config: PublisherConfig,
    backoff: Backoff,
}

impl ScriptPublisher {
    pub fn new(config: PublisherConfig) -> Self {
        Self {
            config,
            backoff: Backoff {
                attempts: 3,
                initial_delay: Duration::from_secs(10),
                max_delay: Duration::from_secs(60),
            },
        }
    }

    pub fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    /// Builds the public URL of a ledger entry.
    pub fn proposal_url(&self, ledger_id: &str) -> String {
        format!(
            "{}/#/{}/proposal/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.space,
            ledger_id
        )
    }

    /// Runs the ledger client once.
    async fn run(&self, proposal: &Proposal) -> Result<String, PublisherError> {
        let mut command = Command::new(&self.config.command);
        command
            .arg(&proposal.title)
            .arg(&proposal.abstract_text)
            .arg(&proposal.background)
            .args(VoteChoice::ALL.iter().map(|choice| choice.label()))
            .env("PUBLISHER_SPACE", &self.config.space)
            .env("PUBLISHER_NETWORK", &self.config.network)
            .env("PUBLISHER_RPC_URL", &self.config.rpc_url)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = command.spawn().map_err(|e| PublisherError::Spawn {
            command: self.config.command.clone(),
            source: e,
        })?;

        let output = tokio::time::timeout(
            Duration::from_secs(self.config.timeout_secs),
            child.wait_with_output(),
        )
        .await
        .map_err(|_| PublisherError::Timeout(self.config.timeout_secs))?
        .map_err(|e| PublisherError::Spawn {
            command: self.config.command.clone(),
            source: e,
        })?;

        if !output.status.success() {
            return Err(PublisherError::ExitStatus {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        parse_ledger_id(&String::from_utf8_lossy(&output.stdout))
    }
}

#[async_trait]
impl ProposalPublisher for ScriptPublisher {
    async fn submit(&self, proposal: &Proposal) -> Result<String, AppError> {
        let label = format!("Ledger submission of proposal #{}", proposal.id);
        let ledger_id = retry_with_backoff(&label, self.backoff, || self.run(proposal)).await?;

        tracing::info!(
            "Submitted proposal #{} to the ledger as {}",
            proposal.id,
            ledger_id
        );

        Ok(self.proposal_url(&ledger_id))
    }
}

/// Extracts the ledger id from the receipt on the last non-empty output line.
fn parse_ledger_id(stdout: &str) -> Result<String, PublisherError> {
    let last_line = stdout
        .lines()
        .rev()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or_default();

    serde_json::from_str::<LedgerReceipt>(last_line)
        .map(|receipt| receipt.id)
        .ok()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| PublisherError::MissingLedgerId(last_line.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::server::model::proposal::ProposalStatus;

    fn config(command: &str) -> PublisherConfig {
        PublisherConfig {
            command: command.to_string(),
            timeout_secs: 5,
            space: "bloom.eth".to_string(),
            network: "1".to_string(),
            rpc_url: "http://localhost:8545".to_string(),
            base_url: "https://snapshot.org/".to_string(),
        }
    }

    fn fast() -> Backoff {
        Backoff {
            attempts: 2,
            initial_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(1),
        }
    }

    fn proposal() -> Proposal {
        Proposal {
            id: 7,
            guild_id: 1,
            author_id: 2,
            title: "Trees".to_string(),
            category: "general".to_string(),
            abstract_text: "Plant trees".to_string(),
            background: "Bare park".to_string(),
            additional: None,
            status: ProposalStatus::Concluded,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn parses_receipt_from_last_line() {
        let stdout = "connecting...\n{\"id\": \"progress\"}\n{\"id\": \"0xabc\"}\n\n";

        assert_eq!(parse_ledger_id(stdout).ok(), Some("0xabc".to_string()));
    }

    #[test]
    fn rejects_output_without_receipt() {
        let result = parse_ledger_id("done\n");

        assert!(matches!(result, Err(PublisherError::MissingLedgerId(line)) if line == "done"));
    }

    #[test]
    fn builds_proposal_url() {
        let publisher = ScriptPublisher::new(config("ledger-client"));

        assert_eq!(
            publisher.proposal_url("0xabc"),
            "https://snapshot.org/#/bloom.eth/proposal/0xabc"
        );
    }

    /// Expected: Err(Spawn) after retries when the executable does not exist
    #[tokio::test]
    async fn reports_missing_executable() {
        let publisher =
            ScriptPublisher::new(config("/nonexistent/ledger-client")).with_backoff(fast());

        let result = publisher.submit(&proposal()).await;

        assert!(matches!(
            result,
            Err(AppError::ExternalProcess(PublisherError::Spawn { .. }))
        ));
    }
}
