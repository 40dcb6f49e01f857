//! CLI progress callback with styled inline output

use crate::cli::style::{Stylize, check, cross};
use anstream::{eprintln, print, println};
use async_trait::async_trait;
use renovate_triage::actions::{ItemStatus, Phase, ProgressCallback};
use renovate_triage::error::Error;
use std::io::Write;

/// Prints one line per PR: `  PR #123 ... ✓`
pub struct CliProgress;

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_phase(&self, phase: Phase) {
        match phase {
            Phase::Complete => {}
            _ => println!("\n{}...", phase.to_string().emphasis()),
        }
    }

    async fn on_item(&self, pr_number: u64, status: ItemStatus) {
        match status {
            ItemStatus::Started => {
                print!("  PR {} ... ", format!("#{pr_number}").accent());
                let _ = std::io::stdout().flush();
            }
            ItemStatus::Success => println!("{}", check()),
            ItemStatus::Skipped => println!("{}", status.to_string().muted()),
            ItemStatus::Retrying { .. } => {
                print!("{} ... ", status.to_string().warn().for_stdout());
                let _ = std::io::stdout().flush();
            }
            ItemStatus::Failed(ref msg) => {
                println!("{}", cross().for_stdout());
                eprintln!("    {}", msg.error());
            }
        }
    }

    async fn on_error(&self, err: &Error) {
        eprintln!("  {} {}", cross(), err.to_string().error());
    }

    async fn on_message(&self, message: &str) {
        println!("  {}", message.muted());
    }
}
