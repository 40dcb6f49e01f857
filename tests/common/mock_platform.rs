//! Mock platform service for testing

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use renovate_triage::error::{Error, Result};
use renovate_triage::platform::PlatformService;
use renovate_triage::types::{ChangeRequest, PlatformConfig, RateLimit};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;

/// Call record for `add_label`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddLabelCall {
    pub pr_number: u64,
    pub label: String,
}

/// Call record for `trigger_workflow`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerCall {
    pub workflow: String,
    pub git_ref: String,
}

/// Scripted result for one merge attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeResponse {
    Merged,
    Conflict,
    Fail(String),
}

/// Simple mock platform service for testing
///
/// Features:
/// - Canned PR listing
/// - Call tracking for verification
/// - Per-PR scripted merge responses (default: merged)
/// - Error injection for failure path testing
pub struct MockPlatformService {
    config: PlatformConfig,
    open_prs: Mutex<Vec<ChangeRequest>>,
    rate_limit: Mutex<Option<RateLimit>>,
    merge_script: Mutex<HashMap<u64, VecDeque<MergeResponse>>>,
    // Call tracking
    list_calls: Mutex<Vec<Option<String>>>,
    add_label_calls: Mutex<Vec<AddLabelCall>>,
    trigger_calls: Mutex<Vec<TriggerCall>>,
    merge_calls: Mutex<Vec<u64>>,
    rate_limit_calls: Mutex<usize>,
    // Error injection
    error_on_list: Mutex<Option<String>>,
    error_on_label: Mutex<HashSet<u64>>,
    error_on_trigger: Mutex<Option<String>>,
}

impl MockPlatformService {
    /// Create a new mock with the given config
    pub fn with_config(config: PlatformConfig) -> Self {
        Self {
            config,
            open_prs: Mutex::new(Vec::new()),
            rate_limit: Mutex::new(None),
            merge_script: Mutex::new(HashMap::new()),
            list_calls: Mutex::new(Vec::new()),
            add_label_calls: Mutex::new(Vec::new()),
            trigger_calls: Mutex::new(Vec::new()),
            merge_calls: Mutex::new(Vec::new()),
            rate_limit_calls: Mutex::new(0),
            error_on_list: Mutex::new(None),
            error_on_label: Mutex::new(HashSet::new()),
            error_on_trigger: Mutex::new(None),
        }
    }

    // === Response setup ===

    /// PRs returned by `list_open_change_requests`
    pub fn set_open_prs(&self, prs: Vec<ChangeRequest>) {
        *self.open_prs.lock().unwrap() = prs;
    }

    /// Responses for successive merge attempts on one PR
    pub fn script_merge(&self, pr_number: u64, responses: Vec<MergeResponse>) {
        self.merge_script
            .lock()
            .unwrap()
            .insert(pr_number, responses.into());
    }

    /// Rate limit returned by `rate_limit` (default: a query error)
    pub fn set_rate_limit(&self, remaining: u64, reset_at: DateTime<Utc>) {
        *self.rate_limit.lock().unwrap() = Some(RateLimit {
            remaining,
            reset_at,
        });
    }

    // === Error injection methods ===

    /// Make `list_open_change_requests` return an error
    pub fn fail_list(&self, msg: &str) {
        *self.error_on_list.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `add_label` fail for one PR
    pub fn fail_label(&self, pr_number: u64) {
        self.error_on_label.lock().unwrap().insert(pr_number);
    }

    /// Make `trigger_workflow` return an error
    pub fn fail_trigger(&self, msg: &str) {
        *self.error_on_trigger.lock().unwrap() = Some(msg.to_string());
    }

    // === Call inspection ===

    pub fn get_list_calls(&self) -> Vec<Option<String>> {
        self.list_calls.lock().unwrap().clone()
    }

    pub fn get_add_label_calls(&self) -> Vec<AddLabelCall> {
        self.add_label_calls.lock().unwrap().clone()
    }

    pub fn get_trigger_calls(&self) -> Vec<TriggerCall> {
        self.trigger_calls.lock().unwrap().clone()
    }

    pub fn get_merge_calls(&self) -> Vec<u64> {
        self.merge_calls.lock().unwrap().clone()
    }

    pub fn rate_limit_call_count(&self) -> usize {
        *self.rate_limit_calls.lock().unwrap()
    }
}

#[async_trait]
impl PlatformService for MockPlatformService {
    async fn list_open_change_requests(&self, author: Option<&str>) -> Result<Vec<ChangeRequest>> {
        self.list_calls
            .lock()
            .unwrap()
            .push(author.map(ToString::to_string));
        if let Some(msg) = self.error_on_list.lock().unwrap().as_ref() {
            return Err(Error::Platform(msg.clone()));
        }
        Ok(self.open_prs.lock().unwrap().clone())
    }

    async fn add_label(&self, pr_number: u64, label: &str) -> Result<()> {
        self.add_label_calls.lock().unwrap().push(AddLabelCall {
            pr_number,
            label: label.to_string(),
        });
        if self.error_on_label.lock().unwrap().contains(&pr_number) {
            return Err(Error::Platform(format!("cannot label #{pr_number}")));
        }
        Ok(())
    }

    async fn trigger_workflow(&self, workflow: &str, git_ref: &str) -> Result<()> {
        self.trigger_calls.lock().unwrap().push(TriggerCall {
            workflow: workflow.to_string(),
            git_ref: git_ref.to_string(),
        });
        if let Some(msg) = self.error_on_trigger.lock().unwrap().as_ref() {
            return Err(Error::Platform(msg.clone()));
        }
        Ok(())
    }

    async fn merge_change_request(&self, pr_number: u64) -> Result<()> {
        self.merge_calls.lock().unwrap().push(pr_number);
        let next = self
            .merge_script
            .lock()
            .unwrap()
            .get_mut(&pr_number)
            .and_then(VecDeque::pop_front);
        match next.unwrap_or(MergeResponse::Merged) {
            MergeResponse::Merged => Ok(()),
            MergeResponse::Conflict => Err(Error::MergeConflict {
                number: pr_number,
                message: "Base branch was modified".to_string(),
            }),
            MergeResponse::Fail(msg) => Err(Error::Platform(msg)),
        }
    }

    async fn rate_limit(&self) -> Result<RateLimit> {
        *self.rate_limit_calls.lock().unwrap() += 1;
        let limit = *self.rate_limit.lock().unwrap();
        limit.ok_or_else(|| Error::Platform("rate limit unavailable".to_string()))
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}
