// GitHub Actions response types.
// Defines structs for deserializing workflow, run and job payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::services::repositories::Repository;
use crate::services::users::User;

/// A workflow file registered in a repository.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Workflow {
    pub id: Option<u64>,
    pub node_id: Option<String>,
    pub name: Option<String>,
    pub path: Option<String>,
    pub state: Option<WorkflowState>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub url: Option<String>,
    pub html_url: Option<String>,
    pub badge_url: Option<String>,
}

/// Whether a workflow can be triggered, and why not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowState {
    Active,
    Deleted,
    DisabledFork,
    DisabledInactivity,
    DisabledManually,
    #[serde(other)]
    Unknown,
}

/// One execution of a workflow.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkflowRun {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub node_id: Option<String>,
    pub display_title: Option<String>,
    pub run_number: Option<u64>,
    pub run_attempt: Option<u64>,
    pub event: Option<String>,
    pub status: Option<RunStatus>,
    pub conclusion: Option<RunConclusion>,
    pub workflow_id: Option<u64>,
    pub check_suite_id: Option<u64>,
    pub head_branch: Option<String>,
    pub head_sha: Option<String>,
    pub path: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub run_started_at: Option<DateTime<Utc>>,
    pub url: Option<String>,
    pub html_url: Option<String>,
    pub jobs_url: Option<String>,
    pub logs_url: Option<String>,
    pub artifacts_url: Option<String>,
    pub cancel_url: Option<String>,
    pub rerun_url: Option<String>,
    #[serde(default)]
    pub pull_requests: Vec<PullRequestRef>,
    pub actor: Option<User>,
    pub triggering_actor: Option<User>,
    pub repository: Option<Repository>,
    pub head_repository: Option<Repository>,
}

/// Workflow run and job status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Queued,
    InProgress,
    Completed,
    Waiting,
    Requested,
    Pending,
    #[serde(other)]
    Unknown,
}

/// Workflow run and job conclusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunConclusion {
    Success,
    Failure,
    Cancelled,
    Skipped,
    TimedOut,
    ActionRequired,
    Neutral,
    Stale,
    StartupFailure,
    #[serde(other)]
    Unknown,
}

/// Pull request that triggered a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequestRef {
    pub id: Option<u64>,
    pub number: Option<u64>,
    pub url: Option<String>,
    pub head: Option<GitRef>,
    pub base: Option<GitRef>,
}

/// Branch and commit on one side of a pull request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitRef {
    #[serde(rename = "ref")]
    pub ref_name: Option<String>,
    pub sha: Option<String>,
}

/// A job of a workflow run, with its steps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkflowJob {
    pub id: Option<u64>,
    pub run_id: Option<u64>,
    pub run_attempt: Option<u64>,
    pub workflow_name: Option<String>,
    pub head_branch: Option<String>,
    pub head_sha: Option<String>,
    pub name: Option<String>,
    pub status: Option<RunStatus>,
    pub conclusion: Option<RunConclusion>,
    pub created_at: Option<DateTime<Utc>>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub url: Option<String>,
    pub html_url: Option<String>,
    pub check_run_url: Option<String>,
    #[serde(default)]
    pub steps: Vec<TaskStep>,
    #[serde(default)]
    pub labels: Vec<String>,
    pub runner_id: Option<u64>,
    pub runner_name: Option<String>,
    pub runner_group_id: Option<u64>,
    pub runner_group_name: Option<String>,
}

/// One step of a job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskStep {
    pub name: Option<String>,
    pub status: Option<RunStatus>,
    pub conclusion: Option<RunConclusion>,
    pub number: Option<u64>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Workflows of a repository with the total count.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Workflows {
    pub total_count: Option<u64>,
    #[serde(default)]
    pub workflows: Vec<Workflow>,
}

/// A page of workflow runs with the total count.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkflowRuns {
    pub total_count: Option<u64>,
    #[serde(default)]
    pub workflow_runs: Vec<WorkflowRun>,
}

/// A page of jobs with the total count.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Jobs {
    pub total_count: Option<u64>,
    #[serde(default)]
    pub jobs: Vec<WorkflowJob>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_enum_values() {
        let run: WorkflowRun = serde_json::from_str(
            r#"{"id": 1, "status": "brand_new_status", "conclusion": "timed_out"}"#,
        )
        .unwrap();
        assert_eq!(run.status, Some(RunStatus::Unknown));
        assert_eq!(run.conclusion, Some(RunConclusion::TimedOut));

        let wf: Workflow = serde_json::from_str(r#"{"state": "disabled_manually"}"#).unwrap();
        assert_eq!(wf.state, Some(WorkflowState::DisabledManually));
    }

    #[test]
    fn test_null_conclusion() {
        let job: WorkflowJob =
            serde_json::from_str(r#"{"id": 5, "status": "in_progress", "conclusion": null}"#)
                .unwrap();
        assert_eq!(job.status, Some(RunStatus::InProgress));
        assert!(job.conclusion.is_none());
        assert!(job.steps.is_empty());
    }
}
