// GitHub Actions API.
// Workflows, runs, jobs, artifacts, secrets and self-hosted runners.

pub mod artifacts;
pub mod jobs;
pub mod runners;
pub mod runs;
pub mod secrets;
pub mod types;
pub mod workflows;

pub use artifacts::{Artifact, ArtifactList, ArtifactWorkflowRun, ListArtifactsOptions};
pub use jobs::ListWorkflowJobsOptions;
pub use runners::{
    ListRunnersOptions, RegistrationToken, RemoveToken, Runner, RunnerApplicationDownload,
    RunnerLabel, RunnerStatus, Runners,
};
pub use runs::ListWorkflowRunsOptions;
pub use secrets::{EncryptedSecret, PublicKey, Secret, Secrets, SelectedRepoIds};
pub use types::*;
pub use workflows::CreateWorkflowDispatchEventRequest;

use crate::client::Client;

pub struct ActionsService<'a> {
    client: &'a Client,
}

impl<'a> ActionsService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }
}
