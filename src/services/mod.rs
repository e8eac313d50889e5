// REST API services.
// One handle per API area, borrowed from a shared `Client`.

pub mod actions;
pub mod billing;
pub mod codespaces;
pub mod enterprise;
pub mod git;
pub mod hooks;
pub mod issues;
pub mod organizations;
pub mod repositories;
pub mod secret_scanning;
pub mod users;

pub use actions::ActionsService;
pub use billing::BillingService;
pub use codespaces::CodespacesService;
pub use enterprise::EnterpriseService;
pub use git::GitService;
pub use issues::IssuesService;
pub use organizations::OrganizationsService;
pub use repositories::RepositoriesService;
pub use secret_scanning::SecretScanningService;
pub use users::UsersService;

use crate::client::Client;
use crate::rate_limit::RateLimitService;

impl Client {
    pub fn users(&self) -> UsersService<'_> {
        UsersService::new(self)
    }

    pub fn organizations(&self) -> OrganizationsService<'_> {
        OrganizationsService::new(self)
    }

    pub fn repositories(&self) -> RepositoriesService<'_> {
        RepositoriesService::new(self)
    }

    pub fn issues(&self) -> IssuesService<'_> {
        IssuesService::new(self)
    }

    pub fn actions(&self) -> ActionsService<'_> {
        ActionsService::new(self)
    }

    pub fn enterprise(&self) -> EnterpriseService<'_> {
        EnterpriseService::new(self)
    }

    pub fn secret_scanning(&self) -> SecretScanningService<'_> {
        SecretScanningService::new(self)
    }

    pub fn codespaces(&self) -> CodespacesService<'_> {
        CodespacesService::new(self)
    }

    pub fn billing(&self) -> BillingService<'_> {
        BillingService::new(self)
    }

    pub fn git(&self) -> GitService<'_> {
        GitService::new(self)
    }

    pub fn rate_limit(&self) -> RateLimitService<'_> {
        RateLimitService::new(self)
    }
}
