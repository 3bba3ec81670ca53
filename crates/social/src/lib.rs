mod domain;
mod inbound;
mod usecase;

use std::sync::Arc;

use app_core::oauth::OAuthProvider;
pub use inbound::router::create_router;

use crate::inbound::state::SocialState;
use crate::usecase::flow::AuthFlowService;

pub struct Dependency {
    pub github: Arc<dyn OAuthProvider>,
    pub gitee: Arc<dyn OAuthProvider>,
}

pub fn new(dep: Dependency) -> SocialState {
    let github_svc = Arc::new(AuthFlowService::new(dep.github));
    let gitee_svc = Arc::new(AuthFlowService::new(dep.gitee));

    SocialState::new(github_svc, gitee_svc)
}
