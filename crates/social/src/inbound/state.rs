use std::sync::Arc;

use crate::usecase::flow::AuthFlowUseCase;

#[derive(Clone)]
pub struct SocialState {
    pub github: Arc<dyn AuthFlowUseCase>,
    pub gitee: Arc<dyn AuthFlowUseCase>,
}

impl SocialState {
    pub fn new(github: Arc<dyn AuthFlowUseCase>, gitee: Arc<dyn AuthFlowUseCase>) -> Self {
        Self { github, gitee }
    }
}
