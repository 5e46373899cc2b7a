use std::sync::Arc;

use crate::application::admin::{AdminChromeService, AdminDashboardService};
use crate::application::generation::GenerationGateway;
use crate::application::posts::PostService;

#[derive(Clone)]
pub struct AdminState {
    pub posts: PostService,
    pub chrome: Arc<AdminChromeService>,
    pub dashboard: Arc<AdminDashboardService>,
    pub generation: Arc<GenerationGateway>,
}
