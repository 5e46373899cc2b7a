use std::sync::Arc;

use crate::application::generation::GenerationGateway;
use crate::application::posts::PostService;

#[derive(Clone)]
pub struct ApiState {
    pub posts: PostService,
    pub generation: Arc<GenerationGateway>,
}
