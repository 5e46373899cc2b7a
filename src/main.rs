use std::{process, sync::Arc};

use postline::{
    application::{
        admin::{AdminChromeService, AdminDashboardService},
        chrome::ChromeService,
        error::AppError,
        generation::{ContentGenerator, GenerationGateway},
        posts::PostService,
        repos::PostsRepo,
    },
    config::{self, DataSource},
    infra::{
        db::PostgresRepositories,
        error::InfraError,
        http::{self, AdminState, ApiState, HttpState, RouterState},
        llm::{AnthropicClient, OpenAiClient},
        memory::InMemoryPostsRepo,
        telemetry,
    },
};
use tokio::try_join;
use tracing::{Dispatch, Level, dispatcher, error, info};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()
        .map_err(|err| AppError::unexpected(format!("failed to load configuration: {err}")))?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    match command {
        config::Command::Serve(_) => run_serve(settings).await,
        config::Command::Migrate(_) => run_migrations(settings).await,
    }
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let repo = init_repository(&settings).await?;
    let generation = Arc::new(build_generation_gateway(&settings.generation)?);

    let posts = PostService::new(repo);
    let http_state = HttpState {
        posts: posts.clone(),
        chrome: Arc::new(ChromeService::new(settings.site.clone())),
    };
    let api_state = ApiState {
        posts: posts.clone(),
        generation: generation.clone(),
    };
    let admin_state = AdminState {
        posts: posts.clone(),
        chrome: Arc::new(AdminChromeService::new(settings.site.clone())),
        dashboard: Arc::new(AdminDashboardService::new(
            posts,
            settings.site.canonical_base.clone(),
        )),
        generation,
    };

    serve_http(&settings, http_state, admin_state, api_state).await
}

async fn run_migrations(settings: config::Settings) -> Result<(), AppError> {
    let database_url = settings
        .database
        .url
        .as_ref()
        .ok_or_else(|| InfraError::configuration("database url is not configured"))
        .map_err(AppError::from)?;

    let pool = PostgresRepositories::connect(database_url, 1)
        .await
        .map_err(|err| AppError::from(InfraError::database(err.to_string())))?;

    PostgresRepositories::run_migrations(&pool)
        .await
        .map_err(|err| AppError::from(InfraError::database(err.to_string())))?;

    info!("migrations applied");
    Ok(())
}

async fn init_repository(settings: &config::Settings) -> Result<Arc<dyn PostsRepo>, AppError> {
    match settings.data_source {
        DataSource::Mock => {
            info!(data_source = %settings.data_source, "serving bundled fixture posts");
            Ok(Arc::new(InMemoryPostsRepo::seeded()))
        }
        DataSource::Live => {
            let database_url = settings
                .database
                .url
                .as_ref()
                .ok_or_else(|| InfraError::configuration("database url is not configured"))
                .map_err(AppError::from)?;

            let pool =
                PostgresRepositories::connect(database_url, settings.database.max_connections.get())
                    .await
                    .map_err(|err| AppError::from(InfraError::database(err.to_string())))?;

            PostgresRepositories::run_migrations(&pool)
                .await
                .map_err(|err| AppError::from(InfraError::database(err.to_string())))?;

            info!(data_source = %settings.data_source, "connected to postgres");
            Ok(Arc::new(PostgresRepositories::new(pool)))
        }
    }
}

fn build_generation_gateway(
    settings: &config::GenerationSettings,
) -> Result<GenerationGateway, AppError> {
    let openai = settings
        .openai_api_key
        .clone()
        .map(|key| OpenAiClient::new(&settings.openai_base_url, key, settings.timeout))
        .transpose()
        .map_err(AppError::from)?
        .map(|client| Arc::new(client) as Arc<dyn ContentGenerator>);

    let anthropic = settings
        .anthropic_api_key
        .clone()
        .map(|key| AnthropicClient::new(&settings.anthropic_base_url, key, settings.timeout))
        .transpose()
        .map_err(AppError::from)?
        .map(|client| Arc::new(client) as Arc<dyn ContentGenerator>);

    info!(
        openai = openai.is_some(),
        anthropic = anthropic.is_some(),
        "content generation providers configured"
    );

    Ok(GenerationGateway::new(openai, anthropic))
}

async fn serve_http(
    settings: &config::Settings,
    http_state: HttpState,
    admin_state: AdminState,
    api_state: ApiState,
) -> Result<(), AppError> {
    let router_state = RouterState {
        http: http_state,
        api: api_state,
    };
    let public_router = http::build_router(router_state);
    let admin_router = http::build_admin_router(admin_state);

    let public_listener = tokio::net::TcpListener::bind(settings.server.public_addr)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;
    let admin_listener = tokio::net::TcpListener::bind(settings.server.admin_addr)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;

    info!(
        public_addr = %settings.server.public_addr,
        admin_addr = %settings.server.admin_addr,
        "listening"
    );

    let public_server = axum::serve(public_listener, public_router.into_make_service());
    let admin_server = axum::serve(admin_listener, admin_router.into_make_service());

    try_join!(public_server, admin_server)
        .map_err(|err| AppError::unexpected(format!("server error: {err}")))?;

    Ok(())
}
