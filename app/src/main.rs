use framework::Application;
use std::process::ExitCode;
use tasklist::middleware::LoggingMiddleware;
use tasklist::{config, migrations, routes};

#[tokio::main]
async fn main() -> ExitCode {
    let result = Application::new()
        .config(config::register_all)
        .migrations::<migrations::Migrator>()
        .middleware(LoggingMiddleware)
        .routes(routes::from_config)
        .run()
        .await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "tasklist exited with an error");
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
