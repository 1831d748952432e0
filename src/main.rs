use canteen::config::configuration;
use canteen::db::{establish_connection, run_db_migrations};
use canteen::routes::menu::seed::seed_menu;
use canteen::startup::Application;
use canteen::telemetry::{get_subscriber, init_subscriber};
use dotenv::dotenv;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    let subscriber = get_subscriber("canteen".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let config = configuration::Settings::new().expect("Failed to load configurations");
    let pool = establish_connection(&config.database.url);

    // Schema setup is an explicit startup step, never lazy request-time work.
    {
        let mut conn = pool.get().expect("Failed to get db connection from Pool");
        run_db_migrations(&mut *conn);
    }
    seed_menu(&pool).expect("Failed to seed menu");

    let application = Application::build(config.application.port, pool).await?;
    application.run_until_stopped().await?;
    Ok(())
}
