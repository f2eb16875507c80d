use std::{env, net::SocketAddr, path::Path};

use axum_server::Handle;
use clap::Parser;
use rusqlite::Connection;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use finance_tracker::{build_router, graceful_shutdown, stores::sqlite::initialize, AppState};

/// The REST API server for the personal finance tracker.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database. The database is created
    /// and initialized if the file does not exist.
    #[arg(long)]
    db_path: String,

    /// The port to serve the API from.
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().pretty())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let jwt_secret =
        env::var("JWT_SECRET").expect("The environment variable 'JWT_SECRET' must be set.");

    let db_is_new = !Path::new(&args.db_path).exists();
    let connection = Connection::open(&args.db_path).expect("Could not open database.");

    if db_is_new {
        tracing::info!("Creating a new database at {}", args.db_path);
        initialize(&connection).expect("Could not initialize database.");
    } else {
        // `initialize` only runs on new databases, but the foreign key pragma
        // must be set on every connection.
        connection
            .pragma_update(None, "foreign_keys", true)
            .expect("Could not enable foreign keys.");
    }

    let state = AppState::new(connection, &jwt_secret);

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));
    tracing::info!("HTTP server listening on {}", addr);

    axum_server::bind(addr)
        .handle(handle)
        .serve(build_router().with_state(state).into_make_service())
        .await
        .expect("Server stopped unexpectedly.");
}
