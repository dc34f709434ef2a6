//! Standalone server binary
//!
//! Serves the API on port 3000 and the frontend from ./dist when present.

use std::path::PathBuf;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let static_dir = PathBuf::from("dist");
    let static_dir = static_dir.is_dir().then_some(static_dir);

    sdg9aid_server::run(3000, static_dir).await
}
