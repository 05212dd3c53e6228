//! Server startup utilities.

use tracing::info;

/// Prints the startup banner.
pub fn print_banner() {
    info!(
        r#"
    ______                           _
   / ____/___ ___  ____  ____  _____(_)_  ______ ___
  / __/ / __ `__ \/ __ \/ __ \/ ___/ / / / / __ `__ \
 / /___/ / / / / / /_/ / /_/ / /  / / /_/ / / / / / /
/_____/_/ /_/ /_/ .___/\____/_/  /_/\__,_/_/ /_/ /_/
               /_/
    "#
    );
}

/// Prints server startup information.
pub fn print_startup_info(port: u16) {
    let separator = "=".repeat(60);
    info!("{}", separator);
    info!("REST API:  http://0.0.0.0:{}", port);
    info!("Health:    http://0.0.0.0:{}/health", port);
    info!("API Docs:  http://0.0.0.0:{}/swagger-ui", port);
    info!("{}", separator);
}
