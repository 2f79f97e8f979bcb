// Database access layer
// Everything that talks to Postgres goes through the SqlExecutor, which
// consults the query gate before any statement reaches the driver.

pub mod executor;
pub mod messages;
pub mod organizations;
pub mod schema;

pub use executor::SqlExecutor;
pub use messages::MessageLogger;
pub use organizations::OrganizationService;
pub use schema::SchemaIntrospector;

use sqlx::postgres::{PgPool, PgPoolOptions};

use dojo_core::{AgentError, AgentResult};

use crate::config::DatabaseConfig;

/// Build the connection pool. Lazy: no connection is attempted until the
/// first statement executes.
pub fn connect(config: &DatabaseConfig) -> AgentResult<PgPool> {
    let url = config.connect_url()?;
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_lazy(&url)
        .map_err(|e| AgentError::connection_failed(e.to_string()))
}
