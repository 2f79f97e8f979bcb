// Dojo Agent - SQL agent gateway for the martial-arts CRM
// Core library

pub mod agent;
pub mod config;
pub mod db;
pub mod observability;
pub mod sms;

use std::sync::Arc;

use dojo_core::AgentResult;
use dojo_sql::{GateConfig, QueryGate};

use agent::AgentFactory;
use config::AppConfig;
use db::{MessageLogger, OrganizationService, SchemaIntrospector, SqlExecutor};
use sms::TwilioClient;

pub struct AppState {
    pub config: AppConfig,
    pub executor: Arc<SqlExecutor>,
    pub organizations: Arc<OrganizationService>,
    pub messages: Arc<MessageLogger>,
    pub introspector: Arc<SchemaIntrospector>,
    pub sms: Option<Arc<TwilioClient>>,
    pub factory: AgentFactory,
}

impl AppState {
    /// Wire up the service from an explicit config.
    ///
    /// The pool is lazy (no connection is made until the first statement
    /// executes), so construction succeeds without a reachable database.
    pub fn new(config: AppConfig) -> AgentResult<Self> {
        let pool = db::connect(&config.database)?;
        let gate = QueryGate::new(GateConfig {
            policy: config.policy,
        });

        let executor = Arc::new(SqlExecutor::new(pool, gate));
        let organizations = Arc::new(OrganizationService::new(Arc::clone(&executor)));
        let messages = Arc::new(MessageLogger::new(Arc::clone(&executor)));
        let introspector = Arc::new(SchemaIntrospector::new(Arc::clone(&executor)));
        let sms = config.twilio.as_ref().map(|t| Arc::new(TwilioClient::new(t)));

        let factory = AgentFactory::new(
            Arc::clone(&executor),
            Arc::clone(&organizations),
            Arc::clone(&introspector),
            Arc::clone(&messages),
            sms.clone(),
            config.model.clone(),
        );

        Ok(Self {
            config,
            executor,
            organizations,
            messages,
            introspector,
            sms,
            factory,
        })
    }
}
