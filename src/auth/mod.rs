// Authentication: key handling, audit logging and the HTTP gate middleware

pub mod api_key;
pub mod audit_logger;
pub mod auth_middleware;
