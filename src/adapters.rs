pub mod api_errors;
pub mod backend_client;
pub mod http;
