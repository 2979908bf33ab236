// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod http_response;
pub mod report_files;
pub mod tessie_client;
