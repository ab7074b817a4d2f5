pub mod endpoint_map;
pub mod http_client;
pub mod pages;
pub mod path_template;
pub mod proxy_service;
pub mod route_config;
pub mod server;
pub mod settings;
pub mod std_logger;
