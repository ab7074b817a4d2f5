use clap::Parser;
use divvy_gateway::http_client::HttpClientConfig;
use divvy_gateway::route_config::GatewayRoutesFile;
use divvy_gateway::settings::{Cli, Settings};
use divvy_gateway::{endpoint_map, server, std_logger};
use log::info;
use std::fs;
use std::io::{ErrorKind, Result};

#[actix_web::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();
  let settings = Settings::resolve(cli);

  std_logger::init(settings.log_level)
    .map_err(|error| std::io::Error::new(ErrorKind::Other, error))?;

  let http_client_config = HttpClientConfig {
    egress_proxy: settings.egress_proxy.clone(),
    user: settings.proxy_auth_user.clone(),
    pass: settings.proxy_auth_pass.clone(),
    enable_cookies: settings.proxy_cookies,
    timeout_secs: settings.upstream_timeout_secs,
  };
  let http_client = http_client_config
    .to_client()
    .map_err(|error| std::io::Error::new(ErrorKind::Other, error))?;

  let routes_fd = fs::File::open(&settings.routes_file)?;
  let routes = GatewayRoutesFile::load_from_file(&routes_fd)?;

  let endpoints = endpoint_map::build_endpoints(&settings.backend_url, routes)
    .map_err(|error| std::io::Error::new(ErrorKind::InvalidInput, error))?;

  info!(
    "Divvy gateway listening on {}:{}, forwarding to '{}'.",
    &settings.bind, settings.port, &settings.backend_url
  );

  let (server, _addrs) = server::bind(&settings, endpoints, http_client)?;

  server.await
}
