use clap::Parser;
use log::LevelFilter;
use std::env;

#[derive(Parser, Debug, Default)]
#[command(
  name = "divvy-gateway",
  version,
  about = "Web front-end gateway for the Divvy expense-splitting backend"
)]
pub struct Cli {
  /// Base URL of the backend service that owns groups, expenses and friends.
  #[arg(long)]
  pub backend_url: Option<String>,

  /// Location of the YAML proxy routes file.
  #[arg(long)]
  pub routes_file: Option<String>,

  /// Listen address.
  #[arg(long)]
  pub bind: Option<String>,

  /// Listen port.
  #[arg(long)]
  pub port: Option<u16>,

  /// HTTP worker count.
  #[arg(long)]
  pub workers: Option<usize>,
}

pub struct Settings {
  pub bind: String,
  pub port: u16,
  pub worker_count: usize,
  pub backend_url: String,
  pub routes_file: String,
  pub log_level: LevelFilter,
  pub egress_proxy: Option<String>,
  pub proxy_auth_user: Option<String>,
  pub proxy_auth_pass: Option<String>,
  pub proxy_cookies: bool,
  pub upstream_timeout_secs: u64,
}

impl Settings {
  /// CLI flags win over environment variables, which win over defaults.
  pub fn resolve(cli: Cli) -> Settings {
    const DEFAULT_PORT: u16 = 8080;
    const DEFAULT_WORKER_COUNT: usize = 4;
    const DEFAULT_BIND: &str = "0.0.0.0";
    const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:9000";
    const DEFAULT_TIMEOUT_SECS: u64 = 30;

    let bind = cli
      .bind
      .or_else(|| env::var("HTTP_BIND").ok())
      .unwrap_or_else(|| DEFAULT_BIND.into());
    let port = cli
      .port
      .or_else(|| env::var("HTTP_PORT").ok().and_then(|e| e.parse::<u16>().ok()))
      .unwrap_or(DEFAULT_PORT);
    let worker_count = cli
      .workers
      .or_else(|| {
        env::var("HTTP_WORKER_COUNT")
          .ok()
          .and_then(|e| e.parse::<usize>().ok())
      })
      .unwrap_or(DEFAULT_WORKER_COUNT);
    let backend_url = cli
      .backend_url
      .or_else(|| env::var("BACKEND_URL").ok())
      .unwrap_or_else(|| DEFAULT_BACKEND_URL.into());
    let routes_file = cli
      .routes_file
      .or_else(|| env::var("ROUTE_CONF_LOCATION").ok())
      .unwrap_or_else(|| "config.yaml".into());

    let log_level = env::var("LOG_LEVEL")
      .ok()
      .and_then(|e| e.parse::<LevelFilter>().ok())
      .unwrap_or(LevelFilter::Info);

    let egress_proxy = env::var("HTTP_PROXY_URL").map_or(None, Some);
    let proxy_auth_user = env::var("HTTP_PROXY_USER").map_or(None, Some);
    let proxy_auth_pass = env::var("HTTP_PROXY_PASS").map_or(None, Some);
    let proxy_cookies = env::var("HTTP_PROXY_COOKIES")
      .map_or(false, |e| e.parse::<bool>().unwrap_or(false));
    let upstream_timeout_secs = env::var("UPSTREAM_TIMEOUT_SECS")
      .ok()
      .and_then(|e| e.parse::<u64>().ok())
      .unwrap_or(DEFAULT_TIMEOUT_SECS);

    Settings {
      bind,
      port,
      worker_count,
      backend_url,
      routes_file,
      log_level,
      egress_proxy,
      proxy_auth_user,
      proxy_auth_pass,
      proxy_cookies,
      upstream_timeout_secs,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn cli_flags_win_over_defaults() {
    let cli = Cli {
      backend_url: Some("http://backend:9000".into()),
      routes_file: None,
      bind: Some("127.0.0.1".into()),
      port: Some(3000),
      workers: None,
    };

    let settings = Settings::resolve(cli);

    assert_eq!(settings.backend_url, "http://backend:9000");
    assert_eq!(settings.bind, "127.0.0.1");
    assert_eq!(settings.port, 3000);
    assert_eq!(settings.routes_file, "config.yaml");
  }
}
