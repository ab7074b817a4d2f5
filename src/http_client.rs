use reqwest::redirect::Policy;
use reqwest::Client;
use std::time::Duration;

/// Builder input for the shared upstream client. Built once at startup and
/// cloned into every proxy route service.
pub struct HttpClientConfig {
  pub egress_proxy: Option<String>,
  pub user: Option<String>,
  pub pass: Option<String>,
  pub enable_cookies: bool,
  pub timeout_secs: u64,
}

impl HttpClientConfig {
  pub fn to_client(self) -> Result<Client, reqwest::Error> {
    let HttpClientConfig {
      egress_proxy,
      user,
      pass,
      enable_cookies,
      timeout_secs,
    } = self;
    let mut client_builder = reqwest::ClientBuilder::new()
      .user_agent(concat!("divvy-gateway/", env!("CARGO_PKG_VERSION")))
      .timeout(Duration::from_secs(timeout_secs));

    if let Some(proxy_url) = egress_proxy {
      let mut proxy = reqwest::Proxy::all(proxy_url)?;

      if let (Some(user_name), Some(password)) = (user, pass) {
        proxy = proxy.basic_auth(&user_name, &password);
      }

      client_builder = client_builder.proxy(proxy);
    }

    if enable_cookies {
      client_builder = client_builder.cookie_store(true);
    }

    let client = client_builder.redirect(Policy::limited(5)).build()?;

    Ok(client)
  }
}
