use crate::path_template::{PathTemplate, TemplateError};
use crate::proxy_service::proxy_config::{Header, ProxyTarget};
use crate::route_config::{NameValuePair, RouteConfig};
use reqwest::header::{HeaderName, HeaderValue};
use std::collections::HashSet;
use std::fmt::{Display, Formatter};

pub mod proxy_config;
pub mod proxy_factory;
pub mod proxy_route_service;

#[derive(Debug)]
pub enum RouteBuildError {
  Template(TemplateError),
  InvalidHeaderName(String),
  InvalidHeaderValue(String),
  UndeclaredParam { param: String, path: String },
}

impl Display for RouteBuildError {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      RouteBuildError::Template(err) => write!(f, "{}", err),
      RouteBuildError::InvalidHeaderName(err) => write!(f, "invalid header name: {}", err),
      RouteBuildError::InvalidHeaderValue(err) => write!(f, "invalid header value: {}", err),
      RouteBuildError::UndeclaredParam { param, path } => write!(
        f,
        "upstream parameter '{{{}}}' is not declared by route path '{}'",
        param, path
      ),
    }
  }
}

impl std::error::Error for RouteBuildError {}

impl From<TemplateError> for RouteBuildError {
  fn from(err: TemplateError) -> Self {
    RouteBuildError::Template(err)
  }
}

impl ProxyTarget {
  /// Builds the forwarding target for one configured route. Fails at startup
  /// when the upstream template references a parameter the inbound path does
  /// not capture, so a request can never reach the forwarder with an
  /// unresolvable placeholder.
  pub fn from_route(backend_url: &str, route: &RouteConfig) -> Result<ProxyTarget, RouteBuildError> {
    let upstream = PathTemplate::parse(&route.upstream)?;
    let inbound = PathTemplate::parse(&route.path)?;

    let declared: HashSet<&str> = inbound.param_names().collect();
    for param in upstream.param_names() {
      if !declared.contains(param) {
        return Err(RouteBuildError::UndeclaredParam {
          param: param.to_string(),
          path: route.path.clone(),
        });
      }
    }

    let headers = match &route.headers {
      Some(pairs) => {
        let mut buffer: Vec<Header> = Vec::with_capacity(pairs.len());
        for pair in pairs {
          buffer.push(pair.try_into()?);
        }
        Some(Box::from(buffer.as_slice()))
      }
      None => None,
    };

    Ok(ProxyTarget {
      base_url: Box::from(backend_url.trim_end_matches('/')),
      upstream,
      headers,
    })
  }
}

impl TryFrom<&NameValuePair> for Header {
  type Error = RouteBuildError;

  fn try_from(pair: &NameValuePair) -> Result<Header, Self::Error> {
    let name = HeaderName::try_from(&pair.name)
      .map_err(|e| RouteBuildError::InvalidHeaderName(e.to_string()))?;

    let value = HeaderValue::try_from(&pair.value)
      .map_err(|e| RouteBuildError::InvalidHeaderValue(e.to_string()))?;

    Ok(Header { name, value })
  }
}
