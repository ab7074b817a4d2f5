use std::sync::Arc;

use log::info;

use crate::proxy_service::proxy_config::ProxyTarget;
use crate::proxy_service::RouteBuildError;
use crate::route_config::{GatewayRoutesFile, HttpMethod, RouteConfig};

/// One registered proxy endpoint: inbound path, accepted methods, and the
/// shared forwarding target handed to every service instance for the route.
pub struct GatewayEndpoint {
  pub path: Arc<str>,
  pub methods: Box<[HttpMethod]>,
  pub target: Arc<ProxyTarget>,
}

/// Turns the routes file into registrable endpoints, validating every route
/// against the backend base URL up front.
pub fn build_endpoints(
  backend_url: &str,
  config: GatewayRoutesFile,
) -> Result<Vec<GatewayEndpoint>, RouteBuildError> {
  let mut endpoints: Vec<GatewayEndpoint> = Vec::with_capacity(config.routes.len());

  for route in config.routes.iter() {
    endpoints.push(build_endpoint(backend_url, route)?);
  }

  Ok(endpoints)
}

fn build_endpoint(
  backend_url: &str,
  route: &RouteConfig,
) -> Result<GatewayEndpoint, RouteBuildError> {
  let target = ProxyTarget::from_route(backend_url, route)?;
  let methods = route.methods();

  let method_list: Vec<String> = methods.iter().map(|m| m.to_string()).collect();
  info!(
    "Proxy route registered at '{}' [{}] -> '{}{}'.",
    &route.path,
    method_list.join(","),
    backend_url.trim_end_matches('/'),
    &route.upstream
  );

  Ok(GatewayEndpoint {
    path: Arc::from(route.path.as_str()),
    methods: methods.into_boxed_slice(),
    target: Arc::from(target),
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::route_config::NameValuePair;

  fn routes_file(routes: Vec<RouteConfig>) -> GatewayRoutesFile {
    GatewayRoutesFile { routes }
  }

  #[test]
  fn builds_endpoints_from_config() {
    let config = routes_file(vec![
      RouteConfig {
        path: "/groups/{id}/expenses".to_string(),
        upstream: "/groups/{id}/expenses".to_string(),
        methods: Some(vec![HttpMethod::Get, HttpMethod::Post]),
        headers: None,
      },
      RouteConfig {
        path: "/friends/requests".to_string(),
        upstream: "/friends/requests".to_string(),
        methods: None,
        headers: Some(vec![NameValuePair {
          name: "x-gateway".to_string(),
          value: "divvy".to_string(),
        }]),
      },
    ]);

    let endpoints = build_endpoints("http://backend:9000", config).unwrap();

    assert_eq!(endpoints.len(), 2);
    assert_eq!(endpoints[0].path.as_ref(), "/groups/{id}/expenses");
    assert_eq!(
      endpoints[0].methods.as_ref(),
      &[HttpMethod::Get, HttpMethod::Post]
    );
    assert_eq!(endpoints[1].methods.as_ref(), &[HttpMethod::Get]);
    assert!(endpoints[1].target.headers.is_some());
  }

  #[test]
  fn propagates_route_validation_errors() {
    let config = routes_file(vec![RouteConfig {
      path: "/groups".to_string(),
      upstream: "/groups/{id}".to_string(),
      methods: None,
      headers: None,
    }]);

    let result = build_endpoints("http://backend:9000", config);
    assert!(result.is_err());
  }
}
