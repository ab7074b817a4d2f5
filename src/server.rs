use crate::endpoint_map::GatewayEndpoint;
use crate::pages;
use crate::proxy_service::proxy_factory::ProxyRouteServiceFactory;
use crate::route_config::HttpMethod;
use crate::settings::Settings;
use actix_cors::Cors;
use actix_web::dev::Server;
use actix_web::{guard, web, App, HttpServer};
use reqwest::Client;
use std::net::SocketAddr;
use std::sync::Arc;

/// Binds the gateway: page routes first, then one proxy service per
/// configured endpoint, guarded by its allowed methods. Returns the bound
/// addresses so callers binding port 0 can discover the real port.
pub fn bind(
  settings: &Settings,
  endpoints: Vec<GatewayEndpoint>,
  http_client: Client,
) -> std::io::Result<(Server, Vec<SocketAddr>)> {
  let endpoints: Arc<Vec<GatewayEndpoint>> = Arc::new(endpoints);

  let http_server = HttpServer::new(move || {
    let mut app = App::new()
      .route("/", web::get().to(pages::index))
      .route("/friends", web::get().to(pages::friends))
      .route("/groups/new", web::get().to(pages::create_group))
      .route("/onboarding", web::get().to(pages::onboarding));

    for endpoint in endpoints.iter() {
      let factory =
        ProxyRouteServiceFactory::create(http_client.clone(), endpoint.target.clone());

      app = app.service(
        web::service(endpoint.path.as_ref())
          .guard(method_guard(&endpoint.methods))
          .finish(factory),
      );
    }

    app.wrap(Cors::permissive())
  })
  .workers(settings.worker_count)
  .bind((settings.bind.clone(), settings.port))?;

  let addrs = http_server.addrs();

  Ok((http_server.run(), addrs))
}

fn method_guard(methods: &[HttpMethod]) -> guard::AnyGuard {
  let first = methods.first().copied().unwrap_or_default();
  let mut any = guard::Any(guard::Method(first.into()));

  for method in methods.iter().skip(1) {
    any = any.or(guard::Method((*method).into()));
  }

  any
}
