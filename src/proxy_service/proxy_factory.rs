use crate::proxy_service::proxy_config::ProxyTarget;
use crate::proxy_service::proxy_route_service::ProxyRouteService;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::Error;
use futures_core::future::LocalBoxFuture;
use reqwest::Client;
use std::sync::Arc;

pub struct ProxyRouteServiceFactory {
  pub target: Arc<ProxyTarget>,
  pub http_client: Client,
}

impl ServiceFactory<ServiceRequest> for ProxyRouteServiceFactory {
  type Response = ServiceResponse;
  type Error = Error;
  type Config = ();
  type Service = ProxyRouteService;
  type InitError = ();
  type Future = LocalBoxFuture<'static, Result<Self::Service, Self::InitError>>;

  fn new_service(&self, _: Self::Config) -> Self::Future {
    let service = ProxyRouteService {
      target: self.target.clone(),
      http_client: self.http_client.clone(),
    };

    Box::pin(async move { Ok(service) })
  }
}

impl ProxyRouteServiceFactory {
  pub fn create(http_client: Client, target: Arc<ProxyTarget>) -> Self {
    Self {
      target,
      http_client,
    }
  }
}
