use crate::proxy_service::proxy_config::ProxyTarget;
use actix_web::body::BoxBody;
use actix_web::dev::{self, Payload, Service, ServiceRequest, ServiceResponse};
use actix_web::{Error, HttpRequest, HttpResponse, ResponseError};
use futures_core::future::LocalBoxFuture;
use futures_core::Stream;
use futures_util::StreamExt;
use log::{debug, error};
use reqwest::header::{HeaderMap, HeaderName};
use reqwest::{Client, RequestBuilder, Response};
use std::sync::Arc;

/// The generic forwarder: one instance per registered proxy route. Resolves
/// the route's path parameters, mirrors the inbound method, headers, and body
/// onto an upstream request, and relays the backend response untouched.
pub struct ProxyRouteService {
  pub(super) target: Arc<ProxyTarget>,
  pub(super) http_client: Client,
}

/// Connection-scoped headers that must not cross the proxy boundary, plus
/// framing headers the server re-derives from the relayed body.
fn is_skipped(name: &HeaderName) -> bool {
  matches!(
    name.as_str(),
    "connection"
      | "content-length"
      | "host"
      | "keep-alive"
      | "proxy-authenticate"
      | "proxy-authorization"
      | "te"
      | "trailer"
      | "transfer-encoding"
      | "upgrade"
  )
}

impl Service<ServiceRequest> for ProxyRouteService {
  type Response = ServiceResponse;
  type Error = Error;
  type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

  dev::always_ready!();

  fn call(&self, req: ServiceRequest) -> Self::Future {
    let (http_request, payload) = req.into_parts();
    let proxy_request = self.init_request(&http_request);

    Box::pin(async move {
      Ok(ProxyRouteService::exec(proxy_request, http_request, payload).await)
    })
  }
}

impl ProxyRouteService {
  async fn exec(
    builder: Option<RequestBuilder>,
    http: HttpRequest,
    mut payload: Payload,
  ) -> ServiceResponse {
    let Some(builder) = builder else {
      // Startup validation makes this unreachable for well-formed configs.
      let response = HttpResponse::InternalServerError().finish();
      return ServiceResponse::new(http, response);
    };

    let proxy_response = {
      let (size, _) = payload.size_hint();
      let mut body_buffer: Vec<u8> = Vec::with_capacity(size);

      while let Some(chunk) = payload.next().await {
        match chunk {
          Ok(bytes) => {
            body_buffer.extend_from_slice(&bytes);
          }
          Err(err) => {
            let error_response = err.error_response();
            return ServiceResponse::new(http, error_response);
          }
        }
      }

      builder.body(body_buffer).send().await
    };

    debug!("Upstream response {:?}", &proxy_response);

    match proxy_response {
      Ok(data) => {
        let response = ProxyRouteService::map_response_head(&data);

        match data.bytes().await {
          Ok(bytes) => ServiceResponse::new(http, response.set_body(BoxBody::new(bytes))),
          Err(err) => {
            error!("Reading upstream body failed: {}", err);
            let response = HttpResponse::BadGateway().finish();
            ServiceResponse::new(http, response)
          }
        }
      }
      Err(err) => {
        error!("Upstream request failed: {}", err);
        let response = HttpResponse::BadGateway().finish();
        ServiceResponse::new(http, response)
      }
    }
  }

  /// Builds the upstream request from the inbound one. Path parameters are
  /// plain strings already resolved by route matching; they are interpolated
  /// into the upstream template before anything else, and the inbound query
  /// string is carried over verbatim.
  fn init_request(&self, source_request: &HttpRequest) -> Option<RequestBuilder> {
    let match_info = source_request.match_info();
    let upstream_path = match self.target.upstream.render(|name| match_info.get(name)) {
      Ok(path) => path,
      Err(err) => {
        error!("Unable to resolve upstream path: {}", err);
        return None;
      }
    };

    let mut url = format!("{}{}", self.target.base_url, upstream_path);
    let query = source_request.query_string();
    if !query.is_empty() {
      url.push('?');
      url.push_str(query);
    }

    let mut builder = self
      .http_client
      .request(source_request.method().clone(), url);

    let mut header_map = HeaderMap::new();

    for (name, value) in source_request.headers() {
      if is_skipped(name) {
        continue;
      }

      header_map.append(name.clone(), value.clone());
    }

    if let Some(headers) = self.target.headers.as_deref() {
      for header in headers.iter() {
        header_map.insert(&header.name, header.value.clone());
      }
    }

    builder = builder.headers(header_map);

    Some(builder)
  }

  /// Copies status and headers from the backend response. Multi-valued
  /// headers (Set-Cookie in particular) are appended, not replaced.
  fn map_response_head(response: &Response) -> HttpResponse {
    let mut http_response = HttpResponse::new(response.status());
    let headers = http_response.headers_mut();

    for (name, value) in response.headers() {
      if is_skipped(name) {
        continue;
      }

      headers.append(name.clone(), value.clone());
    }

    http_response
  }
}
