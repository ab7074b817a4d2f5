use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use divvy_gateway::endpoint_map::{self, GatewayEndpoint};
use divvy_gateway::http_client::HttpClientConfig;
use divvy_gateway::route_config::{GatewayRoutesFile, HttpMethod, RouteConfig};
use divvy_gateway::server;
use divvy_gateway::settings::Settings;
use log::LevelFilter;
use std::sync::{Arc, Mutex};

#[derive(Clone, Debug)]
pub struct RecordedRequest {
  pub method: String,
  pub path: String,
  pub query: String,
  pub headers: Vec<(String, String)>,
  pub body: Vec<u8>,
}

impl RecordedRequest {
  pub fn header(&self, name: &str) -> Option<&str> {
    self
      .headers
      .iter()
      .find(|(key, _)| key == name)
      .map(|(_, value)| value.as_str())
  }
}

pub type RequestLog = Arc<Mutex<Vec<RecordedRequest>>>;

async fn expenses_handler(
  req: HttpRequest,
  body: web::Bytes,
  log: web::Data<RequestLog>,
) -> HttpResponse {
  let headers = req
    .headers()
    .iter()
    .map(|(name, value)| {
      (
        name.as_str().to_string(),
        value.to_str().unwrap_or_default().to_string(),
      )
    })
    .collect();

  log.lock().unwrap().push(RecordedRequest {
    method: req.method().to_string(),
    path: req.path().to_string(),
    query: req.query_string().to_string(),
    headers,
    body: body.to_vec(),
  });

  let id = req.match_info().get("id").unwrap_or_default();
  if id == "missing" {
    return HttpResponse::NotFound()
      .content_type("application/json")
      .body(r#"{"error":"group not found"}"#);
  }

  match req.method().as_str() {
    "POST" => HttpResponse::Created()
      .content_type("application/json")
      .body(r#"{"id":"e9"}"#),
    _ => HttpResponse::Ok()
      .content_type("application/json")
      .insert_header(("x-backend-marker", "v1"))
      .body(r#"[{"id":"e1","amount":12.5}]"#),
  }
}

/// Spawns a stub expense backend on a random port and returns the port plus
/// a log of every request it received.
pub async fn spawn_mock_backend() -> (u16, RequestLog) {
  let log: RequestLog = Arc::new(Mutex::new(Vec::new()));
  let state = log.clone();

  let backend = HttpServer::new(move || {
    App::new()
      .app_data(web::Data::new(state.clone()))
      .route("/groups/{id}/expenses", web::route().to(expenses_handler))
      .default_service(web::route().to(|| async { HttpResponse::NotFound().finish() }))
  })
  .workers(1)
  .bind(("127.0.0.1", 0))
  .expect("mock backend bind");

  let port = backend.addrs()[0].port();
  actix_web::rt::spawn(backend.run());

  (port, log)
}

pub fn test_settings() -> Settings {
  Settings {
    bind: "127.0.0.1".to_string(),
    port: 0,
    worker_count: 1,
    backend_url: String::new(),
    routes_file: String::new(),
    log_level: LevelFilter::Off,
    egress_proxy: None,
    proxy_auth_user: None,
    proxy_auth_pass: None,
    proxy_cookies: false,
    upstream_timeout_secs: 5,
  }
}

fn expense_routes() -> GatewayRoutesFile {
  GatewayRoutesFile {
    routes: vec![RouteConfig {
      path: "/groups/{id}/expenses".to_string(),
      upstream: "/groups/{id}/expenses".to_string(),
      methods: Some(vec![HttpMethod::Get, HttpMethod::Post]),
      headers: None,
    }],
  }
}

/// Spawns the gateway against the given backend port and returns the port it
/// listens on.
pub async fn spawn_gateway(backend_port: u16) -> u16 {
  let backend_url = format!("http://127.0.0.1:{backend_port}");
  let endpoints: Vec<GatewayEndpoint> =
    endpoint_map::build_endpoints(&backend_url, expense_routes()).expect("endpoint build");

  let http_client = HttpClientConfig {
    egress_proxy: None,
    user: None,
    pass: None,
    enable_cookies: false,
    timeout_secs: 5,
  }
  .to_client()
  .expect("client build");

  let (server, addrs) =
    server::bind(&test_settings(), endpoints, http_client).expect("gateway bind");
  let port = addrs[0].port();
  actix_web::rt::spawn(server);

  port
}

/// A local port with nothing listening on it.
pub fn closed_port() -> u16 {
  let listener = std::net::TcpListener::bind(("127.0.0.1", 0)).expect("probe bind");
  let port = listener.local_addr().expect("probe addr").port();
  drop(listener);
  port
}

pub fn http_client() -> reqwest::Client {
  reqwest::Client::builder().no_proxy().build().unwrap()
}
