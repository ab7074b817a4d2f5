use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::ErrorKind;

#[derive(Serialize, Deserialize, PartialEq, Debug, Clone, Copy, Hash, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
  #[default]
  Get,
  Post,
  Put,
  Delete,
  Head,
  Patch,
}

#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct NameValuePair {
  pub name: String,
  pub value: String,
}

/// A single proxy route declaration: the inbound path the gateway listens on,
/// the backend-relative path it forwards to, and the methods it accepts.
/// Both paths may contain `{param}` segments; every parameter used by
/// `upstream` must be declared in `path`.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct RouteConfig {
  pub path: String,
  pub upstream: String,
  pub methods: Option<Vec<HttpMethod>>,
  pub headers: Option<Vec<NameValuePair>>,
}

#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct GatewayRoutesFile {
  pub routes: Vec<RouteConfig>,
}

impl GatewayRoutesFile {
  pub fn load_from_file(file: &File) -> Result<GatewayRoutesFile, std::io::Error> {
    let routes: GatewayRoutesFile =
      serde_yaml::from_reader(file).map_err(|err| std::io::Error::new(ErrorKind::Other, err))?;

    Ok(routes)
  }
}

impl RouteConfig {
  /// Methods this route accepts, defaulting to GET when the file omits them.
  pub fn methods(&self) -> Vec<HttpMethod> {
    match &self.methods {
      Some(methods) if !methods.is_empty() => methods.clone(),
      _ => vec![HttpMethod::Get],
    }
  }
}

impl From<HttpMethod> for actix_web::http::Method {
  fn from(value: HttpMethod) -> Self {
    match value {
      HttpMethod::Get => actix_web::http::Method::GET,
      HttpMethod::Post => actix_web::http::Method::POST,
      HttpMethod::Put => actix_web::http::Method::PUT,
      HttpMethod::Delete => actix_web::http::Method::DELETE,
      HttpMethod::Head => actix_web::http::Method::HEAD,
      HttpMethod::Patch => actix_web::http::Method::PATCH,
    }
  }
}

impl Display for HttpMethod {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      HttpMethod::Get => f.write_str("get"),
      HttpMethod::Post => f.write_str("post"),
      HttpMethod::Put => f.write_str("put"),
      HttpMethod::Delete => f.write_str("delete"),
      HttpMethod::Head => f.write_str("head"),
      HttpMethod::Patch => f.write_str("patch"),
    }
  }
}
