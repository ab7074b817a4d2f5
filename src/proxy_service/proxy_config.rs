use crate::path_template::PathTemplate;
use reqwest::header::{HeaderName, HeaderValue};

#[derive(Clone)]
pub struct Header {
  pub name: HeaderName,
  pub value: HeaderValue,
}

/// Per-route forwarding target, built once at startup. The upstream URL for
/// a request is `base_url` + rendered `upstream` template + inbound query
/// string; method and body are mirrored from the inbound request.
pub struct ProxyTarget {
  pub base_url: Box<str>,
  pub upstream: PathTemplate,
  pub headers: Option<Box<[Header]>>,
}
