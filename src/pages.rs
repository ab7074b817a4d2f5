//! Page composition: each screen is the shared HTML shell wrapping one
//! static content view, plus the shared bottom navigation where the screen
//! calls for it. The onboarding walkthrough renders full-screen without
//! navigation chrome.

use actix_web::http::header;
use actix_web::HttpResponse;

const SHELL: &str = include_str!("../templates/shell.html");
const BOTTOM_NAV: &str = include_str!("../templates/bottom_nav.html");
const FRIENDS_VIEW: &str = include_str!("../templates/friends.html");
const CREATE_GROUP_VIEW: &str = include_str!("../templates/create_group.html");
const ONBOARDING_VIEW: &str = include_str!("../templates/onboarding.html");

fn compose(title: &str, content: &str, with_nav: bool) -> String {
  let nav = if with_nav { BOTTOM_NAV } else { "" };

  SHELL
    .replace("{{TITLE}}", title)
    .replace("{{CONTENT}}", content)
    .replace("{{NAV}}", nav)
}

fn html(body: String) -> HttpResponse {
  HttpResponse::Ok()
    .content_type(header::ContentType::html())
    .body(body)
}

pub async fn index() -> HttpResponse {
  HttpResponse::Found()
    .append_header((header::LOCATION, "/friends"))
    .finish()
}

pub async fn friends() -> HttpResponse {
  html(compose("Friends", FRIENDS_VIEW, true))
}

pub async fn create_group() -> HttpResponse {
  html(compose("New group", CREATE_GROUP_VIEW, true))
}

pub async fn onboarding() -> HttpResponse {
  html(compose("Welcome", ONBOARDING_VIEW, false))
}
