use axum::{
    Json,
    body::Body,
    http::{HeaderValue, Method, StatusCode, Uri, header},
    response::{Html, IntoResponse, Response},
};

use crate::{
    info::RequestInfo,
    template::HtmlTemplate,
};

const NOT_FOUND_BODY: &str = "404 page not found";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Index,
    Ip,
    UserAgent,
    Language,
    Encoding,
    Forwarded,
    All,
    AllJson,
}

impl Route {
    /// Exact path match; every method is accepted.
    pub fn from_path(path: &str) -> Option<Self> {
        let route = match path {
            "/" => Self::Index,
            "/ip" => Self::Ip,
            "/ua" => Self::UserAgent,
            "/lang" => Self::Language,
            "/encoding" => Self::Encoding,
            "/forwarded" => Self::Forwarded,
            "/all" => Self::All,
            "/all.json" => Self::AllJson,
            _ => return None,
        };
        Some(route)
    }

    pub fn respond(self, info: &RequestInfo, template: &HtmlTemplate) -> Response<Body> {
        match self {
            Self::Index if info.is_curl() => plain(info.ip_text()),
            Self::Index => Html(template.render(info)).into_response(),
            // `/all` has always echoed the bare address; `/all.json` is the full dump.
            Self::Ip | Self::All => plain(info.ip_text()),
            Self::UserAgent => plain(info.user_agent.clone()),
            Self::Language => plain(info.language.clone()),
            Self::Encoding => plain(info.encoding.clone()),
            Self::Forwarded => plain(info.forwarded.clone()),
            Self::AllJson => Json(info).into_response(),
        }
    }
}

/// `/ip/` points at `/ip`: 301 for GET, 307 for every other method so the
/// method and body are replayed. Only paths that name a route are redirected.
pub fn trailing_slash_redirect(method: &Method, uri: &Uri) -> Option<Response<Body>> {
    let path = uri.path();
    let trimmed = path.strip_suffix('/').filter(|p| !p.is_empty())?;
    Route::from_path(trimmed)?;

    let location = match uri.query() {
        Some(query) => format!("{trimmed}?{query}"),
        None => trimmed.to_string(),
    };
    let location = HeaderValue::from_str(&location).ok()?;

    let status = if *method == Method::GET {
        StatusCode::MOVED_PERMANENTLY
    } else {
        StatusCode::TEMPORARY_REDIRECT
    };
    Some((status, [(header::LOCATION, location)]).into_response())
}

pub fn not_found() -> Response<Body> {
    (StatusCode::NOT_FOUND, NOT_FOUND_BODY).into_response()
}

/// `String` bodies are sent as `text/plain; charset=utf-8`.
fn plain(body: String) -> Response<Body> {
    (StatusCode::OK, body).into_response()
}
