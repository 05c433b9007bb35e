use std::net::IpAddr;

use http::{HeaderMap, Method, header};
use serde::{Serialize, Serializer};

use crate::resolver::{ResolvedAddr, header_str};

/// Text shown for an unparsable IP in plain-text and HTML output.
pub const MISSING_IP_TEXT: &str = "<nil>";

/// Attributes echoed back to the caller. Built once per request, after the
/// caller address has been resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestInfo {
    #[serde(serialize_with = "ip_or_empty")]
    pub ip: Option<IpAddr>,
    pub port: i64,
    pub user_agent: String,
    pub language: String,
    pub encoding: String,
    pub mime: String,
    pub forwarded: String,
    pub method: String,
}

impl RequestInfo {
    pub fn new(addr: &ResolvedAddr, method: &Method, headers: &HeaderMap) -> Self {
        Self {
            ip: parse_ip(&addr.host),
            port: addr.port.parse().unwrap_or(0),
            user_agent: header_str(headers, header::USER_AGENT.as_str()).into_owned(),
            language: header_str(headers, header::CONTENT_LANGUAGE.as_str()).into_owned(),
            encoding: header_str(headers, header::CONTENT_ENCODING.as_str()).into_owned(),
            mime: header_str(headers, header::CONTENT_TYPE.as_str()).into_owned(),
            forwarded: header_str(headers, "x-forwarded-for").into_owned(),
            method: method.as_str().to_string(),
        }
    }

    /// Text form of the IP, or [`MISSING_IP_TEXT`] when the resolved host was
    /// not an address.
    pub fn ip_text(&self) -> String {
        self.ip
            .map(|ip| ip.to_string())
            .unwrap_or_else(|| MISSING_IP_TEXT.to_string())
    }

    pub fn is_curl(&self) -> bool {
        self.user_agent.contains("curl")
    }
}

/// IPv4-mapped IPv6 addresses are reported in their dotted IPv4 form.
fn parse_ip(raw: &str) -> Option<IpAddr> {
    raw.parse::<IpAddr>().ok().map(|ip| ip.to_canonical())
}

fn ip_or_empty<S>(ip: &Option<IpAddr>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match ip {
        Some(ip) => serializer.collect_str(ip),
        None => serializer.serialize_str(""),
    }
}
