use std::borrow::Cow;

use http::HeaderMap;

use crate::error::{EchoError, EchoResult};

const X_REAL_IP: &str = "x-real-ip";
const X_REAL_PORT: &str = "x-real-port";

/// Host and port exactly as they were found, before any parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAddr {
    pub host: String,
    pub port: String,
}

/// Works out the caller address, honouring at most one trusted reverse proxy.
#[derive(Debug, Clone, Default)]
pub struct AddressResolver {
    trusted_proxy: Option<String>,
}

impl AddressResolver {
    pub fn new(trusted_proxy: Option<String>) -> Self {
        Self { trusted_proxy }
    }

    pub fn trusted_proxy(&self) -> Option<&str> {
        self.trusted_proxy.as_deref()
    }

    pub fn resolve(&self, peer_addr: &str, headers: &HeaderMap) -> EchoResult<ResolvedAddr> {
        let (host, port) =
            split_host_port(peer_addr.trim()).ok_or_else(|| EchoError::AddressParse {
                addr: peer_addr.to_string(),
            })?;

        let Some(trusted) = self.trusted_proxy.as_deref() else {
            return Ok(ResolvedAddr {
                host: host.to_string(),
                port: port.to_string(),
            });
        };

        if host != trusted {
            tracing::warn!(peer = %host, trust_proxy = %trusted, "peer is not the trusted proxy");
            return Err(EchoError::UntrustedProxy {
                peer: host.to_string(),
                trusted: trusted.to_string(),
            });
        }

        Ok(ResolvedAddr {
            host: header_str(headers, X_REAL_IP).into_owned(),
            port: header_str(headers, X_REAL_PORT).into_owned(),
        })
    }
}

/// First value of `name`, or `""` when absent. Non-ASCII bytes are kept;
/// invalid UTF-8 sequences become U+FFFD.
pub fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Cow<'a, str> {
    headers
        .get(name)
        .map(|v| String::from_utf8_lossy(v.as_bytes()))
        .unwrap_or_default()
}

/// Splits `host:port` or `[host]:port`. Brackets are stripped from the host.
fn split_host_port(addr: &str) -> Option<(&str, &str)> {
    if let Some(rest) = addr.strip_prefix('[') {
        let (host, after) = rest.split_once(']')?;
        let port = after.strip_prefix(':')?;
        if host.contains(['[', ']']) || port.contains(['[', ']', ':']) {
            return None;
        }
        return Some((host, port));
    }

    let (host, port) = addr.rsplit_once(':')?;
    if host.contains([':', '[', ']']) || port.contains(['[', ']']) {
        return None;
    }
    Some((host, port))
}
