use anyhow::{Context, Result};
use std::{
    env,
    net::SocketAddr,
    path::PathBuf,
};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8001";

#[derive(Debug, Clone)]
pub struct EchoConfig {
    pub bind_addr: SocketAddr,
    /// Peer host allowed to override the connection address through
    /// `X-Real-IP` / `X-Real-Port`.
    pub trust_proxy: Option<String>,
    pub template_path: Option<PathBuf>,
}

impl EchoConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .context("invalid BIND_ADDR")?;

        // An empty TRUST_PROXY means no proxy is trusted, same as unset.
        let trust_proxy = lookup("TRUST_PROXY").filter(|v| !v.is_empty());

        let template_path = lookup("TEMPLATE_PATH")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            bind_addr,
            trust_proxy,
            template_path,
        })
    }
}

impl Default for EchoConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8001)),
            trust_proxy: None,
            template_path: None,
        }
    }
}
