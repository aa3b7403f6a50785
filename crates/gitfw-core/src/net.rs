//! Shared curl handle settings: timeouts, user agent and proxy.

use std::time::Duration;

/// Options applied to every curl handle gitfw creates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkOptions {
    /// Proxy URL (e.g. `http://proxy.corp:8080`).
    pub proxy: Option<String>,
    /// Authenticate to the proxy as the current user (NTLM / Negotiate).
    pub proxy_default_credentials: bool,
    pub connect_timeout: Duration,
    /// Overall limit for one request.
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for NetworkOptions {
    fn default() -> Self {
        Self {
            proxy: None,
            proxy_default_credentials: false,
            connect_timeout: Duration::from_secs(30),
            timeout: Duration::from_secs(1800),
            user_agent: format!("gitfw/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl NetworkOptions {
    /// Apply timeouts, user agent and proxy settings to `easy`.
    pub fn apply(&self, easy: &mut curl::easy::Easy) -> Result<(), curl::Error> {
        easy.connect_timeout(self.connect_timeout)?;
        easy.timeout(self.timeout)?;
        easy.useragent(&self.user_agent)?;
        if let Some(proxy) = self.proxy.as_deref() {
            easy.proxy(proxy)?;
            if self.proxy_default_credentials {
                // Empty user and password make libcurl use the logged-on identity.
                let mut auth = curl::easy::Auth::new();
                auth.ntlm(true).gssnegotiate(true);
                easy.proxy_auth(&auth)?;
                easy.proxy_username("")?;
                easy.proxy_password("")?;
            }
        } else if self.proxy_default_credentials {
            tracing::warn!("proxy credentials requested without a proxy; ignoring");
        }
        Ok(())
    }
}
