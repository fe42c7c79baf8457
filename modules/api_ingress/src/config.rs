use runtime::AppConfig;

/// HTTP host settings, derived from the `server` and `api` config sections.
#[derive(Debug, Clone)]
pub struct ApiIngressConfig {
    pub bind_addr: String,
    pub enable_docs: bool,
    pub cors_enabled: bool,
    pub body_limit_bytes: usize,
}

impl Default for ApiIngressConfig {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for ApiIngressConfig {
    fn from(cfg: &AppConfig) -> Self {
        Self {
            bind_addr: cfg.bind_addr(),
            enable_docs: cfg.api.enable_docs,
            cors_enabled: cfg.api.cors_enabled,
            body_limit_bytes: cfg.api.body_limit_bytes,
        }
    }
}
