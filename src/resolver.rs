//! Short-link resolution.
//!
//! The only place in the crate that performs I/O. Nothing here is reachable
//! from [`crate::parse`]; callers opt in through
//! [`crate::platforms::Platform::embed_info_async`],
//! [`crate::platforms::ShortLinkCapability::resolve_short_url`] or
//! [`crate::Parser::parse_resolved`].

use std::fmt;
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{header, redirect, StatusCode};
use tracing::debug;
use url::Url;

use crate::config::ResolverConfig;

/// Resolves one redirect hop of a URL.
#[async_trait]
pub trait UrlResolver: Send + Sync {
    /// Return where `url` redirects to, or `url` itself if it does not redirect.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    async fn resolve(&self, url: &str) -> Result<String>;
}

/// Resolver that asks the short-link service over HTTP.
///
/// Redirects are not followed automatically; each call reads one `Location`
/// header so the caller decides when to stop.
pub struct HttpResolver {
    client: reqwest::Client,
}

impl HttpResolver {
    /// Build a resolver from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &ResolverConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .redirect(redirect::Policy::none())
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl UrlResolver for HttpResolver {
    async fn resolve(&self, url: &str) -> Result<String> {
        let mut response = self
            .client
            .head(url)
            .send()
            .await
            .context("Failed to resolve short URL")?;

        // Some shorteners only redirect GET requests.
        if response.status() == StatusCode::METHOD_NOT_ALLOWED {
            response = self
                .client
                .get(url)
                .send()
                .await
                .context("Failed to resolve short URL")?;
        }

        if !response.status().is_redirection() {
            debug!(url, status = %response.status(), "Short URL did not redirect");
            return Ok(url.to_string());
        }

        let Some(location) = response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
        else {
            return Ok(url.to_string());
        };

        // Location may be relative to the short URL.
        let resolved = Url::parse(url)
            .and_then(|base| base.join(location))
            .map_or_else(|_| location.to_string(), |u| u.to_string());
        Ok(resolved)
    }
}

/// Options for the asynchronous resolution path.
///
/// Carries the resolver to use (the HTTP resolver by default, or one supplied
/// by the caller) and the hop limit.
#[derive(Clone)]
pub struct ResolverOptions {
    resolver: Arc<dyn UrlResolver>,
    max_hops: usize,
}

impl ResolverOptions {
    /// Options backed by an [`HttpResolver`].
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &ResolverConfig) -> Result<Self> {
        Ok(Self {
            resolver: Arc::new(HttpResolver::new(config)?),
            max_hops: config.max_redirects,
        })
    }

    /// Options backed by a caller-supplied resolver.
    #[must_use]
    pub fn with_resolver(resolver: Arc<dyn UrlResolver>) -> Self {
        Self {
            resolver,
            max_hops: ResolverConfig::default().max_redirects,
        }
    }

    #[must_use]
    pub fn max_hops_limit(mut self, max_hops: usize) -> Self {
        self.max_hops = max_hops;
        self
    }

    #[must_use]
    pub fn max_hops(&self) -> usize {
        self.max_hops
    }

    #[must_use]
    pub fn resolver(&self) -> &dyn UrlResolver {
        self.resolver.as_ref()
    }
}

impl fmt::Debug for ResolverOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolverOptions")
            .field("max_hops", &self.max_hops)
            .finish_non_exhaustive()
    }
}
