//! Request URL construction.
//!
//! A request URL is assembled from three sources:
//!
//! - the [`MethodSpec`] of the API method group (path header, version,
//!   endpoint selection, scheme),
//! - the [`RequestDescriptor`](crate::types::RequestDescriptor) (region,
//!   operation template, path and query arguments),
//! - the [`UrlBuilder`] itself (API key and host templates).
//!
//! ```text
//! https://euw.api.pvp.net/api/lol/euw/v1.3/game/by-summoner/123/recent?api_key=KEY
//!         └── endpoint ─┘ └header┘ └┬┘ └ver┘ └name┘ └──── operation ─────┘
//!                                 region
//! ```

use percent_encoding::utf8_percent_encode;

use crate::types::{ArgList, PATH_VALUE, Region};
use crate::{Result, RiftError};

/// Host template for region-specific endpoints.
pub const DEFAULT_REGIONAL_HOST: &str = "{region}.api.pvp.net";

/// Host for endpoints that serve every region.
pub const DEFAULT_GLOBAL_HOST: &str = "global.api.pvp.net";

/// Static description of an API method group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodSpec {
    /// Method name, also the path segment after the version (`"game"`).
    pub name: &'static str,
    /// Leading path segment(s) (`"api/lol"`).
    pub header: &'static str,
    /// API version segment (`"v1.3"`).
    pub version: &'static str,
    /// Regions the method serves. Empty means every region.
    pub regions: &'static [Region],
    /// Fixed host used instead of regional/global selection.
    pub custom_endpoint: Option<&'static str>,
    /// Use the global host rather than the regional one.
    pub global: bool,
    /// `https` with API key and query string; `false` sends neither.
    pub secure: bool,
    /// Whether calls pass through the rate limiter gate.
    pub rate_limited: bool,
}

impl MethodSpec {
    /// A regional, secure, rate-limited method serving every region.
    pub const fn new(name: &'static str, version: &'static str) -> Self {
        Self {
            name,
            header: "api/lol",
            version,
            regions: &[],
            custom_endpoint: None,
            global: false,
            secure: true,
            rate_limited: true,
        }
    }

    pub const fn header(mut self, header: &'static str) -> Self {
        self.header = header;
        self
    }

    pub const fn regions(mut self, regions: &'static [Region]) -> Self {
        self.regions = regions;
        self
    }

    pub const fn custom_endpoint(mut self, host: &'static str) -> Self {
        self.custom_endpoint = Some(host);
        self
    }

    pub const fn global(mut self) -> Self {
        self.global = true;
        self
    }

    pub const fn insecure(mut self) -> Self {
        self.secure = false;
        self
    }

    pub const fn unlimited(mut self) -> Self {
        self.rate_limited = false;
        self
    }

    /// Name for logs and metrics; falls back to the header for unnamed groups.
    pub fn label(&self) -> &'static str {
        if self.name.is_empty() {
            self.header
        } else {
            self.name
        }
    }

    pub fn supports(&self, region: Region) -> bool {
        self.regions.is_empty() || self.regions.contains(&region)
    }
}

/// A fully substituted request URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedUrl {
    key: String,
    full: String,
}

impl ResolvedUrl {
    /// The URL without the API key. Identifies the request for caching
    /// and is safe to log.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The URL sent on the wire.
    pub fn full(&self) -> &str {
        &self.full
    }
}

/// Builds request URLs for one API key.
#[derive(Clone)]
pub struct UrlBuilder {
    api_key: String,
    regional_host: String,
    global_host: String,
    base_override: Option<String>,
}

impl std::fmt::Debug for UrlBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UrlBuilder")
            .field("regional_host", &self.regional_host)
            .field("global_host", &self.global_host)
            .field("base_override", &self.base_override)
            .finish_non_exhaustive()
    }
}

impl UrlBuilder {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            regional_host: DEFAULT_REGIONAL_HOST.to_string(),
            global_host: DEFAULT_GLOBAL_HOST.to_string(),
            base_override: None,
        }
    }

    /// Replace the regional host template. `{region}` is substituted.
    pub fn regional_host(mut self, template: impl Into<String>) -> Self {
        self.regional_host = template.into();
        self
    }

    pub fn global_host(mut self, host: impl Into<String>) -> Self {
        self.global_host = host.into();
        self
    }

    /// Send every request to `base` (scheme and host, e.g.
    /// `http://127.0.0.1:8080`) regardless of endpoint selection.
    pub fn base_override(mut self, base: impl Into<String>) -> Self {
        self.base_override = Some(base.into().trim_end_matches('/').to_string());
        self
    }

    /// Build the URL for one call of `method`.
    pub fn build(
        &self,
        method: &MethodSpec,
        region: Option<Region>,
        operation: &str,
        path_args: Option<&ArgList>,
        query_args: Option<&ArgList>,
    ) -> Result<ResolvedUrl> {
        let operation = match path_args {
            Some(args) => substitute(operation, args)?,
            None => operation.to_string(),
        };

        let region_segment = region.map(|r| r.as_path()).unwrap_or_default();
        let path = [
            method.header,
            region_segment,
            method.version,
            method.name,
            operation.as_str(),
        ]
        .iter()
        .map(|s| s.trim_matches('/'))
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/");

        let base = match &self.base_override {
            Some(base) => base.clone(),
            None => {
                let scheme = if method.secure { "https" } else { "http" };
                format!("{scheme}://{}", self.endpoint(method, region))
            }
        };

        let key = match query_args.filter(|q| !q.is_empty() && method.secure) {
            Some(query) => format!("{base}/{path}?{}", query.to_query_string()),
            None => format!("{base}/{path}"),
        };

        let full = if method.secure {
            let sep = if key.contains('?') { '&' } else { '?' };
            format!("{key}{sep}api_key={}", self.api_key)
        } else {
            key.clone()
        };

        Ok(ResolvedUrl { key, full })
    }

    /// Host for `method`: custom endpoint, else global or regional.
    fn endpoint(&self, method: &MethodSpec, region: Option<Region>) -> String {
        if let Some(custom) = method.custom_endpoint {
            return custom.to_string();
        }
        match region {
            Some(region) if !method.global => {
                self.regional_host.replace("{region}", region.as_path())
            }
            _ => self.global_host.clone(),
        }
    }
}

/// Replace every `{key}` in `template` with its value from `args`.
///
/// Values are percent-encoded for use inside a path segment; the template
/// text is copied as is. Scans left to right; substituted values are not
/// scanned again. Fails with [`RiftError::InvalidTemplate`] when a key has
/// no value or a `{` is never closed.
pub fn substitute(template: &str, args: &ArgList) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let close = after.find('}').ok_or_else(|| {
            RiftError::InvalidTemplate(format!("unclosed placeholder in '{template}'"))
        })?;
        let key = &after[..close];
        let value = args.get(key).ok_or_else(|| {
            RiftError::InvalidTemplate(format!("no value for '{{{key}}}' in '{template}'"))
        })?;
        out.extend(utf8_percent_encode(value, PATH_VALUE));
        rest = &after[close + 1..];
    }
    out.push_str(rest);

    Ok(out)
}
