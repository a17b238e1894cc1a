//! Logical request descriptors

use std::time::Duration;

use super::{ArgList, Region};

/// A logical request, independent of endpoint and host details.
///
/// Built once with [`RequestDescriptor::builder`] and then read-only.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    region: Option<Region>,
    operation: String,
    path_args: Option<ArgList>,
    query_args: Option<ArgList>,
    skip_cache: bool,
    bypass_rate_limit: bool,
    gate_timeout: Option<Duration>,
}

impl RequestDescriptor {
    /// Start a descriptor for an operation template such as
    /// `"by-summoner/{summonerId}/recent"`.
    pub fn builder(operation: impl Into<String>) -> RequestDescriptorBuilder {
        RequestDescriptorBuilder {
            inner: RequestDescriptor {
                region: None,
                operation: operation.into(),
                path_args: None,
                query_args: None,
                skip_cache: false,
                bypass_rate_limit: false,
                gate_timeout: None,
            },
        }
    }

    /// `None` for global calls.
    pub fn region(&self) -> Option<Region> {
        self.region
    }

    pub fn operation(&self) -> &str {
        &self.operation
    }

    pub fn path_args(&self) -> Option<&ArgList> {
        self.path_args.as_ref()
    }

    pub fn query_args(&self) -> Option<&ArgList> {
        self.query_args.as_ref()
    }

    pub fn skip_cache(&self) -> bool {
        self.skip_cache
    }

    pub fn bypass_rate_limit(&self) -> bool {
        self.bypass_rate_limit
    }

    /// Longest the caller is willing to wait at the rate limiter gate.
    pub fn gate_timeout(&self) -> Option<Duration> {
        self.gate_timeout
    }
}

/// Builder for [`RequestDescriptor`].
#[derive(Debug, Clone)]
pub struct RequestDescriptorBuilder {
    inner: RequestDescriptor,
}

impl RequestDescriptorBuilder {
    pub fn region(mut self, region: Region) -> Self {
        self.inner.region = Some(region);
        self
    }

    /// Set path arguments for the operation's `{name}` placeholders.
    pub fn path_args(mut self, args: ArgList) -> Self {
        self.inner.path_args = Some(args);
        self
    }

    /// Add one path argument.
    pub fn path_arg(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.inner
            .path_args
            .get_or_insert_with(ArgList::new)
            .insert(key, value);
        self
    }

    pub fn query_args(mut self, args: ArgList) -> Self {
        self.inner.query_args = Some(args);
        self
    }

    /// Add one query argument.
    pub fn query_arg(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.inner
            .query_args
            .get_or_insert_with(ArgList::new)
            .insert(key, value);
        self
    }

    /// Neither read from nor write to the response cache.
    pub fn skip_cache(mut self, skip: bool) -> Self {
        self.inner.skip_cache = skip;
        self
    }

    /// Send without passing through the rate limiter gate.
    pub fn bypass_rate_limit(mut self, bypass: bool) -> Self {
        self.inner.bypass_rate_limit = bypass;
        self
    }

    pub fn gate_timeout(mut self, budget: Duration) -> Self {
        self.inner.gate_timeout = Some(budget);
        self
    }

    pub fn build(self) -> RequestDescriptor {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let d = RequestDescriptor::builder("champion").build();
        assert_eq!(d.region(), None);
        assert!(d.path_args().is_none());
        assert!(d.query_args().is_none());
        assert!(!d.skip_cache());
        assert!(!d.bypass_rate_limit());
        assert!(d.gate_timeout().is_none());
    }

    #[test]
    fn incremental_args_accumulate() {
        let d = RequestDescriptor::builder("by-summoner/{summonerId}/recent")
            .region(Region::Na)
            .path_arg("summonerId", 123)
            .query_arg("champData", "all")
            .query_arg("locale", "en_US")
            .build();
        assert_eq!(d.path_args().unwrap().get("summonerId"), Some("123"));
        assert_eq!(
            d.query_args().unwrap().to_query_string(),
            "champData=all&locale=en_US"
        );
    }
}
