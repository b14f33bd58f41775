//! Time-zone lookup handed to the formatter.
//!
//! The formatter never reaches for a global zone database; it is given a
//! [`ZoneResolver`]. [`TzDatabase`] answers from chrono-tz's compiled IANA
//! table, and [`WithFallback`] substitutes a configured zone when an event
//! names none or an unknown one.

use chrono_tz::Tz;

pub trait ZoneResolver: Send + Sync {
    /// Look up an IANA zone name such as `"Asia/Tokyo"`.
    fn resolve(&self, name: &str) -> Option<Tz>;

    /// Zone to use when an event carries no zone name at all.
    fn default_zone(&self) -> Option<Tz> {
        None
    }
}

/// The IANA database bundled with chrono-tz.
#[derive(Debug, Clone, Copy, Default)]
pub struct TzDatabase;

impl ZoneResolver for TzDatabase {
    fn resolve(&self, name: &str) -> Option<Tz> {
        name.trim().parse().ok()
    }
}

/// Resolves through `inner`, falling back to a fixed zone.
#[derive(Debug, Clone)]
pub struct WithFallback<R> {
    inner: R,
    fallback: Tz,
}

impl<R: ZoneResolver> WithFallback<R> {
    pub fn new(inner: R, fallback: Tz) -> Self {
        WithFallback { inner, fallback }
    }

    pub fn fallback(&self) -> Tz {
        self.fallback
    }
}

impl<R: ZoneResolver> ZoneResolver for WithFallback<R> {
    fn resolve(&self, name: &str) -> Option<Tz> {
        self.inner.resolve(name).or(Some(self.fallback))
    }

    fn default_zone(&self) -> Option<Tz> {
        self.inner.default_zone().or(Some(self.fallback))
    }
}

/// Resolve an optional zone name, using the resolver's default when unset.
pub(crate) fn resolve_optional(resolver: &dyn ZoneResolver, name: Option<&str>) -> Option<Tz> {
    match name {
        Some(name) if !name.trim().is_empty() => resolver.resolve(name),
        _ => resolver.default_zone(),
    }
}
