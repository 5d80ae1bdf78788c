//! # Runtime Context
//!
//! The values a resolution runs against: one current value per context
//! dimension (active billing plan, active region, ...).
//!
//! Where those values come from (environment, request headers, a config
//! store) is not the resolver's concern. It only needs a [`ContextProvider`]
//! able to hand out a consistent [`ResolutionContext`] snapshot on demand.

use std::{
    borrow::{Borrow, Cow},
    collections::BTreeMap,
    fmt,
    sync::Arc,
};

/// The name of a context axis, e.g. `billing` or `region`.
///
/// Dimension names are compared exactly; only values are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Dimension(Cow<'static, str>);

impl Dimension {
    /// The active billing plan.
    pub const BILLING: Dimension = Dimension(Cow::Borrowed("billing"));

    /// The active deployment region.
    pub const REGION: Dimension = Dimension(Cow::Borrowed("region"));

    /// Create a dimension from a name.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    /// Create a dimension from a static name in const context.
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// The dimension name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Dimension {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for Dimension {
    fn from(name: &'static str) -> Self {
        Self::from_static(name)
    }
}

impl From<String> for Dimension {
    fn from(name: String) -> Self {
        Self(Cow::Owned(name))
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A snapshot of the current value of every known dimension.
///
/// Entries are kept ordered by dimension name so that diagnostics render
/// the same way on every run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionContext {
    values: BTreeMap<Dimension, String>,
}

impl ResolutionContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a dimension, returning the updated context.
    pub fn with(mut self, dimension: impl Into<Dimension>, value: impl Into<String>) -> Self {
        self.insert(dimension, value);
        self
    }

    /// Set a dimension, returning the previous value if any.
    pub fn insert(
        &mut self,
        dimension: impl Into<Dimension>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.values.insert(dimension.into(), value.into())
    }

    /// Remove a dimension, returning its value if it was set.
    pub fn remove(&mut self, dimension: &str) -> Option<String> {
        self.values.remove(dimension)
    }

    /// The current value of a dimension.
    pub fn get(&self, dimension: &str) -> Option<&str> {
        self.values.get(dimension).map(String::as_str)
    }

    /// Iterate over `(dimension, value)` pairs in dimension order.
    pub fn iter(&self) -> impl Iterator<Item = (&Dimension, &str)> {
        self.values.iter().map(|(d, v)| (d, v.as_str()))
    }

    /// Number of dimensions set.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check whether no dimension is set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<D, V> FromIterator<(D, V)> for ResolutionContext
where
    D: Into<Dimension>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (D, V)>>(iter: I) -> Self {
        let mut context = Self::new();
        for (dimension, value) in iter {
            context.insert(dimension, value);
        }
        context
    }
}

impl fmt::Display for ResolutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (dimension, value)) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{dimension}={value}")?;
        }
        f.write_str("}")
    }
}

/// Supplies the current runtime context.
///
/// Called once per resolution, possibly from many threads at once.
/// Implementations must return a complete snapshot: every dimension read
/// from the same version of the underlying source, never a mix of an old
/// billing plan with a new region.
///
/// If the underlying source can block (a remote config fetch), bounding that
/// is the provider's job; the resolver treats the call as instantaneous.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot supply a resolution context",
    label = "missing `ContextProvider` implementation",
    note = "Implement `current_context` returning a consistent `ResolutionContext` snapshot."
)]
pub trait ContextProvider: Send + Sync {
    /// Take a snapshot of the current context.
    fn current_context(&self) -> ResolutionContext;
}

impl<P: ContextProvider + ?Sized> ContextProvider for &P {
    fn current_context(&self) -> ResolutionContext {
        (**self).current_context()
    }
}

impl<P: ContextProvider + ?Sized> ContextProvider for Box<P> {
    fn current_context(&self) -> ResolutionContext {
        (**self).current_context()
    }
}

impl<P: ContextProvider + ?Sized> ContextProvider for Arc<P> {
    fn current_context(&self) -> ResolutionContext {
        (**self).current_context()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_sorted_by_dimension() {
        let ctx = ResolutionContext::new()
            .with(Dimension::REGION, "ru")
            .with(Dimension::BILLING, "BILLING2");
        assert_eq!(ctx.to_string(), "{billing=BILLING2, region=ru}");
        assert_eq!(ResolutionContext::new().to_string(), "{}");
    }

    #[test]
    fn lookup_by_str_is_exact() {
        let ctx: ResolutionContext = [("billing", "BILLING1")].into_iter().collect();
        assert_eq!(ctx.get("billing"), Some("BILLING1"));
        assert_eq!(ctx.get("Billing"), None);
        assert_eq!(ctx.len(), 1);
    }

    #[test]
    fn insert_replaces_and_remove_clears() {
        let mut ctx = ResolutionContext::new();
        assert_eq!(ctx.insert("region", "ru"), None);
        assert_eq!(ctx.insert("region", "world"), Some("ru".to_string()));
        assert_eq!(ctx.remove("region"), Some("world".to_string()));
        assert!(ctx.is_empty());
    }

    #[test]
    fn owned_and_static_dimensions_are_equal() {
        assert_eq!(Dimension::new(String::from("billing")), Dimension::BILLING);
        assert_eq!(Dimension::from("region"), Dimension::REGION);
    }
}
