//! Applicability tests over a single context dimension.

use crate::context::{Dimension, ResolutionContext};
use std::{borrow::Cow, fmt};

/// A condition a candidate requires to be eligible: the current value of
/// `dimension` must be one of the accepted values.
///
/// Values are matched case-insensitively, so a predicate accepting
/// `"BILLING2"` also accepts `"billing2"`.
///
/// # Example
///
/// ```rust,ignore
/// let legacy = Predicate::billing(["BILLING1", "BILLING2"]);
/// let ctx = ResolutionContext::new().with(Dimension::BILLING, "billing2");
/// assert!(legacy.matches(&ctx));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    dimension: Dimension,
    values: Vec<Cow<'static, str>>,
}

impl Predicate {
    /// Accept any of `values` for `dimension`.
    pub fn any_of<D, I, V>(dimension: D, values: I) -> Self
    where
        D: Into<Dimension>,
        I: IntoIterator<Item = V>,
        V: Into<Cow<'static, str>>,
    {
        Self {
            dimension: dimension.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Accept any of the given billing plans.
    pub fn billing<I, V>(plans: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Cow<'static, str>>,
    {
        Self::any_of(Dimension::BILLING, plans)
    }

    /// Accept any of the given regions.
    pub fn region<I, V>(regions: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Cow<'static, str>>,
    {
        Self::any_of(Dimension::REGION, regions)
    }

    /// The dimension this predicate constrains.
    pub fn dimension(&self) -> &Dimension {
        &self.dimension
    }

    /// The accepted values, as declared.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|v| v.as_ref())
    }

    /// Check whether `value` is one of the accepted values, ignoring case.
    pub fn accepts(&self, value: &str) -> bool {
        self.values.iter().any(|accepted| eq_ignore_case(accepted, value))
    }

    /// Check the predicate against a context snapshot.
    ///
    /// An absent dimension never matches.
    pub fn matches(&self, context: &ResolutionContext) -> bool {
        context
            .get(self.dimension.as_str())
            .is_some_and(|value| self.accepts(value))
    }
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} in {{{}}}", self.dimension, self.values.join(", "))
    }
}
