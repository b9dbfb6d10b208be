//! Query construction for user listings.
//!
//! [`UserListParams`] is the raw, optional query text a client sends.
//! [`UserListQuery::build`] turns it into a descriptor that store adapters
//! translate into their own query language. Building never fails: garbled
//! numbers are dropped or replaced by defaults.

use std::cmp::Ordering;

use pagination::{PageRequest, coerce_integer};
use serde::{Deserialize, Serialize};

use super::User;

/// Raw list parameters as received from the client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub filter: Option<String>,
    pub sort: Option<String>,
    pub min_age: Option<String>,
    pub max_age: Option<String>,
}

/// Case-insensitive substring match on the user's name.
///
/// The text is matched literally. Characters with special meaning in the
/// store's pattern language are escaped by the adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameFilter(String);

impl NameFilter {
    /// `None` for empty text, which imposes no constraint.
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        if text.is_empty() { None } else { Some(Self(text)) }
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Whether `name` contains the filter text, ignoring case.
    pub fn matches(&self, name: &str) -> bool {
        name.to_lowercase().contains(&self.0.to_lowercase())
    }
}

/// Inclusive age bounds. At least one bound is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeRange {
    min: Option<i64>,
    max: Option<i64>,
}

impl AgeRange {
    /// `None` when neither bound is given. Bounds are not reordered, so
    /// `min > max` yields a range nothing falls into.
    pub fn new(min: Option<i64>, max: Option<i64>) -> Option<Self> {
        if min.is_none() && max.is_none() {
            None
        } else {
            Some(Self { min, max })
        }
    }

    pub fn min(&self) -> Option<i64> {
        self.min
    }

    pub fn max(&self) -> Option<i64> {
        self.max
    }

    pub fn contains(&self, age: i64) -> bool {
        self.min.is_none_or(|min| age >= min) && self.max.is_none_or(|max| age <= max)
    }
}

/// Sort direction for a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// One field of a sort key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortField {
    pub field: String,
    pub direction: SortDirection,
}

/// Sort key passed through from the client.
///
/// The raw text is kept verbatim. [`SortKey::fields`] reads it as a list of
/// field names separated by whitespace or commas, each optionally prefixed
/// with `-` for descending or `+` for ascending order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey(String);

impl SortKey {
    /// `None` for text with no field names in it.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let key = Self(raw.into());
        if key.fields().is_empty() { None } else { Some(key) }
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Parsed fields in priority order.
    ///
    /// # Examples
    /// ```
    /// use user_service::domain::{SortDirection, SortKey};
    ///
    /// let key = SortKey::new("-age name").expect("non-empty key");
    /// let fields = key.fields();
    /// assert_eq!(fields[0].field, "age");
    /// assert_eq!(fields[0].direction, SortDirection::Descending);
    /// assert_eq!(fields[1].direction, SortDirection::Ascending);
    /// ```
    pub fn fields(&self) -> Vec<SortField> {
        self.0
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter_map(|token| {
                let (direction, field) = match token.strip_prefix('-') {
                    Some(rest) => (SortDirection::Descending, rest),
                    None => (
                        SortDirection::Ascending,
                        token.strip_prefix('+').unwrap_or(token),
                    ),
                };
                (!field.is_empty()).then(|| SortField {
                    field: field.to_owned(),
                    direction,
                })
            })
            .collect()
    }
}

/// Store-agnostic description of a user listing.
///
/// ## Invariants
/// - `page >= 1` and `limit >= 1`.
/// - `offset == (page - 1) * limit`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserListQuery {
    name_filter: Option<NameFilter>,
    age_range: Option<AgeRange>,
    sort: Option<SortKey>,
    page: PageRequest,
}

impl UserListQuery {
    /// Build a descriptor from raw client parameters.
    ///
    /// # Examples
    /// ```
    /// use user_service::domain::{UserListParams, UserListQuery};
    ///
    /// let params = UserListParams {
    ///     page: Some("2".into()),
    ///     limit: Some("5".into()),
    ///     min_age: Some("18".into()),
    ///     max_age: Some("oops".into()),
    ///     ..UserListParams::default()
    /// };
    /// let query = UserListQuery::build(&params);
    /// assert_eq!(query.offset(), 5);
    /// assert_eq!(query.limit(), 5);
    /// let range = query.age_range().expect("min bound present");
    /// assert_eq!((range.min(), range.max()), (Some(18), None));
    /// ```
    pub fn build(params: &UserListParams) -> Self {
        let bound = |raw: &Option<String>| raw.as_deref().and_then(coerce_integer);
        Self {
            name_filter: params.filter.clone().and_then(NameFilter::new),
            age_range: AgeRange::new(bound(&params.min_age), bound(&params.max_age)),
            sort: params.sort.clone().and_then(SortKey::new),
            page: PageRequest::from_raw(params.page.as_deref(), params.limit.as_deref()),
        }
    }

    pub fn name_filter(&self) -> Option<&NameFilter> {
        self.name_filter.as_ref()
    }

    pub fn age_range(&self) -> Option<&AgeRange> {
        self.age_range.as_ref()
    }

    pub fn sort(&self) -> Option<&SortKey> {
        self.sort.as_ref()
    }

    pub fn page(&self) -> PageRequest {
        self.page
    }

    /// Records to skip before the page starts.
    pub fn offset(&self) -> u64 {
        self.page.offset()
    }

    /// Page size.
    pub fn limit(&self) -> u64 {
        self.page.limit()
    }

    /// Whether `user` satisfies the filter and age predicates.
    pub fn matches(&self, user: &User) -> bool {
        self.name_filter
            .as_ref()
            .is_none_or(|filter| filter.matches(user.name()))
            && self
                .age_range
                .as_ref()
                .is_none_or(|range| range.contains(i64::from(user.age())))
    }

    /// Order two records by the sort key. Unknown fields compare equal.
    pub fn compare(&self, a: &User, b: &User) -> Ordering {
        let Some(sort) = &self.sort else {
            return Ordering::Equal;
        };
        sort.fields()
            .iter()
            .map(|field| {
                let ordering = match field.field.as_str() {
                    "name" => a.name().cmp(b.name()),
                    "email" => a.email().cmp(b.email()),
                    "age" => a.age().cmp(&b.age()),
                    "id" | "_id" => a.id().as_str().cmp(b.id().as_str()),
                    _ => Ordering::Equal,
                };
                match field.direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            })
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}
