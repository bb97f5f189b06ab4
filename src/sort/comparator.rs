//! Comparators

use crate::bean::{compare_values, property_value};
use crate::core::{FeilongError, Result};
use crate::sort::order::{parse_property_name_and_order, SortOrder};
use regex::Regex;
use serde::Serialize;
use std::cmp::Ordering;

/// An infallible comparison over `T`
pub trait Comparator<T: ?Sized> {
    /// Compare two values
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

impl<T: ?Sized, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

/// Compares two serializable values by one of their properties
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyComparator {
    property_name: String,
    order: SortOrder,
}

impl PropertyComparator {
    /// Ascending comparator on `property_name`
    pub fn new(property_name: impl Into<String>) -> Self {
        Self::with_order(property_name, SortOrder::Asc)
    }

    /// Comparator on `property_name` with an explicit direction
    pub fn with_order(property_name: impl Into<String>, order: SortOrder) -> Self {
        Self {
            property_name: property_name.into(),
            order,
        }
    }

    /// Build from a `"name asc|desc"` expression
    pub fn parse(expression: &str) -> Result<Self> {
        let (property_name, order) = parse_property_name_and_order(expression)?;
        Ok(Self::with_order(property_name, order))
    }

    /// Property path compared
    pub fn property_name(&self) -> &str {
        &self.property_name
    }

    /// Direction
    pub fn order(&self) -> SortOrder {
        self.order
    }

    /// Compare `a` and `b` by the property
    ///
    /// # Errors
    ///
    /// Returns `Property` if either value lacks the property.
    pub fn compare<T: Serialize + ?Sized>(&self, a: &T, b: &T) -> Result<Ordering> {
        let left = property_value(a, &self.property_name)?;
        let right = property_value(b, &self.property_name)?;
        Ok(self.order.apply(compare_values(&left, &right)))
    }
}

/// Where values missing from a [`FixedOrderComparator`] list are placed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownObjectBehavior {
    /// Before every known value
    Before,
    /// After every known value
    #[default]
    After,
}

/// Orders values by their position in a fixed list
#[derive(Debug, Clone)]
pub struct FixedOrderComparator<T> {
    items: Vec<T>,
    unknown: UnknownObjectBehavior,
}

impl<T: PartialEq> FixedOrderComparator<T> {
    /// Comparator following the order of `items`
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            unknown: UnknownObjectBehavior::default(),
        }
    }

    /// Set the placement of unknown values
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_unknown_object_behavior(mut self, unknown: UnknownObjectBehavior) -> Self {
        self.unknown = unknown;
        self
    }

    fn position(&self, value: &T) -> Option<usize> {
        self.items.iter().position(|item| item == value)
    }
}

impl<T: PartialEq> Comparator<T> for FixedOrderComparator<T> {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        match (self.position(a), self.position(b)) {
            (Some(l), Some(r)) => l.cmp(&r),
            (None, None) => Ordering::Equal,
            (Some(_), None) => match self.unknown {
                UnknownObjectBehavior::After => Ordering::Less,
                UnknownObjectBehavior::Before => Ordering::Greater,
            },
            (None, Some(_)) => match self.unknown {
                UnknownObjectBehavior::After => Ordering::Greater,
                UnknownObjectBehavior::Before => Ordering::Less,
            },
        }
    }
}

/// Compares strings by the number captured by the first group of a regex.
///
/// Useful for natural ordering of names like `"a2.jpg"` and `"a10.jpg"`.
/// Strings that don't match, or whose group isn't a number, sort last and
/// compare lexicographically among themselves.
#[derive(Debug, Clone)]
pub struct RegexGroupNumberComparator {
    regex: Regex,
}

impl RegexGroupNumberComparator {
    /// Wrap a compiled regex
    pub fn new(regex: Regex) -> Self {
        Self { regex }
    }

    /// Compile `pattern`
    pub fn from_pattern(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| FeilongError::invalid_argument("pattern", e.to_string()))?;
        Ok(Self::new(regex))
    }

    fn group_number(&self, value: &str) -> Option<i64> {
        self.regex
            .captures(value)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
    }
}

impl<S: AsRef<str>> Comparator<S> for RegexGroupNumberComparator {
    fn compare(&self, a: &S, b: &S) -> Ordering {
        let (a, b) = (a.as_ref(), b.as_ref());
        match (self.group_number(a), self.group_number(b)) {
            (Some(l), Some(r)) => l.cmp(&r),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.cmp(b),
        }
    }
}

/// Orders booleans with `true` first or last
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BooleanComparator {
    true_first: bool,
}

impl BooleanComparator {
    /// `true` before `false`
    pub fn true_first() -> Self {
        Self { true_first: true }
    }

    /// `false` before `true`
    pub fn false_first() -> Self {
        Self { true_first: false }
    }
}

impl Comparator<bool> for BooleanComparator {
    fn compare(&self, a: &bool, b: &bool) -> Ordering {
        if self.true_first {
            b.cmp(a)
        } else {
            a.cmp(b)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Item {
        name: &'static str,
        price: f64,
    }

    #[test]
    fn test_property_comparator() {
        let cheap = Item {
            name: "pen",
            price: 1.5,
        };
        let dear = Item {
            name: "book",
            price: 20.0,
        };

        let by_price = PropertyComparator::new("price");
        assert_eq!(by_price.compare(&cheap, &dear).unwrap(), Ordering::Less);

        let by_name_desc = PropertyComparator::parse("name desc").unwrap();
        assert_eq!(by_name_desc.order(), SortOrder::Desc);
        assert_eq!(by_name_desc.compare(&cheap, &dear).unwrap(), Ordering::Less);

        assert!(PropertyComparator::new("weight").compare(&cheap, &dear).is_err());
    }

    #[test]
    fn test_fixed_order_comparator() {
        let comparator = FixedOrderComparator::new(vec!["high", "medium", "low"]);
        let mut values = vec!["low", "unknown", "high", "medium"];
        values.sort_by(|a, b| comparator.compare(a, b));
        assert_eq!(values, vec!["high", "medium", "low", "unknown"]);

        let comparator = comparator.with_unknown_object_behavior(UnknownObjectBehavior::Before);
        values.sort_by(|a, b| comparator.compare(a, b));
        assert_eq!(values, vec!["unknown", "high", "medium", "low"]);
    }

    #[test]
    fn test_regex_group_number_comparator() {
        let comparator = RegexGroupNumberComparator::from_pattern(r"^a(\d+)\.jpg$").unwrap();
        let mut names = vec!["a10.jpg", "b.jpg", "a2.jpg", "a1.jpg"];
        names.sort_by(|a, b| comparator.compare(a, b));
        assert_eq!(names, vec!["a1.jpg", "a2.jpg", "a10.jpg", "b.jpg"]);

        assert!(RegexGroupNumberComparator::from_pattern("(").is_err());
    }

    #[test]
    fn test_boolean_comparator() {
        let mut values = vec![false, true, false, true];
        let comparator = BooleanComparator::true_first();
        values.sort_by(|a, b| comparator.compare(a, b));
        assert_eq!(values, vec![true, true, false, false]);

        let comparator = BooleanComparator::false_first();
        values.sort_by(|a, b| comparator.compare(a, b));
        assert_eq!(values, vec![false, false, true, true]);
    }
}
