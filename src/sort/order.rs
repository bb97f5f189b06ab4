//! Parsing of `"property asc|desc"` sort expressions

use crate::core::{FeilongError, Result};
use crate::lang::validate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending
    #[default]
    Asc,
    /// Descending
    Desc,
}

impl SortOrder {
    /// Apply the direction to an ascending comparison result
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Asc => f.write_str("asc"),
            SortOrder::Desc => f.write_str("desc"),
        }
    }
}

impl FromStr for SortOrder {
    type Err = FeilongError;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(SortOrder::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(SortOrder::Desc)
        } else {
            Err(FeilongError::invalid_argument(
                "order",
                format!("'{}' is neither asc nor desc", s),
            ))
        }
    }
}

/// A property name together with its sort direction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyOrder {
    /// Dotted property path
    pub property_name: String,
    /// Direction
    pub order: SortOrder,
}

impl FromStr for PropertyOrder {
    type Err = FeilongError;

    fn from_str(s: &str) -> Result<Self> {
        let (property_name, order) = parse_property_name_and_order(s)?;
        Ok(PropertyOrder {
            property_name,
            order,
        })
    }
}

/// Split `"name desc"` into `("name", Desc)`.
///
/// The direction defaults to ascending and is case-insensitive.
///
/// ```rust
/// use feilong_core::sort::{parse_property_name_and_order, SortOrder};
///
/// let (name, order) = parse_property_name_and_order("age DESC").unwrap();
/// assert_eq!(name, "age");
/// assert_eq!(order, SortOrder::Desc);
/// ```
pub fn parse_property_name_and_order(expression: &str) -> Result<(String, SortOrder)> {
    validate::not_blank("property_name_and_order", expression)?;

    let mut tokens = expression.split_whitespace();
    let property_name = tokens.next().unwrap_or_default().to_string();
    let order = match tokens.next() {
        Some(token) => token.parse()?,
        None => SortOrder::default(),
    };
    if tokens.next().is_some() {
        return Err(FeilongError::invalid_argument(
            "property_name_and_order",
            format!("'{}' must be 'name' or 'name asc|desc'", expression.trim()),
        ));
    }
    Ok((property_name, order))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults_to_asc() {
        assert_eq!(
            parse_property_name_and_order("name").unwrap(),
            ("name".to_string(), SortOrder::Asc)
        );
        assert_eq!(
            parse_property_name_and_order("  address.city   desc ").unwrap(),
            ("address.city".to_string(), SortOrder::Desc)
        );
    }

    #[test]
    fn test_parse_rejects_bad_expressions() {
        assert!(parse_property_name_and_order("").is_err());
        assert!(parse_property_name_and_order("name up").is_err());
        assert!(parse_property_name_and_order("name asc extra").is_err());
    }

    #[test]
    fn test_apply_and_display() {
        assert_eq!(SortOrder::Desc.apply(Ordering::Less), Ordering::Greater);
        assert_eq!(SortOrder::Asc.apply(Ordering::Less), Ordering::Less);
        assert_eq!(SortOrder::Desc.to_string(), "desc");

        let order: PropertyOrder = "age Asc".parse().unwrap();
        assert_eq!(order.property_name, "age");
        assert_eq!(order.order, SortOrder::Asc);
    }
}
