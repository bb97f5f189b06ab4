//! Sorting of lists and map entries

use crate::bean::{compare_values, lookup, property_value};
use crate::core::Result;
use crate::lang::validate;
use crate::sort::comparator::{Comparator, FixedOrderComparator};
use crate::sort::order::{PropertyOrder, SortOrder};
use serde::Serialize;
use serde_json::Value;
use std::cmp::Ordering;

/// Stable sort of `list` by one or more `"name asc|desc"` expressions.
///
/// Later expressions break ties of earlier ones. Property values are read once
/// per element. On error the list is left untouched.
///
/// ```rust
/// use feilong_core::sort::sort_list_by_property_names;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct User { name: &'static str, age: u32 }
///
/// let mut users = vec![
///     User { name: "b", age: 20 },
///     User { name: "a", age: 30 },
///     User { name: "c", age: 20 },
/// ];
/// sort_list_by_property_names(&mut users, &["age desc", "name"]).unwrap();
/// let names: Vec<_> = users.iter().map(|u| u.name).collect();
/// assert_eq!(names, ["a", "b", "c"]);
/// ```
pub fn sort_list_by_property_names<T: Serialize>(
    list: &mut Vec<T>,
    expressions: &[&str],
) -> Result<()> {
    validate::not_empty("expressions", expressions)?;
    let orders = expressions
        .iter()
        .map(|expression| expression.parse::<PropertyOrder>())
        .collect::<Result<Vec<_>>>()?;

    let keys = list
        .iter()
        .map(|item| {
            let value = serde_json::to_value(item)?;
            orders
                .iter()
                .map(|order| lookup(&value, &order.property_name).cloned())
                .collect::<Result<Vec<Value>>>()
        })
        .collect::<Result<Vec<_>>>()?;

    let mut keyed: Vec<(Vec<Value>, T)> = keys.into_iter().zip(std::mem::take(list)).collect();
    keyed.sort_by(|(a, _), (b, _)| {
        orders
            .iter()
            .zip(a.iter().zip(b))
            .map(|(order, (l, r))| order.order.apply(compare_values(l, r)))
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal)
    });
    list.extend(keyed.into_iter().map(|(_, item)| item));
    Ok(())
}

/// Stable sort of `list` by `property_name` following the order of `values`.
///
/// Elements whose property isn't listed go last.
pub fn sort_list_by_fixed_order_property_values<T: Serialize>(
    list: &mut Vec<T>,
    property_name: &str,
    values: &[Value],
) -> Result<()> {
    let keys = list
        .iter()
        .map(|item| property_value(item, property_name))
        .collect::<Result<Vec<_>>>()?;

    let comparator = FixedOrderComparator::new(values.to_vec());
    let mut keyed: Vec<(Value, T)> = keys.into_iter().zip(std::mem::take(list)).collect();
    keyed.sort_by(|(a, _), (b, _)| comparator.compare(a, b));
    list.extend(keyed.into_iter().map(|(_, item)| item));
    Ok(())
}

/// Stable sort of `list` with a [`Comparator`]
pub fn sort_list_by_comparator<T, C>(list: &mut [T], comparator: &C)
where
    C: Comparator<T> + ?Sized,
{
    list.sort_by(|a, b| comparator.compare(a, b));
}

/// Map entries ordered by key
pub fn sort_map_by_key<K: Ord, V>(
    map: impl IntoIterator<Item = (K, V)>,
    order: SortOrder,
) -> Vec<(K, V)> {
    let mut entries: Vec<(K, V)> = map.into_iter().collect();
    entries.sort_by(|(a, _), (b, _)| order.apply(a.cmp(b)));
    entries
}

/// Map entries ordered by value, ties keep iteration order
pub fn sort_map_by_value<K, V: Ord>(
    map: impl IntoIterator<Item = (K, V)>,
    order: SortOrder,
) -> Vec<(K, V)> {
    let mut entries: Vec<(K, V)> = map.into_iter().collect();
    entries.sort_by(|(_, a), (_, b)| order.apply(a.cmp(b)));
    entries
}

/// Map entries ordered by key ascending
pub fn sort_map_by_key_asc<K: Ord, V>(map: impl IntoIterator<Item = (K, V)>) -> Vec<(K, V)> {
    sort_map_by_key(map, SortOrder::Asc)
}

/// Map entries ordered by key descending
pub fn sort_map_by_key_desc<K: Ord, V>(map: impl IntoIterator<Item = (K, V)>) -> Vec<(K, V)> {
    sort_map_by_key(map, SortOrder::Desc)
}

/// Map entries ordered by value ascending
pub fn sort_map_by_value_asc<K, V: Ord>(map: impl IntoIterator<Item = (K, V)>) -> Vec<(K, V)> {
    sort_map_by_value(map, SortOrder::Asc)
}

/// Map entries ordered by value descending
pub fn sort_map_by_value_desc<K, V: Ord>(map: impl IntoIterator<Item = (K, V)>) -> Vec<(K, V)> {
    sort_map_by_value(map, SortOrder::Desc)
}
