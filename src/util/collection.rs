//! Collection helpers keyed by property paths

use crate::bean::{lookup, property_value};
use crate::core::Result;
use crate::lang::validate;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use std::hash::Hash;

/// Split `list` into consecutive chunks of at most `size` elements
pub fn partition<T: Clone>(list: &[T], size: usize) -> Result<Vec<Vec<T>>> {
    validate::greater_than_zero("size", size)?;
    Ok(list.chunks(size).map(<[T]>::to_vec).collect())
}

/// Value of `path` for every element, in order
pub fn property_values<T: Serialize>(list: &[T], path: &str) -> Result<Vec<Value>> {
    list.iter().map(|item| property_value(item, path)).collect()
}

/// Group elements by the value of `path`.
///
/// Groups appear in the order their key is first seen; elements keep their
/// relative order inside a group.
pub fn group<T: Serialize + Clone>(list: &[T], path: &str) -> Result<Vec<(Value, Vec<T>)>> {
    let mut groups: Vec<(Value, Vec<T>)> = Vec::new();
    for item in list {
        let key = property_value(item, path)?;
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, members)) => members.push(item.clone()),
            None => groups.push((key, vec![item.clone()])),
        }
    }
    Ok(groups)
}

/// Number of elements per value of `path`, in first-seen order
pub fn group_count<T: Serialize>(list: &[T], path: &str) -> Result<Vec<(Value, usize)>> {
    let mut counts: Vec<(Value, usize)> = Vec::new();
    for key in property_values(list, path)? {
        match counts.iter_mut().find(|(k, _)| *k == key) {
            Some((_, count)) => *count += 1,
            None => counts.push((key, 1)),
        }
    }
    Ok(counts)
}

/// Elements whose `path` value is one of `values`
pub fn select<T: Serialize + Clone>(list: &[T], path: &str, values: &[Value]) -> Result<Vec<T>> {
    filter(list, path, |value| values.contains(value))
}

/// Elements whose `path` value is none of `values`
pub fn remove<T: Serialize + Clone>(list: &[T], path: &str, values: &[Value]) -> Result<Vec<T>> {
    filter(list, path, |value| !values.contains(value))
}

fn filter<T, F>(list: &[T], path: &str, keep: F) -> Result<Vec<T>>
where
    T: Serialize + Clone,
    F: Fn(&Value) -> bool,
{
    let mut kept = Vec::new();
    for item in list {
        if keep(&property_value(item, path)?) {
            kept.push(item.clone());
        }
    }
    Ok(kept)
}

/// First element whose `path` value equals `value`
pub fn find<'a, T: Serialize>(list: &'a [T], path: &str, value: &Value) -> Result<Option<&'a T>> {
    for item in list {
        let serialized = serde_json::to_value(item)?;
        if lookup(&serialized, path)? == value {
            return Ok(Some(item));
        }
    }
    Ok(None)
}

/// Drop repeated elements, keeping the first occurrence of each
pub fn remove_duplicate<T: Eq + Hash + Clone>(list: Vec<T>) -> Vec<T> {
    let mut seen = HashSet::with_capacity(list.len());
    list.into_iter().filter(|item| seen.insert(item.clone())).collect()
}
