//! Sort expressions, comparators and sorting helpers

pub mod comparator;
pub mod order;
pub mod sort_util;

pub use comparator::{
    BooleanComparator, Comparator, FixedOrderComparator, PropertyComparator,
    RegexGroupNumberComparator, UnknownObjectBehavior,
};
pub use order::{parse_property_name_and_order, PropertyOrder, SortOrder};
pub use sort_util::{
    sort_list_by_comparator, sort_list_by_fixed_order_property_values,
    sort_list_by_property_names, sort_map_by_key, sort_map_by_key_asc, sort_map_by_key_desc,
    sort_map_by_value, sort_map_by_value_asc, sort_map_by_value_desc,
};
