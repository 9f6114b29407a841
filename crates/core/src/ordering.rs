//! Dense 1-based display ordering for research areas, directions and features.
//!
//! Every stored `order` is >= 1. Deleting an item renumbers the survivors to
//! `1..=N` in their prior relative sequence.

use crate::types::DbId;

/// An item whose position in a listing is governed by an `order` field.
pub trait Ordered {
    fn id(&self) -> DbId;
    fn order(&self) -> i64;
    fn set_order(&mut self, order: i64);
}

/// The order a newly appended item receives: current maximum plus one, or 1
/// for an empty list.
pub fn next_order<T: Ordered>(items: &[T]) -> i64 {
    items
        .iter()
        .map(Ordered::order)
        .max()
        .map_or(1, |max| max.max(0) + 1)
}

/// Resolve the order for a create request. A missing or non-positive value
/// appends the item at the end.
pub fn normalize_create_order<T: Ordered>(requested: Option<i64>, existing: &[T]) -> i64 {
    match requested {
        Some(order) if order > 0 => order,
        _ => next_order(existing),
    }
}

/// Clamp an order produced by an update to the minimum of 1.
pub fn normalize_update_order(order: i64) -> i64 {
    order.max(1)
}

/// Sort items by `(order, id)`.
pub fn sort_by_order<T: Ordered>(items: &mut [T]) {
    items.sort_by_key(|item| (item.order(), item.id()));
}

/// Sort the survivors of a delete by their current order and assign
/// contiguous orders starting at 1.
///
/// Returns the ids whose order actually changed.
pub fn renumber<T: Ordered>(items: &mut [T]) -> Vec<DbId> {
    sort_by_order(items);
    let mut changed = Vec::new();
    for (index, item) in items.iter_mut().enumerate() {
        let order = index as i64 + 1;
        if item.order() != order {
            item.set_order(order);
            changed.push(item.id());
        }
    }
    changed
}
