//! Layer ordering over integer stacking indices.
//!
//! Only the relative order of indices matters; they need not be contiguous. The store's
//! counter stays strictly above every assigned index so `bring_to_front` never collides.

use crate::widget::Widget;

/// Something with a stacking index.
pub(crate) trait Layered {
    fn z_index(&self) -> i64;
    fn set_z_index(&mut self, z_index: i64);
}

impl Layered for Widget {
    fn z_index(&self) -> i64 {
        Widget::z_index(self)
    }

    fn set_z_index(&mut self, z_index: i64) {
        Widget::set_z_index(self, z_index);
    }
}

/// Place `items[index]` above everything else.
pub(crate) fn bring_to_front<T: Layered>(items: &mut [T], index: usize, next_z_index: &mut i64) {
    items[index].set_z_index(*next_z_index);
    *next_z_index += 1;
}

/// Place `items[index]` below everything else. Returns false when it is the only item.
pub(crate) fn send_to_back<T: Layered>(items: &mut [T], index: usize) -> bool {
    let lowest = others(items, index).map(Layered::z_index).min();
    match lowest {
        Some(lowest) => {
            items[index].set_z_index(lowest - 1);
            true
        }
        None => false,
    }
}

/// Swap `items[index]` with its neighbour directly above. Returns false when it is already
/// on top.
pub(crate) fn move_up<T: Layered>(items: &mut [T], index: usize, next_z_index: &mut i64) -> bool {
    let current = items[index].z_index();
    let Some(above) = others(items, index)
        .map(Layered::z_index)
        .filter(|z| *z > current)
        .min()
    else {
        return false;
    };

    let target = above + 1;
    // The target slot may already be taken; open it by lifting everything from there up
    if others(items, index).any(|item| item.z_index() == target) {
        shift_others(items, index, |z| z >= target, 1);
    }
    items[index].set_z_index(target);
    raise_counter(items, next_z_index);
    true
}

/// Swap `items[index]` with its neighbour directly below. Returns false when it is already
/// at the bottom.
pub(crate) fn move_down<T: Layered>(items: &mut [T], index: usize) -> bool {
    let current = items[index].z_index();
    let Some(below) = others(items, index)
        .map(Layered::z_index)
        .filter(|z| *z < current)
        .max()
    else {
        return false;
    };

    let target = below - 1;
    if others(items, index).any(|item| item.z_index() == target) {
        shift_others(items, index, |z| z <= target, -1);
    }
    items[index].set_z_index(target);
    true
}

/// Indices of `items` from the top layer down. Equal indices keep insertion order.
pub(crate) fn layer_order<T: Layered>(items: &[T]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..items.len()).collect();
    order.sort_by(|a, b| items[*b].z_index().cmp(&items[*a].z_index()));
    order
}

/// Advance the counter past every assigned index. The counter never decreases.
pub(crate) fn raise_counter<T: Layered>(items: &[T], next_z_index: &mut i64) {
    if let Some(max) = items.iter().map(Layered::z_index).max() {
        *next_z_index = (*next_z_index).max(max + 1);
    }
}

fn others<T: Layered>(items: &[T], index: usize) -> impl Iterator<Item = &T> {
    items
        .iter()
        .enumerate()
        .filter(move |(i, _)| *i != index)
        .map(|(_, item)| item)
}

fn shift_others<T: Layered>(items: &mut [T], index: usize, affected: impl Fn(i64) -> bool, step: i64) {
    for (i, item) in items.iter_mut().enumerate() {
        if i != index && affected(item.z_index()) {
            let z = item.z_index();
            item.set_z_index(z + step);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Layer(&'static str, i64);

    impl Layered for Layer {
        fn z_index(&self) -> i64 {
            self.1
        }

        fn set_z_index(&mut self, z_index: i64) {
            self.1 = z_index;
        }
    }

    fn stack(zs: &[(&'static str, i64)]) -> Vec<Layer> {
        zs.iter().map(|(name, z)| Layer(name, *z)).collect()
    }

    fn top_down(items: &[Layer]) -> Vec<&'static str> {
        layer_order(items).into_iter().map(|i| items[i].0).collect()
    }

    fn assert_distinct(items: &[Layer]) {
        let mut zs: Vec<i64> = items.iter().map(|l| l.1).collect();
        zs.sort();
        zs.dedup();
        assert_eq!(zs.len(), items.len(), "duplicate z-index in {:?}", items);
    }

    #[test]
    fn test_bring_to_front() {
        let mut items = stack(&[("a", 1), ("b", 2), ("c", 3)]);
        let mut next = 4;
        bring_to_front(&mut items, 0, &mut next);
        assert_eq!(top_down(&items), vec!["a", "c", "b"]);
        assert_eq!(next, 5);
        assert!(items.iter().all(|l| l.1 < next));
    }

    #[test]
    fn test_send_to_back() {
        let mut items = stack(&[("a", 1), ("b", 2), ("c", 3)]);
        assert!(send_to_back(&mut items, 2));
        assert_eq!(items[2].1, 0);
        assert_eq!(top_down(&items), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_send_to_back_alone_is_noop() {
        let mut items = stack(&[("a", 7)]);
        assert!(!send_to_back(&mut items, 0));
        assert_eq!(items[0].1, 7);
    }

    #[test]
    fn test_move_up_swaps_with_neighbour_only() {
        let mut items = stack(&[("a", 1), ("b", 2), ("c", 3), ("d", 4)]);
        let mut next = 5;
        assert!(move_up(&mut items, 0, &mut next));
        assert_eq!(top_down(&items), vec!["d", "c", "a", "b"]);
        assert_distinct(&items);
        assert!(items.iter().all(|l| l.1 < next));
    }

    #[test]
    fn test_move_up_with_gap_needs_no_shift() {
        let mut items = stack(&[("a", 1), ("b", 5), ("c", 10)]);
        let mut next = 11;
        assert!(move_up(&mut items, 0, &mut next));
        assert_eq!(items[0].1, 6);
        assert_eq!(items[2].1, 10);
        assert_eq!(next, 11);
    }

    #[test]
    fn test_move_up_on_top_is_noop() {
        let mut items = stack(&[("a", 1), ("b", 2)]);
        let mut next = 3;
        assert!(!move_up(&mut items, 1, &mut next));
        assert_eq!(items[1].1, 2);
    }

    #[test]
    fn test_move_down_swaps_with_neighbour_only() {
        let mut items = stack(&[("a", 1), ("b", 2), ("c", 3), ("d", 4)]);
        assert!(move_down(&mut items, 3));
        assert_eq!(top_down(&items), vec!["c", "d", "b", "a"]);
        assert_distinct(&items);
    }

    #[test]
    fn test_move_down_at_bottom_is_noop() {
        let mut items = stack(&[("a", 1), ("b", 2)]);
        assert!(!move_down(&mut items, 0));
    }

    #[test]
    fn test_move_up_then_down_restores_order() {
        let mut items = stack(&[("a", 1), ("b", 2), ("c", 3)]);
        let mut next = 4;
        let before = top_down(&items);
        move_up(&mut items, 0, &mut next);
        move_down(&mut items, 0);
        assert_eq!(top_down(&items), before);
        assert_distinct(&items);
    }

    #[test]
    fn test_raise_counter_never_decreases() {
        let items = stack(&[("a", 3)]);
        let mut next = 10;
        raise_counter(&items, &mut next);
        assert_eq!(next, 10);

        let items = stack(&[("a", 30)]);
        raise_counter(&items, &mut next);
        assert_eq!(next, 31);
    }
}
