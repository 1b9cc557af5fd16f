//! Entry-point pinning.
//!
//! The linker consumes objects in list order, so the kernel entry sources
//! are moved to a fixed slot before object paths are derived.

/// Result of [`move_element`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    /// The value was found at `from` and now sits at `to`.
    Moved { from: usize, to: usize },
    /// The value is not in the list; the list is unchanged.
    Missing,
}

/// Move the first occurrence of `value` to `index`.
///
/// Every other element keeps its relative order. An `index` past the end of
/// the list (after removal) clamps to the last slot.
pub fn move_element<T: PartialEq>(items: &mut Vec<T>, value: &T, index: usize) -> Placement {
    let Some(from) = items.iter().position(|item| item == value) else {
        return Placement::Missing;
    };
    let item = items.remove(from);
    let to = index.min(items.len());
    items.insert(to, item);
    Placement::Moved { from, to }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_to_front() {
        let mut v = vec!["a", "b", "c", "d"];
        assert_eq!(move_element(&mut v, &"c", 0), Placement::Moved { from: 2, to: 0 });
        assert_eq!(v, vec!["c", "a", "b", "d"]);
    }

    #[test]
    fn test_move_already_in_place() {
        let mut v = vec!["a", "b"];
        assert_eq!(move_element(&mut v, &"a", 0), Placement::Moved { from: 0, to: 0 });
        assert_eq!(v, vec!["a", "b"]);
    }

    #[test]
    fn test_move_towards_back() {
        let mut v = vec![1, 2, 3, 4, 5];
        move_element(&mut v, &1, 3);
        assert_eq!(v, vec![2, 3, 4, 1, 5]);
    }

    #[test]
    fn test_missing_value_leaves_list_unchanged() {
        let mut v = vec![1, 2, 3];
        assert_eq!(move_element(&mut v, &9, 0), Placement::Missing);
        assert_eq!(v, vec![1, 2, 3]);
    }

    #[test]
    fn test_out_of_range_index_clamps() {
        let mut v = vec![1, 2, 3];
        assert_eq!(move_element(&mut v, &1, 99), Placement::Moved { from: 0, to: 2 });
        assert_eq!(v, vec![2, 3, 1]);
    }

    #[test]
    fn test_only_first_occurrence_moves() {
        let mut v = vec![1, 2, 1, 3];
        move_element(&mut v, &1, 3);
        assert_eq!(v, vec![2, 1, 3, 1]);
    }

    #[test]
    fn test_preserves_length_and_relative_order() {
        let original: Vec<u32> = (0..20).collect();
        for value in 0..20 {
            for index in 0..25 {
                let mut v = original.clone();
                move_element(&mut v, &value, index);
                assert_eq!(v.len(), original.len());
                assert_eq!(v[index.min(19)], value);
                let rest: Vec<u32> = v.iter().copied().filter(|x| *x != value).collect();
                let expected: Vec<u32> =
                    original.iter().copied().filter(|x| *x != value).collect();
                assert_eq!(rest, expected);
            }
        }
    }
}
