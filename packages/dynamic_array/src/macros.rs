/// Creates a [`DynamicArray`][crate::DynamicArray] from a literal sequence, like `vec![]`.
///
/// The resulting array has no spare capacity.
///
/// # Examples
///
/// ```
/// use dynamic_array::dynamic_array;
///
/// let numbers = dynamic_array![1, 2, 3];
/// assert_eq!(numbers, [1, 2, 3]);
/// assert_eq!(numbers.capacity(), 3);
///
/// let zeros = dynamic_array![0_u8; 4];
/// assert_eq!(zeros, [0, 0, 0, 0]);
///
/// let empty: dynamic_array::DynamicArray<u8> = dynamic_array![];
/// assert_eq!(empty.capacity(), 0);
/// ```
#[macro_export]
macro_rules! dynamic_array {
    () => {
        $crate::DynamicArray::new()
    };
    ($value:expr; $len:expr) => {
        $crate::DynamicArray::from_elem($len, &$value)
    };
    ($($item:expr),+ $(,)?) => {
        $crate::DynamicArray::from([$($item),+])
    };
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use crate::DynamicArray;

    #[test]
    fn literal_forms() {
        let empty: DynamicArray<String> = dynamic_array![];
        assert!(empty.is_empty());

        let listed = dynamic_array!["a".to_string(), "b".to_string(),];
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[1], "b");

        let repeated = dynamic_array![7_i64; 3];
        assert_eq!(repeated, [7, 7, 7]);
    }
}
