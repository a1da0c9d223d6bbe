//! Integration tests exercising the public API of `dynamic_array` as an outside caller would.

use std::mem;

use dynamic_array::{DynamicArray, Error, RawBuffer, dynamic_array, reserve};

fn snapshot<T: Clone>(array: &DynamicArray<T>) -> Vec<T> {
    array.iter().cloned().collect()
}

#[test]
fn walkthrough_from_empty() {
    let mut array = DynamicArray::new();
    assert_eq!((array.len(), array.capacity()), (0, 0));

    array.push_back(1);
    assert_eq!((array.len(), array.capacity()), (1, 1));

    array.push_back(2);
    assert_eq!((array.len(), array.capacity()), (2, 2));

    array.push_back(3);
    assert_eq!((array.len(), array.capacity()), (3, 4));

    array.insert(1, 9);
    assert_eq!(array, [1, 9, 2, 3]);
    assert_eq!((array.len(), array.capacity()), (4, 4));

    array.erase(0);
    assert_eq!(array, [9, 2, 3]);
    assert_eq!(array.len(), 3);

    assert_eq!(
        array.at(10),
        Err(Error::IndexOutOfRange { index: 10, len: 3 })
    );
}

#[test]
fn insert_at_every_offset() {
    let original = dynamic_array![10, 20, 30, 40];

    for offset in 0..=original.len() {
        let mut array = original.clone();
        let before = snapshot(&array);

        let position = array.insert(offset, 99);

        assert_eq!(position, offset);
        assert_eq!(array.len(), before.len() + 1);
        assert_eq!(&array[..offset], &before[..offset]);
        assert_eq!(array[offset], 99);
        assert_eq!(&array[offset + 1..], &before[offset..]);
    }
}

#[test]
fn erase_at_every_offset() {
    let original = dynamic_array![10, 20, 30, 40];

    for offset in 0..original.len() {
        let mut array = original.clone();
        let before = snapshot(&array);

        let position = array.erase(offset);

        assert_eq!(position, offset);
        assert_eq!(array.len(), before.len() - 1);
        assert_eq!(&array[..offset], &before[..offset]);
        assert_eq!(&array[offset..], &before[offset + 1..]);
    }
}

#[test]
fn erase_last_returns_end() {
    let mut array = dynamic_array!['a', 'b'];

    let position = array.erase(1);

    assert_eq!(position, array.len());
}

#[test]
fn checked_access_agrees_with_indexing() {
    let array: DynamicArray<u32> = (0..9).map(|value| value * 3).collect();

    for index in 0..array.len() {
        assert_eq!(array.at(index), Ok(&array[index]));
    }

    for index in array.len()..array.len() + 3 {
        assert_eq!(
            array.at(index),
            Err(Error::IndexOutOfRange {
                index,
                len: array.len()
            })
        );
    }
}

#[test]
fn growing_resize_exposes_defaults_over_stale_values() {
    let mut array = dynamic_array!["x".to_string(), "y".to_string(), "z".to_string()];

    array.resize(1);
    array.resize(3);

    assert_eq!(array, ["x".to_string(), String::new(), String::new()]);
}

#[test]
fn copy_and_move_semantics() {
    let mut original = DynamicArray::with_reserve(reserve(32));
    original.extend([1, 2, 3]);

    let copy = original.clone();
    assert_eq!(copy.capacity(), copy.len());

    original[0] = 100;
    assert_eq!(copy, [1, 2, 3]);

    let moved = mem::take(&mut original);
    assert_eq!(moved, [100, 2, 3]);
    assert_eq!(moved.capacity(), 32);
    assert_eq!((original.len(), original.capacity()), (0, 0));
}

#[test]
fn comparisons_follow_elements() {
    let a = dynamic_array![1, 2, 3];
    let b = dynamic_array![1, 2, 3];
    let prefix = dynamic_array![1, 2];
    let larger = dynamic_array![1, 2, 4];

    assert!(a == b);
    assert!(a != prefix);
    assert!(prefix < a);
    assert!(a < larger);
    assert!(larger > a);
    assert!(a <= b);
    assert!(a >= b);

    let mut sorted = vec![larger.clone(), a.clone(), prefix.clone()];
    sorted.sort();
    assert_eq!(sorted, vec![prefix, a, larger]);
}

#[test]
fn raw_buffer_hand_off() {
    let mut buffer = RawBuffer::from_slice(&[1_u32, 2, 3]);
    let block = buffer.release().unwrap();
    assert!(!buffer.is_allocated());

    // SAFETY: The block was released from a `RawBuffer<u32>` and is adopted exactly once.
    let mut adopted = unsafe { RawBuffer::from_raw(block) };
    adopted.as_mut_slice()[2] = 4;

    assert_eq!(adopted.as_slice(), &[1, 2, 4]);
}

#[test]
fn builder_configures_capacity() {
    let mut array = DynamicArray::<u64>::builder().capacity(3).build();
    let storage = array.as_ptr();

    array.extend([1, 2, 3]);

    assert_eq!(array.as_ptr(), storage);
    assert_eq!(array.capacity(), 3);
}
