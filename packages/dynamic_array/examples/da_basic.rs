//! Basic usage of the `dynamic_array` crate:
//!
//! * Creating an array.
//! * Adding items and watching the capacity grow.
//! * Checked and unchecked access.
//! * Removing items.

use dynamic_array::{DynamicArray, reserve};

fn main() {
    let mut names = DynamicArray::new();

    // An empty array owns no storage. The first push allocates room for exactly one item and
    // every push into a full array doubles the capacity after that.
    for name in ["Alice", "Bob", "Charlie"] {
        names.push_back(name.to_string());

        println!(
            "Array contains {} items, with a capacity of {}",
            names.len(),
            names.capacity()
        );
    }

    // Inserting in the middle shifts everything after it one slot to the right.
    names.insert(1, "Zed".to_string());
    println!("After insert: {names:?}");

    // Checked access reports out of range indexes as errors instead of panicking.
    match names.at(10) {
        Ok(name) => println!("Found {name}"),
        Err(error) => println!("Checked access failed: {error}"),
    }

    names.erase(0);
    println!("After erase: {names:?}");

    // Pre-sizing avoids storage replacement when you know how much you will need.
    let mut numbers = DynamicArray::with_reserve(reserve(100));
    numbers.extend(0..100);
    println!(
        "Reserved array holds {} items in a capacity of {}",
        numbers.len(),
        numbers.capacity()
    );

    // A copy is always an exact fit, regardless of the spare capacity of the original.
    numbers.resize(10);
    let copy = numbers.clone();
    println!(
        "Copy of {} items has a capacity of {}",
        copy.len(),
        copy.capacity()
    );
}
