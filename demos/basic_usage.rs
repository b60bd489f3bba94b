//! Basic usage of ordmap's OrderedMap and snapshot cursors

use ordmap::{Config, OrderedMap, OrderedMapConfig};

fn main() -> ordmap::Result<()> {
    ordmap::init();

    println!("=== Insertion order ===");
    let mut map = OrderedMap::with_config(&OrderedMapConfig::balanced_preset())?;
    map.set("apple", 3);
    map.set("banana", 5);
    map.set("cherry", 7);
    map.set("apple", 4); // update keeps position
    println!("{:?}", map);

    println!("\n=== Repositioning ===");
    let index = map.try_set_before(&"banana", "apricot", 1)?;
    println!("apricot inserted at {}", index);
    map.try_replace_key(&"cherry", "coconut")?;
    println!("keys: {:?}", map.keys());

    if let Err(err) = map.try_set_after(&"durian", "elderberry", 2) {
        println!("expected failure ({}): {}", err.category(), err);
    }

    println!("\n=== Snapshot cursor ===");
    let mut cursor = map.snapshot();
    map.delete(&"apple"); // the cursor still sees it
    while let Some(value) = cursor.get_next() {
        println!("visited {}", value);
    }
    if let Some((last, index)) = cursor.current_with_index() {
        println!("last visited {} at index {}", last, index);
    }
    println!("map now: {:?}", map);

    Ok(())
}
