use survival_pack::{validate_name, FieldLimit, Record, RecordStore};

fn record(name: &str, category: &str, priority: i64) -> Record {
    Record::new(name, category, priority, FieldLimit::default()).unwrap()
}

fn rows(store: &RecordStore) -> Vec<(String, String, i64)> {
    store
        .list()
        .map(|r| (r.name.clone(), r.category.clone(), r.priority))
        .collect()
}

fn row(name: &str, category: &str, priority: i64) -> (String, String, i64) {
    (name.to_string(), category.to_string(), priority)
}

fn packed_backpack() -> RecordStore {
    let mut store = RecordStore::new();
    store.insert(record("Rope", "Tool", 3));
    store.insert(record("Knife", "Tool", 1));
    store.insert(record("Water", "Supply", 5));
    store
}

#[test]
fn insert_grows_by_one_and_puts_record_first() {
    let mut store = packed_backpack();
    let before = store.len();

    store.insert(record("Map", "Paper", -7));

    assert_eq!(store.len(), before + 1);
    assert_eq!(store.get(0), Some(&record("Map", "Paper", -7)));
}

#[test]
fn remove_present_name_shrinks_by_one() {
    let mut store = packed_backpack();
    let removed = store.remove("Knife").unwrap();

    assert_eq!(removed, record("Knife", "Tool", 1));
    assert_eq!(store.len(), 2);
    assert_eq!(
        rows(&store),
        [row("Water", "Supply", 5), row("Rope", "Tool", 3)]
    );
}

#[test]
fn remove_absent_name_leaves_store_unchanged() {
    let mut store = packed_backpack();
    let before = store.clone();

    assert!(store.remove("Compass").is_none());
    assert_eq!(store, before);
}

#[test]
fn listing_is_read_only() {
    let store = packed_backpack();
    let before = store.clone();

    for _ in 0..3 {
        assert_eq!(store.list().count(), 3);
    }
    assert_eq!(store, before);
}

#[test]
fn empty_store_lists_nothing() {
    let store = RecordStore::new();
    assert!(store.is_empty());
    assert_eq!(store.list().next(), None);
}

#[test]
fn sort_by_name_is_ordered_and_idempotent() {
    let mut store = RecordStore::new();
    for (name, category, priority) in [
        ("torch", "Light", 2),
        ("Bandage", "Medical", 9),
        ("Axe", "Tool", 4),
        ("Matches", "Fire", 1),
        ("Axe", "Spare", 7),
    ] {
        store.insert(record(name, category, priority));
    }

    store.sort_by_name();
    let once = store.clone();
    store.sort_by_name();
    assert_eq!(store, once);

    let names: Vec<&str> = store.list().map(|r| r.name.as_str()).collect();
    assert!(names
        .windows(2)
        .all(|pair| pair[0].as_bytes() <= pair[1].as_bytes()));
    assert_eq!(names.last(), Some(&"torch"));

    // whole records travel together
    assert_eq!(
        rows(&store),
        [
            row("Axe", "Spare", 7),
            row("Axe", "Tool", 4),
            row("Bandage", "Medical", 9),
            row("Matches", "Fire", 1),
            row("torch", "Light", 2),
        ]
    );
}

#[test]
fn sort_by_priority_orders_values_only() {
    let mut store = RecordStore::new();
    for (name, priority) in [("Flint", 8), ("Map", -2), ("Torch", 5), ("Rope", 0)] {
        store.insert(record(name, "Gear", priority));
    }
    let names_before: Vec<String> = store.list().map(|r| r.name.clone()).collect();

    store.sort_by_priority();

    let priorities: Vec<i64> = store.list().map(|r| r.priority).collect();
    assert_eq!(priorities, [-2, 0, 5, 8]);
    let names_after: Vec<String> = store.list().map(|r| r.name.clone()).collect();
    assert_eq!(names_after, names_before);
}

#[test]
fn name_validation_cases() {
    assert!(!validate_name(""));
    assert!(validate_name("Alex"));
    assert!(!validate_name("Al3x"));
    assert!(validate_name("Ana Maria"));
    assert!(!validate_name("ana-maria"));
}

#[test]
fn scenario_insert_then_sort_by_name() {
    let mut store = packed_backpack();
    assert_eq!(
        rows(&store),
        [
            row("Water", "Supply", 5),
            row("Knife", "Tool", 1),
            row("Rope", "Tool", 3),
        ]
    );

    store.sort_by_name();

    assert_eq!(
        rows(&store),
        [
            row("Knife", "Tool", 1),
            row("Rope", "Tool", 3),
            row("Water", "Supply", 5),
        ]
    );
}

#[test]
fn scenario_remove_twice() {
    let mut store = packed_backpack();
    store.sort_by_name();

    assert!(store.remove("Rope").is_some());
    assert_eq!(
        rows(&store),
        [row("Knife", "Tool", 1), row("Water", "Supply", 5)]
    );

    let before = store.clone();
    assert!(store.remove("Rope").is_none());
    assert_eq!(store, before);
}

#[test]
fn scenario_priority_sort_moves_numbers_not_items() {
    let mut store = RecordStore::new();
    store.insert(record("Rope", "Tool", 5));
    store.insert(record("Knife", "Blade", 1));
    store.insert(record("Water", "Supply", 3));
    assert_eq!(
        rows(&store),
        [
            row("Water", "Supply", 3),
            row("Knife", "Blade", 1),
            row("Rope", "Tool", 5),
        ]
    );

    store.sort_by_priority();

    // Water now carries Knife's old priority and Knife carries Water's.
    assert_eq!(
        rows(&store),
        [
            row("Water", "Supply", 1),
            row("Knife", "Blade", 3),
            row("Rope", "Tool", 5),
        ]
    );
}
