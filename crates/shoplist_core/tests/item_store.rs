use shoplist_core::{ItemDraft, ItemRepository, ItemSnapshot, ItemStore, RepoError};
use std::sync::{Arc, Mutex};

fn draft(title: &str, description: &str, quantity: i32) -> ItemDraft {
    ItemDraft {
        title: title.to_string(),
        description: description.to_string(),
        quantity,
    }
}

fn ids(store: &ItemStore) -> Vec<u64> {
    store.snapshot().iter().map(|item| item.id).collect()
}

#[test]
fn add_assigns_sequential_ids_in_insertion_order() {
    let mut store = ItemStore::new();
    let first = store.add(draft("Milk", "2%", 2));
    let second = store.add(draft("Bread", "Whole wheat", 1));
    let third = store.add(draft("", "", 1));

    assert_eq!((first.id, second.id, third.id), (1, 2, 3));
    assert_eq!(ids(&store), vec![1, 2, 3]);
    assert_eq!(store.snapshot()[2].title, "");
}

#[test]
fn ids_stay_unique_across_interleaved_remove_and_replace() {
    let mut store = ItemStore::new();
    let mut assigned = Vec::new();

    assigned.push(store.add(draft("a", "", 1)).id);
    assigned.push(store.add(draft("b", "", 1)).id);
    store.remove(1).unwrap();
    assigned.push(store.add(draft("c", "", 1)).id);
    store
        .replace(2, "b2".to_string(), String::new(), 4)
        .unwrap();
    store.remove(3).unwrap();
    assigned.push(store.add(draft("d", "", 1)).id);

    assert_eq!(assigned, vec![1, 2, 3, 4]);
    assert_eq!(ids(&store), vec![2, 4]);
}

#[test]
fn replace_keeps_every_position() {
    let mut store = ItemStore::new();
    for title in ["a", "b", "c", "d"] {
        store.add(draft(title, "", 1));
    }

    let updated = store
        .replace(3, "C".to_string(), "upper".to_string(), 9)
        .unwrap();
    assert_eq!(updated.id, 3);

    let snapshot = store.snapshot();
    let titles = snapshot
        .iter()
        .map(|item| item.title.as_str())
        .collect::<Vec<_>>();
    assert_eq!(titles, vec!["a", "b", "C", "d"]);
    assert_eq!(ids(&store), vec![1, 2, 3, 4]);
    assert_eq!(snapshot[2].quantity, 9);
}

#[test]
fn replace_unknown_id_leaves_collection_unchanged() {
    let mut store = ItemStore::new();
    store.add(draft("Milk", "2%", 2));
    let before = store.snapshot();

    let err = store
        .replace(42, "x".to_string(), "y".to_string(), 1)
        .unwrap_err();
    assert_eq!(err, RepoError::NotFound(42));
    assert_eq!(store.snapshot(), before);
}

#[test]
fn removing_absent_item_is_reported_and_harmless() {
    let mut store = ItemStore::new();
    store.add(draft("Milk", "2%", 2));
    store.add(draft("Bread", "", 1));
    let removed = store.remove(1).unwrap();
    assert_eq!(removed.title, "Milk");
    let before = store.snapshot();

    assert!(matches!(store.remove(1), Err(RepoError::NotFound(1))));
    assert!(matches!(store.remove(99), Err(RepoError::NotFound(99))));
    assert_eq!(store.snapshot(), before);
}

#[test]
fn presenters_receive_each_new_snapshot() {
    let mut store = ItemStore::new();
    let seen: Arc<Mutex<Vec<ItemSnapshot>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let subscription = store.subscribe(Box::new(move |snapshot: &ItemSnapshot| {
        sink.lock().unwrap().push(Arc::clone(snapshot));
    }));

    store.add(draft("Milk", "", 1));
    store.replace(1, "Milk".to_string(), "Skim".to_string(), 1).unwrap();
    let _ = store.remove(7);
    store.remove(1).unwrap();

    {
        let seen = seen.lock().unwrap();
        let lengths = seen.iter().map(|snapshot| snapshot.len()).collect::<Vec<_>>();
        // initial + add + replace + remove; the failed remove publishes nothing
        assert_eq!(lengths, vec![0, 1, 1, 0]);
        assert_eq!(seen[2][0].description, "Skim");
    }

    assert!(store.unsubscribe(subscription));
    assert!(!store.unsubscribe(subscription));
    store.add(draft("Eggs", "", 12));
    assert_eq!(seen.lock().unwrap().len(), 4);
}
