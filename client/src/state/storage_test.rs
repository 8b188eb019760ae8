use super::*;

#[test]
fn memory_storage_set_get_remove() {
    let storage = MemoryStorage::new();
    assert_eq!(storage.get(TOKEN_KEY), None);

    storage.set(TOKEN_KEY, "tok");
    assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("tok"));

    storage.set(TOKEN_KEY, "tok2");
    assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("tok2"));
    assert_eq!(storage.len(), 1);

    storage.remove(TOKEN_KEY);
    assert!(storage.is_empty());
}

#[test]
fn memory_storage_clones_share_entries() {
    let a = MemoryStorage::new();
    let b = a.clone();
    a.set(USER_KEY, "{}");
    assert_eq!(b.get(USER_KEY).as_deref(), Some("{}"));
}

#[test]
fn rc_storage_delegates() {
    let inner = MemoryStorage::new();
    let shared: Rc<MemoryStorage> = Rc::new(inner.clone());
    shared.set("k", "v");
    assert_eq!(inner.get("k").as_deref(), Some("v"));
    shared.remove("k");
    assert_eq!(inner.get("k"), None);
}
