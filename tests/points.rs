use pinmap::geo::MapPoint;
use pinmap::points::PointStore;

#[test]
fn starts_empty_and_that_is_a_valid_state() {
    let store = PointStore::new();
    assert!(store.is_empty());
    assert_eq!(store.len(), 0);
    assert!(store.addresses().is_empty());
    assert!(store.all().is_empty());
}

#[test]
fn append_preserves_insertion_order() {
    let mut store = PointStore::new();
    store.append(MapPoint::new(1.0, 1.0), "first".into());
    store.append(MapPoint::new(2.0, 2.0), "second".into());
    store.append(MapPoint::new(3.0, 3.0), "third".into());
    assert_eq!(store.addresses(), vec!["first", "second", "third"]);
    assert_eq!(store.all()[1].map_point, MapPoint::new(2.0, 2.0));
}

#[test]
fn duplicates_are_kept_as_independent_entries() {
    let mut store = PointStore::new();
    store.append(MapPoint::new(1.0, 1.0), "same place".into());
    store.append(MapPoint::new(1.0, 1.0), "same place".into());
    assert_eq!(store.len(), 2);
    assert_eq!(store.addresses(), vec!["same place", "same place"]);
}
