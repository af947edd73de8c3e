//! End-to-end scenarios over a table of plants.

use std::cell::RefCell;
use std::rc::Rc;
use verdant::{Error, HashIndex, Index, Query, Table, UniqueIndex, WriteKind};

#[derive(Clone, Debug, PartialEq)]
struct Plant {
    id: String,
    name: String,
    genus: String,
}

fn plant(id: &str, name: &str, genus: &str) -> Plant {
    Plant {
        id: id.to_string(),
        name: name.to_string(),
        genus: genus.to_string(),
    }
}

fn key(id: &str) -> String {
    id.to_string()
}

fn plants() -> Table<String, Plant> {
    Table::new(|p: &Plant| p.id.clone())
}

#[test]
fn test_plant_lifecycle() {
    let mut table = plants();
    let apple = plant("1", "Apple", "Malus");

    assert_eq!(table.insert(apple.clone()), Some(key("1")));
    assert_eq!(table.find(&key("1")), &apple);
    assert_eq!(table.lookup(&key("2")), None);
    assert_eq!(table.insert(apple.clone()), None);

    let pear = plant("2", "Pear", "Pyrus");
    assert_eq!(table.insert(pear.clone()), Some(key("2")));
    assert_eq!(table.remove_by_key(&key("2")), Some(pear));
    assert_eq!(table.lookup(&key("2")), None);
    assert_eq!(table.remove_by_key(&key("2")), None);
}

#[test]
fn test_composite_unique_index() {
    let mut table = plants();
    let by_name = table.attach(UniqueIndex::new(|p: &Plant| (p.genus.clone(), p.name.clone())));

    assert!(table.insert(plant("1", "Apple", "Malus")).is_some());
    assert_eq!(
        table.try_insert(plant("2", "Apple", "Malus")),
        Err(Error::rejected(0, WriteKind::Insertion))
    );

    assert_eq!(table.len(), 1);
    assert_eq!(table.find(&key("1")).name, "Apple");
    assert_eq!(table.index(&by_name).len(), 1);
}

#[test]
fn test_failure_reasons() {
    let mut table = plants();
    table.attach(UniqueIndex::new(|p: &Plant| p.name.clone()));
    table.insert(plant("1", "Apple", "Malus"));
    table.insert(plant("2", "Pear", "Pyrus"));

    assert_eq!(table.try_insert(plant("1", "Fig", "Ficus")), Err(Error::DuplicateKey));
    assert_eq!(table.try_remove_by_key(&key("9")), Err(Error::KeyNotFound));
    assert_eq!(
        table.try_update(plant("2", "Apple", "Pyrus")),
        Err(Error::rejected(0, WriteKind::Update))
    );

    // The plain API reports all three the same way.
    assert_eq!(table.insert(plant("1", "Fig", "Ficus")), None);
    assert_eq!(table.remove_by_key(&key("9")), None);
    assert_eq!(table.update(plant("2", "Apple", "Pyrus")), None);
}

#[test]
fn test_unique_and_hash_indexes_together() {
    let mut table = plants();
    table.insert(plant("1", "Apple", "Malus"));
    table.insert(plant("2", "Crabapple", "Malus"));

    let by_genus = table.attach(HashIndex::new(|p: &Plant| p.genus.clone()));
    let by_name = table.attach(UniqueIndex::new(|p: &Plant| p.name.clone()));

    // Refused by the unique index after the hash index accepted.
    assert!(table.insert(plant("3", "Apple", "Pyrus")).is_none());
    assert_eq!(table.index(&by_genus).count(&key("Pyrus")), 0);
    assert_eq!(table.index(&by_genus).len(), 2);

    assert!(table.update(plant("2", "Crabapple", "Pyrus")).is_some());
    assert_eq!(table.index(&by_genus).get(&key("Pyrus")), vec![key("2")]);
    assert_eq!(table.index(&by_genus).get(&key("Malus")), vec![key("1")]);

    assert!(table.remove(&plant("1", "", "")).is_some());
    assert_eq!(table.index(&by_genus).count(&key("Malus")), 0);
    assert!(table.lookup_unique(&by_name, &key("Apple")).is_none());
    assert_eq!(
        table.lookup_unique(&by_name, &key("Crabapple")).map(|p| p.genus.as_str()),
        Some("Pyrus")
    );
}

#[test]
fn test_query_over_table() {
    let mut table = plants();
    let by_genus = table.attach(HashIndex::new(|p: &Plant| p.genus.clone()));

    let evaluations = Rc::new(RefCell::new(0));
    let counter = evaluations.clone();
    let mut genera = Query::new(move |t: &Table<String, Plant>, previous: Option<&usize>| {
        *counter.borrow_mut() += 1;
        let count = t.index(&by_genus).group_count();
        (previous != Some(&count)).then_some(count)
    });

    // Nobody is listening yet.
    table.insert(plant("1", "Apple", "Malus"));
    genera.evaluate(&table);
    assert_eq!(*evaluations.borrow(), 0);

    // The driver subscribes and delivers the current value itself.
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    let subscription = genera.subscribe(move |n: &usize| sink.borrow_mut().push(*n));
    genera.evaluate(&table);
    assert_eq!(*seen.borrow(), vec![1]);

    table.insert(plant("2", "Crabapple", "Malus"));
    genera.evaluate(&table);
    table.insert(plant("3", "Pear", "Pyrus"));
    genera.evaluate(&table);

    assert_eq!(*seen.borrow(), vec![1, 2]);
    assert_eq!(genera.value(), Some(&2));
    assert_eq!(*evaluations.borrow(), 3);

    subscription.unsubscribe();
    table.remove_by_key(&key("3"));
    genera.evaluate(&table);
    assert_eq!(*evaluations.borrow(), 3);
    assert_eq!(genera.value(), Some(&2));
}
