mod common;

use common::tree;
use indexmap::IndexMap;
use pretty_assertions::assert_eq;
use serde::Serialize;
use tgnrs::dict::{
    SubStatsEntry,
    TgnObjectsDict,
    TgnSubStatsDict,
    DEFAULT_DUMP_INDENT,
};
use tgnrs::errors::TgnError;

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Entry {
    Text(String),
    Nested(TgnObjectsDict<Entry>),
}

fn stats(pairs: &[(&str, u64)]) -> IndexMap<String, u64> {
    pairs.iter().map(|(k, v)| ((*k).to_owned(), *v)).collect()
}

#[test]
fn test_objects_dict() {
    let t = tree();

    let mut objects_dict = TgnObjectsDict::new();

    objects_dict
        .insert(&t.node1, TgnObjectsDict::<String>::new())
        .unwrap();
    objects_dict
        .get_mut(&t.node1)
        .unwrap()
        .insert(&t.node11, "node 11 entry".to_owned())
        .unwrap();
    objects_dict
        .get_mut("name1")
        .unwrap()
        .insert(&t.node12, "node 12 entry".to_owned())
        .unwrap();
    objects_dict
        .insert(&t.node2, TgnObjectsDict::new())
        .unwrap();

    assert!(matches!(
        objects_dict.insert("invalid key", TgnObjectsDict::new()),
        Err(TgnError::InvalidKey(k)) if k == "invalid key"
    ));

    assert_eq!(objects_dict.len(), 2);
    assert_eq!(objects_dict.get(&t.node1).unwrap().len(), 2);
    assert_eq!(
        objects_dict.get("node1").unwrap().get("name12").unwrap(),
        "node 12 entry"
    );
    assert_eq!(
        objects_dict.get(&t.node1).unwrap().get(&t.node11).unwrap(),
        "node 11 entry"
    );
    assert!(objects_dict.get(&t.node2).unwrap().is_empty());
}

#[test]
fn test_lookup_tiers() {
    let t = tree();

    let mut objects_dict = TgnObjectsDict::new();

    objects_dict.insert(&t.node2, "node 2 entry").unwrap();

    assert_eq!(*objects_dict.get(&t.node2).unwrap(), "node 2 entry");
    assert_eq!(*objects_dict.get("name2").unwrap(), "node 2 entry");
    assert_eq!(*objects_dict.get("node2").unwrap(), "node 2 entry");
    assert_eq!(objects_dict.by_identity(&t.node2), Some(&"node 2 entry"));
    assert_eq!(objects_dict.by_name("name2"), Some(&"node 2 entry"));
    assert_eq!(objects_dict.by_reference("node2"), Some(&"node 2 entry"));
    assert_eq!(objects_dict.by_name("node2"), None);
    assert_eq!(objects_dict.by_identity(&t.node1), None);

    assert!(matches!(
        objects_dict.get(&t.node1),
        Err(TgnError::KeyNotFound(k)) if k == "name1"
    ));
    assert!(matches!(
        objects_dict.get("nothing"),
        Err(TgnError::KeyNotFound(k)) if k == "nothing"
    ));
    assert_eq!(*objects_dict.get_or("nothing", &"default"), "default");
    assert!(objects_dict.contains_key("name2"));
    assert!(!objects_dict.contains_key(&t.leaf1));
}

#[test]
fn test_order_and_remove() {
    let t = tree();

    let mut objects_dict = TgnObjectsDict::new();

    objects_dict.insert(&t.node2, 2).unwrap();
    objects_dict.insert(&t.leaf1, 1).unwrap();
    objects_dict.insert(&t.node11, 11).unwrap();

    assert_eq!(objects_dict.insert(&t.node2, 22).unwrap(), Some(2));

    let refs: Vec<&str> = objects_dict.keys().map(|k| k.obj_ref()).collect();

    assert_eq!(refs, vec!["node2", "leaf1", "node11"]);
    assert_eq!(objects_dict.values().copied().collect::<Vec<_>>(), vec![22, 1, 11]);

    assert_eq!(objects_dict.remove("leaf1"), Some(1));
    assert_eq!(objects_dict.remove("leaf1"), None);

    let names: Vec<String> = objects_dict.iter().map(|(k, _)| k.name()).collect();

    assert_eq!(names, vec!["name2", "name11"]);
}

#[test]
fn test_dumps() {
    let t = tree();

    let mut inner = TgnObjectsDict::new();

    inner
        .insert(&t.node11, Entry::Text("node 11 entry".to_owned()))
        .unwrap();
    inner
        .insert(&t.leaf11, Entry::Nested(TgnObjectsDict::new()))
        .unwrap();

    let mut objects_dict = TgnObjectsDict::new();

    objects_dict.insert(&t.node1, Entry::Nested(inner)).unwrap();
    objects_dict
        .insert(&t.node2, Entry::Text("node 2 entry".to_owned()))
        .unwrap();

    assert_eq!(
        objects_dict.dumps(DEFAULT_DUMP_INDENT).unwrap(),
        "{\n \"name1\": {\n  \"name11\": \"node 11 entry\",\n  \"leaf11\": {}\n },\n \"name2\": \"node 2 entry\"\n}"
    );

    let compact = objects_dict.dumps(0).unwrap();

    assert!(compact.starts_with("{\n\"name1\": {\n\"name11\""));
}

#[test]
fn test_sub_stats_dict() {
    let t = tree();

    let mut sub_stats = TgnSubStatsDict::new();

    sub_stats
        .insert(&t.node1, stats(&[("a", 1), ("b", 2)]))
        .unwrap();

    assert_eq!(sub_stats.bucket(&t.node1).unwrap()["a"], 1);
    assert_eq!(sub_stats.bucket("name1").unwrap()["a"], 1);
    assert_eq!(sub_stats.get("a").unwrap(), SubStatsEntry::Value(&1));
    assert_eq!(*sub_stats.stat("b").unwrap(), 2);
    assert_eq!(
        sub_stats.get(&t.node1).unwrap().bucket().unwrap()["b"],
        2
    );
    assert!(matches!(sub_stats.stat("c"), Err(TgnError::KeyNotFound(_))));

    sub_stats
        .insert(&t.node2, stats(&[("c", 3), ("d", 4)]))
        .unwrap();

    assert_eq!(sub_stats.len(), 2);
    assert_eq!(sub_stats.bucket(&t.node1).unwrap()["a"], 1);
    assert_eq!(sub_stats.bucket(&t.node2).unwrap()["c"], 3);
    assert!(matches!(
        sub_stats.get("a"),
        Err(TgnError::AmbiguousLookup { key, buckets: 2 }) if key == "a"
    ));
    assert!(matches!(
        sub_stats.stat("c"),
        Err(TgnError::AmbiguousLookup { .. })
    ));
}

#[test]
fn test_sub_stats_dumps() {
    let t = tree();

    let mut sub_stats = TgnSubStatsDict::new();

    sub_stats
        .insert(&t.node2, stats(&[("rx", 10), ("tx", 12)]))
        .unwrap();

    assert_eq!(
        sub_stats.dumps(2).unwrap(),
        "{\n  \"name2\": {\n    \"rx\": 10,\n    \"tx\": 12\n  }\n}"
    );
}
