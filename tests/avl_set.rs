use std::collections::BTreeSet;

use fast_avltree::avl_set::AvlSet;
use rand::{seq::SliceRandom, thread_rng, Rng};

#[test]
fn avl_set_works() {
    let mut set = Box::new(AvlSet::<i32>::new());

    for i in 0..1000 {
        assert!(set.put(i));
    }
    assert!(!set.put(12));
    assert_eq!(set.len(), 1000);

    for i in 0..1000 {
        assert_eq!(set.get(&i), Some(&i));
    }

    assert_eq!(set.remove(&12), Some(12));
    assert!(set.get(&12).is_none());
    assert!(set.put(12));
    assert!(set.contains(&12));
    assert_eq!(set.first(), Some(&0));
    assert_eq!(set.last(), Some(&999));
    assert_eq!(set.as_tree().verify(), Ok(()));
}

#[test]
fn works_on_pointer_types() {
    let mut set = AvlSet::<String>::new();
    assert_eq!(set.get(&"test".into()), None);
    set.put("test".into());
    assert_eq!(set.get(&"test".into()), Some(&"test".to_string()));

    for i in 0..100 {
        set.put(i.to_string());
    }
    let mut want: Vec<String> = (0..100).map(|i| i.to_string()).collect();
    want.push("test".into());
    want.sort();
    assert!(set.iter().eq(want.iter()));
}

#[test]
fn collect_clone_and_debug() {
    let set: AvlSet<i32> = [5, 1, 4, 1, 3].into_iter().collect();
    assert_eq!(set.len(), 4);
    assert_eq!(format!("{:?}", set), "{1, 3, 4, 5}");

    let mut copy = set.clone();
    copy.remove(&5);
    copy.clear();
    assert!(copy.is_empty());
    assert_eq!((&set).into_iter().copied().collect::<Vec<_>>(), vec![1, 3, 4, 5]);
}

#[test]
fn random_op_test() {
    let mut set = AvlSet::new();
    let mut model = BTreeSet::new();
    let mut rng = thread_rng();

    let n = 20000;
    let mut keys: Vec<i32> = (0..n).map(|_| rng.gen::<u16>() as i32).collect();

    for &key in keys.iter() {
        assert_eq!(set.put(key), model.insert(key));
    }
    assert_eq!(set.len(), model.len());

    keys.shuffle(&mut rng);
    let removed_keys = keys.split_off(keys.len() / 2);
    for key in removed_keys.iter() {
        assert_eq!(set.remove(key).is_some(), model.remove(key));
    }

    assert!(set.iter().eq(model.iter()));
    assert_eq!(set.as_tree().verify(), Ok(()));
}
