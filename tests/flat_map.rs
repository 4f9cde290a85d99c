use value_ptr::{FlatMap, Greater, OutOfRange, StableFlatMap, UnstableFlatMap};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_test::wasm_bindgen_test as test;

#[test]
fn duplicate_keys_keep_the_first_entry() {
	let map: FlatMap<i32, i32> = [(1, 2), (2, 5), (2, 3)].into_iter().collect();
	assert_eq!(map.len(), 2);
	assert_eq!(map.at(&2), Ok(&5));
}

#[test]
fn emplace_into_existing_map() {
	let mut map: StableFlatMap<i32, i32> = [(1, 2), (2, 5), (3, 3)].into();
	assert_eq!(map.emplace(4, 4), (3, true));
	assert_eq!(map.emplace(5, 3), (4, true));
	assert_eq!(map.len(), 5);
	assert_eq!(map.at(&5), Ok(&3));

	assert_eq!(map.emplace(3, 10), (2, false));
	assert_eq!(map.len(), 5);
	assert_eq!(map.at(&3), Ok(&3));
}

#[test]
fn empty_map() {
	let mut map: UnstableFlatMap<String, u8> = UnstableFlatMap::new();
	assert!(map.is_empty());
	assert_eq!(map.erase(&"a".to_owned()), 0);
	assert_eq!(map.find(&"a".to_owned()), None);
	assert_eq!(map.at(&"a".to_owned()), Err(OutOfRange::Key));
	assert_eq!(map.lower_bound(&"a".to_owned()), 0);
	assert_eq!(map.upper_bound(&"a".to_owned()), 0);
	assert_eq!(map.iter().next(), None);
}

#[test]
fn bounds_and_search() {
	let map: FlatMap<u32, ()> = [10, 20, 30].map(|key| (key, ())).into();
	assert_eq!(map.lower_bound(&20), 1);
	assert_eq!(map.upper_bound(&20), 2);
	assert_eq!(map.equal_range(&20), 1..2);
	assert_eq!(map.equal_range(&25), 2..2);
	assert_eq!(map.lower_bound(&99), 3);
	assert_eq!(map.find(&30), Some(2));
	assert_eq!(map.find(&15), None);
	assert_eq!(map.count(&10), 1);
	assert_eq!(map.count(&11), 0);
	assert!(map.contains_key(&10));
}

#[test]
fn stable_entries_keep_their_address() {
	let mut map: StableFlatMap<u32, [u8; 256]> = StableFlatMap::new();
	map.emplace(50, [5; 256]);
	let address: *const [u8; 256] = map.get(&50).expect("just inserted");

	for key in (0..100).rev() {
		map.emplace(key, [0; 256]);
	}
	map.insert_many((100..200).map(|key| (key, [1; 256])));
	map.erase(&49);
	map.erase_range(..10);

	assert!(core::ptr::eq(address, map.get(&50).expect("still present")));
	assert_eq!(map.get(&50).map(|value| value[0]), Some(5));
}

#[test]
fn both_storages_agree() {
	let entries = [(7, 'g'), (3, 'c'), (9, 'i'), (3, 'x'), (1, 'a'), (7, 'y')];
	let stable: StableFlatMap<u8, char> = entries.into_iter().collect();
	let unstable: UnstableFlatMap<u8, char> = entries.into_iter().collect();
	assert!(stable.iter().eq(unstable.iter()));
	assert_eq!(
		stable.into_iter().collect::<Vec<_>>(),
		[(1, 'a'), (3, 'c'), (7, 'g'), (9, 'i')]
	);
}

#[test]
fn custom_comparator() {
	let mut map: FlatMap<i32, &str, Greater> = FlatMap::new();
	map.insert_many([(1, "one"), (3, "three"), (2, "two")]);
	assert_eq!(map.keys().copied().collect::<Vec<_>>(), [3, 2, 1]);

	let mut by_length: FlatMap<&str, (), _> =
		FlatMap::with_comparator(|a: &&str, b: &&str| a.len() < b.len());
	by_length.emplace("aa", ());
	assert_eq!(by_length.emplace("bb", ()), (0, false));
	assert_eq!(by_length.emplace("c", ()), (0, true));
	assert_eq!(by_length.get_key_value(&"zz"), Some((&"aa", &())));
}

#[test]
fn hint_is_used_when_it_fits() {
	let mut map: UnstableFlatMap<i32, i32> = UnstableFlatMap::new();
	let mut hint = 0;
	for key in 0..10 {
		hint = map.emplace_hint(hint + usize::from(key > 0), key, key * key);
	}
	assert_eq!(hint, 9);
	assert_eq!(map.emplace_hint(0, 5, 0), 5);
	assert_eq!(map.at(&5), Ok(&25));
}

#[test]
fn default_insertion() {
	let mut counts: FlatMap<char, usize> = FlatMap::new();
	for c in "abracadabra".chars() {
		*counts.get_or_insert_default(c) += 1;
	}
	assert_eq!(counts[&'a'], 5);
	assert_eq!(counts[&'b'], 2);
	assert_eq!(counts.len(), 5);
}

#[test]
fn removal() {
	let mut map: FlatMap<u8, String> = [(1, "1"), (2, "2"), (3, "3"), (4, "4")]
		.map(|(k, v)| (k, v.to_owned()))
		.into();
	assert_eq!(map.remove(&2), Some("2".to_owned()));
	assert_eq!(map.remove(&2), None);
	assert_eq!(map.remove_entry(&4), Some((4, "4".to_owned())));
	assert_eq!(map.erase(&1), 1);
	map.erase_at(0);
	assert!(map.is_empty());
}

#[test]
fn mutation_through_iterators() {
	let mut map: FlatMap<u8, u32> = (0..5).map(|key| (key, u32::from(key))).collect();
	for (key, value) in &mut map {
		*value += u32::from(*key);
	}
	map.values_mut().rev().take(1).for_each(|value| *value = 0);
	*map.get_mut(&0).expect("present") = 100;
	*map.at_mut(&1).expect("present") += 1;
	assert_eq!(map.values().copied().collect::<Vec<_>>(), [100, 3, 4, 6, 0]);
	assert_eq!(map.get_index(1), Some((&1, &3)));
	assert_eq!(map.iter().len(), 5);
}

#[test]
#[should_panic = "Key not found"]
fn missing_key_index_panics() {
	let map: FlatMap<u8, u8> = FlatMap::new();
	let _value: u8 = map[&0];
}

#[test]
fn value_semantics() {
	let map: FlatMap<u8, Vec<u8>> = [(1, vec![1])].into();
	let mut copy = map.clone();
	copy.get_mut(&1).expect("present").push(2);
	assert_ne!(map, copy);
	assert_eq!(map.at(&1), Ok(&vec![1]));
	assert_eq!(format!("{map:?}"), "{1: [1]}");

	let mut reserved: FlatMap<u8, u8> = FlatMap::with_capacity(8);
	assert!(reserved.capacity() >= 8);
	reserved.extend([(2, 2), (1, 1)]);
	reserved.clear();
	reserved.shrink_to_fit();
	assert!(reserved.is_empty());
}
