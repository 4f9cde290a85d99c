use value_ptr::{MovingVec, OutOfRange};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_test::wasm_bindgen_test as test;

#[test]
fn sum_and_sort() {
	let mut v: MovingVec<i32> = [1, 2, 2, 3].into();
	assert_eq!(v.iter().sum::<i32>(), 8);

	v.sort();
	assert_eq!(v, MovingVec::from([1, 2, 2, 3]));
}

#[test]
fn equal_when_built_from_the_same_list() {
	let a: MovingVec<&str> = ["x", "y", "z"].into();
	let b: MovingVec<&str> = ["x", "y", "z"].into_iter().collect();
	assert_eq!(a, b);
	assert_ne!(a, MovingVec::from(["x", "y"]));
	assert!(MovingVec::from(["x", "y"]) < a);
}

#[test]
fn sorts_like_vec() {
	let input = [5, 3, 9, 1, 3, 7, 0, 8, 3];
	let mut direct = input.to_vec();
	let mut indirect = MovingVec::from(input);

	direct.sort_by(|a, b| b.cmp(a));
	indirect.sort_by(|a, b| b.cmp(a));
	assert!(direct.iter().eq(indirect.iter()));

	direct.sort_by_key(|value| value % 4);
	indirect.sort_by_key(|value| value % 4);
	assert!(direct.iter().eq(indirect.iter()));

	direct.sort_unstable();
	indirect.sort_unstable();
	assert_eq!(Vec::from(indirect), direct);
}

#[test]
fn addresses_are_stable() {
	let mut v: MovingVec<String> = (0..8).map(|i| i.to_string()).collect();
	let addresses: Vec<*const String> = v.iter().map(|s| s as *const String).collect();

	v.insert(0, "first".to_owned());
	v.push("last".to_owned());
	v.reserve(1000);
	v.erase(4);
	v.reverse();
	v.sort();
	v.rotate_left(3);

	for (i, address) in addresses.iter().enumerate() {
		if i == 3 {
			continue;
		}
		let label = i.to_string();
		let element = v.iter().find(|s| **s == label).expect("still present");
		assert!(core::ptr::eq(element, *address), "{label} moved");
	}
}

#[test]
fn emplace_constructs_in_place() {
	let mut v = MovingVec::new();
	*v.emplace_back(|| 1) += 1;
	let third = v.emplace(1, || 3);
	*third *= 10;
	v.emplace(0, || 0);
	assert_eq!(Vec::from(v), [0, 2, 30]);
}

#[test]
fn positional_insert_and_remove() {
	let mut v: MovingVec<char> = ['a', 'd'].into();
	v.insert(1, 'b');
	v.insert_many(2, ['c', 'x', 'y']);
	assert_eq!(v.remove(3), 'x');
	assert_eq!(v.swap_remove(3), 'y');
	assert_eq!(v.pop(), Some('d'));
	v.push('d');
	v.push('e');
	v.erase_range(4..);
	assert_eq!(v.iter().collect::<String>(), "abcd");
	assert_eq!(v.first(), Some(&'a'));
	assert_eq!(v.last(), Some(&'d'));
}

#[test]
#[should_panic = "Insertion index"]
fn insertion_past_the_end_panics() {
	let mut v: MovingVec<u8> = MovingVec::new();
	v.emplace(1, || unreachable!("must not construct"));
}

#[test]
fn checked_access() {
	let mut v: MovingVec<u8> = [1, 2].into();
	assert_eq!(v.at(1), Ok(&2));
	assert_eq!(v.at(2), Err(OutOfRange::Index { index: 2, len: 2 }));
	*v.at_mut(0).expect("in range") = 10;
	assert_eq!(v[0], 10);
	assert_eq!(v.get(5), None);
	assert_eq!(
		v.at_mut(9).map(|_| ()).unwrap_err().to_string(),
		"index 9 is out of range for length 2"
	);
}

#[test]
#[should_panic]
fn index_out_of_bounds_panics() {
	let v: MovingVec<u8> = MovingVec::new();
	let _value: u8 = v[0];
}

#[test]
fn resize_truncate_and_clear() {
	let mut v = MovingVec::from_elem(2, &'-');
	v.resize(4, &'+');
	assert_eq!(v.iter().collect::<String>(), "--++");
	let mut next = 'a';
	v.resize_with(6, || {
		let current = next;
		next = 'b';
		current
	});
	assert_eq!(v.iter().collect::<String>(), "--++ab");
	v.truncate(1);
	assert_eq!(v.len(), 1);
	v.clear();
	assert!(v.is_empty());
}

#[test]
fn retain_and_dedup() {
	let mut v: MovingVec<u32> = [1, 1, 2, 3, 3, 3, 4, 5, 5].into();
	v.dedup();
	assert_eq!(Vec::from(v.clone()), [1, 2, 3, 4, 5]);
	v.retain(|n| n % 2 == 1);
	assert_eq!(Vec::from(v.clone()), [1, 3, 5]);
	assert!(v.contains(&3));
	assert!(!v.contains(&4));
}

#[test]
fn iterators() {
	let mut v: MovingVec<i32> = (1..=4).collect();
	for value in &mut v {
		*value *= 2;
	}
	assert_eq!(v.iter().rev().copied().collect::<Vec<_>>(), [8, 6, 4, 2]);
	assert_eq!(v.iter().len(), 4);
	assert_eq!((&v).into_iter().nth(2), Some(&6));
	assert_eq!(v.into_iter().rev().collect::<Vec<_>>(), [8, 6, 4, 2]);
}

#[test]
fn clone_is_deep() {
	let v: MovingVec<String> = ["a".to_owned()].into();
	let mut copy = v.clone();
	copy[0].push('b');
	assert_eq!(v[0], "a");
	assert_eq!(copy[0], "ab");
	assert!(!core::ptr::eq(&v[0], &copy[0]));
}

#[test]
fn indirect_view_exposes_handles() {
	let mut v: MovingVec<u16> = [3, 1, 2].into();
	let handle = v.indirect()[1].as_ptr();
	v.sort();
	assert_eq!(v.indirect()[0].as_ptr(), handle);
	assert!(v.indirect().iter().all(|slot| slot.is_some()));
	assert_eq!(format!("{v:?}"), "[1, 2, 3]");
}
