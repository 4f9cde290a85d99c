use value_ptr::ForwardList;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_test::wasm_bindgen_test as test;

#[test]
fn push_front_and_front() {
	let mut list = ForwardList::new();
	assert!(list.is_empty());
	list.push_front(2);
	list.push_front(1);
	assert_eq!(list.front(), Some(&1));
	*list.front_mut().expect("non-empty") = 0;
	assert_eq!(list.len(), 2);
	assert_eq!(list.pop_front(), Some(0));
	assert_eq!(list.pop_front(), Some(2));
	assert_eq!(list.pop_front(), None);
}

#[test]
fn assign_reverse_sort_compare() {
	let mut list: ForwardList<i32> = [1, 2, 3].into_iter().collect();
	list.reverse();
	assert_eq!(list, [3, 2, 1].into_iter().collect());

	list = [5, 1, 4, 1].into_iter().collect();
	list.sort();
	assert_eq!(list.iter().copied().collect::<Vec<_>>(), [1, 1, 4, 5]);
	assert!(list < [1, 2].into_iter().collect());
}

#[test]
fn sort_is_stable_and_relinks() {
	let mut list: ForwardList<(u8, char)> =
		[(2, 'a'), (1, 'b'), (2, 'c'), (1, 'd')].into_iter().collect();
	let addresses: Vec<*const (u8, char)> = list.iter().map(|entry| entry as *const _).collect();

	list.sort_by(|a, b| a.0.cmp(&b.0));
	assert_eq!(
		list.iter().map(|entry| entry.1).collect::<String>(),
		"bdac"
	);
	let sorted: Vec<*const (u8, char)> = list.iter().map(|entry| entry as *const _).collect();
	assert_eq!(sorted, [addresses[1], addresses[3], addresses[0], addresses[2]]);
}

#[test]
fn extend_appends_in_order() {
	let mut list: ForwardList<char> = "ab".chars().collect();
	list.extend("cd".chars());
	assert_eq!(list.iter().collect::<String>(), "abcd");
	assert_eq!(list.into_iter().collect::<String>(), "abcd");
}

#[test]
fn clone_is_deep() {
	let list: ForwardList<String> = ["x".to_owned()].into_iter().collect();
	let mut copy = list.clone();
	copy.iter_mut().for_each(|value| value.push('y'));
	assert_eq!(list.front().map(String::as_str), Some("x"));
	assert_eq!(copy.front().map(String::as_str), Some("xy"));
	assert_eq!(format!("{list:?}"), r#"["x"]"#);
}

#[test]
fn clear_empties() {
	let mut list: ForwardList<u8> = (0..10).collect();
	list.clear();
	assert!(list.is_empty());
	assert_eq!(list, ForwardList::default());
}

#[test]
fn nesting_changes_the_hash() {
	use std::{
		collections::hash_map::DefaultHasher,
		hash::{Hash, Hasher},
	};

	fn hash_of(list: &ForwardList<ForwardList<i32>>) -> u64 {
		let mut hasher = DefaultHasher::new();
		list.hash(&mut hasher);
		hasher.finish()
	}

	fn list(values: &[i32]) -> ForwardList<i32> {
		values.iter().copied().collect()
	}

	let split: ForwardList<_> = [list(&[1]), list(&[2])].into_iter().collect();
	let joined: ForwardList<_> = [list(&[1, 2])].into_iter().collect();
	assert_ne!(hash_of(&split), hash_of(&joined));
}
