//! Copy, move, drop and capacity behaviour shared by every signature.

use std::cell::{Cell, RefCell};
use std::mem::size_of;
use std::rc::Rc;

use tola_delegate::{Delegate, Null, DEFAULT_WORDS};

fn one() -> i32 {
    1
}

fn two() -> i32 {
    2
}

// =============================================================================
// 1. Copy and Drop
// =============================================================================

#[test]
fn test_captured_values_drop_once_per_copy() {
    let counter = Rc::new(());
    let cb = Delegate::<fn() -> usize>::new({
        let counter = counter.clone();
        move || Rc::strong_count(&counter)
    });
    assert_eq!(Rc::strong_count(&counter), 2);

    let copy = cb.clone();
    assert_eq!(Rc::strong_count(&counter), 3);

    drop(cb);
    assert_eq!(copy.call(), 2);

    drop(copy);
    assert_eq!(Rc::strong_count(&counter), 1);
}

#[test]
fn test_clone_has_independent_state() {
    let hits = Cell::new(0);
    let cb = Delegate::<fn() -> i32>::new(move || {
        hits.set(hits.get() + 1);
        hits.get()
    });
    assert_eq!(cb.call(), 1);
    assert_eq!(cb.call(), 2);

    let copy = cb.clone();
    assert_eq!(copy.call(), 3);
    assert_eq!(cb.call(), 3);
}

#[test]
fn test_owned_interior_mutability() {
    let log = RefCell::new(Vec::new());
    let cb = Delegate::<fn(u8) -> usize>::new(move |x| {
        log.borrow_mut().push(x);
        log.borrow().len()
    });
    assert_eq!(cb.call(1), 1);
    assert_eq!(cb.call(2), 2);
    assert_eq!(cb.clone().call(3), 3);
    assert_eq!(cb.call(4), 3);
}

#[test]
fn test_value_capture_is_fixed_at_construction() {
    let mut a = 6;
    let cb = Delegate::<fn() -> i32>::new(move || a);
    a = 10;
    assert_eq!(cb.call(), 6);
    assert_eq!(a, 10);
}

#[test]
fn test_clone_from() {
    let source = Delegate::<fn() -> i32>::from_fn(two);
    let mut target = Delegate::<fn() -> i32>::from_fn(one);
    target.clone_from(&source);
    assert_eq!(target.call(), 2);
    assert_eq!(source.call(), 2);

    target.clone_from(&Delegate::default());
    assert!(target == Null);
}

#[test]
fn test_clear_runs_destructor() {
    let counter = Rc::new(());
    let mut cb = Delegate::<fn()>::new({
        let counter = counter.clone();
        move || drop(counter.clone())
    });
    cb.call();
    assert_eq!(Rc::strong_count(&counter), 2);

    cb.clear();
    assert!(cb.is_empty());
    assert_eq!(Rc::strong_count(&counter), 1);
}

// =============================================================================
// 2. Moving Out
// =============================================================================

#[test]
fn test_take_leaves_empty() {
    let mut cb = Delegate::<fn() -> i32>::from_fn(one);
    let moved = cb.take();
    assert!(cb == Null);
    assert_eq!(cb.call(), 0);
    assert_eq!(moved.call(), 1);
}

#[test]
fn test_replace_returns_previous() {
    let mut cb = Delegate::<fn() -> i32>::from_fn(one);
    let old = cb.replace(Delegate::<fn() -> i32>::from_fn(two));
    assert_eq!(old.call(), 1);
    assert_eq!(cb.call(), 2);

    let old = cb.replace(Null.into());
    assert_eq!(old.call(), 2);
    assert!(cb.is_empty());
}

// =============================================================================
// 3. Capacity
// =============================================================================

#[test]
fn test_capacity() {
    assert_eq!(DEFAULT_WORDS, 4);
    assert_eq!(Delegate::<fn()>::CAPACITY, 4 * size_of::<usize>());
    assert_eq!(Delegate::<fn(), 16>::CAPACITY, 16 * size_of::<usize>());

    assert!(Delegate::<fn()>::fits::<[usize; 4]>());
    assert!(!Delegate::<fn()>::fits::<[usize; 5]>());
    assert!(Delegate::<fn(), 5>::fits::<[usize; 5]>());
}

#[test]
fn test_try_new_hands_back_oversized_closure() {
    let big = [1usize; 8];
    let err = Delegate::<fn() -> usize>::try_new(move || big.len()).unwrap_err();
    assert_eq!(err.size(), 8 * size_of::<usize>());
    assert_eq!(err.capacity(), Delegate::<fn() -> usize>::CAPACITY);
    assert!(err.to_string().contains("exceeds"));

    let cb = Delegate::<fn() -> usize, 16>::try_new(err.into_inner()).unwrap();
    assert_eq!(cb.call(), 8);
}

#[test]
fn test_try_new_rejects_over_aligned_captures() {
    #[derive(Clone, Copy)]
    #[repr(align(32))]
    struct Aligned(u8);

    let value = Aligned(7);
    let err = Delegate::<fn() -> u8, 64>::try_new(move || {
        let v = value;
        v.0
    })
    .unwrap_err();
    assert_eq!(err.align(), 32);
    assert!(err.size() <= err.capacity());
}

#[test]
fn test_u128_capture_fits() {
    let x: u128 = u128::MAX - 1;
    let cb = Delegate::<fn() -> u128>::new(move || x);
    assert_eq!(cb.call(), u128::MAX - 1);
    assert!(Delegate::<fn()>::fits::<u128>());

    let y: i128 = -5;
    let cb = Delegate::<fn() -> i128>::try_new(move || y).unwrap();
    assert_eq!(cb.clone().call(), -5);
}

#[test]
fn test_zero_sized_closure_needs_no_storage() {
    let cb = Delegate::<fn() -> u8, 0>::new(|| 7);
    assert_eq!(Delegate::<fn() -> u8, 0>::CAPACITY, 0);
    assert_eq!(cb.call(), 7);
    assert_eq!(cb.clone().call(), 7);
}

#[test]
fn test_single_word_holds_fn_pointer() {
    let cb = Delegate::<fn() -> i32, 1>::from_fn(two);
    assert_eq!(cb.call(), 2);
}

// =============================================================================
// 4. Calling
// =============================================================================

#[test]
fn test_call_with_tuple() {
    let cb = Delegate::<fn(i32, i32) -> i32>::from_fn(|a, b| a - b);
    assert_eq!(cb.call_with((42, 1)), 41);
    assert_eq!(cb.try_call_with((2, 1)), Some(1));

    let empty = Delegate::<fn(i32, i32) -> i32>::default();
    assert_eq!(empty.call_with((42, 1)), 0);
    assert_eq!(empty.try_call_with((42, 1)), None);
}

#[test]
fn test_eight_arguments() {
    let cb = Delegate::<fn(u8, u8, u8, u8, u8, u8, u8, u8) -> u32>::from_fn(
        |a, b, c, d, e, f, g, h| [a, b, c, d, e, f, g, h].iter().map(|&x| x as u32).sum(),
    );
    assert_eq!(cb.call(1, 2, 3, 4, 5, 6, 7, 8), 36);
}

#[test]
fn test_result_passes_through() {
    type Parse<'a> = Delegate<'a, fn(&'static str) -> Result<i32, std::num::ParseIntError>>;

    let parse = Parse::from_fn(|s| s.parse());
    assert_eq!(parse.try_call("12"), Some(Ok(12)));
    assert!(matches!(parse.try_call("x"), Some(Err(_))));
    assert_eq!(Parse::default().try_call("12"), None);
}

#[test]
#[should_panic(expected = "boom")]
fn test_panics_propagate() {
    let cb = Delegate::<fn()>::from_fn(|| panic!("boom"));
    cb.call();
}

#[test]
fn test_from_fn_pointer() {
    let cb: Delegate<'_, fn() -> i32> = (two as fn() -> i32).into();
    assert_eq!(cb.call(), 2);
}

// =============================================================================
// 5. Bound Instances
// =============================================================================

trait Shape {
    fn area(&self) -> u32;
}

struct Square(u32);

impl Shape for Square {
    fn area(&self) -> u32 {
        self.0 * self.0
    }
}

#[test]
fn test_bind_trait_object() {
    let square = Square(3);
    let shape: &dyn Shape = &square;
    let cb = Delegate::<fn() -> u32>::bind(shape, |s| s.area());
    assert_eq!(cb.call(), 9);
    assert_eq!(cb.clone().call(), 9);
}

#[test]
fn test_debug() {
    let empty = format!("{:?}", Delegate::<fn()>::default());
    assert!(empty.contains("bound: false"));

    let bound = format!("{:?}", Delegate::<fn()>::from_fn(|| {}));
    assert!(bound.contains("bound: true"));
}
