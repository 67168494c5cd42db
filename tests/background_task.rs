//! Delegates stored in a shared slot and rebound from inside a call.

use std::cell::{Cell, RefCell};
use std::ptr::NonNull;

use tola_delegate::Delegate;

type BackgroundTask<'a> = Delegate<'a, fn()>;

#[derive(Default)]
struct Task<'a> {
    background: RefCell<BackgroundTask<'a>>,
}

impl<'a> Task<'a> {
    fn set_background_task(&self, task: BackgroundTask<'a>) {
        *self.background.borrow_mut() = task;
    }

    fn clear_background_task(&self) {
        self.background.borrow_mut().clear();
    }

    /// Runs a snapshot so the task may rebind or clear the slot.
    fn execute_background_task(&self) {
        let task = self.background.borrow().clone();
        task.call();
    }

    fn has_background_task(&self) -> bool {
        self.background.borrow().is_bound()
    }
}

thread_local! {
    static TASK0: Task<'static> = Task::default();
}

#[derive(Default)]
struct Class1 {
    n: Cell<i32>,
}

impl Class1 {
    fn test1(&self) {
        self.n.set(1);
    }

    fn test2(&self) {
        self.n.set(2);
        TASK0.with(Task::clear_background_task);
    }
}

#[derive(Default)]
struct Class2 {
    n: i32,
}

impl Class2 {
    fn step(task: BackgroundTask<'static>) {
        TASK0.with(|t| t.set_background_task(task));
    }

    fn step1(&mut self) {
        self.n = 1;
        // SAFETY: the instance is leaked by the test and only reached through TASK0.
        Self::step(unsafe { BackgroundTask::bind_raw(NonNull::from(self), Class2::step2) });
    }

    fn step2(&mut self) {
        self.n = 2;
    }

    fn start(this: NonNull<Class2>) {
        // SAFETY: as in `step1`.
        Self::step(unsafe { BackgroundTask::bind_raw(this, Class2::step1) });
    }
}

#[test]
fn test_local_task_keeps_callback() {
    let o = Class1::default();
    let task = Task::default();
    task.set_background_task(BackgroundTask::bind(&o, Class1::test1));

    assert!(task.has_background_task());
    assert_eq!(o.n.get(), 0);

    task.execute_background_task();
    assert!(task.has_background_task());
    assert_eq!(o.n.get(), 1);

    task.clear_background_task();
    assert!(!task.has_background_task());
    task.execute_background_task();
}

#[test]
fn test_task_clears_itself() {
    let o: &'static Class1 = Box::leak(Box::default());
    TASK0.with(|t| t.set_background_task(BackgroundTask::bind(o, Class1::test2)));

    assert!(TASK0.with(Task::has_background_task));
    assert_eq!(o.n.get(), 0);

    TASK0.with(Task::execute_background_task);
    assert_eq!(o.n.get(), 2);
    assert!(!TASK0.with(Task::has_background_task));
}

#[test]
fn test_chained_steps() {
    let o3 = NonNull::from(Box::leak(Box::new(Class2::default())));
    let n = || unsafe { o3.as_ref() }.n;

    Class2::start(o3);
    assert_eq!(n(), 0);

    TASK0.with(Task::execute_background_task);
    assert_eq!(n(), 1);

    TASK0.with(Task::execute_background_task);
    assert_eq!(n(), 2);

    // step2 does not rebind, so it stays current
    TASK0.with(Task::execute_background_task);
    assert_eq!(n(), 2);
    assert!(TASK0.with(Task::has_background_task));

    TASK0.with(Task::clear_background_task);
}
