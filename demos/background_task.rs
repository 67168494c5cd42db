//! A worker that runs one background task per tick. Each step of a job
//! hands the slot to the next step from inside its own call.
//!
//! Run with: `cargo run --example background_task`

use std::cell::RefCell;
use std::ptr::NonNull;

use tola_delegate::{Delegate, Null};

type BackgroundTask = Delegate<'static, fn()>;

thread_local! {
    static SLOT: RefCell<BackgroundTask> = const { RefCell::new(BackgroundTask::empty()) };
}

fn schedule(task: BackgroundTask) {
    SLOT.with(|slot| *slot.borrow_mut() = task);
}

fn tick() -> bool {
    let task = SLOT.with(|slot| slot.borrow().clone());
    if task == Null {
        return false;
    }
    task.call();
    true
}

#[derive(Default)]
struct Download {
    received: usize,
    chunks: usize,
}

impl Download {
    fn connect(&mut self) {
        println!("connect");
        // SAFETY: `Download` is leaked in `main` and only reached through SLOT.
        schedule(unsafe { BackgroundTask::bind_raw(NonNull::from(self), Download::fetch) });
    }

    fn fetch(&mut self) {
        self.received += 512;
        self.chunks += 1;
        println!("fetch chunk {} ({} bytes)", self.chunks, self.received);
        if self.chunks == 3 {
            // SAFETY: as in `connect`.
            schedule(unsafe { BackgroundTask::bind_raw(NonNull::from(self), Download::finish) });
        }
    }

    fn finish(&mut self) {
        println!("done: {} bytes", self.received);
        schedule(Null.into());
    }
}

fn main() {
    let download = NonNull::from(Box::leak(Box::new(Download::default())));
    // SAFETY: `download` is leaked and never freed.
    schedule(unsafe { BackgroundTask::bind_raw(download, Download::connect) });

    let mut ticks = 0;
    while tick() {
        ticks += 1;
    }
    println!("idle after {ticks} ticks");
}
