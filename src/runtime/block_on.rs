use super::RUNNING;

use core::future::Future;
use core::pin::pin;
use core::task::Waker;
use core::task::{Context, Poll};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::task::Wake;
use std::thread::{self, Thread};

/// Run a future to completion on the current thread.
///
/// The thread is parked whenever the future returns `Poll::Pending` and is
/// unparked by the future's waker, so a cursor may resolve its completion
/// synchronously, from a callback on another thread, or anywhere in between.
///
/// # Panics
///
/// Panics when called from inside another `block_on` on the same thread.
pub fn block_on<Fut>(fut: Fut) -> Fut::Output
where
    Fut: Future,
{
    let _entered = Entered::enter();

    // Pin the future so it can be polled
    let mut fut = pin!(fut);

    // Create a new context to be passed to the future.
    let waker_impl = Arc::new(ThreadWaker::new(thread::current()));
    let waker = Waker::from(Arc::clone(&waker_impl));
    let mut cx = Context::from_waker(&waker);

    // Either the future completes and we return, or a completion is still
    // outstanding and we sleep until it wakes us.
    loop {
        match fut.as_mut().poll(&mut cx) {
            Poll::Ready(res) => break res,
            Poll::Pending => {
                while !waker_impl.awake() {
                    thread::park();
                }
                waker_impl.set_awake(false);
            }
        }
    }
}

/// Marks the current thread as running `block_on` until dropped.
struct Entered;

impl Entered {
    fn enter() -> Self {
        if RUNNING.with(|running| running.replace(true)) {
            panic!("cannot cursor_iter::runtime::block_on inside an existing block_on!")
        }
        Entered
    }
}

impl Drop for Entered {
    fn drop(&mut self) {
        RUNNING.with(|running| running.set(false));
    }
}

struct ThreadWaker {
    awake: AtomicBool,
    thread: Thread,
}

impl ThreadWaker {
    fn new(thread: Thread) -> Self {
        Self {
            awake: AtomicBool::new(false),
            thread,
        }
    }

    #[inline]
    fn set_awake(&self, awake: bool) {
        self.awake.store(awake, Ordering::Release);
    }

    #[inline]
    fn awake(&self) -> bool {
        self.awake.load(Ordering::Acquire)
    }
}

impl Wake for ThreadWaker {
    fn wake(self: Arc<Self>) {
        self.wake_by_ref();
    }

    fn wake_by_ref(self: &Arc<Self>) {
        self.set_awake(true);
        self.thread.unpark();
    }
}
