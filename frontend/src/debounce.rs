use gloo_timers::callback::Timeout;

/// Source of delayed callbacks. The browser build uses [`GlooTimers`].
pub trait Schedule {
    type Handle;

    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Self::Handle;

    fn cancel(&self, handle: Self::Handle);
}

/// `setTimeout` through `gloo-timers`.
#[derive(Debug, Default, Clone, Copy)]
pub struct GlooTimers;

impl Schedule for GlooTimers {
    type Handle = Timeout;

    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(delay_ms, callback)
    }

    fn cancel(&self, handle: Timeout) {
        handle.cancel();
    }
}

/// Runs only the last of a burst of calls, `delay_ms` after it was made.
///
/// Scheduling cancels the pending call first. Dropping the debouncer with its
/// owning component cancels it too.
pub struct Debouncer<S: Schedule = GlooTimers> {
    delay_ms: u32,
    scheduler: S,
    pending: Option<S::Handle>,
}

impl Debouncer {
    pub fn new(delay_ms: u32) -> Self {
        Self::with_scheduler(delay_ms, GlooTimers)
    }
}

impl<S: Schedule> Debouncer<S> {
    pub fn with_scheduler(delay_ms: u32, scheduler: S) -> Self {
        Self {
            delay_ms,
            scheduler,
            pending: None,
        }
    }

    pub fn schedule<F>(&mut self, callback: F)
    where
        F: FnOnce() + 'static,
    {
        self.cancel();
        self.pending = Some(self.scheduler.schedule(self.delay_ms, Box::new(callback)));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
    }
}

impl<S: Schedule> Drop for Debouncer<S> {
    fn drop(&mut self) {
        self.cancel();
    }
}
