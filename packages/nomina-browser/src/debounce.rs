use std::{future::Future, sync::Mutex, time::Duration};

use tokio::task::JoinHandle;

/// Runs only the most recently scheduled task, once its quiet period has elapsed.
///
/// Scheduling again before the delay is over aborts the previous task. Requires a tokio runtime.
#[derive(Debug, Default)]
pub struct Debouncer {
	pending: Mutex<Option<JoinHandle<()>>>,
}
impl Debouncer {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn schedule<F>(&self, delay: Duration, task: F)
	where
		F: Future<Output = ()> + Send + 'static,
	{
		// Spawn under the lock so concurrent callers cannot swap handles out of order.
		let mut pending = self.pending.lock().unwrap_or_else(|err| err.into_inner());

		if let Some(previous) = pending.take() {
			previous.abort();
		}

		*pending = Some(tokio::spawn(async move {
			tokio::time::sleep(delay).await;
			task.await;
		}));
	}

	/// Returns whether a task was still waiting.
	pub fn cancel(&self) -> bool {
		let previous = self.pending.lock().unwrap_or_else(|err| err.into_inner()).take();

		match previous {
			Some(handle) if !handle.is_finished() => {
				handle.abort();

				true
			},
			_ => false,
		}
	}

	pub fn is_pending(&self) -> bool {
		self.pending
			.lock()
			.unwrap_or_else(|err| err.into_inner())
			.as_ref()
			.map(|handle| !handle.is_finished())
			.unwrap_or(false)
	}

	/// Waits for the scheduled task, if any, to run to completion.
	pub async fn settle(&self) {
		let pending = self.pending.lock().unwrap_or_else(|err| err.into_inner()).take();

		if let Some(handle) = pending {
			let _ = handle.await;
		}
	}
}
impl Drop for Debouncer {
	fn drop(&mut self) {
		let pending = self.pending.get_mut().unwrap_or_else(|err| err.into_inner());

		if let Some(handle) = pending.take() {
			handle.abort();
		}
	}
}

#[cfg(test)]
mod tests {
	use std::sync::{
		Arc,
		atomic::{AtomicUsize, Ordering},
	};

	use super::*;

	#[tokio::test(start_paused = true)]
	async fn only_last_scheduled_task_runs() {
		let debouncer = Debouncer::new();
		let fired = Arc::new(Mutex::new(Vec::new()));

		for value in 1..=3 {
			let fired = fired.clone();

			debouncer.schedule(Duration::from_millis(500), async move {
				fired.lock().unwrap_or_else(|err| err.into_inner()).push(value);
			});
			tokio::time::sleep(Duration::from_millis(200)).await;
		}

		assert!(fired.lock().unwrap_or_else(|err| err.into_inner()).is_empty());

		tokio::time::sleep(Duration::from_millis(400)).await;

		assert_eq!(*fired.lock().unwrap_or_else(|err| err.into_inner()), vec![3]);
	}

	#[tokio::test(start_paused = true)]
	async fn cancel_discards_pending_task() {
		let debouncer = Debouncer::new();
		let count = Arc::new(AtomicUsize::new(0));
		let counter = count.clone();

		debouncer.schedule(Duration::from_millis(500), async move {
			counter.fetch_add(1, Ordering::SeqCst);
		});

		assert!(debouncer.is_pending());
		assert!(debouncer.cancel());

		tokio::time::sleep(Duration::from_millis(1_000)).await;

		assert_eq!(count.load(Ordering::SeqCst), 0);
		assert!(!debouncer.is_pending());
	}

	#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
	async fn concurrent_schedules_leave_exactly_one_task() {
		let debouncer = Arc::new(Debouncer::new());
		let count = Arc::new(AtomicUsize::new(0));
		let callers: Vec<_> = (0..8)
			.map(|_| {
				let debouncer = debouncer.clone();
				let count = count.clone();

				tokio::spawn(async move {
					for _ in 0..50 {
						let count = count.clone();

						debouncer.schedule(Duration::from_millis(500), async move {
							count.fetch_add(1, Ordering::SeqCst);
						});
					}
				})
			})
			.collect();

		for caller in callers {
			caller.await.expect("caller panicked");
		}

		debouncer.settle().await;

		assert_eq!(count.load(Ordering::SeqCst), 1);
		assert!(!debouncer.is_pending());
	}
}
