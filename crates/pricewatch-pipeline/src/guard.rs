use std::sync::atomic::{AtomicBool, Ordering};

/// In-process mutual exclusion for scrape runs.
///
/// Scheduled triggers are independent jobs; if one fires while the previous
/// run is still pacing through pages, [`RunGuard::try_acquire`] returns `None`
/// and the caller skips that trigger instead of running two scrapes side by side.
#[derive(Debug, Default)]
pub struct RunGuard {
    running: AtomicBool,
}

/// Held for the duration of a run; releases the [`RunGuard`] on drop.
#[derive(Debug)]
pub struct RunPermit<'a> {
    running: &'a AtomicBool,
}

impl RunGuard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the guard, or returns `None` if a run already holds it.
    #[must_use]
    pub fn try_acquire(&self) -> Option<RunPermit<'_>> {
        self.running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| RunPermit {
                running: &self.running,
            })
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}

impl Drop for RunPermit<'_> {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_acquire_fails_while_held() {
        let guard = RunGuard::new();
        let permit = guard.try_acquire();
        assert!(permit.is_some());
        assert!(guard.is_running());
        assert!(guard.try_acquire().is_none());
    }

    #[test]
    fn dropping_permit_releases_guard() {
        let guard = RunGuard::new();
        drop(guard.try_acquire());
        assert!(!guard.is_running());
        assert!(guard.try_acquire().is_some());
    }

    #[test]
    fn permit_released_on_early_return() {
        fn run(guard: &RunGuard, bail: bool) -> bool {
            let Some(_permit) = guard.try_acquire() else {
                return false;
            };
            if bail {
                return true;
            }
            true
        }

        let guard = RunGuard::new();
        assert!(run(&guard, true));
        assert!(run(&guard, false));
        assert!(!guard.is_running());
    }
}
