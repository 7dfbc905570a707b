//! Unsubscribe capability returned by every subscribe call

/// Handle that keeps one registration alive.
///
/// Dropping the handle, or calling [`Subscription::unsubscribe`], removes
/// exactly the registration it was created for. Releasing a registration the
/// owner already removed is a no-op.
#[must_use = "dropping a Subscription removes the registration immediately"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Wrap the closure that removes the registration
    pub(crate) fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Remove the registration now
    pub fn unsubscribe(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_release_runs_once() {
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        let sub = Subscription::new(move || c.set(c.get() + 1));

        sub.unsubscribe();
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_drop_releases() {
        let count = Rc::new(Cell::new(0));
        {
            let c = count.clone();
            let _sub = Subscription::new(move || c.set(c.get() + 1));
        }
        assert_eq!(count.get(), 1);
    }
}
