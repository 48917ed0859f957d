use std::mem::take;


/// Handle of a registered listener.
///
/// The listener is removed when [`unsubscribe`](Self::unsubscribe) is called or when the
/// handle is dropped, whichever comes first.
#[derive(Default)]
#[must_use]
pub struct Subscription(RawSubscription);

impl Subscription {
    pub fn empty() -> Self {
        Subscription(RawSubscription::Empty)
    }
    pub fn from_fn(f: impl FnOnce() + 'static) -> Self {
        Subscription(RawSubscription::Fn(Box::new(f)))
    }

    /// Removes the listener. Calling this again has no effect.
    pub fn unsubscribe(&mut self) {
        match take(&mut self.0) {
            RawSubscription::Empty => {}
            RawSubscription::Fn(f) => f(),
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.0, RawSubscription::Empty)
    }
}
impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}
impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("is_active", &self.is_active())
            .finish()
    }
}

#[derive(Default)]
enum RawSubscription {
    #[default]
    Empty,
    Fn(Box<dyn FnOnce() + 'static>),
}
