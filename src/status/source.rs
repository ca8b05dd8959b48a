use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

/// Signal names emitted by the lifecycle sources the registry subscribes to.
pub mod signals {
    /// Generic client pair used by consumers, producers, and the admin client.
    pub const CONNECT: &str = "connect";
    pub const DISCONNECT: &str = "disconnect";

    /// Database driver signals. `open` and `reconnected` both normalise to a
    /// logical connect; the driver fires `disconnected` for every
    /// disconnection cause.
    pub const OPEN: &str = "open";
    pub const RECONNECTED: &str = "reconnected";
    pub const DISCONNECTED: &str = "disconnected";
}

pub type Listener = Arc<dyn Fn() + Send + Sync>;

/// Anything that emits named lifecycle signals. Concrete clients (Kafka
/// contexts, the database driver) are adapted onto this seam instead of
/// being bound to directly.
pub trait LifecycleSource {
    /// Registers `listener` to run on every emission of `signal`.
    fn subscribe(&self, signal: &str, listener: Listener);
}

/// In-process signal emitter backing the transport adapters.
#[derive(Clone, Default)]
pub struct LifecycleEmitter {
    listeners: Arc<RwLock<BTreeMap<String, Vec<Listener>>>>,
}

impl LifecycleEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invokes every listener subscribed to `signal`. The listener list is
    /// cloned out of the lock first so a listener may itself subscribe.
    pub fn emit(&self, signal: &str) {
        let ready: Vec<Listener> = {
            let guard = self.listeners.read().expect("lifecycle listeners poisoned");
            guard.get(signal).cloned().unwrap_or_default()
        };

        for listener in ready {
            listener();
        }
    }
}

impl LifecycleSource for LifecycleEmitter {
    fn subscribe(&self, signal: &str, listener: Listener) {
        let mut guard = self.listeners.write().expect("lifecycle listeners poisoned");
        guard.entry(signal.to_string()).or_default().push(listener);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn emit_runs_every_subscriber_for_the_signal() {
        let emitter = LifecycleEmitter::new();
        let hits = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let hits = Arc::clone(&hits);
            emitter.subscribe(
                signals::CONNECT,
                Arc::new(move || {
                    hits.fetch_add(1, Ordering::SeqCst);
                }),
            );
        }

        emitter.emit(signals::DISCONNECT);
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        emitter.emit(signals::CONNECT);
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn listener_may_subscribe_while_handling_a_signal() {
        let emitter = LifecycleEmitter::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let reentrant = emitter.clone();
        let inner_hits = Arc::clone(&hits);
        emitter.subscribe(
            signals::OPEN,
            Arc::new(move || {
                let inner_hits = Arc::clone(&inner_hits);
                reentrant.subscribe(
                    signals::RECONNECTED,
                    Arc::new(move || {
                        inner_hits.fetch_add(1, Ordering::SeqCst);
                    }),
                );
            }),
        );

        emitter.emit(signals::OPEN);
        emitter.emit(signals::RECONNECTED);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
