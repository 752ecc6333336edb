//! Lazy, shareable access to the one inference session.
//!
//! The cache is an explicit object handed to callers, not a module-level
//! global, with a loader seam so tests can observe load counts or
//! simulate failure.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::ModelConfig;
use crate::error::PipelineError;
use crate::session::ClassifierSession;

/// Source of sessions for a [`SessionProvider`].
pub trait SessionLoader {
    type Session: Send + Sync;

    /// Perform the (potentially slow) load. Called at most once on the
    /// success path; called again only if every previous attempt failed.
    fn load(&self) -> Result<Self::Session, PipelineError>;
}

/// Loads [`ClassifierSession`]s from an ONNX artifact on disk.
#[derive(Debug, Clone)]
pub struct OnnxSessionLoader {
    config: ModelConfig,
}

impl OnnxSessionLoader {
    pub fn new(config: ModelConfig) -> Self {
        OnnxSessionLoader { config }
    }
}

impl SessionLoader for OnnxSessionLoader {
    type Session = ClassifierSession;

    fn load(&self) -> Result<ClassifierSession, PipelineError> {
        ClassifierSession::load(&self.config)
    }
}

/// Lazily-initialized, thread-safe holder of the one session.
///
/// `Unloaded -> Loading -> Ready`: the first `get` performs the load while
/// holding the slot lock, so concurrent callers block and then share the
/// same `Arc`ed instance. The load runs at most once on the success path,
/// and there is no `Ready -> Unloaded` transition. A failed load leaves
/// the provider `Unloaded` and hands the error to the caller.
pub struct SessionProvider<L: SessionLoader> {
    loader: L,
    slot: Mutex<Option<Arc<L::Session>>>,
}

impl<L: SessionLoader> SessionProvider<L> {
    pub fn new(loader: L) -> Self {
        SessionProvider { loader, slot: Mutex::new(None) }
    }

    /// The session, loading it on first call.
    pub fn get(&self) -> Result<Arc<L::Session>, PipelineError> {
        let mut slot = self.slot.lock();
        if let Some(session) = slot.as_ref() {
            return Ok(session.clone());
        }
        let session = Arc::new(self.loader.load()?);
        *slot = Some(session.clone());
        Ok(session)
    }

    /// Whether the session is already loaded.
    pub fn is_ready(&self) -> bool {
        self.slot.lock().is_some()
    }
}

/// Provider over the default on-disk ONNX loader.
pub type OnnxSessionProvider = SessionProvider<OnnxSessionLoader>;

impl OnnxSessionProvider {
    /// Provider for the artifact described by `config`.
    pub fn for_config(config: ModelConfig) -> Self {
        SessionProvider::new(OnnxSessionLoader::new(config))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingLoader {
        loads: AtomicUsize,
        fail_first: AtomicUsize,
    }

    impl CountingLoader {
        fn new() -> Self {
            CountingLoader { loads: AtomicUsize::new(0), fail_first: AtomicUsize::new(0) }
        }

        fn failing_first(n: usize) -> Self {
            CountingLoader { loads: AtomicUsize::new(0), fail_first: AtomicUsize::new(n) }
        }

        fn loads(&self) -> usize {
            self.loads.load(Ordering::SeqCst)
        }
    }

    impl SessionLoader for &CountingLoader {
        type Session = usize;

        fn load(&self) -> Result<usize, PipelineError> {
            let n = self.loads.fetch_add(1, Ordering::SeqCst);
            if n < self.fail_first.load(Ordering::SeqCst) {
                return Err(PipelineError::model_load("missing.onnx", "simulated load failure"));
            }
            Ok(n)
        }
    }

    #[test]
    fn sequential_gets_share_one_load() {
        let loader = CountingLoader::new();
        let provider = SessionProvider::new(&loader);
        assert!(!provider.is_ready());

        let first = provider.get().unwrap();
        let second = provider.get().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(loader.loads(), 1);
        assert!(provider.is_ready());
    }

    #[test]
    fn concurrent_gets_share_one_load() {
        let loader = CountingLoader::new();
        let provider = SessionProvider::new(&loader);

        std::thread::scope(|scope| {
            let handles: Vec<_> =
                (0..8).map(|_| scope.spawn(|| provider.get().unwrap())).collect();
            let sessions: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
            for pair in sessions.windows(2) {
                assert!(Arc::ptr_eq(&pair[0], &pair[1]));
            }
        });
        assert_eq!(loader.loads(), 1);
    }

    #[test]
    fn a_failed_load_propagates_and_leaves_the_provider_unloaded() {
        let loader = CountingLoader::failing_first(1);
        let provider = SessionProvider::new(&loader);

        let err = provider.get().unwrap_err();
        assert!(matches!(err, PipelineError::ModelLoad { .. }));
        assert!(!provider.is_ready());

        // the artifact "appeared"; the next call loads it
        let session = provider.get().unwrap();
        assert_eq!(*session, 1);
        assert_eq!(loader.loads(), 2);
    }
}
