//! Load lifecycle of a single viewer instance.

use crate::error::LoadError;

/// Lifecycle of one load attempt.
///
/// Transitions: `Idle -> Loading` on mount, `Loading -> Loaded | Failed`
/// exactly once. `Loaded` and `Failed` are terminal; there is no retry
/// transition. A remount replaces the whole state with a fresh `Idle`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState<T> {
    #[default]
    Idle,
    Loading,
    Loaded(T),
    Failed(LoadError),
}

impl<T> LoadState<T> {
    /// `Idle -> Loading`. Returns `false` (leaving the state untouched) in
    /// any other state: at most one attempt is in flight per instance.
    pub fn begin(&mut self) -> bool {
        match self {
            LoadState::Idle => {
                *self = LoadState::Loading;
                true
            }
            _ => false,
        }
    }

    /// `Loading -> Loaded | Failed`. Returns `false` (leaving the state
    /// untouched) unless a load is actually in flight.
    pub fn finish(&mut self, result: Result<T, LoadError>) -> bool {
        if !matches!(self, LoadState::Loading) {
            return false;
        }
        *self = match result {
            Ok(value) => LoadState::Loaded(value),
            Err(error) => LoadState::Failed(error),
        };
        true
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, LoadState::Loaded(_) | LoadState::Failed(_))
    }

    #[inline]
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadState::Loaded(_))
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    /// Short tag for log lines.
    pub fn label(&self) -> &'static str {
        match self {
            LoadState::Idle => "idle",
            LoadState::Loading => "loading",
            LoadState::Loaded(_) => "loaded",
            LoadState::Failed(_) => "failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure() -> LoadError {
        LoadError::NetworkUnreachable {
            url: "/models/missing.glb".into(),
            reason: "no such file".into(),
        }
    }

    #[test]
    fn begins_only_from_idle() {
        let mut state = LoadState::<u32>::Idle;
        assert!(state.begin());
        assert_eq!(state, LoadState::Loading);
        assert!(!state.begin());
        assert_eq!(state, LoadState::Loading);
    }

    #[test]
    fn finishes_loading_into_loaded() {
        let mut state = LoadState::Idle;
        state.begin();
        assert!(state.finish(Ok(7)));
        assert_eq!(state, LoadState::Loaded(7));
        assert!(state.is_terminal());
    }

    #[test]
    fn finishes_loading_into_failed() {
        let mut state = LoadState::<u32>::Idle;
        state.begin();
        assert!(state.finish(Err(failure())));
        assert!(matches!(state, LoadState::Failed(_)));
        assert!(state.is_terminal());
    }

    #[test]
    fn terminal_states_reject_further_transitions() {
        let mut state = LoadState::Idle;
        state.begin();
        state.finish(Ok(1));
        assert!(!state.finish(Ok(2)));
        assert!(!state.begin());
        assert_eq!(state.loaded(), Some(&1));
    }

    #[test]
    fn finish_without_begin_is_refused() {
        let mut state = LoadState::<u32>::Idle;
        assert!(!state.finish(Ok(1)));
        assert_eq!(state, LoadState::Idle);
    }
}
