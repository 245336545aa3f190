//! Railway-oriented outcome type.
//!
//! [`Outcome`] is the crate's representation of a fallible computation's
//! result: a success carrying a value, or a failure carrying an error.
//! Errors travel as values through the combinators below; the only place a
//! failure re-enters panic-based control flow is [`Outcome::unwrap`].

/// Result of a fallible computation.
///
/// Exactly one variant is populated and the contents are immutable once
/// constructed. Chains of dependent steps are built with
/// [`Outcome::and_then`]: a `Failure` flows through every later combinator
/// untouched, while a `Success` carries its value forward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<V, E> {
    /// The computation produced a value.
    Success(V),
    /// The computation failed with an error.
    Failure(E),
}

/// Construct a success outcome.
pub fn ok<V, E>(value: V) -> Outcome<V, E> {
    Outcome::Success(value)
}

/// Construct a failure outcome.
pub fn err<V, E>(error: E) -> Outcome<V, E> {
    Outcome::Failure(error)
}

impl<V, E> Outcome<V, E> {
    /// Whether this outcome is a success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Whether this outcome is a failure.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// Transform the success value, leaving a failure untouched.
    ///
    /// `f` is not invoked on a failure.
    #[must_use]
    pub fn map<V2>(self, f: impl FnOnce(V) -> V2) -> Outcome<V2, E> {
        match self {
            Self::Success(value) => Outcome::Success(f(value)),
            Self::Failure(error) => Outcome::Failure(error),
        }
    }

    /// Transform the failure error, leaving a success untouched.
    ///
    /// Dual of [`Outcome::map`]; `f` is not invoked on a success.
    #[must_use]
    pub fn map_err<E2>(self, f: impl FnOnce(E) -> E2) -> Outcome<V, E2> {
        match self {
            Self::Success(value) => Outcome::Success(value),
            Self::Failure(error) => Outcome::Failure(f(error)),
        }
    }

    /// Chain a dependent fallible step.
    ///
    /// On success the value is handed to `f` and its outcome is returned
    /// directly, never nested. A failure skips `f` entirely.
    #[must_use]
    pub fn and_then<V2>(self, f: impl FnOnce(V) -> Outcome<V2, E>) -> Outcome<V2, E> {
        match self {
            Self::Success(value) => f(value),
            Self::Failure(error) => Outcome::Failure(error),
        }
    }

    /// Observe the success value without consuming it.
    ///
    /// Runs `f` only on a success and returns the outcome unchanged.
    /// Intended for logging, not transformation.
    #[must_use]
    pub fn tap(self, f: impl FnOnce(&V)) -> Self {
        if let Self::Success(value) = &self {
            f(value);
        }
        self
    }

    /// Observe the failure error without consuming it.
    #[must_use]
    pub fn tap_err(self, f: impl FnOnce(&E)) -> Self {
        if let Self::Failure(error) = &self {
            f(error);
        }
        self
    }

    /// The success value, or `default` on failure. Never panics.
    #[must_use]
    pub fn unwrap_or(self, default: V) -> V {
        match self {
            Self::Success(value) => value,
            Self::Failure(_) => default,
        }
    }

    /// The success value as an `Option`, discarding any error.
    #[must_use]
    pub fn success(self) -> Option<V> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(_) => None,
        }
    }

    /// The failure error as an `Option`, discarding any value.
    #[must_use]
    pub fn failure(self) -> Option<E> {
        match self {
            Self::Success(_) => None,
            Self::Failure(error) => Some(error),
        }
    }
}

impl<V, E: std::fmt::Debug> Outcome<V, E> {
    /// The success value.
    ///
    /// # Panics
    ///
    /// Panics carrying the stored error if called on a failure. This is
    /// the single point where a failure leaves value-based control flow;
    /// callers are expected to have branched on [`Outcome::is_failure`]
    /// first.
    #[must_use]
    pub fn unwrap(self) -> V {
        match self {
            Self::Success(value) => value,
            Self::Failure(error) => {
                panic!("called `Outcome::unwrap()` on a failure: {:?}", error)
            }
        }
    }
}

impl<V, E> From<Result<V, E>> for Outcome<V, E> {
    fn from(result: Result<V, E>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(error) => Self::Failure(error),
        }
    }
}

impl<V, E> From<Outcome<V, E>> for Result<V, E> {
    fn from(outcome: Outcome<V, E>) -> Self {
        match outcome {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure(error) => Err(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_transforms_success() {
        let outcome: Outcome<i32, String> = ok(2).map(|v| v * 10);
        assert_eq!(outcome, ok(20));
    }

    #[test]
    fn test_map_skips_failure() {
        let mut called = false;
        let outcome: Outcome<i32, &str> = err("boom").map(|v| {
            called = true;
            v
        });
        assert_eq!(outcome, err("boom"));
        assert!(!called);
    }

    #[test]
    fn test_map_err_transforms_failure() {
        let outcome: Outcome<i32, String> = err("boom".to_string()).map_err(|e| format!("{}!", e));
        assert_eq!(outcome, err("boom!".to_string()));
    }

    #[test]
    fn test_map_err_skips_success() {
        let outcome: Outcome<i32, String> = ok(1).map_err(|e: String| format!("{}!", e));
        assert_eq!(outcome, ok(1));
    }

    #[test]
    fn test_and_then_chains_success() {
        // Left identity: ok(v).and_then(f) == f(v)
        let f = |v: i32| -> Outcome<i32, &'static str> {
            if v > 0 {
                ok(v + 1)
            } else {
                err("non-positive")
            }
        };
        assert_eq!(ok(2).and_then(f), f(2));
        assert_eq!(ok(0).and_then(f), err("non-positive"));
    }

    #[test]
    fn test_and_then_skips_failure() {
        let mut called = false;
        let outcome: Outcome<i32, &str> = err("boom").and_then(|v| {
            called = true;
            ok(v)
        });
        assert_eq!(outcome, err("boom"));
        assert!(!called);
    }

    #[test]
    fn test_tap_runs_on_success_only() {
        let mut seen = None;
        let outcome: Outcome<i32, &str> = ok(5).tap(|v| seen = Some(*v));
        assert_eq!(outcome, ok(5));
        assert_eq!(seen, Some(5));

        let mut seen = None;
        let outcome: Outcome<i32, &str> = err("boom").tap(|v| seen = Some(*v));
        assert_eq!(outcome, err("boom"));
        assert_eq!(seen, None);
    }

    #[test]
    fn test_tap_err_runs_on_failure_only() {
        let mut seen = None;
        let outcome: Outcome<i32, &str> = err("boom").tap_err(|e| seen = Some(*e));
        assert_eq!(outcome, err("boom"));
        assert_eq!(seen, Some("boom"));

        let mut seen = None;
        let outcome: Outcome<i32, &str> = ok(5).tap_err(|e| seen = Some(*e));
        assert_eq!(outcome, ok(5));
        assert_eq!(seen, None);
    }

    #[test]
    fn test_unwrap_returns_success_value() {
        let outcome: Outcome<i32, &str> = ok(7);
        assert_eq!(outcome.unwrap(), 7);
    }

    #[test]
    #[should_panic(expected = "control missing")]
    fn test_unwrap_panics_with_stored_error() {
        let outcome: Outcome<i32, &str> = err("control missing");
        let _ = outcome.unwrap();
    }

    #[test]
    fn test_unwrap_or_never_panics() {
        let outcome: Outcome<i32, &str> = ok(7);
        assert_eq!(outcome.unwrap_or(0), 7);

        let outcome: Outcome<i32, &str> = err("boom");
        assert_eq!(outcome.unwrap_or(0), 0);
    }

    #[test]
    fn test_variant_tests() {
        let success: Outcome<i32, &str> = ok(1);
        assert!(success.is_success());
        assert!(!success.is_failure());

        let failure: Outcome<i32, &str> = err("boom");
        assert!(failure.is_failure());
        assert!(!failure.is_success());
    }

    #[test]
    fn test_option_accessors() {
        let success: Outcome<i32, &str> = ok(1);
        assert_eq!(success.clone().success(), Some(1));
        assert_eq!(success.failure(), None);

        let failure: Outcome<i32, &str> = err("boom");
        assert_eq!(failure.clone().success(), None);
        assert_eq!(failure.failure(), Some("boom"));
    }

    #[test]
    fn test_result_conversions() {
        let outcome: Outcome<i32, &str> = Ok::<_, &str>(3).into();
        assert_eq!(outcome, ok(3));

        let outcome: Outcome<i32, &str> = Err::<i32, _>("boom").into();
        assert_eq!(outcome, err("boom"));

        let result: Result<i32, &str> = ok::<_, &str>(3).into();
        assert_eq!(result, Ok(3));

        let result: Result<i32, &str> = err::<i32, _>("boom").into();
        assert_eq!(result, Err("boom"));
    }
}
