use std::sync::atomic::{AtomicUsize, Ordering};

static SUPPRESSED: AtomicUsize = AtomicUsize::new(0);

/// Scoped suppression of per-attempt submission diagnostics.
///
/// A submission under retry can fail several times before it lands,
/// and a warning for every attempt drowns the log when many nodes are
/// in flight. The guard raises a process-wide suppression count and
/// lowers it again on drop, so the scope closes on every exit path,
/// the raised-error one included.
#[must_use = "diagnostics are only suppressed while the guard is alive"]
pub struct QuietAttempts(());

impl QuietAttempts {
    pub fn engage() -> Self {
        SUPPRESSED.fetch_add(1, Ordering::SeqCst);
        Self(())
    }
}

impl Drop for QuietAttempts {
    fn drop(&mut self) {
        SUPPRESSED.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Whether attempt-level diagnostics should be demoted to debug.
pub fn attempts_quiet() -> bool {
    SUPPRESSED.load(Ordering::SeqCst) > 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_suppresses_only_while_alive() {
        // Submission tests engage guards too; serialize with them.
        let _serial = crate::test_support::lock_env();
        assert!(!attempts_quiet());
        {
            let _outer = QuietAttempts::engage();
            assert!(attempts_quiet());
            {
                let _inner = QuietAttempts::engage();
                assert!(attempts_quiet());
            }
            // Nested scopes must not clear the outer one.
            assert!(attempts_quiet());
        }
        assert!(!attempts_quiet());
    }
}
