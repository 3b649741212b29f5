use std::cmp::Ordering;
use std::fmt;

/// Lifecycle state of a distress signal, derived from the two wire flags.
/// Completion dominates acknowledgement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalStatus {
    Pending,
    Acknowledged,
    Completed,
}

impl SignalStatus {
    /// Total over all four flag combinations; no pair is invalid.
    pub fn derive(is_acknowledged: bool, is_completed: bool) -> Self {
        if is_completed {
            SignalStatus::Completed
        } else if is_acknowledged {
            SignalStatus::Acknowledged
        } else {
            SignalStatus::Pending
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SignalStatus::Pending => "Pending",
            SignalStatus::Acknowledged => "Acknowledged",
            SignalStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for SignalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Table-sort comparator: lexicographic on the label, not severity order.
/// "Acknowledged" < "Completed" < "Pending".
pub fn compare_labels(a: SignalStatus, b: SignalStatus) -> Ordering {
    a.as_str().cmp(b.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derivation_is_total_over_flag_pairs() {
        assert_eq!(SignalStatus::derive(false, false), SignalStatus::Pending);
        assert_eq!(
            SignalStatus::derive(true, false),
            SignalStatus::Acknowledged
        );
        assert_eq!(SignalStatus::derive(false, true), SignalStatus::Completed);
        assert_eq!(SignalStatus::derive(true, true), SignalStatus::Completed);
    }

    #[test]
    fn completion_dominates_acknowledgement() {
        assert_eq!(SignalStatus::derive(true, true), SignalStatus::Completed);
        assert_ne!(SignalStatus::derive(true, true), SignalStatus::Acknowledged);
    }

    #[test]
    fn derivation_is_idempotent() {
        for acknowledged in [false, true] {
            for completed in [false, true] {
                assert_eq!(
                    SignalStatus::derive(acknowledged, completed),
                    SignalStatus::derive(acknowledged, completed)
                );
            }
        }
    }

    #[test]
    fn label_order_is_string_based_not_semantic() {
        assert_eq!(
            compare_labels(SignalStatus::Acknowledged, SignalStatus::Completed),
            Ordering::Less
        );
        assert_eq!(
            compare_labels(SignalStatus::Completed, SignalStatus::Pending),
            Ordering::Less
        );
        assert_eq!(
            compare_labels(SignalStatus::Pending, SignalStatus::Acknowledged),
            Ordering::Greater
        );
    }

    #[test]
    fn labels_match_wire_strings() {
        assert_eq!(SignalStatus::Pending.to_string(), "Pending");
        assert_eq!(SignalStatus::Acknowledged.to_string(), "Acknowledged");
        assert_eq!(SignalStatus::Completed.to_string(), "Completed");
    }
}
