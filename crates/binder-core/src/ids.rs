//! Monotonic identifier issuing.
//!
//! Identifiers are handed out by an explicit [`IdIssuer`] owned by whoever
//! needs them, never by process-wide state, so sequences stay deterministic
//! per owner.

use crate::{BinderError, BinderResult};

/// Issues strictly increasing `u64` identifiers starting at 1.
///
/// Every value up to and including `u64::MAX` can be issued once; after that
/// the issuer is exhausted and refuses further requests.
#[derive(Debug, Clone)]
pub struct IdIssuer {
    next: Option<u64>,
}

fn exhausted() -> BinderError {
    BinderError::Validation("identifier space exhausted".to_string())
}

impl IdIssuer {
    pub fn new() -> Self {
        Self { next: Some(1) }
    }

    /// Start issuing at `first`. Zero is bumped to 1.
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: Some(first.max(1)),
        }
    }

    /// Allocate the next identifier.
    pub fn next_id(&mut self) -> BinderResult<u64> {
        let id = self.next.ok_or_else(exhausted)?;
        self.next = id.checked_add(1);
        Ok(id)
    }

    /// The identifier the next call to [`IdIssuer::next_id`] will return,
    /// `None` once exhausted.
    pub fn peek(&self) -> Option<u64> {
        self.next
    }

    /// Make sure every identifier issued from now on is greater than `max`.
    /// Fails without moving the issuer when nothing can follow `max`.
    pub fn reserve_through(&mut self, max: u64) -> BinderResult<()> {
        let after = max.checked_add(1).ok_or_else(exhausted)?;
        if matches!(self.next, Some(next) if next <= max) {
            self.next = Some(after);
        }
        Ok(())
    }
}

impl Default for IdIssuer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issues_increasing_ids_from_one() {
        let mut issuer = IdIssuer::new();
        assert_eq!(issuer.next_id().unwrap(), 1);
        assert_eq!(issuer.next_id().unwrap(), 2);
        assert_eq!(issuer.peek(), Some(3));
    }

    #[test]
    fn test_starting_at_zero_is_bumped() {
        let mut issuer = IdIssuer::starting_at(0);
        assert_eq!(issuer.next_id().unwrap(), 1);
    }

    #[test]
    fn test_reserve_through_skips_past_max() {
        let mut issuer = IdIssuer::new();
        issuer.reserve_through(41).unwrap();
        assert_eq!(issuer.next_id().unwrap(), 42);

        // Never moves backwards
        issuer.reserve_through(10).unwrap();
        assert_eq!(issuer.next_id().unwrap(), 43);
    }

    #[test]
    fn test_reserve_through_max_value_is_refused() {
        let mut issuer = IdIssuer::new();
        let err = issuer.reserve_through(u64::MAX).unwrap_err();
        assert!(matches!(err, BinderError::Validation(_)));
        assert_eq!(issuer.peek(), Some(1));
    }

    #[test]
    fn test_last_identifier_is_issued_then_exhausted() {
        let mut issuer = IdIssuer::starting_at(u64::MAX - 1);
        assert_eq!(issuer.next_id().unwrap(), u64::MAX - 1);
        assert_eq!(issuer.next_id().unwrap(), u64::MAX);
        assert_eq!(issuer.peek(), None);
        assert!(issuer.next_id().is_err());
        assert!(issuer.next_id().is_err());
    }

    #[test]
    fn test_independent_issuers_do_not_share_state() {
        let mut a = IdIssuer::new();
        let mut b = IdIssuer::new();
        a.next_id().unwrap();
        a.next_id().unwrap();
        assert_eq!(b.next_id().unwrap(), 1);
    }
}
