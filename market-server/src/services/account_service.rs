//! Account Status Service
//!
//! Tracks which buyers currently have outstanding invoices. The checkout
//! gate consults this on every confirmation attempt; results are never
//! cached by callers, so a flag raised by another session takes effect on
//! the very next attempt.

use parking_lot::RwLock;
use std::collections::HashSet;

#[derive(Default)]
pub struct AccountService {
    outstanding: RwLock<HashSet<String>>,
}

impl std::fmt::Debug for AccountService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountService")
            .field("restricted", &self.outstanding.read().len())
            .finish()
    }
}

impl AccountService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the buyer has outstanding invoices blocking confirmation
    pub fn has_outstanding_invoices(&self, buyer_id: &str) -> bool {
        self.outstanding.read().contains(buyer_id)
    }

    /// Raise or clear the outstanding-invoices flag for a buyer
    pub fn set_outstanding(&self, buyer_id: &str, outstanding: bool) {
        let mut set = self.outstanding.write();
        if outstanding {
            set.insert(buyer_id.to_string());
        } else {
            set.remove(buyer_id);
        }
        tracing::info!(buyer_id, outstanding, "account flag updated");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_round_trip() {
        let accounts = AccountService::new();
        assert!(!accounts.has_outstanding_invoices("buyer-1"));

        accounts.set_outstanding("buyer-1", true);
        assert!(accounts.has_outstanding_invoices("buyer-1"));

        accounts.set_outstanding("buyer-1", false);
        assert!(!accounts.has_outstanding_invoices("buyer-1"));
    }
}
