//! Property-based tests for the presence registry
//!
//! Generates random register/unregister sequences and checks the
//! registry invariants hold after every interleaving.

use proptest::prelude::*;
use std::collections::HashMap;
use tokio::sync::mpsc;
use uuid::Uuid;

use opencircle::backend::presence::{ConnectionHandle, PresenceRegistry};

/// One step of a randomized presence history
#[derive(Debug, Clone)]
enum Op {
    /// Register user `user` with a fresh connection
    Join { user: u8 },
    /// Unregister whatever handle the `nth` join created
    Leave { nth: usize },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..8).prop_map(|user| Op::Join { user }),
        (0usize..32).prop_map(|nth| Op::Leave { nth }),
    ]
}

fn user_uuid(user: u8) -> Uuid {
    Uuid::from_u128(user as u128 + 1)
}

proptest! {
    /// The registry always agrees with a naive model: one entry per
    /// user, owned by that user's most recent join.
    #[test]
    fn test_registry_matches_model(ops in proptest::collection::vec(op_strategy(), 1..40)) {
        let registry = PresenceRegistry::new();
        let mut handles: Vec<(u8, ConnectionHandle)> = Vec::new();
        // user -> connection id of the winning registration
        let mut model: HashMap<u8, Uuid> = HashMap::new();

        for op in ops {
            match op {
                Op::Join { user } => {
                    let (tx, _rx) = mpsc::unbounded_channel();
                    let handle = ConnectionHandle::new(tx);
                    registry.register(user_uuid(user), handle.clone());
                    model.insert(user, handle.id());
                    handles.push((user, handle));
                }
                Op::Leave { nth } => {
                    if let Some((user, handle)) = handles.get(nth) {
                        let removed = registry.unregister_by_handle(handle.id());
                        // Only the current registration may be removed
                        if model.get(user) == Some(&handle.id()) {
                            prop_assert_eq!(removed, Some(user_uuid(*user)));
                            model.remove(user);
                        } else {
                            prop_assert_eq!(removed, None);
                        }
                    }
                }
            }
        }

        let mut snapshot = registry.snapshot();
        snapshot.sort();
        let mut expected: Vec<Uuid> = model.keys().map(|u| user_uuid(*u)).collect();
        expected.sort();
        prop_assert_eq!(snapshot, expected);
        prop_assert_eq!(registry.online_count(), model.len());
    }

    /// Unregistering a handle twice is a no-op the second time.
    #[test]
    fn test_unregister_is_idempotent(user in 0u8..8) {
        let registry = PresenceRegistry::new();
        let (tx, _rx) = mpsc::unbounded_channel();
        let handle = ConnectionHandle::new(tx);

        registry.register(user_uuid(user), handle.clone());
        prop_assert_eq!(registry.unregister_by_handle(handle.id()), Some(user_uuid(user)));
        prop_assert_eq!(registry.unregister_by_handle(handle.id()), None);
        prop_assert_eq!(registry.online_count(), 0);
    }
}
