//! Presence lifecycle integration tests
//!
//! Drives several simulated clients against shared registry and
//! broadcaster state and checks the presence traffic every subscriber
//! would observe.

mod tests {
    use opencircle::backend::ws::ServerEvent;
    use uuid::Uuid;

    use crate::common::fixtures::Harness;
    use crate::common::fakes::PresenceFlip;

    fn sorted(mut ids: Vec<Uuid>) -> Vec<Uuid> {
        ids.sort();
        ids
    }

    #[tokio::test]
    async fn test_two_joins_then_one_leave() {
        let harness = Harness::new();
        let mut events = harness.broadcaster.subscribe();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        let _alice_client = harness.join(alice).await;
        let mut bob_client = harness.join(bob).await;

        // Snapshots go out before the deltas that caused them
        assert_eq!(
            events.recv().await.unwrap(),
            ServerEvent::OnlineUsers(vec![alice])
        );
        assert_eq!(events.recv().await.unwrap(), ServerEvent::UserOnline(alice));
        match events.recv().await.unwrap() {
            ServerEvent::OnlineUsers(ids) => {
                assert_eq!(sorted(ids), sorted(vec![alice, bob]))
            }
            other => panic!("expected online-users snapshot, got {:?}", other),
        }
        assert_eq!(events.recv().await.unwrap(), ServerEvent::UserOnline(bob));

        bob_client.session.on_disconnect().await;

        assert_eq!(
            events.recv().await.unwrap(),
            ServerEvent::OnlineUsers(vec![alice])
        );
        assert_eq!(events.recv().await.unwrap(), ServerEvent::UserOffline(bob));
        assert_eq!(harness.registry.snapshot(), vec![alice]);
    }

    #[tokio::test]
    async fn test_second_device_takes_over_presence() {
        let harness = Harness::new();
        let user = Uuid::new_v4();

        let mut phone = harness.join(user).await;
        let mut laptop = harness.join(user).await;

        // Only one registration per user
        assert_eq!(harness.registry.online_count(), 1);

        // The superseded device closing changes nothing
        let mut events = harness.broadcaster.subscribe();
        phone.session.on_disconnect().await;
        assert_eq!(harness.registry.snapshot(), vec![user]);
        assert!(events.try_recv().is_err());

        // The live device closing takes the user offline
        laptop.session.on_disconnect().await;
        assert_eq!(harness.registry.online_count(), 0);
        assert_eq!(events.recv().await.unwrap(), ServerEvent::OnlineUsers(vec![]));
        assert_eq!(events.recv().await.unwrap(), ServerEvent::UserOffline(user));
    }

    #[tokio::test]
    async fn test_anonymous_connection_never_appears() {
        let harness = Harness::new();
        let mut events = harness.broadcaster.subscribe();

        let mut lurker = harness.connect();
        lurker.session.on_join("definitely-not-a-uuid").await;
        lurker.session.on_disconnect().await;

        assert_eq!(harness.registry.online_count(), 0);
        assert!(events.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_profile_flags_follow_the_lifecycle() {
        let harness = Harness::new();
        let user = Uuid::new_v4();

        let mut client = harness.join(user).await;
        client.session.on_disconnect().await;

        // Flag writes are spawned; let them run
        tokio::task::yield_now().await;
        tokio::task::yield_now().await;

        assert_eq!(
            harness.profiles.flips(),
            vec![PresenceFlip::Online(user), PresenceFlip::Offline(user)]
        );
    }
}
