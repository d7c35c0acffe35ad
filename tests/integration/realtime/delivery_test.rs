//! Message delivery integration tests
//!
//! The send-message path: persist first, then forward to the
//! receiver's live connection only.

mod tests {
    use opencircle::backend::chat::MessageStore;
    use opencircle::backend::ws::ServerEvent;
    use uuid::Uuid;

    use crate::common::fixtures::Harness;

    #[tokio::test]
    async fn test_message_reaches_online_receiver() {
        let harness = Harness::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        let mut alice_client = harness.join(alice).await;
        let mut bob_client = harness.join(bob).await;

        alice_client
            .session
            .on_send(&alice.to_string(), &bob.to_string(), "hi bob")
            .await;

        let stored = harness.messages.stored();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].sender_id, alice);
        assert_eq!(stored[0].receiver_id, bob);
        assert_eq!(stored[0].text, "hi bob");

        // Bob's queue holds exactly the persisted message; the sender
        // gets no echo
        assert_eq!(
            bob_client.drain(),
            vec![ServerEvent::ReceiveMessage(stored[0].clone())]
        );
        assert!(alice_client.drain().is_empty());
    }

    #[tokio::test]
    async fn test_message_to_offline_receiver_is_stored_only() {
        let harness = Harness::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        let mut alice_client = harness.join(alice).await;

        alice_client
            .session
            .on_send(&alice.to_string(), &bob.to_string(), "see you later")
            .await;

        assert_eq!(harness.messages.len(), 1);

        // Bob finds it in history when he loads the conversation
        let history = harness
            .messages
            .query_conversation(bob, alice)
            .await
            .unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].text, "see you later");
    }

    #[tokio::test]
    async fn test_receiver_disconnecting_before_send_gets_nothing() {
        let harness = Harness::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        let mut alice_client = harness.join(alice).await;
        let mut bob_client = harness.join(bob).await;
        bob_client.session.on_disconnect().await;

        alice_client
            .session
            .on_send(&alice.to_string(), &bob.to_string(), "too late")
            .await;

        // Stored, but never queued for the closed connection
        assert_eq!(harness.messages.len(), 1);
        assert!(bob_client
            .drain()
            .iter()
            .all(|e| !matches!(e, ServerEvent::ReceiveMessage(_))));
    }

    #[tokio::test]
    async fn test_blank_and_malformed_sends_are_dropped() {
        let harness = Harness::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        let mut alice_client = harness.join(alice).await;

        alice_client
            .session
            .on_send(&alice.to_string(), &bob.to_string(), "   ")
            .await;
        alice_client
            .session
            .on_send("nonsense", &bob.to_string(), "hello")
            .await;

        assert!(harness.messages.is_empty());
    }

    #[tokio::test]
    async fn test_conversation_order_is_append_order() {
        let harness = Harness::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        let mut alice_client = harness.join(alice).await;
        let mut bob_client = harness.join(bob).await;

        alice_client
            .session
            .on_send(&alice.to_string(), &bob.to_string(), "one")
            .await;
        bob_client
            .session
            .on_send(&bob.to_string(), &alice.to_string(), "two")
            .await;
        alice_client
            .session
            .on_send(&alice.to_string(), &bob.to_string(), "three")
            .await;

        let history = harness
            .messages
            .query_conversation(alice, bob)
            .await
            .unwrap();
        let texts: Vec<&str> = history.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["one", "two", "three"]);
    }
}
