use crate::chat_harness::{ChatHarness, MODEL};
use nate::{CannedClient, ConversationStore, Fingerprint, Message, Role};

const HELLO_FINGERPRINT: &str = "28412054dbea0b6cc891a45baefdb8131cba136c";

#[tokio::test]
async fn fresh_run_fingerprints_leading_user_turn() {
    let harness = ChatHarness::new();
    let expected = Fingerprint::parse(HELLO_FINGERPRINT).unwrap();
    assert!(!harness.store().exists(&expected));

    let client = CannedClient::with_replies(["Hi there."]);
    let outcome = harness
        .run(&harness.invocation("Hello"), &client)
        .await
        .unwrap();

    assert!(!outcome.cached);
    assert_eq!(outcome.fingerprint, expected);
    assert_eq!(outcome.reply, "Hi there.");
    assert_eq!(client.call_count(), 1);
    assert!(harness.store().exists(&expected));
    assert_eq!(harness.store().last_fingerprint().unwrap(), expected);
}

#[tokio::test]
async fn differently_cased_repeat_is_served_from_disk() {
    let harness = ChatHarness::new();
    let first = harness.ask("Hello", "Hi there.").await;

    let client = CannedClient::with_replies(["should not be used"]);
    let second = harness
        .run(&harness.invocation("hello"), &client)
        .await
        .unwrap();

    assert!(second.cached);
    assert_eq!(second.fingerprint, first.fingerprint);
    let saved = harness.saved(&first);
    let stored_reply = saved
        .iter()
        .rev()
        .find(|message| message.role == Role::Assistant)
        .map(|message| message.content.clone());
    assert_eq!(stored_reply.as_deref(), Some(second.reply.as_str()));
    assert_eq!(client.call_count(), 0);
}

#[tokio::test]
async fn cache_hit_leaves_store_untouched() {
    let harness = ChatHarness::new();
    harness.ask("Hello", "Hi there.").await;
    let before = harness.snapshot();

    let client = CannedClient::new();
    harness
        .run(&harness.invocation("HELLO"), &client)
        .await
        .unwrap();

    assert_eq!(harness.snapshot(), before);
}

#[tokio::test]
async fn system_prompt_is_part_of_the_identity() {
    let harness = ChatHarness::new();
    let bare = harness.ask("Hello", "plain").await;

    let mut with_prompt = harness.invocation("Hello");
    with_prompt.use_system_prompt = true;
    let client = CannedClient::with_replies(["prompted"]);
    let prompted = harness.run(&with_prompt, &client).await.unwrap();

    assert!(!prompted.cached);
    assert_ne!(prompted.fingerprint, bare.fingerprint);
    assert_eq!(
        client.requests()[0].messages,
        [Message::system("You are Nate."), Message::user("Hello")]
    );
}

#[tokio::test]
async fn records_are_namespaced_by_model() {
    let harness = ChatHarness::new();
    let first = harness.ask("Hello", "from gpt-x").await;

    let mut other_model = harness.invocation("Hello");
    other_model.model = "gpt-y".into();
    let client = CannedClient::with_replies(["from gpt-y"]);
    let outcome = harness.run(&other_model, &client).await.unwrap();

    assert!(!outcome.cached);
    assert_eq!(outcome.fingerprint, first.fingerprint);
    assert_eq!(client.call_count(), 1);
    let gpt_y = ConversationStore::new(harness.base(), "gpt-y");
    assert!(gpt_y.exists(&outcome.fingerprint));
    assert!(harness.store().exists(&first.fingerprint));
    assert_eq!(harness.saved(&first)[1].content, "from gpt-x");
}

#[tokio::test]
async fn saved_record_keeps_completion_metadata() {
    let harness = ChatHarness::new();
    let outcome = harness.ask("Hello", "Hi there.").await;

    let saved = harness.saved(&outcome);

    assert_eq!(saved.len(), 2);
    assert_eq!(saved[0], Message::user("Hello"));
    let completion = saved[1].completion.as_ref().expect("completion metadata");
    assert_eq!(completion["id"], "canned-1");
    assert_eq!(completion["model"], MODEL);
    let transcript = std::fs::read_to_string(
        harness
            .store()
            .conversation_dir(&outcome.fingerprint)
            .join("conversation.md"),
    )
    .unwrap();
    assert_eq!(
        transcript,
        "**User**:\nHello\n**Assistant**:\nHi there.\n\n"
    );
}
