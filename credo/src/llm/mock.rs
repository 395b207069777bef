//! Mock chat-completion client: canned reply, records what it was invoked with.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::message::Message;

use super::{LlmClient, LlmError};

/// Fixed-reply [`LlmClient`] for tests and `--offline` runs.
///
/// Every invocation is recorded so tests can assert on the exact messages the
/// engine forwarded.
pub struct MockLlm {
    reply: String,
    calls: Mutex<Vec<Vec<Message>>>,
}

impl MockLlm {
    pub fn canned(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Messages from every `complete` call so far, oldest first.
    pub fn calls(&self) -> Vec<Vec<Message>> {
        self.calls.lock().expect("mock lock").clone()
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn complete(&self, messages: &[Message]) -> Result<String, LlmError> {
        self.calls.lock().expect("mock lock").push(messages.to_vec());
        Ok(self.reply.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_canned_reply_and_records_messages() {
        let llm = MockLlm::canned("canned");
        let messages = vec![Message::system("sys"), Message::user("question")];

        let reply = llm.complete(&messages).await.unwrap();

        assert_eq!(reply, "canned");
        let calls = llm.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0], messages);
    }

    #[tokio::test]
    async fn records_every_invocation_in_order() {
        let llm = MockLlm::canned("r");
        llm.complete(&[Message::user("first")]).await.unwrap();
        llm.complete(&[Message::user("second")]).await.unwrap();

        let calls = llm.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0][0].content(), "first");
        assert_eq!(calls[1][0].content(), "second");
    }
}
