// src/chat.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

use crate::advisor::{identify_symptoms, Advisor};
use crate::ai_provider::TextGenerator;
use crate::core::Symptom;

pub const WELCOME_MESSAGE: &str =
    "Hello! I'm your HealthWatch assistant. How can I help you with your health concerns today?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub content: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        ChatMessage {
            id: format!("user-{}", Uuid::new_v4()),
            content: content.into(),
            sender: Sender::User,
            timestamp: Utc::now(),
        }
    }

    pub fn bot(content: impl Into<String>) -> Self {
        ChatMessage {
            id: format!("bot-{}", Uuid::new_v4()),
            content: content.into(),
            sender: Sender::Bot,
            timestamp: Utc::now(),
        }
    }
}

/// One chat transcript. Append-only; dropped with the session.
pub struct ChatSession<G: TextGenerator> {
    advisor: Advisor<G>,
    symptom_catalog: Vec<Symptom>,
    messages: Vec<ChatMessage>,
    matched: Vec<Symptom>,
    typing_delay: Duration,
}

impl<G: TextGenerator> ChatSession<G> {
    pub fn new(advisor: Advisor<G>, symptom_catalog: Vec<Symptom>, typing_delay: Duration) -> Self {
        let welcome = ChatMessage {
            id: "welcome".to_string(),
            ..ChatMessage::bot(WELCOME_MESSAGE)
        };

        ChatSession {
            advisor,
            symptom_catalog,
            messages: vec![welcome],
            matched: Vec::new(),
            typing_delay,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Symptoms identified in the most recent user message
    pub fn matched_symptoms(&self) -> &[Symptom] {
        &self.matched
    }

    /// Send a user message and wait for the reply. Blank input is ignored.
    pub async fn send(&mut self, input: &str) -> Option<&ChatMessage> {
        if input.trim().is_empty() {
            return None;
        }

        self.messages.push(ChatMessage::user(input));
        self.matched = identify_symptoms(&self.symptom_catalog, input);

        if !self.typing_delay.is_zero() {
            tokio::time::sleep(self.typing_delay).await;
        }

        let reply = self.advisor.advise(input, &self.matched).await;
        self.messages.push(ChatMessage::bot(reply));
        self.messages.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisor::tests::ScriptedGenerator;
    use crate::core::Catalog;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn session(generator: ScriptedGenerator) -> ChatSession<ScriptedGenerator> {
        let advisor = Advisor::with_rng(generator, StdRng::seed_from_u64(9));
        ChatSession::new(advisor, Catalog::seeded().symptoms, Duration::ZERO)
    }

    #[test]
    fn test_session_starts_with_welcome() {
        let chat = session(ScriptedGenerator::failing());
        assert_eq!(chat.messages().len(), 1);
        assert_eq!(chat.messages()[0].id, "welcome");
        assert_eq!(chat.messages()[0].sender, Sender::Bot);
    }

    #[tokio::test]
    async fn test_transcript_grows_two_per_send() {
        let mut chat = session(ScriptedGenerator::answering("Rest up."));
        let inputs = ["I have a fever", "and a cough", "also a headache"];
        for input in inputs {
            assert!(chat.send(input).await.is_some());
        }

        let messages = chat.messages();
        assert_eq!(messages.len(), 2 * inputs.len() + 1);
        for (i, input) in inputs.iter().enumerate() {
            assert_eq!(messages[1 + 2 * i].sender, Sender::User);
            assert_eq!(messages[1 + 2 * i].content, *input);
            assert_eq!(messages[2 + 2 * i].sender, Sender::Bot);
        }
    }

    #[tokio::test]
    async fn test_blank_input_is_ignored() {
        let mut chat = session(ScriptedGenerator::answering("unused"));
        assert!(chat.send("   ").await.is_none());
        assert_eq!(chat.messages().len(), 1);
    }

    #[tokio::test]
    async fn test_matched_symptoms_follow_last_message() {
        let mut chat = session(ScriptedGenerator::failing());
        chat.send("Shortness of breath since this morning").await;
        assert_eq!(chat.matched_symptoms()[0].name, "Shortness of Breath");

        let reply = chat.messages().last().unwrap();
        assert!(reply.content.starts_with("Shortness of breath requires immediate medical attention"));

        chat.send("thanks").await;
        assert!(chat.matched_symptoms().is_empty());
    }
}
