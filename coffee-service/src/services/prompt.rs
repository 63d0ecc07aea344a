//! Fixed prompt material for the coffee expert persona.

use super::providers::ChatMessage;

/// Used when the caller sends no question or an empty one.
pub const DEFAULT_QUESTION: &str =
    "What are the top 5 coffee brewing methods and their characteristics?";

pub const SYSTEM_INSTRUCTION: &str = "You are a knowledgeable coffee expert and barista.";

/// Persona label attached to every successful answer.
pub const PERSONA_LABEL: &str = "☕ AI Barista";

/// The question actually sent upstream. Non-empty input passes through untouched.
pub fn effective_question(question: Option<&str>) -> &str {
    match question {
        Some(q) if !q.is_empty() => q,
        _ => DEFAULT_QUESTION,
    }
}

pub fn user_instruction(question: &str) -> String {
    format!(
        "You are a coffee expert and barista with deep knowledge about coffee beans, \
         brewing methods, equipment, and coffee culture.\n\
         Please answer the following coffee question in a helpful, informative, and engaging way:\n\
         \n\
         Question: {}\n\
         \n\
         Please provide a detailed answer that would be helpful to someone interested in coffee.",
        question
    )
}

/// System instruction followed by the templated user instruction.
pub fn build_messages(question: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(SYSTEM_INSTRUCTION),
        ChatMessage::user(user_instruction(question)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::providers::Role;

    #[test]
    fn test_missing_question_uses_default() {
        assert_eq!(effective_question(None), DEFAULT_QUESTION);
        assert_eq!(effective_question(Some("")), DEFAULT_QUESTION);
    }

    #[test]
    fn test_question_is_kept_verbatim() {
        let q = "  Why does my V60 drain slowly?\n";
        assert_eq!(effective_question(Some(q)), q);
        assert_eq!(effective_question(Some(" ")), " ");
    }

    #[test]
    fn test_messages_embed_question() {
        let messages = build_messages("What is a flat white?");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[0].content, SYSTEM_INSTRUCTION);
        assert_eq!(messages[1].role, Role::User);
        assert!(messages[1]
            .content
            .contains("\n\nQuestion: What is a flat white?\n\n"));
        assert!(messages[1]
            .content
            .starts_with("You are a coffee expert and barista with deep knowledge"));
    }
}
