use super::message::{Message, Role};

/// Render a conversation as the human-readable `conversation.md` companion.
///
/// Each message becomes `**<Role>**:\n<content>\n`; assistant entries get one
/// extra blank line so exchanges read as separate blocks.
pub fn render_markdown(messages: &[Message]) -> String {
    let mut markdown = String::new();
    for message in messages {
        markdown.push_str("**");
        markdown.push_str(message.role.title());
        markdown.push_str("**:\n");
        markdown.push_str(&message.content);
        markdown.push('\n');
        if message.role == Role::Assistant {
            markdown.push('\n');
        }
    }
    markdown
}
