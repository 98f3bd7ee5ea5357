pub const HELP_MESSAGE_CONTEXT: &str = "help_message";

/// Stack of messages, each tagged with the context that pushed it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusBar {
    entries: Vec<(String, String)>,
}

impl StatusBar {
    pub fn push(&mut self, context: &str, message: impl Into<String>) {
        self.entries.push((context.to_string(), message.into()));
    }

    /// Removes the newest message pushed under `context`.
    pub fn pop(&mut self, context: &str) -> Option<String> {
        let index = self
            .entries
            .iter()
            .rposition(|(entry_context, _)| entry_context == context)?;
        Some(self.entries.remove(index).1)
    }

    pub fn top(&self) -> Option<&str> {
        self.entries.last().map(|(_, message)| message.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::StatusBar;

    #[test]
    fn pop_removes_newest_entry_of_context_only() {
        let mut bar = StatusBar::default();
        bar.push("page", "page 1/3");
        bar.push("help_message", "Go to the next page");
        bar.push("page", "page 2/3");

        assert_eq!(bar.top(), Some("page 2/3"));
        assert_eq!(bar.pop("help_message").as_deref(), Some("Go to the next page"));
        assert_eq!(bar.len(), 2);
        assert_eq!(bar.pop("help_message"), None);
        assert_eq!(bar.pop("page").as_deref(), Some("page 2/3"));
        assert_eq!(bar.top(), Some("page 1/3"));
    }
}
