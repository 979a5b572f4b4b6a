/// Host-assigned identity of the element a behavior observes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(pub u64);

impl TargetId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Mouse click as reported by the host; the host owns click counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickEvent {
    pub click_count: u32,
}

impl ClickEvent {
    pub fn new(click_count: u32) -> Self {
        Self { click_count }
    }

    pub fn single() -> Self {
        Self::new(1)
    }

    pub fn double() -> Self {
        Self::new(2)
    }

    pub fn is_single(&self) -> bool {
        self.click_count == 1
    }

    pub fn is_repeat(&self) -> bool {
        self.click_count >= 2
    }
}

/// Text change carrying the element's full current value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChangedEvent {
    pub text: String,
}

impl TextChangedEvent {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Click(ClickEvent),
    TextChanged(TextChangedEvent),
}

impl InputEvent {
    pub fn click(click_count: u32) -> Self {
        InputEvent::Click(ClickEvent::new(click_count))
    }

    pub fn text(text: impl Into<String>) -> Self {
        InputEvent::TextChanged(TextChangedEvent::new(text))
    }

    pub fn as_click(&self) -> Option<&ClickEvent> {
        match self {
            InputEvent::Click(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_text_changed(&self) -> Option<&TextChangedEvent> {
        match self {
            InputEvent::TextChanged(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ClickEvent> for InputEvent {
    fn from(event: ClickEvent) -> Self {
        InputEvent::Click(event)
    }
}

impl From<TextChangedEvent> for InputEvent {
    fn from(event: TextChangedEvent) -> Self {
        InputEvent::TextChanged(event)
    }
}

/// Payload handed to a change-debouncer command once a burst settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChange {
    pub old_text: String,
    pub new_text: String,
}

impl TextChange {
    pub fn new(old_text: impl Into<String>, new_text: impl Into<String>) -> Self {
        Self {
            old_text: old_text.into(),
            new_text: new_text.into(),
        }
    }

    pub fn is_unchanged(&self) -> bool {
        self.old_text == self.new_text
    }
}

#[cfg(test)]
#[path = "../../tests/unit/core/event.rs"]
mod tests;
