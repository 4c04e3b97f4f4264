use crossterm::event::{KeyCode, KeyEvent};

const MAX_INPUT_CHARS: usize = 8;

/// Outcome of feeding one key to the speed prompt.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum PromptAction {
    Editing,
    Submit(String),
    Cancel,
}

/// Line editor collecting a raw speed value.
///
/// Input is not validated here; the controller parses whatever is submitted.
#[derive(Debug, Clone, Default)]
pub struct SpeedPrompt {
    buffer: String,
}

impl SpeedPrompt {
    /// Opens the prompt pre-filled with the current speed.
    #[must_use]
    pub fn new(current_speed: f64) -> Self {
        Self {
            buffer: current_speed.to_string(),
        }
    }

    #[must_use]
    pub fn input(&self) -> &str {
        &self.buffer
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> PromptAction {
        match key.code {
            KeyCode::Enter => PromptAction::Submit(std::mem::take(&mut self.buffer)),
            KeyCode::Esc => PromptAction::Cancel,
            KeyCode::Backspace => {
                let _ = self.buffer.pop();
                PromptAction::Editing
            }
            KeyCode::Char(ch) if !ch.is_control() => {
                if self.buffer.chars().count() < MAX_INPUT_CHARS {
                    self.buffer.push(ch);
                }
                PromptAction::Editing
            }
            _ => PromptAction::Editing,
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::{PromptAction, SpeedPrompt};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn edits_and_submits_raw_text() {
        let mut prompt = SpeedPrompt::new(10.0);

        prompt.handle_key(key(KeyCode::Backspace));
        prompt.handle_key(key(KeyCode::Backspace));
        prompt.handle_key(key(KeyCode::Char('2')));
        prompt.handle_key(key(KeyCode::Char('x')));

        assert_eq!(prompt.input(), "2x");
        assert_eq!(
            prompt.handle_key(key(KeyCode::Enter)),
            PromptAction::Submit("2x".to_owned())
        );
    }

    #[test]
    fn prefill_keeps_fractional_speed() {
        assert_eq!(SpeedPrompt::new(10.0).input(), "10");
        assert_eq!(SpeedPrompt::new(2.5).input(), "2.5");
    }

    #[test]
    fn escape_cancels() {
        let mut prompt = SpeedPrompt::new(4.0);

        assert_eq!(prompt.handle_key(key(KeyCode::Esc)), PromptAction::Cancel);
    }

    #[test]
    fn input_length_is_capped() {
        let mut prompt = SpeedPrompt::default();
        for _ in 0..20 {
            prompt.handle_key(key(KeyCode::Char('9')));
        }

        assert_eq!(prompt.input().len(), 8);
    }
}
