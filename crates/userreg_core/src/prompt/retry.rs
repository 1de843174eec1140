//! Prompt, validate, retry, give up.

use super::io::PromptIo;
use crate::config::DEFAULT_MAX_ATTEMPTS;
use crate::model::user::Field;
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type PromptResult<T> = Result<T, PromptError>;

/// Error for a guarded prompt that produced no accepted value.
#[derive(Debug)]
pub enum PromptError {
    /// Every attempt was rejected.
    RetryExhausted { field: Field, message: String },
    /// Input ended before an acceptable value was read.
    InputClosed(Field),
    /// Operator I/O failed.
    Io(std::io::Error),
}

impl Display for PromptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RetryExhausted { field, message } => {
                write!(f, "too many invalid {field} attempts: {message}")
            }
            Self::InputClosed(field) => write!(f, "input closed while reading {field}"),
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PromptError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PromptError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Static description of one guarded prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPrompt {
    pub field: Field,
    pub label: String,
    pub error_message: String,
    pub max_attempts: u32,
}

impl RetryPrompt {
    /// Creates a prompt with [`DEFAULT_MAX_ATTEMPTS`].
    pub fn new(field: Field, label: impl Into<String>, error_message: impl Into<String>) -> Self {
        Self {
            field,
            label: label.into(),
            error_message: error_message.into(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }
}

/// Asks until `validate` accepts an answer or attempts run out.
///
/// Each prompt shows `[Attempts left: N]`; each rejection shows the error
/// message followed by the updated count. The first accepted answer is
/// returned without consuming further attempts.
///
/// # Errors
/// - `RetryExhausted` after `max_attempts` rejections.
/// - `InputClosed` when input ends first.
/// - `Io` when reading or writing fails.
pub fn retry_input<P, F>(io: &mut P, prompt: &RetryPrompt, mut validate: F) -> PromptResult<String>
where
    P: PromptIo + ?Sized,
    F: FnMut(&str) -> bool,
{
    for used in 0..prompt.max_attempts {
        let remaining = prompt.max_attempts - used;
        let Some(value) = io.ask(&format!("{} [Attempts left: {remaining}]: ", prompt.label))?
        else {
            debug!(
                "event=prompt_closed module=prompt field={} attempts_left={}",
                prompt.field, remaining
            );
            return Err(PromptError::InputClosed(prompt.field));
        };

        if validate(&value) {
            return Ok(value);
        }

        debug!(
            "event=prompt_rejected module=prompt field={} attempts_left={}",
            prompt.field,
            remaining - 1
        );
        io.say(&format!(
            "{} Attempts left: {}",
            prompt.error_message,
            remaining - 1
        ))?;
    }

    Err(PromptError::RetryExhausted {
        field: prompt.field,
        message: prompt.error_message.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::{retry_input, PromptError, RetryPrompt};
    use crate::model::user::Field;
    use crate::prompt::io::PromptIo;
    use std::collections::VecDeque;

    /// Scripted answers that record every prompt and message.
    struct Script {
        answers: VecDeque<&'static str>,
        prompts: Vec<String>,
        messages: Vec<String>,
    }

    impl Script {
        fn new(answers: &[&'static str]) -> Self {
            Self {
                answers: answers.iter().copied().collect(),
                prompts: Vec::new(),
                messages: Vec::new(),
            }
        }
    }

    impl PromptIo for Script {
        fn ask(&mut self, prompt: &str) -> std::io::Result<Option<String>> {
            self.prompts.push(prompt.to_string());
            Ok(self.answers.pop_front().map(str::to_string))
        }

        fn say(&mut self, message: &str) -> std::io::Result<()> {
            self.messages.push(message.to_string());
            Ok(())
        }
    }

    fn name_prompt() -> RetryPrompt {
        RetryPrompt::new(Field::Name, "Enter name", "Bad name!")
    }

    #[test]
    fn returns_first_accepted_answer_without_extra_prompts() {
        let mut io = Script::new(&["x", "Alice", "never read"]);

        let value = retry_input(&mut io, &name_prompt(), |v| v.len() > 1).unwrap();

        assert_eq!(value, "Alice");
        assert_eq!(
            io.prompts,
            vec![
                "Enter name [Attempts left: 4]: ".to_string(),
                "Enter name [Attempts left: 3]: ".to_string(),
            ]
        );
        assert_eq!(io.messages, vec!["Bad name! Attempts left: 3".to_string()]);
        assert_eq!(io.answers.len(), 1);
    }

    #[test]
    fn always_rejecting_predicate_prompts_exactly_max_attempts_times() {
        let mut io = Script::new(&["a", "b", "c", "d", "e", "f"]);
        let mut calls = 0;

        let err = retry_input(&mut io, &name_prompt(), |_| {
            calls += 1;
            false
        })
        .unwrap_err();

        assert_eq!(calls, 4);
        assert_eq!(io.prompts.len(), 4);
        assert_eq!(io.messages.last().unwrap(), "Bad name! Attempts left: 0");
        assert!(matches!(
            err,
            PromptError::RetryExhausted { field: Field::Name, ref message } if message == "Bad name!"
        ));
    }

    #[test]
    fn custom_attempt_limit_is_honored() {
        let mut io = Script::new(&["a", "b", "c"]);
        let prompt = name_prompt().with_max_attempts(2);

        let err = retry_input(&mut io, &prompt, |_| false).unwrap_err();

        assert!(matches!(err, PromptError::RetryExhausted { .. }));
        assert_eq!(io.prompts.len(), 2);
    }

    #[test]
    fn closed_input_aborts_with_field() {
        let mut io = Script::new(&["bad"]);

        let err = retry_input(&mut io, &name_prompt(), |_| false).unwrap_err();

        assert!(matches!(err, PromptError::InputClosed(Field::Name)));
        assert_eq!(io.prompts.len(), 2);
    }
}
