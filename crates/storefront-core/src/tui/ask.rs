//! Charm-style answers using cliclack

use super::sequencer::{AnswerValue, Asker, Question, QuestionKind};
use anyhow::Result;

/// Asks each question interactively in the terminal
#[derive(Debug, Clone, Copy, Default)]
pub struct CliclackAsker;

impl Asker for CliclackAsker {
    fn ask(&mut self, question: &Question) -> Result<AnswerValue> {
        let answer = match &question.kind {
            QuestionKind::Select(choices) => {
                let mut select = cliclack::select(&question.message);
                for choice in choices {
                    select = select.item(choice.value.clone(), &choice.label, &choice.hint);
                }
                if let Some(default) = question.default.as_text() {
                    select = select.initial_value(default.to_string());
                }
                AnswerValue::Text(select.interact()?)
            }
            QuestionKind::MultiSelect(choices) => {
                let mut multi = cliclack::multiselect(&question.message);
                for choice in choices {
                    multi = multi.item(choice.value.clone(), &choice.label, &choice.hint);
                }
                if let Some(defaults) = question.default.as_tags() {
                    multi = multi.initial_values(defaults.iter().cloned().collect());
                }
                let selected: Vec<String> = multi.required(false).interact()?;
                AnswerValue::Tags(selected.into_iter().collect())
            }
            QuestionKind::Input => {
                let default = question.default.as_text().unwrap_or_default();
                let mut input = cliclack::input(&question.message);
                if !default.is_empty() {
                    input = input.placeholder(default).default_input(default);
                }
                let value: String = input.interact()?;
                AnswerValue::Text(value)
            }
            QuestionKind::Confirm => {
                let value: bool = cliclack::confirm(&question.message)
                    .initial_value(question.default.as_bool().unwrap_or(false))
                    .interact()?;
                AnswerValue::Bool(value)
            }
        };
        Ok(answer)
    }
}
