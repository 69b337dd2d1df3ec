//! Ordered question stages with visibility predicates
//!
//! A stage is a list of [`Question`]s asked in declaration order. A question
//! whose `when` predicate rejects the answers collected so far is skipped and
//! leaves no entry behind: absent keys mean "not asked", never "defaulted".

use anyhow::Result;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// A single answer value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerValue {
    Text(String),
    Bool(bool),
    Tags(BTreeSet<String>),
}

impl AnswerValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AnswerValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AnswerValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_tags(&self) -> Option<&BTreeSet<String>> {
        match self {
            AnswerValue::Tags(t) => Some(t),
            _ => None,
        }
    }

    /// Build a tag set from string slices
    pub fn tags<'a>(tags: impl IntoIterator<Item = &'a str>) -> Self {
        AnswerValue::Tags(tags.into_iter().map(str::to_string).collect())
    }
}

/// Answers collected by a stage, keyed by question key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answers {
    values: BTreeMap<String, AnswerValue>,
}

impl Answers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: AnswerValue) {
        self.values.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&AnswerValue> {
        self.values.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(AnswerValue::as_text)
    }

    pub fn flag(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(AnswerValue::as_bool)
    }

    /// True when `key` is a tag set containing `tag`
    pub fn has_tag(&self, key: &str, tag: &str) -> bool {
        self.get(key)
            .and_then(AnswerValue::as_tags)
            .is_some_and(|tags| tags.contains(tag))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// One selectable option of a select or multi-select question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub value: String,
    pub label: String,
    pub hint: String,
}

impl Choice {
    pub fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
            hint: String::new(),
        }
    }

    pub fn hint(mut self, hint: &str) -> Self {
        self.hint = hint.to_string();
        self
    }
}

/// How a question is presented
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionKind {
    Select(Vec<Choice>),
    MultiSelect(Vec<Choice>),
    Input,
    Confirm,
}

type Predicate = Box<dyn Fn(&Answers) -> bool + Send + Sync>;

/// A question specification
pub struct Question {
    pub key: &'static str,
    pub message: String,
    pub kind: QuestionKind,
    pub default: AnswerValue,
    when: Option<Predicate>,
}

impl Question {
    pub fn select(key: &'static str, message: &str, choices: Vec<Choice>, default: &str) -> Self {
        Self::new(
            key,
            message,
            QuestionKind::Select(choices),
            AnswerValue::Text(default.to_string()),
        )
    }

    pub fn multi_select(
        key: &'static str,
        message: &str,
        choices: Vec<Choice>,
        default: BTreeSet<String>,
    ) -> Self {
        Self::new(
            key,
            message,
            QuestionKind::MultiSelect(choices),
            AnswerValue::Tags(default),
        )
    }

    pub fn input(key: &'static str, message: &str, default: &str) -> Self {
        Self::new(
            key,
            message,
            QuestionKind::Input,
            AnswerValue::Text(default.to_string()),
        )
    }

    pub fn confirm(key: &'static str, message: &str, default: bool) -> Self {
        Self::new(key, message, QuestionKind::Confirm, AnswerValue::Bool(default))
    }

    fn new(key: &'static str, message: &str, kind: QuestionKind, default: AnswerValue) -> Self {
        Self {
            key,
            message: message.to_string(),
            kind,
            default,
            when: None,
        }
    }

    /// Only ask this question when `predicate` accepts the earlier answers
    pub fn when(mut self, predicate: impl Fn(&Answers) -> bool + Send + Sync + 'static) -> Self {
        self.when = Some(Box::new(predicate));
        self
    }

    pub fn is_visible(&self, answers: &Answers) -> bool {
        self.when.as_ref().map_or(true, |p| p(answers))
    }
}

impl fmt::Debug for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Question")
            .field("key", &self.key)
            .field("message", &self.message)
            .field("kind", &self.kind)
            .field("default", &self.default)
            .field("conditional", &self.when.is_some())
            .finish()
    }
}

/// Something that can answer a question: a terminal prompt, a script, defaults
pub trait Asker {
    fn ask(&mut self, question: &Question) -> Result<AnswerValue>;
}

/// Answers every question with its default (non-interactive `--yes` mode)
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultAsker;

impl Asker for DefaultAsker {
    fn ask(&mut self, question: &Question) -> Result<AnswerValue> {
        Ok(question.default.clone())
    }
}

/// Run one stage of questions in declaration order
pub fn run_stage<A: Asker + ?Sized>(questions: &[Question], asker: &mut A) -> Result<Answers> {
    let mut answers = Answers::new();
    for question in questions {
        if !question.is_visible(&answers) {
            continue;
        }
        let value = asker.ask(question)?;
        answers.insert(question.key, value);
    }
    Ok(answers)
}
