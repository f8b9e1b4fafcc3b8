//! Sources of menu selections for the navigator.

use crate::error::ApiError;
use std::collections::VecDeque;

/// Where the navigator gets its answers from.
pub trait MenuInput {
    /// Show `options` (numbered from 1, with 0 meaning back) and return the raw answer.
    fn choose(&mut self, heading: &str, options: &[String]) -> Result<String, ApiError>;

    /// Tell the operator an answer was not accepted. The same menu is shown again.
    fn reject(&mut self, message: &str);
}

/// One menu as presented to a [`ScriptedInput`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    pub heading: String,
    pub options: Vec<String>,
}

/// Answers taken from a fixed list, recording every menu it was shown.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    answers: VecDeque<String>,
    pub screens: Vec<Screen>,
    pub rejections: Vec<String>,
}

impl ScriptedInput {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            screens: Vec::new(),
            rejections: Vec::new(),
        }
    }

    /// Comma-separated answers, e.g. `"1,2,0"`.
    pub fn parse(script: &str) -> Self {
        Self::new(script.split(',').map(str::trim))
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl MenuInput for ScriptedInput {
    fn choose(&mut self, heading: &str, options: &[String]) -> Result<String, ApiError> {
        self.screens.push(Screen {
            heading: heading.to_string(),
            options: options.to_vec(),
        });
        self.answers.pop_front().ok_or_else(|| {
            ApiError::InvalidInput(format!("no scripted choice left for menu '{}'", heading))
        })
    }

    fn reject(&mut self, message: &str) {
        self.rejections.push(message.to_string());
    }
}
