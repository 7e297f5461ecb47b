//! Blocking confirmations for irreversible actions.

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

#[async_trait]
pub trait Confirm: Send + Sync {
    /// Ask the user to type `expected` to proceed. Anything else declines.
    async fn confirm(&self, prompt: &str, expected: &str) -> Result<bool>;
}

/// Reads the answer from stdin
pub struct StdinConfirm;

#[async_trait]
impl Confirm for StdinConfirm {
    async fn confirm(&self, prompt: &str, expected: &str) -> Result<bool> {
        let mut stdout = tokio::io::stdout();
        stdout
            .write_all(format!("{}\nType '{}' to confirm: ", prompt, expected).as_bytes())
            .await?;
        stdout.flush().await?;

        let mut line = String::new();
        BufReader::new(tokio::io::stdin())
            .read_line(&mut line)
            .await
            .context("Failed to read confirmation")?;
        Ok(line.trim() == expected)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Confirmation double for tests.

    use std::collections::VecDeque;

    use anyhow::Result;
    use async_trait::async_trait;
    use parking_lot::Mutex;

    use super::Confirm;

    /// Pre-recorded answers, consumed in order; declines once exhausted
    #[derive(Default)]
    pub struct ScriptedConfirm {
        answers: Mutex<VecDeque<String>>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedConfirm {
        pub fn new<I, S>(answers: I) -> Self
        where
            I: IntoIterator<Item = S>,
            S: Into<String>,
        {
            Self {
                answers: Mutex::new(answers.into_iter().map(Into::into).collect()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn prompts(&self) -> Vec<String> {
            self.prompts.lock().clone()
        }
    }

    #[async_trait]
    impl Confirm for ScriptedConfirm {
        async fn confirm(&self, prompt: &str, expected: &str) -> Result<bool> {
            self.prompts.lock().push(prompt.to_string());
            let answer = self.answers.lock().pop_front();
            Ok(answer.as_deref() == Some(expected))
        }
    }
}
