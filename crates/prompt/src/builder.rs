//! Prompt composer: renders templates and injects context.

use crate::types::{BuiltPrompt, PromptTemplates, Turn};
use handlebars::Handlebars;
use scout_core::{AppError, AppResult};
use std::collections::HashMap;

const SEARCH_TEMPLATE: &str = "search";
const HISTORY_TEMPLATE: &str = "history";

/// Composes the final prompt from an utterance and optional context.
///
/// Templates are compiled once in [`PromptComposer::new`]; composing is pure
/// and never touches conversation state.
pub struct PromptComposer {
    registry: Handlebars<'static>,
}

impl PromptComposer {
    /// Compile the given templates.
    ///
    /// # Errors
    /// Returns `AppError::Prompt` if a template does not parse.
    pub fn new(templates: PromptTemplates) -> AppResult<Self> {
        let mut registry = Handlebars::new();

        // Prompts are plain text
        registry.register_escape_fn(handlebars::no_escape);

        registry
            .register_template_string(SEARCH_TEMPLATE, &templates.search)
            .map_err(|e| AppError::Prompt(format!("Invalid search template: {}", e)))?;
        registry
            .register_template_string(HISTORY_TEMPLATE, &templates.history)
            .map_err(|e| AppError::Prompt(format!("Invalid history template: {}", e)))?;

        Ok(Self { registry })
    }

    /// Build the prompt for one utterance.
    ///
    /// Precedence:
    /// 1. With retrieved context, the search template wraps the utterance.
    /// 2. With a non-empty history window, the history template prepends the
    ///    transcript to the result of step 1.
    /// 3. Otherwise the utterance is returned unchanged.
    ///
    /// # Example
    /// ```
    /// use scout_prompt::{PromptComposer, PromptTemplates, Turn};
    ///
    /// # fn example() -> scout_core::AppResult<()> {
    /// let composer = PromptComposer::new(PromptTemplates::default())?;
    /// let history = [Turn::user("hi"), Turn::assistant("hello")];
    /// let built = composer.compose("what's new?", None, &history)?;
    /// assert!(built.text.ends_with("what's new?"));
    /// # Ok(())
    /// # }
    /// ```
    pub fn compose(
        &self,
        utterance: &str,
        retrieved_context: Option<&str>,
        history_window: &[Turn],
    ) -> AppResult<BuiltPrompt> {
        let context = retrieved_context.filter(|ctx| !ctx.trim().is_empty());

        let mut prompt = match context {
            Some(ctx) => {
                let mut vars = HashMap::new();
                vars.insert("context", ctx);
                vars.insert("question", utterance);
                self.render(SEARCH_TEMPLATE, &vars)?
            }
            None => utterance.to_string(),
        };

        if !history_window.is_empty() {
            let transcript = render_transcript(history_window);
            let mut vars = HashMap::new();
            vars.insert("history", transcript.as_str());
            vars.insert("prompt", prompt.as_str());
            prompt = self.render(HISTORY_TEMPLATE, &vars)?;
        }

        tracing::debug!(
            search_context = context.is_some(),
            history_turns = history_window.len(),
            chars = prompt.chars().count(),
            "Composed prompt"
        );

        Ok(BuiltPrompt::new(
            prompt,
            context.is_some(),
            history_window.len(),
        ))
    }

    fn render(&self, name: &str, vars: &HashMap<&str, &str>) -> AppResult<String> {
        self.registry
            .render(name, vars)
            .map_err(|e| AppError::Prompt(format!("Failed to render {} template: {}", name, e)))
    }
}

/// One `role: content` line per turn, in order.
fn render_transcript(turns: &[Turn]) -> String {
    turns
        .iter()
        .map(|turn| format!("{}: {}", turn.role.label(), turn.content))
        .collect::<Vec<_>>()
        .join("\n")
}
