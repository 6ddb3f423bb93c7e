//! Renders invocation outcomes to strings.
//!
//! Nothing here prints. Every function builds the full output,
//! trailing newline included, and `main` writes it to stdout in one
//! go. That keeps the layouts testable without capturing stdout.

use crate::api::chat::ChatResponse;
use crate::api::moderation::ModerationResponse;
use crate::api::tokenize::Tokenization;
use crate::api::Outcome;
use crate::error::Error;
use crate::style::{Color, Style, TOKEN_PALETTE};

/// How the caller wants the outcome shaped.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Emit the raw response envelope as a single JSON line.
    pub json: bool,
    /// Emit only the token count. Ignored outside tokenization.
    pub count_only: bool,
}

/// Project an outcome into its final output string.
pub fn render(outcome: &Outcome, opts: RenderOptions, style: &Style) -> Result<String, Error> {
    if opts.json {
        return render_json(outcome);
    }

    Ok(match outcome {
        Outcome::Chat(response) => render_chat(response),
        Outcome::Moderation(response) => render_moderation(response, style),
        Outcome::Tokenization(tokenization) => {
            if opts.count_only {
                format!("{}\n", tokenization.count())
            } else {
                render_tokenization(tokenization, style)
            }
        }
    })
}

fn render_json(outcome: &Outcome) -> Result<String, Error> {
    let body = match outcome {
        Outcome::Chat(response) => serde_json::to_string(response),
        Outcome::Moderation(response) => serde_json::to_string(response),
        Outcome::Tokenization(tokenization) => serde_json::to_string(tokenization),
    }
    .map_err(|source| Error::Decode {
        what: "response envelope".to_string(),
        source,
    })?;

    Ok(format!("{body}\n"))
}

fn render_chat(response: &ChatResponse) -> String {
    format!("{}\n", response.content().unwrap_or_default())
}

/// One line per category: name, verdict, score. Flagged rows paint
/// the verdict and score red; clean rows get a green verdict and a
/// gray score. An empty results list renders as all-clean rows.
fn render_moderation(response: &ModerationResponse, style: &Style) -> String {
    let result = response.results.first().cloned().unwrap_or_default();
    let rows = result.rows();
    let width = rows.iter().map(|row| row.name.len()).max().unwrap_or(0);

    let mut out = String::from("\n");
    for row in rows {
        let (flag_color, score_color) = if row.flagged {
            (Color::Red, Color::Red)
        } else {
            (Color::Green, Color::Gray)
        };
        let flag = style.paint(flag_color, &format!("{:<5}", row.flagged));
        let score = style.paint(score_color, &row.score.to_string());
        out.push_str(&format!("{:<width$} {} {}\n", row.name, flag, score));
    }
    out.push('\n');
    out
}

/// The input text with each token painted its own color, cycling the
/// palette by position, followed by the count.
fn render_tokenization(tokenization: &Tokenization, style: &Style) -> String {
    let mut painted = String::new();
    for (i, token) in tokenization.tokens.iter().enumerate() {
        let color = TOKEN_PALETTE[i % TOKEN_PALETTE.len()];
        painted.push_str(&style.paint(color, &token.text));
    }

    format!("\n{painted}\n\n{} tokens\n\n", tokenization.count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::chat::{Choice, Usage};
    use crate::api::moderation::{CategoryFlags, CategoryScores, ModerationResult};
    use crate::api::tokenize::Token;
    use crate::input::{Message, Role};

    fn chat_outcome(content: &str) -> Outcome {
        Outcome::Chat(ChatResponse {
            id: "chatcmpl-test".to_string(),
            object: "chat.completion".to_string(),
            created: 1700000000,
            model: "gpt-3.5-turbo".to_string(),
            choices: vec![Choice {
                index: 0,
                message: Message {
                    role: Role::Assistant,
                    content: content.to_string(),
                },
                finish_reason: "stop".to_string(),
            }],
            usage: Usage::default(),
        })
    }

    fn violence_outcome() -> Outcome {
        let result = ModerationResult {
            flagged: true,
            categories: CategoryFlags {
                violence: true,
                ..Default::default()
            },
            category_scores: CategoryScores {
                violence: 0.9871,
                ..Default::default()
            },
        };

        Outcome::Moderation(ModerationResponse {
            id: "modr-test".to_string(),
            model: "text-moderation-007".to_string(),
            results: vec![result],
        })
    }

    fn token_outcome(pieces: &[&str]) -> Outcome {
        let tokens = pieces
            .iter()
            .enumerate()
            .map(|(id, text)| Token {
                id,
                text: text.to_string(),
            })
            .collect();
        Outcome::Tokenization(Tokenization { tokens })
    }

    #[test]
    fn test_chat_renders_the_first_choice() {
        let out = render(&chat_outcome("Hello there!"), RenderOptions::default(), &Style::plain())
            .unwrap();
        assert_eq!(out, "Hello there!\n");
    }

    #[test]
    fn test_chat_without_choices_renders_a_blank_line() {
        let outcome = Outcome::Chat(ChatResponse {
            id: "chatcmpl-test".to_string(),
            object: "chat.completion".to_string(),
            created: 0,
            model: "gpt-3.5-turbo".to_string(),
            choices: Vec::new(),
            usage: Usage::default(),
        });

        let out = render(&outcome, RenderOptions::default(), &Style::plain()).unwrap();
        assert_eq!(out, "\n");
    }

    #[test]
    fn test_json_output_is_a_single_line() {
        let opts = RenderOptions { json: true, count_only: false };
        let out = render(&chat_outcome("hi"), opts, &Style::plain()).unwrap();

        assert!(out.ends_with('\n'));
        assert_eq!(out.matches('\n').count(), 1);
        assert!(!out.contains('\x1b'));
    }

    #[test]
    fn test_json_output_round_trips_the_envelope() {
        let opts = RenderOptions { json: true, count_only: false };
        let out = render(&chat_outcome("hi"), opts, &Style::colored()).unwrap();

        let decoded: ChatResponse = serde_json::from_str(out.trim_end()).unwrap();
        assert_eq!(decoded.content(), Some("hi"));
    }

    #[test]
    fn test_moderation_lists_all_categories_in_order() {
        let out = render(&violence_outcome(), RenderOptions::default(), &Style::plain()).unwrap();

        assert!(out.starts_with('\n'));
        assert!(out.ends_with("\n\n"));

        let names: Vec<&str> = out
            .trim()
            .lines()
            .map(|line| line.split_whitespace().next().unwrap())
            .collect();
        assert_eq!(
            names,
            vec![
                "hate",
                "hate/threatening",
                "self-harm",
                "sexual",
                "sexual/minors",
                "violence",
                "violence/graphic",
            ]
        );
    }

    #[test]
    fn test_moderation_shows_verdict_and_score() {
        let out = render(&violence_outcome(), RenderOptions::default(), &Style::plain()).unwrap();
        let violence = out.lines().find(|l| l.starts_with("violence ")).unwrap();

        assert!(violence.contains("true"));
        assert!(violence.contains("0.9871"));

        let hate = out.lines().find(|l| l.starts_with("hate ")).unwrap();
        assert!(hate.contains("false"));
        assert!(hate.contains('0'));
    }

    #[test]
    fn test_moderation_paints_flagged_rows_red() {
        let out = render(&violence_outcome(), RenderOptions::default(), &Style::colored()).unwrap();

        let violence = out.lines().find(|l| l.starts_with("violence ")).unwrap();
        assert!(violence.contains("\x1b[31m"));

        let hate = out.lines().find(|l| l.starts_with("hate ")).unwrap();
        assert!(hate.contains("\x1b[32m"));
        assert!(hate.contains("\x1b[90m"));
        assert!(!hate.contains("\x1b[31m"));
    }

    #[test]
    fn test_moderation_without_results_renders_clean_rows() {
        let outcome = Outcome::Moderation(ModerationResponse {
            id: "modr-empty".to_string(),
            model: "text-moderation-007".to_string(),
            results: Vec::new(),
        });

        let out = render(&outcome, RenderOptions::default(), &Style::plain()).unwrap();
        assert_eq!(out.trim().lines().count(), 7);
        assert!(out.lines().all(|line| !line.contains("true")));
    }

    #[test]
    fn test_tokenization_layout() {
        let out = render(
            &token_outcome(&["Hello", " world"]),
            RenderOptions::default(),
            &Style::plain(),
        )
        .unwrap();

        assert_eq!(out, "\nHello world\n\n2 tokens\n\n");
    }

    #[test]
    fn test_tokenization_cycles_the_palette() {
        let out = render(
            &token_outcome(&["a", "b", "c", "d", "e", "f"]),
            RenderOptions::default(),
            &Style::colored(),
        )
        .unwrap();

        assert!(out.contains("\x1b[37ma\x1b[0m"));
        assert!(out.contains("\x1b[36mb\x1b[0m"));
        assert!(out.contains("\x1b[35me\x1b[0m"));
        assert!(out.contains("\x1b[37mf\x1b[0m"));
    }

    #[test]
    fn test_count_only_is_the_bare_number() {
        let opts = RenderOptions { json: false, count_only: true };
        let out = render(&token_outcome(&["Hello", " world"]), opts, &Style::plain()).unwrap();

        assert_eq!(out, "2\n");
    }

    #[test]
    fn test_count_only_does_not_touch_other_outcomes() {
        let opts = RenderOptions { json: false, count_only: true };
        let out = render(&chat_outcome("hi"), opts, &Style::plain()).unwrap();

        assert_eq!(out, "hi\n");
    }
}
