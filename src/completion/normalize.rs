//! Converts whatever the provider sent back into one canonical structure.
//!
//! Providers and proxies do not agree on the exact chat-completion shape.
//! A body that deserializes cleanly into [`ChatCompletion`] arrives as
//! [`RawResponse::Typed`]; anything else is kept as plain JSON in
//! [`RawResponse::Untyped`]. Both go through [`normalize`] and nothing
//! downstream looks at the raw shape again.

use serde::Deserialize;
use serde_json::Value;

/// Typed accessor view of a chat completion. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ChatCompletion {
    pub model: Option<String>,
    pub choices: Option<Vec<Choice>>,
    pub usage: Option<Usage>,
    pub text: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Choice {
    pub message: Option<ChoiceMessage>,
    pub text: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Usage {
    pub prompt_tokens: Option<u64>,
    pub completion_tokens: Option<u64>,
    pub total_tokens: Option<u64>,
    pub total: Option<u64>,
}

/// A provider response before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum RawResponse {
    Typed(ChatCompletion),
    Untyped(Value),
}

impl RawResponse {
    /// Prefer the typed view; keep the raw JSON when it does not fit.
    pub fn from_json(value: Value) -> Self {
        match ChatCompletion::deserialize(&value) {
            Ok(typed) => RawResponse::Typed(typed),
            Err(_) => RawResponse::Untyped(value),
        }
    }
}

/// Usage figures as reported. `total` is the non-standard fallback field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawUsage {
    pub prompt_tokens: Option<u64>,
    pub completion_tokens: Option<u64>,
    pub total_tokens: Option<u64>,
    pub total: Option<u64>,
}

impl RawUsage {
    /// Tokens charged to the usage counter: `total_tokens`, then `total`,
    /// then `completion_tokens`, else zero.
    pub fn tally(&self) -> u64 {
        self.total_tokens
            .or(self.total)
            .or(self.completion_tokens)
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedResponse {
    pub text: Option<String>,
    pub model: Option<String>,
    pub usage: RawUsage,
}

pub fn normalize(raw: RawResponse) -> NormalizedResponse {
    match raw {
        RawResponse::Typed(typed) => from_typed(typed),
        RawResponse::Untyped(value) => from_untyped(&value),
    }
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.is_empty())
}

fn from_typed(resp: ChatCompletion) -> NormalizedResponse {
    let usage = resp.usage.unwrap_or_default();
    let first = resp.choices.and_then(|choices| choices.into_iter().next());

    let text = first
        .and_then(|choice| {
            non_empty(choice.message.and_then(|m| m.content))
                .or_else(|| non_empty(choice.text))
                .or_else(|| non_empty(choice.content))
        })
        .or_else(|| non_empty(resp.text))
        .or_else(|| non_empty(resp.content));

    NormalizedResponse {
        text,
        model: non_empty(resp.model),
        usage: RawUsage {
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
            total_tokens: usage.total_tokens,
            total: usage.total,
        },
    }
}

fn string_at(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Integers, integral floats and numeric strings count; anything else is
/// absent.
fn count_at(value: &Value, key: &str) -> Option<u64> {
    match value.get(key)? {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0)
                .map(|f| f.trunc() as u64)
        }),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
}

fn from_untyped(value: &Value) -> NormalizedResponse {
    let first = value
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|choices| choices.first());

    let text = first
        .and_then(|choice| {
            choice
                .get("message")
                .and_then(|m| string_at(m, "content"))
                .or_else(|| string_at(choice, "text"))
                .or_else(|| string_at(choice, "content"))
        })
        .or_else(|| string_at(value, "text"))
        .or_else(|| string_at(value, "content"));

    let usage = match value.get("usage") {
        Some(u) if u.is_object() => RawUsage {
            prompt_tokens: count_at(u, "prompt_tokens"),
            completion_tokens: count_at(u, "completion_tokens"),
            total_tokens: count_at(u, "total_tokens"),
            total: count_at(u, "total"),
        },
        _ => RawUsage::default(),
    };

    NormalizedResponse {
        text,
        model: string_at(value, "model"),
        usage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn openai_body() -> Value {
        json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "model": "gpt-4o-mini-2024-07-18",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "Check aggr0 usage."},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 30, "completion_tokens": 12, "total_tokens": 42}
        })
    }

    #[test]
    fn standard_body_is_typed() {
        assert!(matches!(
            RawResponse::from_json(openai_body()),
            RawResponse::Typed(_)
        ));
    }

    #[test]
    fn string_counts_fall_back_to_untyped() {
        let body = json!({"usage": {"total_tokens": "42"}});
        let raw = RawResponse::from_json(body);
        assert!(matches!(raw, RawResponse::Untyped(_)));
        assert_eq!(normalize(raw).usage.tally(), 42);
    }

    #[test]
    fn typed_and_untyped_agree() {
        let typed = RawResponse::Typed(ChatCompletion {
            model: Some("gpt-4o-mini-2024-07-18".to_string()),
            choices: Some(vec![Choice {
                message: Some(ChoiceMessage {
                    content: Some("Check aggr0 usage.".to_string()),
                }),
                ..Choice::default()
            }]),
            usage: Some(Usage {
                prompt_tokens: Some(30),
                completion_tokens: Some(12),
                total_tokens: Some(42),
                total: None,
            }),
            ..ChatCompletion::default()
        });
        let untyped = RawResponse::Untyped(openai_body());

        let a = normalize(typed);
        let b = normalize(untyped);
        assert_eq!(a, b);
        assert_eq!(a.text.as_deref(), Some("Check aggr0 usage."));
        assert_eq!(a.model.as_deref(), Some("gpt-4o-mini-2024-07-18"));
        assert_eq!(a.usage.tally(), 42);
    }

    #[test]
    fn content_preference_order() {
        let v = json!({
            "choices": [{"message": {"content": ""}, "text": "from text"}],
            "text": "top text"
        });
        assert_eq!(normalize(RawResponse::Untyped(v)).text.as_deref(), Some("from text"));

        let v = json!({"choices": [], "text": "top text", "content": "top content"});
        assert_eq!(normalize(RawResponse::Untyped(v)).text.as_deref(), Some("top text"));

        let v = json!({"content": "top content"});
        assert_eq!(
            normalize(RawResponse::from_json(v)).text.as_deref(),
            Some("top content")
        );
    }

    #[test]
    fn malformed_fields_are_absent() {
        let v = json!({
            "model": 7,
            "choices": "not a list",
            "usage": ["nope"]
        });
        let n = normalize(RawResponse::from_json(v));
        assert_eq!(n, NormalizedResponse::default());
    }

    #[test]
    fn non_object_body() {
        assert_eq!(
            normalize(RawResponse::from_json(Value::Null)),
            NormalizedResponse::default()
        );
        assert_eq!(
            normalize(RawResponse::from_json(json!("plain string"))),
            NormalizedResponse::default()
        );
    }

    #[test]
    fn tally_fallbacks() {
        let usage = |v: Value| normalize(RawResponse::Untyped(json!({"usage": v}))).usage;
        assert_eq!(usage(json!({"total_tokens": 42, "total": 7})).tally(), 42);
        assert_eq!(usage(json!({"total": 7, "completion_tokens": 3})).tally(), 7);
        assert_eq!(usage(json!({"completion_tokens": 3})).tally(), 3);
        assert_eq!(usage(json!({"total_tokens": "n/a", "total": "9"})).tally(), 9);
        assert_eq!(usage(json!({"total_tokens": 12.0})).tally(), 12);
        assert_eq!(usage(json!({"total_tokens": -5})).tally(), 0);
        assert_eq!(usage(json!({})).tally(), 0);
    }
}
