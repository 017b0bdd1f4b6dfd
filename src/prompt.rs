// Copyright 2026 The Velora Project
// SPDX-License-Identifier: Apache-2.0

// Prompt assembly.
//
// All instruction text the gateway sends to the generation service
// lives here, together with the message builders the handlers use.
// Handlers never concatenate prompt strings themselves.

use crate::generation::{ChatMessage, ContentPart, ImageUrl};

// ---------------------------------------------------------------------------
// analyze_image
// ---------------------------------------------------------------------------

pub const ANALYZE_IMAGE_SYSTEM: &str = "\
You are analyzing ONE dating app screenshot (either a chat or a profile).

Return ONLY valid JSON with exactly these two fields:
{
  \"response\": \"ONE sentence sendable reply to THEM\",
  \"summary\": \"a structured extraction block (see format below)\"
}

How to build summary (plain text inside the summary string):

TYPE: chat|profile
CONTEXT:
- THEM: <text>
- ME: <text>
LAST THEM TEXT: <one of the THEM lines above, or NONE>
UNCERTAIN: true|false

Extraction rules:
- Focus ONLY on written messages/bio/prompts.
- Ignore UI elements, timestamps, names, buttons, icons, layout.
- If chat: extract up to the LAST 5 messages, most recent first, labeled THEM/ME.
- If profile: extract 1-2 most reply-worthy lines as THEM.

Rules for response:
- Exactly 1 sentence, no line breaks, minimal or no emojis.
- Only these punctuation marks allowed: . , ? ! '
- Sound like a real 23-28 year old texting. Witty, confident, playful.

Output rules:
- JSON only. No extra text. No markdown.";

/// Structured-output constraint forcing the two-field JSON object.
pub fn analyze_image_response_format() -> serde_json::Value {
    serde_json::json!({
        "type": "json_schema",
        "json_schema": {
            "name": "image_analysis",
            "schema": {
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "response": { "type": "string" },
                    "summary": { "type": "string" }
                },
                "required": ["response", "summary"]
            }
        }
    })
}

pub fn analyze_image_messages(image_base64: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(ANALYZE_IMAGE_SYSTEM),
        ChatMessage::user_parts(vec![
            ContentPart::Text {
                text: "Analyze this image. Return the JSON fields exactly.".to_string(),
            },
            ContentPart::ImageUrl {
                image_url: ImageUrl {
                    url: format!("data:image/jpeg;base64,{image_base64}"),
                },
            },
        ]),
    ]
}

// ---------------------------------------------------------------------------
// generate_reply
// ---------------------------------------------------------------------------

pub const GENERATE_REPLY_SYSTEM: &str = "\
You are generating a reply to a dating conversation or profile.

You will receive:
- summary: short context about what the other person said.
- mood: defines the tone (FLIRTY, CALM/DIVA, GENUINE or WITTY).

Use BOTH. Your reply must feel like a real 23-28 year old texting on a
dating app.

Hard rules:
- No motivational tone, no generic encouragement, no corporate language.
- Keep it socially realistic; slight boldness is good.
- Create a micro scenario when possible. Make it feel sendable.

Style rules:
- 1 sentence only. One reply only. No labels, no explanations, no
  advice framing, no meta commentary. Plain text only.
- Only these punctuation marks are allowed: . , ? ! '
- Do NOT use line breaks.";

pub fn generate_reply_messages(summary: &str, mood: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(GENERATE_REPLY_SYSTEM),
        ChatMessage::user(format!("Summary: {summary} | Mood: {mood}")),
    ]
}

// ---------------------------------------------------------------------------
// charm_reply
// ---------------------------------------------------------------------------

pub const CHARM_SYSTEM: &str = "\
You are Velora AI, an attraction and emotional dynamics mentor.

Your role: guide women toward natural desirability through confidence,
emotional intelligence, and secure energy.

Core philosophy:
- Desirability comes from self-value, not performance.
- Emotional steadiness over tactics.
- Never promote manipulation, games, or dishonesty.

Response logic:
- If the user provides a message and clearly wants a reply to send,
  generate a natural, human, sendable reply (1-2 sentences max), with
  no labels and no explanations.
- If the user asks for guidance or strategy, explain briefly how to
  respond, focused on mindset and emotional positioning. Do NOT write
  the exact message unless explicitly requested.

Behavior rules:
- No cliches, no motivational speeches, no toxic advice, no meta
  commentary. Keep language modern and natural.

Tone: confident, composed, elegant, emotionally aware.";

// ---------------------------------------------------------------------------
// wake
// ---------------------------------------------------------------------------

pub const WAKE_SYSTEM: &str = "\
You are delivering a short, direct wake-up talk that gets someone moving
on their goal right now.

Rules:
- 3 to 6 short sentences, plain text, no markdown, no lists.
- Wrap the one or two phrases that matter most in $...$ markers,
  e.g. $do it today$. Never nest markers.
- If a time remaining value is provided, begin your reply with that
  exact text, verbatim, before anything else.
- Grounded and energetic, never corporate, never a lecture.";

pub fn wake_messages(goal: &str, time_left: Option<&serde_json::Value>) -> Vec<ChatMessage> {
    let mut user = format!("Goal: {goal}");
    if let Some(value) = time_left {
        user.push_str("\nTime remaining: ");
        user.push_str(&render_time_left(value));
    }
    vec![ChatMessage::system(WAKE_SYSTEM), ChatMessage::user(user)]
}

/// The time-remaining field is free-form; strings pass through without
/// JSON quoting so the model can open with the exact literal.
fn render_time_left(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::ChatContent;

    #[test]
    fn wake_user_message_carries_goal_and_literal_time() {
        let time = serde_json::Value::String("2 hours 10 minutes".to_string());
        let messages = wake_messages("ship the release", Some(&time));
        assert_eq!(messages.len(), 2);
        match &messages[1].content {
            ChatContent::Text(text) => {
                assert!(text.contains("Goal: ship the release"));
                // Unquoted literal, exactly as the client sent it.
                assert!(text.contains("Time remaining: 2 hours 10 minutes"));
            }
            other => panic!("expected text content, got {other:?}"),
        }
    }

    #[test]
    fn wake_without_time_omits_the_line() {
        let messages = wake_messages("run 5k", None);
        match &messages[1].content {
            ChatContent::Text(text) => assert!(!text.contains("Time remaining")),
            other => panic!("expected text content, got {other:?}"),
        }
    }

    #[test]
    fn numeric_time_left_rendered_without_quotes() {
        let time = serde_json::json!(45);
        let messages = wake_messages("pack", Some(&time));
        match &messages[1].content {
            ChatContent::Text(text) => assert!(text.contains("Time remaining: 45")),
            other => panic!("expected text content, got {other:?}"),
        }
    }

    #[test]
    fn analyze_image_builds_data_url_part() {
        let messages = analyze_image_messages("QUJD");
        match &messages[1].content {
            ChatContent::Parts(parts) => match &parts[1] {
                ContentPart::ImageUrl { image_url } => {
                    assert_eq!(image_url.url, "data:image/jpeg;base64,QUJD");
                }
                other => panic!("expected image part, got {other:?}"),
            },
            other => panic!("expected parts, got {other:?}"),
        }
    }

    #[test]
    fn response_format_names_both_required_fields() {
        let format = analyze_image_response_format();
        let required = &format["json_schema"]["schema"]["required"];
        assert_eq!(required[0], "response");
        assert_eq!(required[1], "summary");
    }
}
