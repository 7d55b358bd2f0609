//! The LLM double: an OpenAI-shaped surface answering `GET /models`
//! with a fixed model list and `POST .../completions` with a canned
//! completion derived from the prompt.
//!
//! The completion's choice content is a JSON string that itself encodes
//! `{"answer": ..., "commands": [...]}`. Clients under test parse that
//! inner document separately, so the double encoding is the contract.

use serde::{Deserialize, Serialize};

use crate::http::{Request, Response};

#[derive(Clone, Debug, Deserialize)]
pub struct ChatCompletionRequest {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub input: Vec<InputMessage>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct InputMessage {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatCompletionResponse {
    pub id: String,
    pub object: String,
    pub model: String,
    pub choices: Vec<Choice>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChoiceMessage {
    pub role: String,
    pub content: String,
}

/// The inner document carried as a JSON string in the choice content.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MockAnswer {
    pub answer: String,
    pub commands: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModelList {
    pub object: String,
    pub data: Vec<ModelEntry>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModelEntry {
    pub id: String,
    pub object: String,
}

pub fn model_list() -> ModelList {
    ModelList {
        object: "list".to_string(),
        data: vec![
            ModelEntry {
                id: "test-model".to_string(),
                object: "model".to_string(),
            },
            ModelEntry {
                id: "mock-model".to_string(),
                object: "model".to_string(),
            },
        ],
    }
}

/// Prompt rules checked top to bottom, first match wins. The file-listing
/// rule shadows the disk-usage rule when both needles appear.
const PROMPT_RULES: &[(&str, &str, &str)] = &[
    ("list files", "To list files by size, use: ls -lhS", "ls -lhS"),
    ("disk usage", "Show disk usage with du command", "du -sh *"),
];

const PROMPT_PREVIEW_CHARS: usize = 50;

/// Compute the canned answer for a prompt. Pure; matching is
/// case-insensitive substring containment.
pub fn synthesize(prompt: &str) -> MockAnswer {
    let lowered = prompt.to_lowercase();
    for (needle, answer, command) in PROMPT_RULES {
        if lowered.contains(needle) {
            return MockAnswer {
                answer: (*answer).to_string(),
                commands: vec![(*command).to_string()],
            };
        }
    }

    let preview: String = prompt.chars().take(PROMPT_PREVIEW_CHARS).collect();
    MockAnswer {
        answer: format!("Mock response to: {}...", preview),
        commands: Vec::new(),
    }
}

// The second input entry is the user turn; anything shorter reads as an
// empty prompt rather than an error.
fn extract_prompt(request: &ChatCompletionRequest) -> &str {
    request
        .input
        .get(1)
        .and_then(|message| message.content.as_deref())
        .unwrap_or("")
}

/// Parse a completion request body and build the canned response.
///
/// # Errors
/// Returns a description when the body is not valid JSON; the router
/// maps it to the 500 envelope.
pub fn completion(body: &[u8]) -> Result<ChatCompletionResponse, String> {
    let request: ChatCompletionRequest =
        serde_json::from_slice(body).map_err(|err| err.to_string())?;

    let answer = synthesize(extract_prompt(&request));
    let content = serde_json::to_string(&answer).map_err(|err| err.to_string())?;

    Ok(ChatCompletionResponse {
        id: "mock-response".to_string(),
        object: "chat.completion".to_string(),
        model: request.model.unwrap_or_else(|| "test-model".to_string()),
        choices: vec![Choice {
            message: ChoiceMessage {
                role: "assistant".to_string(),
                content,
            },
        }],
    })
}

/// Route one request for the LLM double. Unmatched routes answer 404
/// with an empty body.
pub fn route(request: &Request) -> Response {
    match request.method.as_str() {
        "GET" if request.path == "/models" || request.path == "/v1/models" => {
            Response::ok_json(&model_list())
        }
        "POST"
            if request.path.contains("/chat/completions")
                || request.path.contains("/completions") =>
        {
            match completion(&request.body) {
                Ok(response) => Response::ok_json(&response),
                Err(message) => Response::error(&message),
            }
        }
        _ => Response::not_found(""),
    }
}
