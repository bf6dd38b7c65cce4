//! Load prompt YAML files from a directory, with embedded defaults.
//!
//! **Canonical source**: default prompt text lives in `trellis/prompts/*.yaml`,
//! embedded at compile time. A directory (argument, `PROMPTS_DIR` env, or
//! `./prompts`) overrides per field, and `TRELLIS_SYSTEM_PROMPT` overrides
//! the chat system prompt last.

use std::path::Path;

use serde::Deserialize;

/// Embedded default YAML (canonical source: `trellis/prompts/*.yaml`).
const EMBED_CHAT: &str = include_str!("../../prompts/chat.yaml");
const EMBED_QA: &str = include_str!("../../prompts/qa.yaml");

/// Names of YAML files under the prompts directory.
const CHAT_FILE: &str = "chat.yaml";
const QA_FILE: &str = "qa.yaml";

/// Default directory name when `PROMPTS_DIR` is not set.
const DEFAULT_PROMPTS_DIR: &str = "prompts";

/// Error when loading prompts (missing dir, unreadable file, invalid YAML).
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("prompts directory not found or not readable: {0}")]
    DirNotFound(String),
    #[error("failed to read prompts file {path}: {message}")]
    ReadFile { path: String, message: String },
    #[error("failed to parse YAML in {path}: {message}")]
    ParseYaml { path: String, message: String },
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ChatPromptsFile {
    system_prompt: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct QaPromptsFile {
    system_prompt: Option<String>,
    answer_template: Option<String>,
}

/// Chat workflow prompts with all defaults applied.
#[derive(Debug, Clone)]
pub struct ChatPrompts {
    /// System prompt for conversational chains and workflows.
    pub system_prompt: String,
}

/// Retrieval-QA prompts with all defaults applied.
#[derive(Debug, Clone)]
pub struct QaPrompts {
    /// System prompt framing the answer style.
    pub system_prompt: String,
    /// Answer template with `{context}` and `{question}` placeholders.
    pub answer_template: String,
}

/// Prompt set used by chains and the retrieval pipeline.
#[derive(Debug, Clone)]
pub struct PromptLibrary {
    pub chat: ChatPrompts,
    pub qa: QaPrompts,
}

/// Returns the directory to load from: `dir` if `Some`, else `PROMPTS_DIR`
/// env, else `./prompts`.
fn prompts_dir(dir: Option<&Path>) -> std::path::PathBuf {
    dir.map(std::path::PathBuf::from).unwrap_or_else(|| {
        std::env::var("PROMPTS_DIR")
            .ok()
            .map(std::path::PathBuf::from)
            .unwrap_or_else(|| std::path::PathBuf::from(DEFAULT_PROMPTS_DIR))
    })
}

fn parse_yaml<T>(content: &str, path: &str) -> Result<T, LoadError>
where
    T: for<'de> Deserialize<'de>,
{
    serde_yaml::from_str(content).map_err(|e| LoadError::ParseYaml {
        path: path.to_string(),
        message: e.to_string(),
    })
}

/// Tries to read and parse a YAML file into `T`. Missing file returns `None`.
fn read_yaml_file<T>(dir: &Path, name: &str) -> Result<Option<T>, LoadError>
where
    T: for<'de> Deserialize<'de>,
{
    let path = dir.join(name);
    let content = match std::fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) => {
            if e.kind() == std::io::ErrorKind::NotFound {
                return Ok(None);
            }
            return Err(LoadError::ReadFile {
                path: path.display().to_string(),
                message: e.to_string(),
            });
        }
    };
    parse_yaml(&content, &path.display().to_string()).map(Some)
}

/// Merges file values over embedded defaults and applies the env override.
fn resolve(chat: ChatPromptsFile, qa: QaPromptsFile) -> Result<PromptLibrary, LoadError> {
    let embedded_chat: ChatPromptsFile = parse_yaml(EMBED_CHAT, "<embedded chat.yaml>")?;
    let embedded_qa: QaPromptsFile = parse_yaml(EMBED_QA, "<embedded qa.yaml>")?;

    let mut chat_system = chat
        .system_prompt
        .or(embedded_chat.system_prompt)
        .unwrap_or_default();
    if let Ok(s) = std::env::var("TRELLIS_SYSTEM_PROMPT") {
        chat_system = s;
    }

    Ok(PromptLibrary {
        chat: ChatPrompts {
            system_prompt: chat_system,
        },
        qa: QaPrompts {
            system_prompt: qa
                .system_prompt
                .or(embedded_qa.system_prompt)
                .unwrap_or_default(),
            answer_template: qa
                .answer_template
                .or(embedded_qa.answer_template)
                .unwrap_or_default(),
        },
    })
}

/// Prompt library built purely from the embedded defaults (plus env override).
pub fn default_from_embedded() -> Result<PromptLibrary, LoadError> {
    resolve(ChatPromptsFile::default(), QaPromptsFile::default())
}

/// Loads prompts from a directory: reads `chat.yaml` and `qa.yaml`, falls back
/// to embedded defaults per field, and applies `TRELLIS_SYSTEM_PROMPT`.
///
/// If `dir` is `None`, uses `PROMPTS_DIR` env or `./prompts`. Missing files
/// keep the embedded defaults; only a missing directory or a present file
/// that fails to read or parse is an error.
pub fn load(dir: Option<&Path>) -> Result<PromptLibrary, LoadError> {
    let base = prompts_dir(dir);
    if !base.is_dir() {
        return Err(LoadError::DirNotFound(base.display().to_string()));
    }
    let chat = read_yaml_file::<ChatPromptsFile>(&base, CHAT_FILE)?.unwrap_or_default();
    let qa = read_yaml_file::<QaPromptsFile>(&base, QA_FILE)?.unwrap_or_default();
    resolve(chat, qa)
}

/// Like [`load`], but a missing directory falls back to the embedded defaults
/// instead of failing.
pub fn load_or_default(dir: Option<&Path>) -> Result<PromptLibrary, LoadError> {
    match load(dir) {
        Err(LoadError::DirNotFound(_)) => default_from_embedded(),
        other => other,
    }
}
