//! One prompt-template chain against the OpenAI Chat Completions API.
//!
//! Requires `OPENAI_API_KEY` (via environment, `.env`, or
//! `~/.config/trellis/config.toml`).
//!
//! Run: `cargo run -p trellis-examples --example prompt_chain`

use std::collections::HashMap;
use std::sync::Arc;

use trellis::{LlmChain, OpenAiChat, PromptTemplate};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_config::load_and_apply("trellis", None)?;

    let model = Arc::new(
        OpenAiChat::new("gpt-4o-mini")
            .with_temperature(0.2)
            .with_top_p(0.9),
    );
    let template = PromptTemplate::new("Explain {topic} in one paragraph for a {audience}.");
    let chain = LlmChain::new(model, template).with_system("You are a concise tutor.");

    let vars = HashMap::from([
        ("topic".to_string(), "vector embeddings".to_string()),
        ("audience".to_string(), "beginner".to_string()),
    ]);
    let output = chain.invoke(&vars).await?;

    println!("{}", output.text);
    if let Some(usage) = output.usage {
        println!(
            "tokens: {} in, {} out, {} total",
            usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
        );
    }

    Ok(())
}
