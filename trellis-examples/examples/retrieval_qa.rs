//! Split a document, index the chunks, answer a question from retrieval.
//!
//! Requires `OPENAI_API_KEY` for both embeddings and the chat call.
//!
//! Run: `cargo run -p trellis-examples --example retrieval_qa`

use std::sync::Arc;

use trellis::{
    load_prompts_or_default, CharacterSplitter, OpenAiChat, OpenAiEmbedder, PromptTemplate,
    RetrievalQa, VectorIndex,
};

const DOCUMENT: &str = "\
Honey bees are social insects that live in colonies of up to sixty thousand \
workers, a single queen, and a few hundred drones. Workers divide labor by \
age: young bees clean cells and feed larvae, middle-aged bees build comb and \
store food, and the oldest bees forage for nectar and pollen.

A foraging bee communicates the location of a good flower patch with the \
waggle dance. The angle of the dance relative to vertical encodes the \
direction of the patch relative to the sun, and the duration of the waggle \
phase encodes the distance.

Colonies survive winter by clustering around the queen and shivering their \
flight muscles to generate heat, consuming the honey stored during summer. \
A healthy colony needs roughly twenty kilograms of honey to reach spring.";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_config::load_and_apply("trellis", None)?;
    let prompts = load_prompts_or_default(None)?;

    let splitter = CharacterSplitter::new(400, 80)?;
    let chunks = splitter.split(DOCUMENT);
    println!("indexed {} chunks", chunks.len());

    let embedder = Arc::new(OpenAiEmbedder::new("text-embedding-3-small"));
    let index = Arc::new(VectorIndex::new(embedder));
    index.add_chunks("bees", &chunks).await?;

    let qa = RetrievalQa::new(
        index,
        Arc::new(OpenAiChat::new("gpt-4o-mini").with_temperature(0.0)),
        PromptTemplate::new(prompts.qa.answer_template),
    )
    .with_system(prompts.qa.system_prompt)
    .with_top_k(2);

    let question = "How does a bee tell the others where flowers are?";
    let answer = qa.ask(question).await?;

    println!("Q: {}", question);
    println!("A: {}", answer.text);
    println!("sources: {:?}", answer.sources);
    if let Some(usage) = answer.usage {
        println!("tokens: {} total", usage.total_tokens);
    }

    Ok(())
}
