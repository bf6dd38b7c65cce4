//! Interactive two-node chat workflow: greet, wait for a name, reply.
//!
//! The run loop owns the blocking read: the greet node returns
//! `Transition::AwaitInput`, this binary reads a line from stdin, writes it
//! into the state, and resumes. No model API needed.
//!
//! Run: `cargo run -p trellis-examples --example chat_repl`

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use trellis::{
    ChatState, FnNode, InputRequest, Message, RunOutcome, Transition, Workflow, END,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_config::load_and_apply("trellis", None)?;

    let mut workflow = Workflow::<ChatState>::new();
    workflow.add_node(
        "greet",
        Arc::new(FnNode::new(|mut state: ChatState| async move {
            state.push(Message::assistant("Hello! What's your name?"));
            Ok((
                state,
                Transition::AwaitInput(InputRequest::new("reply").with_prompt("Your name")),
            ))
        })),
    )?;
    workflow.add_node(
        "reply",
        Arc::new(FnNode::new(|mut state: ChatState| async move {
            let name = state.take_input().unwrap_or_else(|| "stranger".to_string());
            state.push(Message::assistant(format!("Nice to meet you, {}!", name)));
            Ok((state, Transition::End))
        })),
    )?;
    workflow
        .add_edge("greet", "reply")
        .add_edge("reply", END)
        .set_entry("greet");
    let compiled = workflow.compile()?;

    let mut outcome = compiled.invoke(ChatState::default()).await?;
    loop {
        match outcome {
            RunOutcome::Finished(state) => {
                for message in &state.messages {
                    println!("{}: {}", message.role(), message.content());
                }
                break;
            }
            RunOutcome::Suspended { mut state, request } => {
                if let Some(last) = state.messages.last() {
                    println!("{}: {}", last.role(), last.content());
                }
                match &request.prompt {
                    Some(prompt) => print!("{}> ", prompt),
                    None => print!("> "),
                }
                io::stdout().flush()?;

                let mut line = String::new();
                io::stdin().lock().read_line(&mut line)?;
                state.supply_input(line.trim().to_string());

                outcome = compiled.resume(state, request.resume).await?;
            }
        }
    }

    Ok(())
}
