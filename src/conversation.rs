use std::io::{self, Write};
use std::time::Duration;
use anyhow::Result;
use colored::*;

use crate::advisor::simulate_voice_capture;
use crate::ai_provider::TextGenerator;
use crate::chat::ChatSession;

fn print_reply<G: TextGenerator>(session: &ChatSession<G>) {
    if let Some(reply) = session.messages().last() {
        println!("{} {}", "HealthWatch:".green().bold(), reply.content);
    }

    let matched = session.matched_symptoms();
    if !matched.is_empty() {
        let names: Vec<&str> = matched.iter().map(|s| s.name.as_str()).collect();
        let plural = if matched.len() > 1 { "s" } else { "" };
        println!(
            "{}",
            format!("  └─ {} symptom{} identified: {}", matched.len(), plural, names.join(", ")).dimmed()
        );
    }
}

pub async fn single_turn<G: TextGenerator>(mut session: ChatSession<G>, message: &str) -> Result<()> {
    println!("{}: {}", "You".cyan(), message);
    if session.send(message).await.is_some() {
        print_reply(&session);
    }
    Ok(())
}

pub async fn handle_conversation<G: TextGenerator>(mut session: ChatSession<G>, voice_delay: Duration) -> Result<()> {
    if let Some(welcome) = session.messages().first() {
        println!("{} {}", "HealthWatch:".green().bold(), welcome.content);
    }
    println!("{}", "Type your health concern and press Enter.".yellow());
    println!("{}", "Commands: /voice, /history. Type 'exit', 'quit', or 'bye' to end.".yellow());
    println!("{}", "---".dimmed());

    loop {
        print!("{} ", "You:".cyan().bold());
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        if matches!(input.to_lowercase().as_str(), "exit" | "quit" | "bye") {
            println!("{}", "Take care! 👋".green());
            break;
        }

        let message = match input {
            "" => continue,
            "/history" => {
                for message in session.messages() {
                    println!(
                        "  {} [{:?}] {}",
                        message.timestamp.format("%H:%M").to_string().dimmed(),
                        message.sender,
                        message.content
                    );
                }
                continue;
            }
            "/voice" => {
                println!("{}", "Listening...".yellow());
                let transcript = simulate_voice_capture(voice_delay).await;
                println!("{} {}", "Voice captured:".green(), transcript);
                transcript
            }
            other => other.to_string(),
        };

        println!("{}", "…".dimmed());
        session.send(&message).await;
        print_reply(&session);
        println!();
    }

    Ok(())
}
