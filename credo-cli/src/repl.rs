//! Interactive REPL loop: read stdin, run one engine step, print the reply, repeat
//! until EOF or quit. The engine never returns an error; every failure arrives as
//! user-visible text.

use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};

use credo::{AssessmentEngine, Session};

/// Runs the loop: prompt, read line, step the session, print.
///
/// Exits on EOF (Ctrl+D) or `quit`/`exit`/`/quit`. Blank lines are skipped without
/// consuming a turn.
pub async fn run(engine: &AssessmentEngine) -> Result<(), Box<dyn std::error::Error>> {
    let mut reader = BufReader::new(tokio::io::stdin()).lines();
    let mut session = Session::new();

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let line = match reader.next_line().await? {
            None => break,
            Some(s) if s.trim().is_empty() => continue,
            Some(s) if is_quit_command(&s) => break,
            Some(s) => s,
        };

        let (next, reply) = engine.step(session, &line).await;
        session = next;
        println!("{reply}");
    }

    println!("Bye.");
    Ok(())
}

fn is_quit_command(s: &str) -> bool {
    let lower = s.trim().to_lowercase();
    matches!(lower.as_str(), "quit" | "exit" | "/quit")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quit_commands_match_case_insensitively() {
        for cmd in ["quit", "QUIT", " exit ", "/quit"] {
            assert!(is_quit_command(cmd), "{cmd:?} should quit");
        }
    }

    #[test]
    fn ordinary_answers_do_not_quit() {
        for input in ["25", "rent", "yes", "what is apr?"] {
            assert!(!is_quit_command(input));
        }
    }
}
