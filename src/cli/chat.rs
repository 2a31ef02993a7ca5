use std::io::{self, Write as _};
use std::time::Instant;

use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::chat::{HistoryStore, REVEAL_TICK, WordReveal, clear_history, run_turn};
use crate::core::AppConfig;
use crate::openai::OpenAiBackend;
use crate::session::{Session, UserRole};

const INSTRUCTIONS: &str = "\
📖 Instructions
- Type your question at the prompt.
- The AI will respond with detailed explanations and code examples when applicable.
- /typing toggles the live word-by-word reveal.
- /history reprints the conversation, /clear resets it.
- /logout returns to the login screen, /quit exits.";

const ABOUT: &str = "\
ℹ️ AI Data Science Tutor
Get answers to machine learning, data science, and AI-related questions
with examples and code snippets.";

pub async fn run() -> Result<()> {
    let config = AppConfig::from_env()?;
    let store = HistoryStore::new(&config.history_path);
    let backend = OpenAiBackend::new(&config);
    let mut session = Session::initialize(&store);
    let mut rl = DefaultEditor::new().expect("Editor failed");

    println!("🧠 AI Data Science Tutor");

    loop {
        // Every prompt is one interaction event: run the idle check
        // first, re-presenting the login gate when the session expired
        if session.check_timeout(Instant::now()) {
            println!("Session timed out after inactivity. Please log in again.");
        }
        if !session.logged_in {
            if !authenticate(&mut rl, &mut session)? {
                break;
            }
            continue;
        }

        let readline = rl.readline(">>> ");
        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                match line {
                    "/quit" | "/exit" => break,
                    "/help" => println!("{INSTRUCTIONS}"),
                    "/about" => println!("{ABOUT}"),
                    "/history" => print_history(&session),
                    "/clear" => {
                        clear_history(&mut session, &store)?;
                        println!("✅ Chat history cleared!");
                    }
                    "/typing" => {
                        session.live_typing = !session.live_typing;
                        println!(
                            "Live typing {}",
                            if session.live_typing { "on" } else { "off" }
                        );
                    }
                    "/logout" => session.logout(),
                    question => {
                        let outcome = run_turn(
                            &mut session,
                            &store,
                            &backend,
                            &config.system_message,
                            question,
                        )
                        .await?;
                        if let Some(notice) = &outcome.notice {
                            eprintln!("{notice}");
                        }
                        if session.live_typing {
                            render_live(&outcome.assistant_turn.text).await?;
                        } else {
                            println!("{}", outcome.assistant_turn.text);
                        }
                    }
                }
            }
            Err(ReadlineError::Interrupted) => break,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }

    Ok(())
}

/// Blocking login form: keeps asking until a non-empty username is
/// given. Returns false when the user aborts instead of logging in.
fn authenticate(rl: &mut DefaultEditor, session: &mut Session) -> Result<bool> {
    println!("🔑 Login to AI Data Science Tutor");
    loop {
        let username = match rl.readline("Enter your username: ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => return Ok(false),
            Err(err) => return Err(err.into()),
        };
        if username.trim().is_empty() {
            println!("Please enter your username to proceed.");
            continue;
        }

        let role = match prompt_role(rl)? {
            Some(role) => role,
            None => return Ok(false),
        };
        session.login(&username, role);
        println!("👋 Welcome, {} ({})", username.trim(), role);
        if let Some(banner) = role.banner() {
            println!("{banner}");
        }
        return Ok(true);
    }
}

fn prompt_role(rl: &mut DefaultEditor) -> Result<Option<UserRole>> {
    loop {
        let line = match rl.readline("Select role [User/Admin/Student/Employee]: ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let line = line.trim();
        if line.is_empty() {
            return Ok(Some(UserRole::User));
        }
        match line.parse::<UserRole>() {
            Ok(role) => return Ok(Some(role)),
            Err(err) => println!("{err}"),
        }
    }
}

/// Reveal an already-received reply word by word, one frame per tick.
async fn render_live(text: &str) -> Result<()> {
    let mut printed = 0;
    let mut ticks = tokio::time::interval(REVEAL_TICK);
    let mut stdout = io::stdout();
    for frame in WordReveal::new(text) {
        ticks.tick().await;
        write!(stdout, "{}", &frame[printed..])?;
        stdout.flush()?;
        printed = frame.len();
    }
    println!();
    Ok(())
}

fn print_history(session: &Session) {
    println!("📜 Chat History");
    for turn in session.history.iter() {
        println!("[{}] {} {}", turn.timestamp, turn.role.label(), turn.text);
    }
}
