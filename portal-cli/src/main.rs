use anyhow::{Context, Result};
use app_utils::{init_from_env, init_tracing, InitFromEnv};
use clap::{arg, command, value_parser, ArgMatches, Command};
use portal_api::quiz_selector::QuizSelector;
use portal_api::types::{Role, UserId};
use portal_cli::commands;
use portal_cli::prompt::Prompt;
use tracing::debug;

fn cli() -> Command {
    command!()
        .subcommand_required(true)
        .subcommand(
            Command::new("login")
                .about("Log in and open your landing screen")
                .arg(arg!(<ID> "Your student or instructor id"))
                .arg(
                    arg!(<ROLE> "student or instructor")
                        .value_parser(value_parser!(Role)),
                ),
        )
        .subcommand(Command::new("logout").about("Forget the stored session"))
        .subcommand(Command::new("whoami").about("Show who is logged in"))
        .subcommand(
            Command::new("quizzes")
                .about("List the quizzes available to you")
                .arg(arg!(-f --filter <TEXT> "Only show quizzes whose name contains this")),
        )
        .subcommand(
            Command::new("exam")
                .about("Take an exam, answering on stdin")
                .arg(arg!(<QUIZ> "Quiz id or name")),
        )
        .subcommand(Command::new("results").about("Show your past exam results"))
        .subcommand(Command::new("dashboard").about("Instructor dashboard"))
}

fn required<'a>(matches: &'a ArgMatches, id: &str) -> Result<&'a String> {
    matches
        .get_one::<String>(id)
        .with_context(|| format!("missing argument {id}"))
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let matches = cli().get_matches();

    let InitFromEnv {
        client,
        mut sessions,
        ..
    } = init_from_env()?;
    debug!(session = ?sessions.session(), "initialized");

    match matches.subcommand() {
        Some(("login", args)) => {
            let id = UserId::new(required(args, "ID")?.trim().to_owned());
            let role = *args.get_one::<Role>("ROLE").context("missing argument ROLE")?;
            commands::login(&client, &mut sessions, id, role).await
        }
        Some(("logout", _)) => commands::logout(&mut sessions),
        Some(("whoami", _)) => {
            commands::whoami(sessions.session());
            Ok(())
        }
        Some(("quizzes", args)) => {
            let filter = args.get_one::<String>("filter").map(String::as_str);
            commands::quizzes(&client, sessions.session(), filter).await
        }
        Some(("exam", args)) => {
            let selector = QuizSelector::new(required(args, "QUIZ")?.clone());
            commands::exam(&client, sessions.session(), selector, &mut Prompt::stdin()).await
        }
        Some(("results", _)) => commands::results(&client, sessions.session()).await,
        Some(("dashboard", _)) => commands::dashboard(&client, sessions.session()).await,
        _ => unreachable!("subcommand_required"),
    }
}
