//! One function per screen. Each resolves its route against the session first, so logged-out
//! users are sent to the login screen and students never see the dashboard.

use anyhow::{bail, Context, Result};
use libportal::catalog::QuizCatalog;
use libportal::dashboard::Dashboard;
use libportal::error::ExamError;
use libportal::exam::{ExamRoute, ExamSession};
use libportal::results::ResultsView;
use libportal::route::Route;
use libportal::session::{SessionStorage, SessionStore, UserSession};
use portal_api::quiz_selector::QuizSelector;
use portal_api::types::{QuestionId, Role, UserId};
use portal_api::PortalApi;
use tokio::io::AsyncBufRead;
use tracing::{debug, info};

use crate::prompt::{parse_choice, ExamCommand, Prompt};
use crate::render::{QuestionCard, QuizList, ResultsReport};

const LOGIN_HINT: &str = "You are not logged in. Log in with `exam-portal login <id> <role>`.";

/// The screen to show for `route`, telling the user when it isn't the one they asked for.
fn enter(route: Route, session: &UserSession) -> Route {
    let resolved = route.clone().resolve(session);
    match &resolved {
        resolved if *resolved == route => debug!(%route, "entering screen"),
        Route::Login => println!("{LOGIN_HINT}"),
        resolved => println!("{route} is for instructors only, showing {resolved} instead."),
    }
    resolved
}

pub async fn login<S: SessionStorage>(
    api: &impl PortalApi,
    sessions: &mut SessionStore<S>,
    id: UserId,
    role: Role,
) -> Result<()> {
    println!("Logging in...");
    let session = sessions.log_in(api, id, role).await.context("could not log in")?;
    info!(id = %session.id(), "logged in");
    println!("Login successful!");

    let session = sessions.session();
    match Route::landing(session) {
        Route::Dashboard => dashboard(api, session).await,
        _ => quizzes(api, session, None).await,
    }
}

pub fn logout<S: SessionStorage>(sessions: &mut SessionStore<S>) -> Result<()> {
    sessions
        .clear_user()
        .context("could not remove stored session")?;
    println!("Logged out.");
    Ok(())
}

pub fn whoami(session: &UserSession) {
    match (session.user_id(), session.role()) {
        (Some(id), Some(role)) => {
            print!("{id} ({role})");
            match session.name() {
                Some(name) => println!(" {name}"),
                None => println!(),
            }
        }
        (Some(id), None) => println!("{id}"),
        (None, _) => println!("Not logged in."),
    }
}

pub async fn quizzes(
    api: &impl PortalApi,
    session: &UserSession,
    filter: Option<&str>,
) -> Result<()> {
    if enter(Route::Catalog, session) != Route::Catalog {
        return Ok(());
    }

    let catalog = QuizCatalog::fetch(api, session)
        .await
        .context("Error fetching quizzes")?;
    println!("{}", QuizList::new(catalog.filter(filter.unwrap_or_default())));
    Ok(())
}

pub async fn results(api: &impl PortalApi, session: &UserSession) -> Result<()> {
    if enter(Route::Results, session) != Route::Results {
        return Ok(());
    }

    let view = ResultsView::fetch(api, session)
        .await
        .context("Error fetching results")?;
    println!("{}", ResultsReport::new(&view));
    Ok(())
}

pub async fn dashboard(api: &impl PortalApi, session: &UserSession) -> Result<()> {
    match enter(Route::Dashboard, session) {
        Route::Dashboard => {
            if let Some(dashboard) = Dashboard::for_session(session) {
                println!("{dashboard}");
            }
            Ok(())
        }
        Route::Catalog => quizzes(api, session, None).await,
        _ => Ok(()),
    }
}

/// Finds the quiz the user named, then runs the exam for it interactively.
pub async fn exam<R: AsyncBufRead + Unpin>(
    api: &impl PortalApi,
    session: &UserSession,
    selector: QuizSelector,
    prompt: &mut Prompt<R>,
) -> Result<()> {
    if enter(Route::Catalog, session) != Route::Catalog {
        return Ok(());
    }

    let catalog = QuizCatalog::fetch(api, session)
        .await
        .context("Error fetching quizzes")?;
    let quiz = catalog
        .select(&selector)
        .with_context(|| format!("no quiz matches {:?}", selector.as_str()))?;

    match enter(Route::Exam(ExamRoute::from(quiz)), session) {
        Route::Exam(route) => take_exam(api, session, route, prompt).await,
        _ => Ok(()),
    }
}

pub async fn take_exam<R: AsyncBufRead + Unpin>(
    api: &impl PortalApi,
    session: &UserSession,
    route: ExamRoute,
    prompt: &mut Prompt<R>,
) -> Result<()> {
    let mut exam = ExamSession::new(route, session)?;

    println!("Loading exam questions...");
    if let Err(err) = exam.load(api).await {
        if let Some(failure) = exam.failure() {
            println!("{failure}");
        }
        println!("Back to the quiz list with `exam-portal quizzes`.");
        return Err(err).context("could not load exam");
    }

    println!("\n{}\nAnswer all questions before submitting\n", exam.route().name());
    let questions = exam.questions().to_vec();
    for (i, question) in questions.iter().enumerate() {
        println!("{}", QuestionCard::new(i + 1, question, exam.selection()));
        let option = loop {
            let Some(input) = prompt.ask("Answer: ").await? else {
                bail!("input closed, nothing was submitted");
            };
            match parse_choice(&input, question.options().len()) {
                Some(option) => break option,
                None => println!("Pick an option from 1 to {}.", question.options().len()),
            }
        };
        exam.select(question.id(), &question.options()[option])?;
        println!();
    }

    println!("Change an answer with `<question> <option>`, `show` to review, `submit` or `quit`.");
    loop {
        let Some(input) = prompt.ask("> ").await? else {
            bail!("input closed, nothing was submitted");
        };
        match ExamCommand::parse(&input) {
            Some(ExamCommand::Answer { question, option }) => {
                match pick(&exam, question, option) {
                    Some((question, option)) => {
                        exam.select(question, &option)?;
                    }
                    None => println!("No such question or option."),
                }
            }
            Some(ExamCommand::Show) => {
                for (i, question) in exam.questions().iter().enumerate() {
                    println!("{}\n", QuestionCard::new(i + 1, question, exam.selection()));
                }
            }
            Some(ExamCommand::Submit) => {
                if !exam.can_submit() {
                    println!(
                        "Answer all questions before submitting ({}/{} answered).",
                        exam.answered(),
                        exam.questions().len()
                    );
                    continue;
                }
                match exam.submit(api).await {
                    Ok(()) => {
                        println!("Exam submitted.\n");
                        return quizzes(api, session, None).await;
                    }
                    Err(ExamError::Api(err)) => {
                        debug!(%err, "submit failed");
                        if let Some(failure) = exam.failure() {
                            println!("{failure}");
                        }
                        exam.resume()?;
                    }
                    Err(err) => return Err(err.into()),
                }
            }
            Some(ExamCommand::Quit) => {
                println!("Left the exam, nothing was submitted.");
                return Ok(());
            }
            None => println!("Unknown command."),
        }
    }
}

fn pick(exam: &ExamSession, question: usize, option: usize) -> Option<(QuestionId, String)> {
    let question = exam.questions().get(question.checked_sub(1)?)?;
    let option = question.options().get(option.checked_sub(1)?)?;
    Some((question.id(), option.clone()))
}
