//! Courier command-line front end.
//!
//! Each invocation builds a [`Session`] over the REST backend and the local
//! file system, runs one command and prints the result.

pub mod cli;
mod render;

use std::io::{self, Write};
use std::time::Duration;

use courier_application::{
    Action, ApplicationError, AuthToken, BackendError, Notice, Resource, Session,
};
use courier_domain::EntityId;
use courier_infrastructure::{
    ClientConfig, ConfigError, RestBackend, SerializationError, SystemClock, TokioFileStore,
    to_json_stable,
};

pub use cli::{Cli, Command, RequestArgs};
use render::Painter;

type CliSession = Session<RestBackend, TokioFileStore, SystemClock>;

/// Errors that end a command.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Bad backend URL.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The HTTP client could not be created.
    #[error("cannot create HTTP client: {0}")]
    Client(#[from] BackendError),

    /// The action failed; the message is the user-facing notice.
    #[error("{0}")]
    Action(Notice),

    /// No environment with that name.
    #[error("unknown environment `{0}`")]
    UnknownEnvironment(String),

    /// Output could not be encoded.
    #[error(transparent)]
    Serialization(#[from] SerializationError),

    /// Output could not be written.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl From<Notice> for CliError {
    fn from(notice: Notice) -> Self {
        Self::Action(notice)
    }
}

/// Runs one command, writing its output to `out`.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the action fails.
pub async fn run(cli: Cli, out: &mut impl Write) -> Result<(), CliError> {
    let config = ClientConfig::new(&cli.backend_url)?
        .with_timeout(Duration::from_secs(cli.timeout_secs));
    let backend = RestBackend::new(&config)?;
    let token = cli.token.and_then(AuthToken::new);
    let painter = Painter::new(cli.color);

    let mut session =
        Session::new(backend, TokioFileStore::new(), SystemClock::new()).with_token(token);

    match cli.command {
        Command::Resolve(args) => {
            open_request(&mut session, &args).await?;
            let resolved = session.preview()?;
            write!(out, "{}", to_json_stable(&resolved)?)?;
        }
        Command::Send(args) => {
            open_request(&mut session, &args).await?;
            let sent = session.send().await;
            render::response(out, session.response(), painter)?;
            sent?;
        }
        Command::Save { file, collection } => {
            session.import(&file).await?;
            session.open_collection(&EntityId::new(collection)).await?;
            session.save().await?;
            print_notice(out, &session)?;
        }
        Command::History => {
            require_sign_in(&session, Action::Load(Resource::History))?;
            session.refresh_history().await?;
            render::history(out, session.history().unwrap_or_default(), painter)?;
        }
        Command::DeleteHistory { id } => {
            session.delete_history(&EntityId::new(id)).await?;
            render::history(out, session.history().unwrap_or_default(), painter)?;
        }
        Command::Collections => {
            require_sign_in(&session, Action::Load(Resource::Collections))?;
            session.load_collections().await?;
            render::collections(out, session.collections().unwrap_or_default())?;
        }
        Command::CreateCollection { name } => {
            require_sign_in(&session, Action::Create(Resource::Collections))?;
            session.create_collection(&name).await?;
            render::collections(out, session.collections().unwrap_or_default())?;
        }
        Command::DeleteCollection { id } => {
            session.delete_collection(&EntityId::new(id)).await?;
            render::collections(out, session.collections().unwrap_or_default())?;
        }
        Command::Items { collection } => {
            require_sign_in(&session, Action::Load(Resource::CollectionItems))?;
            session.open_collection(&EntityId::new(collection)).await?;
            render::items(out, session.collection_items(), painter)?;
        }
        Command::DeleteItem { id } => {
            let id = EntityId::new(id);
            session.delete_collection_item(&id).await?;
            writeln!(out, "Deleted {id}")?;
        }
        Command::Envs => {
            require_sign_in(&session, Action::Load(Resource::Environments))?;
            session.load_environments().await?;
            render::environments(out, session.environments().unwrap_or_default())?;
        }
        Command::CreateEnv { name, variables } => {
            session.create_environment(&name, &variables).await?;
            print_notice(out, &session)?;
        }
        Command::Export { file, output } => {
            session.import(&file).await?;
            session.export(&output).await?;
            print_notice(out, &session)?;
        }
        Command::Import { file } => {
            session.import(&file).await?;
            write!(out, "{}", to_json_stable(session.draft().template())?)?;
        }
    }
    Ok(())
}

/// Loads the request file into the draft and selects the environment.
async fn open_request(session: &mut CliSession, args: &RequestArgs) -> Result<(), CliError> {
    session.import(&args.file).await?;
    if let Some(name) = &args.env {
        select_environment(session, name).await?;
    }
    Ok(())
}

async fn select_environment(session: &mut CliSession, name: &str) -> Result<(), CliError> {
    require_sign_in(session, Action::Load(Resource::Environments))?;
    session.load_environments().await?;

    let id = session
        .environment_named(name)
        .map(|env| env.id.clone())
        .ok_or_else(|| CliError::UnknownEnvironment(name.to_string()))?;
    session.select_environment(Some(&id));
    Ok(())
}

fn require_sign_in(session: &CliSession, action: Action) -> Result<(), CliError> {
    if session.is_signed_in() {
        Ok(())
    } else {
        Err(Notice::error(ApplicationError::NotSignedIn.user_message(action)).into())
    }
}

fn print_notice(out: &mut impl Write, session: &CliSession) -> io::Result<()> {
    match session.notice() {
        Some(notice) => writeln!(out, "{notice}"),
        None => Ok(()),
    }
}
