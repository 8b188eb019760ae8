mod storage;
mod transport;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use ledger_client::config::{API_BASE_URL_ENV, ClientConfig, DEFAULT_API_BASE_URL};
use ledger_client::net::api::{ApiClient, ApiError};
use ledger_client::net::types::{Certificate, CertificateRequest, User};
use ledger_client::pages::dashboard::{DashboardError, DashboardState, load_dashboard};
use ledger_client::pages::issue::submit_issue;
use ledger_client::pages::login::{LoginForm, submit_login};
use ledger_client::pages::register::{RegisterForm, submit_register};
use ledger_client::pages::verify::{VerificationOutcome, submit_verify};
use ledger_client::state::session::SessionStore;
use ledger_client::state::toast::Toast;
use ledger_client::util::guard::{
    DASHBOARD_PATH, GuardDecision, HOME_PATH, ISSUE_PATH, LOGIN_PATH, REGISTER_PATH, RouteGuard, VERIFY_PATH,
};
use ledger_client::util::navigate::RecordingNavigator;
use serde::Serialize;
use serde_json::json;
use tracing_subscriber::EnvFilter;

use crate::storage::FileStorage;
use crate::transport::ReqwestTransport;

const SESSION_FILE_ENV: &str = "CERTLEDGER_SESSION_FILE";
const PASSWORD_ENV: &str = "CERTLEDGER_PASSWORD";
const DEFAULT_LOG_FILTER: &str = "warn";

type Client = ApiClient<ReqwestTransport, FileStorage>;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{route} requires a login; run `{hint}` first")]
    LoginRequired { route: String, hint: &'static str },
    #[error("http client setup failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{0}")]
    Api(#[from] ApiError),
    #[error("{0}")]
    Failed(Toast),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "certledger", about = "Issue and verify ledger-backed certificates")]
struct Cli {
    #[arg(long, env = API_BASE_URL_ENV, default_value = DEFAULT_API_BASE_URL)]
    base_url: String,

    /// Session file; defaults to `$HOME/.certledger/session.json`.
    #[arg(long, env = SESSION_FILE_ENV)]
    session_file: Option<PathBuf>,

    /// Print results as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and store the session.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = PASSWORD_ENV, hide_env_values = true)]
        password: String,
    },
    /// Create an account. Does not log in.
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = PASSWORD_ENV, hide_env_values = true)]
        password: String,
        /// Defaults to `--password`.
        #[arg(long)]
        confirm_password: Option<String>,
    },
    Logout,
    Whoami,
    /// Issue a certificate as the logged-in user.
    Issue(IssueArgs),
    /// Look up one certificate by ID.
    Show { id: String },
    /// Verify a certificate by ID, or by ledger hash (`0x...`).
    Verify { input: String },
    /// Certificates you issued and received.
    Dashboard {
        #[arg(long)]
        search: Option<String>,
    },
    /// Every certificate on the ledger.
    List,
}

#[derive(Args, Debug)]
struct IssueArgs {
    #[arg(long)]
    recipient_name: String,
    #[arg(long)]
    recipient_email: String,
    #[arg(long = "title")]
    certificate_title: String,
    /// Calendar date, e.g. 2024-05-01.
    #[arg(long)]
    issue_date: String,
    #[arg(long)]
    issuer_name: String,
    #[arg(long)]
    description: String,
}

impl From<IssueArgs> for CertificateRequest {
    fn from(args: IssueArgs) -> Self {
        Self {
            recipient_name: args.recipient_name,
            recipient_email: args.recipient_email,
            certificate_title: args.certificate_title,
            issue_date: args.issue_date,
            issuer_name: args.issuer_name,
            description: args.description,
        }
    }
}

impl Command {
    /// The client route this command stands in for; the route guard decides
    /// whether it may run.
    fn route(&self) -> String {
        match self {
            Self::Login { .. } => LOGIN_PATH.to_owned(),
            Self::Register { .. } => REGISTER_PATH.to_owned(),
            Self::Logout | Self::Whoami => HOME_PATH.to_owned(),
            Self::Issue(_) => ISSUE_PATH.to_owned(),
            Self::Show { id } => format!("/certificates/{id}"),
            Self::Verify { .. } => VERIFY_PATH.to_owned(),
            Self::Dashboard { .. } | Self::List => DASHBOARD_PATH.to_owned(),
        }
    }
}

/// Command to suggest when a flow navigates to `path`.
fn command_hint(path: &str) -> &'static str {
    match path {
        LOGIN_PATH => "certledger login --email <email>",
        REGISTER_PATH => "certledger register --name <name> --email <email> --password <password>",
        DASHBOARD_PATH => "certledger dashboard",
        ISSUE_PATH => "certledger issue --help",
        VERIFY_PATH => "certledger verify <id-or-hash>",
        _ => "certledger --help",
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = ClientConfig::with_base_url(&cli.base_url);
    let session_path = cli.session_file.unwrap_or_else(storage::default_session_path);
    tracing::debug!(base_url = %config.api_base_url, session = %session_path.display(), "starting");
    let session = SessionStore::new(FileStorage::new(session_path));

    let route = cli.command.route();
    let navigator = RecordingNavigator::default();
    if let GuardDecision::Redirect(target) = RouteGuard::new().check(&route, &session, &navigator) {
        return Err(CliError::LoginRequired { route, hint: command_hint(target) });
    }

    let api = ApiClient::new(&config, ReqwestTransport::new()?, session);
    let output = Output { json: cli.json };

    match cli.command {
        Command::Login { email, password } => {
            let toast = submit_login(&api, &LoginForm { email, password }, &navigator).await;
            output.finish(toast, &navigator)
        }
        Command::Register { name, email, password, confirm_password } => {
            let form = RegisterForm {
                name,
                email,
                confirm_password: confirm_password.unwrap_or_else(|| password.clone()),
                password,
            };
            let toast = submit_register(&api, &form, &navigator).await;
            output.finish(toast, &navigator)
        }
        Command::Logout => {
            api.session().logout(&navigator);
            output.finish(Toast::success("Logged Out", "Session cleared."), &navigator)
        }
        Command::Whoami => output.user(api.session().current_user().as_ref()),
        Command::Issue(args) => {
            let mut form = CertificateRequest::from(args);
            let toast = submit_issue(&api, &mut form).await;
            output.finish(toast, &navigator)
        }
        Command::Show { id } => {
            let certificate = api.get_certificate(&id).await?;
            output.certificates(None, &[&certificate])
        }
        Command::Verify { input } => run_verify(&api, &output, &input).await,
        Command::Dashboard { search } => run_dashboard(&api, &output, search.as_deref()).await,
        Command::List => {
            let all = api.get_all_certificates().await?;
            output.certificates(None, &all.iter().collect::<Vec<_>>())
        }
    }
}

async fn run_verify(api: &Client, output: &Output, input: &str) -> Result<(), CliError> {
    let Some((outcome, toast)) = submit_verify(api, input).await else {
        tracing::debug!("blank verification input ignored");
        return Ok(());
    };
    if output.json {
        print_json(&json!({
            "outcome": outcome_label(&outcome),
            "certificate": outcome.certificate(),
        }))?;
    } else if let Some(certificate) = outcome.certificate() {
        println!("{}", render_certificate(certificate));
    }
    output.report(toast)
}

async fn run_dashboard(api: &Client, output: &Output, search: Option<&str>) -> Result<(), CliError> {
    let (state, failure) = match load_dashboard(api).await {
        Ok(state) => (state, None),
        Err(DashboardError { state, toast }) => (state, Some(toast)),
    };
    if failure.is_none() || !state.issued.is_empty() {
        render_dashboard(output, &state, search.unwrap_or_default())?;
    }
    match failure {
        Some(toast) => Err(CliError::Failed(toast)),
        None => Ok(()),
    }
}

fn render_dashboard(output: &Output, state: &DashboardState, term: &str) -> Result<(), CliError> {
    let issued = state.search_issued(term);
    let received = state.search_received(term);
    if output.json {
        return print_json(&json!({ "issued": issued, "received": received }));
    }
    output.certificates(Some("Issued"), &issued)?;
    println!();
    output.certificates(Some("Received"), &received)
}

fn outcome_label(outcome: &VerificationOutcome) -> &'static str {
    match outcome {
        VerificationOutcome::Valid { .. } => "valid",
        VerificationOutcome::Invalid { .. } => "invalid",
        VerificationOutcome::NotFound => "not_found",
        VerificationOutcome::Error(_) => "error",
    }
}

// =============================================================================
// OUTPUT
// =============================================================================

struct Output {
    json: bool,
}

impl Output {
    /// Print a success toast; an error toast becomes the command's failure.
    fn report(&self, toast: Toast) -> Result<(), CliError> {
        if !toast.is_success() {
            return Err(CliError::Failed(toast));
        }
        if self.json {
            print_json(&json!({ "title": toast.title, "description": toast.description }))
        } else {
            println!("{toast}");
            Ok(())
        }
    }

    /// Report `toast`, then suggest the command for wherever the flow
    /// navigated.
    fn finish(&self, toast: Toast, navigator: &RecordingNavigator) -> Result<(), CliError> {
        let succeeded = toast.is_success();
        self.report(toast)?;
        if let Some(next) = navigator.last().filter(|_| succeeded && !self.json) {
            eprintln!("next: {}", command_hint(&next));
        }
        Ok(())
    }

    fn user(&self, user: Option<&User>) -> Result<(), CliError> {
        if self.json {
            return print_json(&user);
        }
        match user {
            Some(user) => println!("{} <{}> ({})", user.name, user.email, user.id),
            None => println!("not logged in"),
        }
        Ok(())
    }

    fn certificates(&self, heading: Option<&str>, certificates: &[&Certificate]) -> Result<(), CliError> {
        if self.json {
            return print_json(&certificates);
        }
        if let Some(heading) = heading {
            println!("{heading} ({})", certificates.len());
        }
        if certificates.is_empty() {
            println!("  (none)");
        }
        for certificate in certificates {
            println!("{}", render_certificate(certificate));
        }
        Ok(())
    }
}

fn render_certificate(certificate: &Certificate) -> String {
    format!(
        "{id}  {title}\n  recipient: {recipient} <{email}>\n  issuer:    {issuer}\n  issued:    {date}\n  block:     {block}  hash: {hash}",
        id = certificate.id,
        title = certificate.certificate_title,
        recipient = certificate.recipient_name,
        email = certificate.recipient_email,
        issuer = certificate.issuer_name,
        date = certificate.issue_date,
        block = certificate.block_number,
        hash = certificate.hash,
    )
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
