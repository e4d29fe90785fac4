use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::Serialize;

use temp_mail_client::api::{admin, settings, user};
use temp_mail_client::commands::{self, LogNotifier};
use temp_mail_client::{ApiClient, ApiError, AppState, ClientConfig, Credentials};

#[derive(Parser, Debug)]
#[command(name = "temp-mail", about = "Temp-mail backend API client")]
struct Args {
    /// API base URL (defaults to TEMP_MAIL_API_BASE / VITE_API_BASE)
    #[arg(long)]
    api_base: Option<String>,

    /// User session token
    #[arg(long, env = "TEMP_MAIL_USER_TOKEN", default_value = "", hide_env_values = true)]
    user_token: String,

    /// Site access password
    #[arg(long, env = "TEMP_MAIL_AUTH", default_value = "", hide_env_values = true)]
    custom_auth: String,

    /// Admin password
    #[arg(long, env = "TEMP_MAIL_ADMIN_AUTH", default_value = "", hide_env_values = true)]
    admin_auth: String,

    /// Address JWT sent as bearer token
    #[arg(long, env = "TEMP_MAIL_JWT", default_value = "", hide_env_values = true)]
    jwt: String,

    /// The site is password-gated (401 asks for the access password)
    #[arg(long, env = "TEMP_MAIL_ACCESS_GATED")]
    access_gated: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show public site settings
    OpenSettings,
    /// Show settings of the address behind the JWT
    Settings,
    /// Show public user-registration settings
    UserOpenSettings,
    /// Show the logged-in user's settings
    UserSettings,
    /// Reveal the credential of an address (admin)
    ShowPassword { id: u64 },
    /// Delete an address (admin)
    DeleteAddress { id: u64 },
    /// Bind the current address to the logged-in user
    BindAddress,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Shares the web frontend's .env (VITE_API_BASE)
    let _ = dotenvy::dotenv();

    env_logger::init();
    let args = Args::parse();

    let config = match args.api_base.as_deref() {
        Some(base) => ClientConfig::new(base),
        None => ClientConfig::from_env(),
    };
    if config.base_url.is_empty() {
        log::warn!("No API base URL configured; set --api-base or TEMP_MAIL_API_BASE");
    }

    let state = Arc::new(AppState::with_credentials(Credentials {
        user_token: args.user_token,
        custom_auth: args.custom_auth,
        admin_auth: args.admin_auth,
        jwt: args.jwt,
    }));
    state.set_access_gated(args.access_gated).await;
    let api = ApiClient::new(&config, state);

    let ok = run(&api, args.command).await;

    if api.state().is_auth_dialog_shown() {
        log::warn!("Access password required (--custom-auth)");
    }
    if api.state().is_admin_auth_dialog_shown() {
        log::warn!("Admin password required (--admin-auth)");
    }

    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

async fn run(api: &ApiClient, command: Command) -> bool {
    let notifier = LogNotifier;
    let state = api.state();

    match command {
        Command::OpenSettings => {
            commands::load_open_settings(api, &notifier).await
                && print_json(&*state.open_settings.read().await)
        }
        Command::Settings => {
            let result = settings::fetch_account_settings(api).await;
            finish(result) && print_json(&*state.settings.read().await)
        }
        Command::UserOpenSettings => {
            commands::load_user_open_settings(api, &notifier).await
                && print_json(&*state.user_open_settings.read().await)
        }
        Command::UserSettings => {
            commands::load_user_settings(api, &notifier).await
                && print_json(&*state.user_settings.read().await)
        }
        Command::ShowPassword { id } => match admin::show_address_credential(api, id).await {
            Ok(credential) => {
                println!("{}", credential);
                true
            }
            Err(e) => finish::<()>(Err(e)),
        },
        Command::DeleteAddress { id } => finish(admin::delete_address(api, id).await),
        Command::BindAddress => finish(user::bind_address(api).await),
    }
}

fn finish<T>(result: Result<T, ApiError>) -> bool {
    match result {
        Ok(_) => true,
        Err(e) => {
            log::error!("{}", e);
            false
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> bool {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{}", json);
            true
        }
        Err(e) => {
            log::error!("Failed to render response: {}", e);
            false
        }
    }
}
