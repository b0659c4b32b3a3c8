use std::io;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use edgeserv_pos::{Client, Credentials};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
struct CliArgs {
    #[command(subcommand)]
    pub subcommand: Command,

    #[command(flatten)]
    pub global_opts: GlobalOpts,
}

#[derive(Args, Debug)]
struct GlobalOpts {
    #[arg(long, env = "EDGESERV_HOST", global = true, help = "Back office base URL")]
    pub host: Option<String>,

    #[arg(long, env = "EDGESERV_RESTAURANT_CODE", global = true)]
    pub restaurant_code: Option<String>,

    #[arg(long, env = "EDGESERV_CLIENT_ID", global = true)]
    pub client_id: Option<String>,

    #[arg(long, env = "EDGESERV_CLIENT_SECRET", global = true, hide_env_values = true)]
    pub client_secret: Option<String>,

    #[arg(short = 'u', long, env = "EDGESERV_USERNAME", global = true)]
    pub username: Option<String>,

    #[arg(short = 'p', long, env = "EDGESERV_PASSWORD", global = true, hide_env_values = true)]
    pub password: Option<String>,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    #[clap(name = "get-token", about = "Print a fresh OAuth token")]
    Token,

    #[clap(name = "list-customers", about = "Print or save the customer roster")]
    ListCustomers {
        #[arg(short = 'o', long, help = "Output file")]
        output_path: Option<String>,

        #[arg(long, help = "Pretty-print the JSON output")]
        pretty: bool,
    },
}

impl GlobalOpts {
    fn into_client(self) -> Result<Client> {
        let host = self.host.context("missing --host / EDGESERV_HOST")?;
        let restaurant_code = self
            .restaurant_code
            .context("missing --restaurant-code / EDGESERV_RESTAURANT_CODE")?;
        let credentials = Credentials::new(
            &self
                .client_id
                .context("missing --client-id / EDGESERV_CLIENT_ID")?,
            &self
                .client_secret
                .context("missing --client-secret / EDGESERV_CLIENT_SECRET")?,
            &self
                .username
                .context("missing --username / EDGESERV_USERNAME")?,
            &self
                .password
                .context("missing --password / EDGESERV_PASSWORD")?,
        );
        Ok(Client::with_default_http(&host, &restaurant_code, credentials)?)
    }
}

/// Logs go to stderr so stdout stays parseable. `RUST_LOG` overrides the level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = CliArgs::parse();
    let client = args.global_opts.into_client()?;

    match args.subcommand {
        Command::Token => {
            let token = client
                .get_oauth_token()
                .await
                .context("error getting OAuth token")?;
            println!("{}", token.get());
        }
        Command::ListCustomers {
            output_path,
            pretty,
        } => {
            let customers = client.list_customers().await?;
            info!(count = customers.len(), "fetched customers");
            if let Some(output_path) = output_path {
                customers
                    .save(&output_path)
                    .await
                    .with_context(|| format!("unable to save customers to {}", output_path))?;
            } else if pretty {
                println!("{}", serde_json::to_string_pretty(&customers)?);
            } else {
                println!("{}", serde_json::to_string(&customers)?);
            }
        }
    }

    Ok(())
}
