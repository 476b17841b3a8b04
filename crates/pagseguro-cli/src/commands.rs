//! CLI Commands

use std::path::PathBuf;

use anyhow::{bail, Context};
use serde_json::{json, Value};

use pagseguro::{CheckoutFormat, Credentials, Order, PagSeguroClient};

pub const USAGE: &str = "\
usage:
  pagseguro checkout <order.json> [--form]
  pagseguro notification <code> [--email <email> --token <token>]
  pagseguro payment-url <checkout-code>";

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Checkout {
        order_file: PathBuf,
        format: CheckoutFormat,
    },
    Notification {
        code: String,
        credentials: Option<Credentials>,
    },
    PaymentUrl {
        code: String,
    },
}

impl Command {
    /// Parse arguments (program name already stripped)
    pub fn parse(args: &[String]) -> anyhow::Result<Self> {
        let Some((name, rest)) = args.split_first() else {
            bail!("missing command\n{USAGE}");
        };

        match name.as_str() {
            "checkout" => {
                let mut order_file = None;
                let mut format = CheckoutFormat::Xml;
                for arg in rest {
                    match arg.as_str() {
                        "--form" => format = CheckoutFormat::Form,
                        flag if flag.starts_with("--") => bail!("unknown flag {flag}\n{USAGE}"),
                        path => order_file = Some(PathBuf::from(path)),
                    }
                }
                let order_file = order_file.context("checkout needs an order file")?;
                Ok(Self::Checkout { order_file, format })
            }
            "notification" => {
                let (code, flags) = rest
                    .split_first()
                    .context("notification needs a notification code")?;
                let mut email = None;
                let mut token = None;
                let mut flags = flags.iter();
                while let Some(flag) = flags.next() {
                    let value = flags
                        .next()
                        .with_context(|| format!("{flag} needs a value"))?
                        .clone();
                    match flag.as_str() {
                        "--email" => email = Some(value),
                        "--token" => token = Some(value),
                        other => bail!("unknown flag {other}\n{USAGE}"),
                    }
                }
                let credentials = match (email, token) {
                    (Some(email), Some(token)) => Some(Credentials::new(email, token)),
                    (None, None) => None,
                    _ => bail!("--email and --token must be given together"),
                };
                Ok(Self::Notification {
                    code: code.clone(),
                    credentials,
                })
            }
            "payment-url" => {
                let code = rest.first().context("payment-url needs a checkout code")?;
                Ok(Self::PaymentUrl { code: code.clone() })
            }
            other => bail!("unknown command {other}\n{USAGE}"),
        }
    }
}

/// Execute a command and return its JSON output
pub async fn run(client: PagSeguroClient, command: Command) -> anyhow::Result<Value> {
    match command {
        Command::Checkout { order_file, format } => {
            let raw = std::fs::read_to_string(&order_file)
                .with_context(|| format!("reading {}", order_file.display()))?;
            let order: Order = serde_json::from_str(&raw)
                .with_context(|| format!("parsing {}", order_file.display()))?;

            let client = client.format(format);
            let result = client.create_checkout(&order).await?;
            let payment_url = result.checkout().map(|c| client.payment_url(&c.code));

            Ok(json!({ "result": result, "payment_url": payment_url }))
        }
        Command::Notification { code, credentials } => {
            let notification = client
                .fetch_notification(&code, credentials.as_ref())
                .await?;
            Ok(serde_json::to_value(notification)?)
        }
        Command::PaymentUrl { code } => Ok(json!({ "payment_url": client.payment_url(&code) })),
    }
}
