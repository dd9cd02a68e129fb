use compact_str::CompactString;
use hnrc::{
    cleaner::Cleaner,
    config::{Config, constants},
    notify::{Notify, Silent, Webhook},
    proxy::{ProxyClient, Transport},
    schedule,
};

#[derive(clap::Parser)]
#[command(about = "Clears hit-and-run warnings from a tracker snatch list")]
struct Args {
    #[arg(long, default_value = constants::BASE_URL)]
    base_url: String,
    #[arg(long, default_value = constants::PROXY_HOST)]
    proxy_host: String,
    #[arg(long, default_value = constants::WEBHOOK_URL)]
    webhook_url: String,
    #[arg(long, default_value = constants::BOT_NAME)]
    bot_name: String,
    #[arg(long, default_value_t = constants::USER_ID)]
    user_id: u64,
    /// Seconds between passes.
    #[arg(long, value_name = "secs", default_value_t = constants::INTERVAL.as_secs())]
    interval: u64,
    /// Run a single pass and exit.
    #[arg(long)]
    once: bool,
    /// Do not push anything to the webhook.
    #[arg(short, long)]
    quiet: bool,
}

impl Args {
    fn config(&self) -> Config {
        Config {
            base_url: self.base_url.trim_end_matches('/').to_owned(),
            proxy_host: self.proxy_host.trim_end_matches('/').to_owned(),
            webhook_url: self.webhook_url.clone(),
            bot_name: CompactString::from(self.bot_name.as_str()),
            user_id: self.user_id,
            interval: core::time::Duration::from_secs(self.interval),
        }
    }
}

async fn serve<T: Transport, N: Notify>(cleaner: Cleaner<T, N>, once: bool) {
    if once {
        if let Some(summary) = schedule::pass(&cleaner).await {
            tracing::info!(target: "main", "\x1b[36m{}/{} deleted\x1b[0m", summary.deleted, summary.candidates);
        }
        return;
    }

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(target: "main", "cannot listen for ctrl-c: {e}");
            core::future::pending::<()>().await;
        }
    };
    schedule::run(&cleaner, shutdown).await;
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use clap::Parser;

    pretty_env_logger::init_timed();

    let args = Args::parse();
    let config = args.config();
    tracing::info!(target: "main", "cleaning for user \x1b[1;36m{}\x1b[0m on {}", config.user_id, config.base_url);

    let client = hnrc::scrape::basic()?;
    let transport = ProxyClient::new(client.clone(), config.proxy_host.clone());

    if args.quiet {
        serve(Cleaner::new(config, transport, Silent), args.once).await;
    } else {
        let webhook = Webhook::new(client, config.webhook_url.clone(), config.bot_name.clone());
        serve(Cleaner::new(config, transport, webhook), args.once).await;
    }

    Ok(())
}
