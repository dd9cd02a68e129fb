use core::time::Duration;

use compact_str::CompactString;

pub mod constants {
    use core::time::Duration;

    macro_rules! env_or_default {
        ($name:expr, $default:expr) => {
            if let Some(s) = option_env!($name) {
                s
            } else {
                $default
            }
        };
    }

    pub const BASE_URL: &str = env_or_default!("HNR_BASE_URL", "https://www.fuzer.xyz");
    pub const PROXY_HOST: &str = env_or_default!("HNR_PROXY_HOST", "http://fuzer-service:8080");
    pub const WEBHOOK_URL: &str =
        env_or_default!("HNR_WEBHOOK_URL", "http://telegram-log-service:8080/send");
    pub const BOT_NAME: &str = env_or_default!("HNR_BOT_NAME", "fuzer_main_bot");
    pub const USER_ID: u64 = 14815;
    pub const INTERVAL: Duration = Duration::from_secs(8 * 60 * 60);
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(8);

    pub const DELETE_ENDPOINT: &str = "snatchlist.php?do=dodelhnr";
}

/// Everything a cleaner needs to know about the outside world.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Tracker site root, without a trailing slash.
    pub base_url: String,
    /// Proxy root; requests go to `{proxy_host}/?url=...`.
    pub proxy_host: String,
    pub webhook_url: String,
    pub bot_name: CompactString,
    /// Whose snatch list is scanned.
    pub user_id: u64,
    pub interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        use constants::{BASE_URL, BOT_NAME, INTERVAL, PROXY_HOST, USER_ID, WEBHOOK_URL};

        Self {
            base_url: BASE_URL.to_owned(),
            proxy_host: PROXY_HOST.to_owned(),
            webhook_url: WEBHOOK_URL.to_owned(),
            bot_name: CompactString::new(BOT_NAME),
            user_id: USER_ID,
            interval: INTERVAL,
        }
    }
}

impl Config {
    pub fn snatchlist_url(&self) -> String {
        format!(
            "{}/snatchlist.php?u={}&type=hnr&order=hnr&sort=desc",
            self.base_url, self.user_id
        )
    }

    pub fn delete_endpoint(&self) -> String {
        crate::util::join_url(&self.base_url, constants::DELETE_ENDPOINT)
    }

    /// "8 hours", "90 minutes", "30 seconds"; whichever unit divides evenly.
    pub fn interval_text(&self) -> String {
        let secs = self.interval.as_secs();
        let (n, unit) = if secs != 0 && secs % 3600 == 0 {
            (secs / 3600, "hour")
        } else if secs != 0 && secs % 60 == 0 {
            (secs / 60, "minute")
        } else {
            (secs, "second")
        };
        if n == 1 {
            format!("{n} {unit}")
        } else {
            format!("{n} {unit}s")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_follow_base() {
        let config = Config {
            base_url: "https://tracker.test".to_owned(),
            user_id: 7,
            ..Config::default()
        };
        assert_eq!(
            config.snatchlist_url(),
            "https://tracker.test/snatchlist.php?u=7&type=hnr&order=hnr&sort=desc"
        );
        assert_eq!(
            config.delete_endpoint(),
            "https://tracker.test/snatchlist.php?do=dodelhnr"
        );
    }

    #[test]
    fn interval_wording() {
        let mut config = Config::default();
        assert_eq!(config.interval_text(), "8 hours");
        config.interval = Duration::from_secs(3600);
        assert_eq!(config.interval_text(), "1 hour");
        config.interval = Duration::from_secs(90 * 60);
        assert_eq!(config.interval_text(), "90 minutes");
        config.interval = Duration::from_secs(45);
        assert_eq!(config.interval_text(), "45 seconds");
    }
}
