#[macro_use]
extern crate log;

use clap::Parser;
use simple_logger::SimpleLogger;

use crate::config::Config;
use crate::handler::{DnsServer, Resolver};
use crate::system::Result;

mod cache;
mod config;
mod cursor;
mod error;
mod handler;
mod protocol;
mod system;

#[derive(Parser, Debug)]
#[command(name = "minidns", version, about = "A minimal forwarding DNS server")]
struct Args {
    /// TOML config file
    #[arg(short, long)]
    config: Option<String>,

    /// Address the server listens on, e.g. 127.0.0.1:2053
    #[arg(short, long)]
    bind: Option<String>,

    /// Upstream resolver as host:port; answers are mocked when absent
    #[arg(short, long)]
    resolver: Option<String>,

    #[arg(long)]
    log_level: Option<String>,
}

impl Args {
    fn apply(self, mut config: Config) -> Config {
        if let Some(bind) = self.bind {
            config.bind = bind;
        }
        if self.resolver.is_some() {
            config.resolver = self.resolver;
        }
        if let Some(level) = self.log_level {
            config.log_level = level;
        }
        config
    }
}

//dig @127.0.0.1 -p 2053 www.baidu.com
#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = config::init_from_toml(args.config.as_deref()).await?;
    let config = args.apply(config);
    SimpleLogger::new().with_level(config.log_level_filter()).init()?;
    let server = DnsServer::bind(&config.bind, Resolver::from(&config)).await?;
    tokio::select! {
        _ = server.run() => {}
        result = tokio::signal::ctrl_c() => {
            result?;
            info!("shutting down");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use crate::config::Config;
    use crate::Args;

    #[test]
    fn should_override_config_when_call_apply_given_flags() {
        let args = Args::parse_from(["minidns", "--bind", "0.0.0.0:53", "--resolver", "1.1.1.1:53"]);

        let result = args.apply(Config::default());

        assert_eq!("0.0.0.0:53", result.bind);
        assert_eq!(Some("1.1.1.1:53".to_string()), result.resolver);
        assert_eq!("INFO", result.log_level);
    }

    #[test]
    fn should_keep_config_when_call_apply_given_no_flags() {
        let args = Args::parse_from(["minidns"]);

        let result = args.apply(Config::default());

        assert_eq!(Config::default(), result);
    }
}
