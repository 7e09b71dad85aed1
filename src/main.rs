//! One-shot CLI: start the relay, dispatch a single command, print the transaction hash.

use crowdsale_relay::infra::{config, logging};
use crowdsale_relay::{Command, CommandRelay};

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: crowdsale-relay <command> [args]\n\
         \n\
         Commands:\n\
           register-sale <sale_address> <token_address>\n\
           attach-token <sale_id> <token_address>\n\
           end-sale <sale_id>\n\
           activate-sale <sale_id>\n\
         \n\
         Env vars:\n\
           ETH_RPC_URL, CONTRACT_ARTIFACT (default build/contracts/CrowdsaleStorage.json)\n"
    );
    std::process::exit(2);
}

fn parse_command(args: &[String]) -> Option<Command> {
    let arg = |i: usize| args.get(i).cloned();
    let command = match args.first()?.as_str() {
        "register-sale" => Command::RegisterSale {
            sale_address: arg(1)?,
            token_address: arg(2)?,
        },
        "attach-token" => Command::AttachToken {
            sale_id: arg(1)?,
            token_address: arg(2)?,
        },
        "end-sale" => Command::EndSale { sale_id: arg(1)? },
        "activate-sale" => Command::ActivateSale { sale_id: arg(1)? },
        _ => return None,
    };
    if args.len() != command.arguments().len() + 1 {
        return None;
    }
    Some(command)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init_tracing(config::log_json());

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }
    let Some(command) = parse_command(&args) else {
        usage_and_exit();
    };

    let relay = CommandRelay::from_env()?;
    let state = relay.start().await;
    if !state.is_ready() {
        return Err(anyhow::anyhow!("Relay did not start: {:?}", state));
    }

    let receipt = relay.dispatch(command).await?;
    println!("{}", receipt.tx_hash);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_each_command() {
        assert_eq!(
            parse_command(&args(&["register-sale", "0x1", "0x2"])),
            Some(Command::RegisterSale {
                sale_address: "0x1".to_string(),
                token_address: "0x2".to_string()
            })
        );
        assert_eq!(
            parse_command(&args(&["end-sale", "4"])),
            Some(Command::EndSale {
                sale_id: "4".to_string()
            })
        );
    }

    #[test]
    fn rejects_wrong_arity_and_unknown_commands() {
        assert!(parse_command(&args(&["end-sale"])).is_none());
        assert!(parse_command(&args(&["end-sale", "1", "2"])).is_none());
        assert!(parse_command(&args(&["pause-sale", "1"])).is_none());
        assert!(parse_command(&[]).is_none());
    }
}
