use tracing_subscriber::EnvFilter;
use yobit_client::{ExchangeConfig, YobitBuilder};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Reads YOBIT_API_KEY / YOBIT_SECRET_KEY etc. from the environment or .env
    let config = ExchangeConfig::from_env_file("YOBIT")?;
    let yobit = YobitBuilder::new(config).build()?;

    let pair = std::env::args().nth(1).unwrap_or_else(|| "ltc_btc".to_string());

    println!("Fetching exchange info...");
    let info = yobit.get_info().await?;
    let pairs = info["pairs"].as_object().map_or(0, |p| p.len());
    println!("Server time {}, {} pairs listed", info["server_time"], pairs);

    match yobit.get_ticker(&pair).await {
        Ok(ticker) => println!("{}: {}", pair, ticker[&pair]),
        Err(e) => println!("Error fetching ticker for {}: {}", pair, e),
    }

    if yobit.can_sign() {
        let account = yobit.get_account_info().await?;
        println!("Funds: {}", account["return"]["funds"]);
    }

    Ok(())
}
