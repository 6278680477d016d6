use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "gateway-cli")]
#[command(about = "Management CLI for the keyed forwarding gateway", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the gateway usage text
    Usage,
    /// Show the target registered for a key
    Get { key: String },
    /// Register a target for a key
    Set {
        key: String,
        target: String,
        /// Send the target as the POST body instead of a query parameter
        #[arg(long)]
        post: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::builder().no_proxy().build()?;
    let base = format!("{}/", cli.url.trim_end_matches('/'));

    let res = match cli.command {
        Commands::Usage => client.get(&base).send().await?,
        Commands::Get { key } => client.get(&base).query(&[("key", key)]).send().await?,
        Commands::Set { key, target, post: false } => {
            client
                .get(&base)
                .query(&[("key", key), ("value", target)])
                .send()
                .await?
        }
        Commands::Set { key, target, post: true } => {
            client
                .post(&base)
                .query(&[("key", key)])
                .body(target)
                .send()
                .await?
        }
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    if !status.is_success() {
        eprintln!("Error: gateway returned status {}", status);
        eprintln!("Response: {}", text);
        std::process::exit(1);
    }

    println!("{}", text);
    Ok(())
}
