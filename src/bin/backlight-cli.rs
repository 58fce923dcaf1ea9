use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "backlight-cli")]
#[command(about = "Command line client for the backlight bridge", long_about = None)]
struct Cli {
    /// Bridge root URL.
    #[arg(short, long, default_value = "http://localhost:9009")]
    url: String,

    /// Path prefix of the color endpoints.
    #[arg(short, long, default_value = "/sandbox/api")]
    base_path: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Set a color (POST set/{color})
    Set {
        color: String,
        /// R,G,B values for the "custom" color
        #[arg(long)]
        rgb: Option<String>,
    },
    /// Set a color through the GET variant (change/{color})
    Change {
        color: String,
        #[arg(long)]
        rgb: Option<String>,
    },
    /// Trigger the webhook endpoint
    Webhook {
        #[arg(long)]
        color: String,
        /// R,G,B values when color is "custom"
        #[arg(long, default_value = "")]
        action: String,
        #[arg(long, default_value = "")]
        key: String,
    },
    /// Check bridge health
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let api = format!("{}{}", cli.url.trim_end_matches('/'), cli.base_path);

    let res = match cli.command {
        Commands::Set { color, rgb } => {
            let mut req = client.post(format!("{}/set/{}", api, color));
            if let Some(rgb) = rgb {
                req = req.query(&[("rgb", rgb)]);
            }
            req.send().await?
        }
        Commands::Change { color, rgb } => {
            let mut req = client.get(format!("{}/change/{}", api, color));
            if let Some(rgb) = rgb {
                req = req.query(&[("rgb", rgb)]);
            }
            req.send().await?
        }
        Commands::Webhook { color, action, key } => {
            client
                .post(format!("{}/webhook", api))
                .json(&json!({ "key": key, "color": color, "action": action }))
                .send()
                .await?
        }
        Commands::Health => {
            client
                .get(format!("{}/health", cli.url.trim_end_matches('/')))
                .send()
                .await?
        }
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: bridge returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
