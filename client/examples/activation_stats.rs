use std::env;

use structopt::StructOpt;

use openwhisk_client::{ActivationListOptions, OpenWhisk, Result};

#[derive(StructOpt)]
#[structopt(name = "activation-stats", about = "Recent activation history at a glance")]
struct Options {
    /// How many activation records to look at.
    #[structopt(short = "l", long, default_value = "200")]
    limit: u64,
    /// Only activations of this action.
    #[structopt(long)]
    name: Option<String>,
    #[structopt(long, default_value = "info")]
    log_level: String,
}

#[actix_rt::main]
async fn main() -> Result<()> {
    let options = Options::from_args();
    env::set_var(
        "RUST_LOG",
        env::var("RUST_LOG").unwrap_or(options.log_level),
    );
    env_logger::init();

    let whisk = OpenWhisk::from_env()?;
    let activations = whisk.activations();

    let recent = activations
        .list(&ActivationListOptions {
            limit: Some(options.limit),
            name: options.name.clone(),
            ..Default::default()
        })
        .await?;
    println!("{} activations on record", recent.len());

    for (name, count) in activations.counts().await? {
        println!("{:>6}  {}", count, name);
    }

    if let Some(latest) = recent.first() {
        let info = activations.get(&latest.activation_id).await?;
        println!(
            "latest: {} ({}..{}, {} ms)",
            info.activation_id,
            info.start.unwrap_or_default(),
            info.end.unwrap_or_default(),
            info.duration.unwrap_or_default(),
        );
        println!("result: {}", activations.result(&latest.activation_id).await?);
        for line in activations.logs(&latest.activation_id).await?.logs {
            println!("log: {}", line);
        }
    }

    Ok(())
}
