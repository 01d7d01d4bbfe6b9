use std::env;

use structopt::StructOpt;

use openwhisk_client::model::{Exec, NewAction};
use openwhisk_client::{CreateOptions, InvokeOptions, OpenWhisk, Result, Scope};

const HELLO_JS: &str =
    r#"function main(params) { return { greeting: "Hello " + params.name + "!" }; }"#;

#[derive(StructOpt)]
#[structopt(name = "whisk-interaction", about = "End to end tour of the REST client")]
struct Options {
    /// API host, e.g. localhost:3233 for a local deployment.
    #[structopt(short = "a", long, env = "OPENWHISK_APIHOST")]
    api_host: Option<String>,
    /// Auth token of the form key:secret.
    #[structopt(short = "t", long, env = "OPENWHISK_TOKEN", hide_env_values = true)]
    auth_token: String,
    #[structopt(short = "n", long, default_value = "_")]
    namespace: String,
    /// Trust self-signed certificates (local deployments).
    #[structopt(short = "k", long)]
    insecure: bool,
    #[structopt(long, default_value = "info")]
    log_level: String,
}

async fn interact(whisk: OpenWhisk) -> Result<()> {
    // Deploy the demo action and call it synchronously.
    let hello = NewAction::new(Exec::inline("nodejs".to_string(), HELLO_JS.to_string()));
    let created = whisk
        .actions()
        .create("hello", &hello, &CreateOptions::overwrite())
        .await?;
    println!("created action: {}/{}", created.namespace, created.name);

    let greeting = whisk
        .actions()
        .invoke(
            "hello",
            Some(&serde_json::json!({"name": "Wendel"})),
            &InvokeOptions::blocking_result(),
        )
        .await?;
    println!("blocking invocation returned: {}", greeting);

    // Chain it into a sequence and fire that without waiting.
    let components = vec![
        whisk.scope().qualified_name("hello"),
        whisk.scope().qualified_name("hello"),
    ];
    whisk
        .actions()
        .create_sequence("hello-twice", &components, &CreateOptions::overwrite())
        .await?;
    let activation = whisk
        .actions()
        .invoke("hello-twice", Some(&serde_json::json!({"name": "Wendel"})), &Default::default())
        .await?;
    println!("sequence activation: {}", activation);

    // What else lives in this namespace?
    let (actions, packages, rules, triggers) = futures::try_join!(
        whisk.actions().names(),
        whisk.packages().names(),
        whisk.rules().names(),
        whisk.triggers().names(),
    )?;
    println!("    actions: {:?}", actions);
    println!("   packages: {:?}", packages);
    println!("      rules: {:?}", rules);
    println!("   triggers: {:?}", triggers);
    println!(" namespaces: {:?}", whisk.namespaces().await?);

    // The stock echo action, addressed through an explicit scope.
    let system = whisk.scoped(Scope::new("whisk.system", Some("utils")));
    let echoed = system
        .actions()
        .invoke(
            "echo",
            Some(&serde_json::json!({"message": "Anyone home!"})),
            &InvokeOptions::blocking_result(),
        )
        .await?;
    println!("echo said: {}", echoed);

    let deleted = whisk.actions().delete("hello-twice").await?;
    println!("deleted {}", deleted.name);
    let deleted = whisk.actions().delete("hello").await?;
    println!("deleted {}", deleted.name);

    Ok(())
}

#[actix_rt::main]
async fn main() -> Result<()> {
    let options = Options::from_args();
    env::set_var(
        "RUST_LOG",
        env::var("RUST_LOG").unwrap_or(options.log_level),
    );
    env_logger::init();

    let mut builder = OpenWhisk::builder()
        .namespace(&options.namespace)
        .accept_invalid_certs(options.insecure)
        .auth_token(&options.auth_token)?;
    if let Some(api_host) = &options.api_host {
        builder = builder.api_host(api_host);
    }

    interact(builder.build()?).await
}
