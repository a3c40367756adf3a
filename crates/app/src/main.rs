//! Workbench - headless host
//!
//! Loads the saved workbench state from the data directory and optionally
//! sends a request, printing the result as JSON.
//!
//! ```text
//! workbench                   print a summary of the saved state
//! workbench send              send the active tab
//! workbench send METHOD URL   open METHOD URL in a new tab and send it
//! ```

use std::sync::Arc;

use serde_json::{Value, json};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use workbench_application::{HttpClient, StateStorage, Workbench};
use workbench_domain::{HttpMethod, RequestPatch};
use workbench_infrastructure::{FileSlotStorage, ReqwestHttpClient, SystemClock, WorkbenchConfig};

const USAGE: &str = "usage: workbench [send [METHOD URL]]";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = WorkbenchConfig::from_env()?;

    // Logs go to stderr so stdout stays valid JSON.
    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!(
        data_dir = %config.data_dir.display(),
        "Starting Workbench v{}",
        env!("CARGO_PKG_VERSION")
    );

    let client = Arc::new(ReqwestHttpClient::new(&config.user_agent)?);
    let storage = FileSlotStorage::new(&config.data_dir);
    let workbench = Workbench::load(client, storage, Arc::new(SystemClock)).await;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let output = match args.as_slice() {
        [] => summary(&workbench),
        [command] if command == "send" => serde_json::to_value(workbench.send_active().await?)?,
        [command, method, url] if command == "send" => {
            let method: HttpMethod = method.parse()?;
            let tab_id = workbench.open_tab(None).await;
            workbench
                .update_tab(&tab_id, RequestPatch::new().method(method).url(url.as_str()))
                .await;
            serde_json::to_value(workbench.send_tab(&tab_id).await?)?
        }
        _ => return Err(USAGE.into()),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn summary<C: HttpClient, S: StateStorage>(workbench: &Workbench<C, S>) -> Value {
    let tabs: Vec<Value> = workbench
        .tabs()
        .iter()
        .map(|tab| {
            json!({
                "id": tab.id(),
                "method": tab.request().method,
                "url": tab.request().url,
                "saved": tab.is_saved(),
            })
        })
        .collect();

    json!({
        "tabs": tabs,
        "activeTabId": workbench.active_tab().map(|t| t.id().to_string()),
        "collections": workbench
            .collections()
            .iter()
            .map(|c| json!({ "id": c.id, "name": c.name, "requests": c.requests.len() }))
            .collect::<Vec<_>>(),
        "activeEnvironment": workbench.active_environment().map(|e| e.name),
        "history": workbench.history().len(),
    })
}
