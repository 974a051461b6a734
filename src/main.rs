use crate::{
    settings::{Action, LogFormat, Settings},
    wait::wait_for_record,
};
use duckdns::Client;
use tracing::info;

mod settings;
mod wait;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = Settings::new()?;

    match cfg.log_format {
        LogFormat::Text => {
            let subscriber = tracing_subscriber::FmtSubscriber::new();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        LogFormat::Json => {
            let subscriber = tracing_subscriber::fmt().json().finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }

    run(cfg).await
}

async fn run(cfg: Settings) -> Result<(), Box<dyn std::error::Error>> {
    let mut client = Client::new(reqwest::Client::new(), cfg.client_config())?;

    if let Some(base_url) = &cfg.base_url {
        client = client.with_base_url(base_url)?;
    }
    if let Some(user_agent) = &cfg.user_agent {
        *client.user_agent_mut() = user_agent.clone();
    }

    let (response, expected) = match &cfg.action {
        Action::UpdateIp => (client.update_configured_ip().await?, None),
        Action::ClearIp => (client.clear_ip().await?, None),
        Action::UpdateRecord { record } => (client.update_record(record).await?, Some(record.as_str())),
        Action::ClearRecord { record } => (client.clear_record(record).await?, Some("")),
        Action::GetRecord => {
            let value = client.get_record().await?;
            info!(value = %value, "current TXT record");
            return Ok(());
        }
    };

    info!(status = %response.status(), body = %response.body().trim(), "provider responded");

    if !response.is_ok() {
        return Err(format!("provider rejected the request: {}", response.body().trim()).into());
    }

    if let (Some(expected), Some(wait)) = (expected, &cfg.wait) {
        wait_for_record(&client, expected, wait.interval()?, wait.timeout()?).await?;
        info!("record propagated");
    }

    Ok(())
}
