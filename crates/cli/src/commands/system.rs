use crate::di::Services;
use dnsql_application::ports::ResolvConfigSource;
use dnsql_infrastructure::system::system_endpoint;
use tracing::debug;

/// Endpoint descriptor for a random nameserver from the host configuration.
pub async fn resolve_system_endpoint(services: &Services) -> anyhow::Result<String> {
    let config = services.resolv_conf.load().await?;
    let endpoint = system_endpoint(&config, &mut fastrand::Rng::new())?;
    debug!(endpoint = %endpoint, "Using system nameserver");
    Ok(endpoint)
}

pub async fn run_system(services: &Services) -> anyhow::Result<()> {
    println!("{}", resolve_system_endpoint(services).await?);
    Ok(())
}
