//! `chatterm --list-models`: print the endpoint's model identifiers.

use anyhow::Context as _;

use chatterm_infra::gateway::OpenAiCompatGateway;

/// Print one model id per line, sorted.
pub async fn print_models(gateway: &OpenAiCompatGateway) -> anyhow::Result<()> {
    let mut models = gateway
        .list_models()
        .await
        .with_context(|| format!("failed to list models from {}", gateway.base_url()))?;
    models.sort();

    if models.is_empty() {
        eprintln!("The endpoint returned no models.");
        return Ok(());
    }

    for model in models {
        println!("{model}");
    }
    Ok(())
}
