use super::{NateApp, Outcome};
use crate::cli::Cli;
use crate::config::Config;
use crate::llm::OpenAiClient;
use crate::ui::style;
use anyhow::Result;

/// Resolve config and arguments once, build the production client and run
/// a single exchange.
pub async fn dispatch(cli: Cli) -> Result<()> {
    let mut config = Config::load_or_init(cli.config.as_deref())?;
    if let Some(model) = cli.model.as_deref() {
        config.model = model.to_string();
        config.validate()?;
    }

    let invocation = cli.invocation(&config)?;
    let client = OpenAiClient::from_config(&config);
    let outcome = NateApp::new(&invocation, &client)?.run().await?;

    println!("{}", render_outcome(&outcome));
    Ok(())
}

pub fn render_outcome(outcome: &Outcome) -> String {
    let mut rendered = String::new();
    if outcome.cached {
        rendered.push_str(&style::yellow("[CACHED]:"));
        rendered.push('\n');
    }
    rendered.push_str(&outcome.reply);
    rendered.push('\n');
    rendered.push_str(&style::dim(format!(
        "Conversation ID: {}",
        outcome.fingerprint
    )));
    rendered
}
