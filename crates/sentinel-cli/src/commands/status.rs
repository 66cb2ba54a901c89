use sentinel_core::Config;

use super::CommandResult;

pub fn run() -> CommandResult {
    let config = Config::load()?;
    let school_id = super::require_school_id(&config)?;
    let client = super::client_from(&config)?;
    let rt = super::runtime()?;

    match rt.block_on(client.latest_event(school_id))? {
        Some(alert) => println!("{}", serde_json::to_string_pretty(&alert)?),
        None => println!("No alerts reported."),
    }
    Ok(())
}
