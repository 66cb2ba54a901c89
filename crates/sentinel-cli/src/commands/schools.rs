use sentinel_core::Config;

use super::CommandResult;

pub fn run() -> CommandResult {
    let config = Config::load()?;
    let client = super::client_from(&config)?;
    let rt = super::runtime()?;

    let schools = rt.block_on(client.get_schools())?;
    println!("{}", serde_json::to_string_pretty(&schools)?);
    Ok(())
}
