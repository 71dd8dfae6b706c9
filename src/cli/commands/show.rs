use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::header;
use crate::ui::render::record_card;

/// Handle the `show` command
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Show { json } = cmd {
        let store = super::open_store(cfg)?;
        let record = store.current();

        if *json {
            println!("{}", serde_json::to_string_pretty(&record)?);
        } else {
            header("Clase programada");
            println!("{}", record_card(&record));
        }
    }

    Ok(())
}
