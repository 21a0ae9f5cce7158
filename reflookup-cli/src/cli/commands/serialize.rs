//! `reflookup serialize` - print the record a form definition submits

use anyhow::{Context, Result};
use log::debug;

use crate::cli::SerializeArgs;
use reflookup::{Form, serialize_form};

pub fn handle_serialize_command(args: SerializeArgs) -> Result<()> {
    if !args.form.exists() {
        anyhow::bail!("Form definition does not exist: {}", args.form.display());
    }

    let form = Form::load(&args.form)
        .with_context(|| format!("Failed to load form definition: {}", args.form.display()))?;

    let page = form.to_page();
    debug!("Materialized {} page elements", page.elements().count());

    let record = serialize_form(&page);
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}
