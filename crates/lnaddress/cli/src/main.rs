mod args;
mod display;
mod logging;
mod prompt;
mod settings;

use std::process::ExitCode;

use clap::Parser;
use lnaddress_core::{InvoiceResult, LnAddressClient};
use rustyline::DefaultEditor;
use tracing::info;

use crate::args::Args;
use crate::display::{render_invoice, render_json};
use crate::logging::init_logging;
use crate::prompt::{prompt_address, prompt_amount, prompt_comment};
use crate::settings::Settings;

/// Opens the terminal editor on first use, so no terminal is needed when every value was given.
fn line_editor(slot: &mut Option<DefaultEditor>) -> anyhow::Result<&mut DefaultEditor> {
    if slot.is_none() {
        *slot = Some(DefaultEditor::new()?);
    }
    slot.as_mut()
        .ok_or_else(|| anyhow::anyhow!("no terminal available"))
}

fn decode_and_print(client: &LnAddressClient, bolt11: &str, json: bool) -> anyhow::Result<bool> {
    match client.decode_invoice(bolt11) {
        Ok(invoice) if json => println!("{}", render_json(&invoice)?),
        Ok(invoice) => println!("{}", render_invoice(&invoice)),
        Err(e) => {
            println!("Error: {e}");
            return Ok(false);
        }
    }
    Ok(true)
}

fn run(args: &Args) -> anyhow::Result<bool> {
    let settings = Settings::load(args)?;
    let logger = init_logging(args.verbose, args.logfile.as_deref(), &settings.log_level)?;
    info!("lnaddress2invoice {}", env!("CARGO_PKG_VERSION"));
    let client = LnAddressClient::from_config(&settings.client_config()).with_logger(logger);

    if let Some(bolt11) = &args.decode_invoice {
        return decode_and_print(&client, bolt11, args.json);
    }

    let detected = args.resolved()?;
    let mut editor = None;

    let lnaddress = match detected.lnaddress {
        Some(lnaddress) => lnaddress,
        None => prompt_address(line_editor(&mut editor)?)?,
    };
    let amount = match detected.amount {
        Some(amount) => amount,
        None => prompt_amount(line_editor(&mut editor)?)?,
    };
    let comment = match &args.comment {
        Some(comment) => Some(comment.clone()),
        None => prompt_comment(line_editor(&mut editor)?)?,
    };

    let result = client.get_bolt11(&lnaddress, Some(amount), comment.as_deref());
    if args.json {
        println!("{}", render_json(&result)?);
    }
    match result {
        InvoiceResult::Ok { bolt11 } => {
            if !args.json {
                println!("{bolt11}");
            }
            if args.decode {
                return decode_and_print(&client, &bolt11, args.json);
            }
            Ok(true)
        }
        InvoiceResult::Err { message } => {
            if !args.json {
                println!("Error: {message}");
            }
            Ok(false)
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            println!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
