//! CLI module - argument parsing and query orchestration

pub mod args;

pub use args::Cli;

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::mgmt::response::QueryError;
use crate::mgmt::{entity, query, response};
use crate::{render, transport};

/// Run one management query end to end.
///
/// Transport failures are fatal and propagate as diagnostics. A server-side
/// error or a malformed payload prints a single error line instead of a
/// table; exactly one of the two is ever produced.
pub async fn run(cli: Cli) -> Result<()> {
    let entity = entity::resolve(&cli.entity_type);
    let selection = query::select(cli.attributes.as_deref(), &entity);
    let request = query::build_request(&entity, &selection);

    let raw = transport::execute(&cli.url, &cli.username, &cli.password, &request)
        .await
        .into_diagnostic()?;

    match response::interpret(raw) {
        Ok(result) => render::print_table(&result, &selection),
        Err(err @ QueryError::RequestFailed { .. }) => {
            println!("{} {}", style("ERROR:").red().bold(), err);
        }
        Err(QueryError::MalformedResponse(payload)) => {
            println!("{} {:?}", style("Bad response:").red().bold(), payload);
        }
    }
    Ok(())
}
