//! CLI argument definitions

use clap::Parser;

/// List management entities of an AMQP 1.0 message router.
///
/// Sends one management QUERY to the router's `$management` node and prints
/// the result as an aligned table.
#[derive(Parser, Debug)]
#[command(name = "qdrls", version, about)]
pub struct Cli {
    /// URL to connect to
    #[arg(long, default_value = "amqp://localhost:5672")]
    pub url: String,

    /// Type of the entities to list (short name like `link` or `address`,
    /// or a fully qualified management type)
    #[arg(long = "type", default_value = "link")]
    pub entity_type: String,

    /// Comma separated list of attributes to display (default: the
    /// entity type's built-in attribute list)
    #[arg(long)]
    pub attributes: Option<String>,

    /// User to connect as
    #[arg(long, default_value = "")]
    pub username: String,

    /// Password to connect with
    #[arg(long, default_value = "")]
    pub password: String,
}
