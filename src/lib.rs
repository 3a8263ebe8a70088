//! qdrls: list management entities of an AMQP 1.0 message router
//!
//! A one-shot client for the Qpid Dispatch management protocol: it sends a
//! single QUERY to the router's `$management` node and renders the returned
//! rows as an aligned text table.

pub mod cli;
pub mod mgmt;
pub mod render;
pub mod transport;
