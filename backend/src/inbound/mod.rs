//! Inbound adapters translating external requests into domain port calls.
//!
//! Framework details stay at this edge; handlers only see the driving port.

pub mod http;
