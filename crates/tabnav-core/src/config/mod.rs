//! Configuration management for TabNav.
//!
//! Region settings ([`settings::Config`]) are stored as TOML and loaded at
//! startup by the host.

pub mod settings;
