//! bf-azure: Azure Blob Storage adapter for the bf client
//!
//! This crate provides the implementation of the storage traits from
//! bf-core using the azure_storage_blobs crate. It is the only crate that
//! directly depends on the Azure SDK.

pub mod client;
pub mod connection;
pub mod error;

pub use client::{AzureAccount, AzureConnector, AzureContainer};
