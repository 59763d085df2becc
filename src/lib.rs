pub mod app;
pub mod chat;
pub mod cli;
pub mod clients;
pub mod commands;
pub mod configuration;
pub mod context;
pub mod repo;
pub mod rest;
pub mod storage;
pub mod tracing;
pub mod types;
