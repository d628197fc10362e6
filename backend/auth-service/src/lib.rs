// Auth Service Library

pub mod config;
pub mod db;
pub mod grpc;
pub mod services;
