pub mod common;

mod credential_resolution;
