//! Tests for probe and candidates subcommands.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;

#[test]
fn cli_parse_probe() {
    match parse(&["skuimg", "probe", "https://cdn.example.com/files/ABCDE.jpg"]) {
        CliCommand::Probe { url } => {
            assert_eq!(url, "https://cdn.example.com/files/ABCDE.jpg");
        }
        _ => panic!("expected Probe"),
    }
}

#[test]
fn cli_parse_probe_requires_url() {
    assert!(Cli::try_parse_from(["skuimg", "probe"]).is_err());
}

#[test]
fn cli_parse_candidates() {
    match parse(&["skuimg", "candidates", "ABCDE1234"]) {
        CliCommand::Candidates { sku, handle } => {
            assert_eq!(sku, "ABCDE1234");
            assert!(handle.is_none());
        }
        _ => panic!("expected Candidates"),
    }
}

#[test]
fn cli_parse_candidates_with_handle() {
    match parse(&["skuimg", "candidates", "ABCDE1234", "--handle", "Olive Oil! #1"]) {
        CliCommand::Candidates { sku, handle } => {
            assert_eq!(sku, "ABCDE1234");
            assert_eq!(handle.as_deref(), Some("Olive Oil! #1"));
        }
        _ => panic!("expected Candidates with --handle"),
    }
}
