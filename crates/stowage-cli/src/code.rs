//! # Code Subcommand
//!
//! Validates container codes and prints their parts.
//!
//! ```text
//! $ stowage code MSCU6639871 KOCU8090117
//! OK: MSCU6639871 owner=MSC category=U serial=663987 check=1
//! INVALID: KOCU8090117: container code "KOCU8090117": check digit is 7, expected 5
//! ```

use anyhow::Result;
use clap::{Args, ValueEnum};

use stowage_core::{CheckDigitScheme, IdentifierCode};

/// Arguments for the `stowage code` subcommand.
#[derive(Args, Debug)]
pub struct CodeArgs {
    /// Codes to validate.
    #[arg(required = true)]
    pub codes: Vec<String>,

    /// Check-digit scheme.
    #[arg(long, value_enum, default_value_t = SchemeArg::Summed)]
    pub scheme: SchemeArg,
}

/// Command-line names for [`CheckDigitScheme`].
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemeArg {
    /// Letter values plus digits, modulo 10.
    Summed,
    /// ISO 6346 weighted sum, modulo 11.
    Iso6346,
}

impl From<SchemeArg> for CheckDigitScheme {
    fn from(arg: SchemeArg) -> Self {
        match arg {
            SchemeArg::Summed => CheckDigitScheme::Summed,
            SchemeArg::Iso6346 => CheckDigitScheme::Iso6346,
        }
    }
}

/// One report line for `raw`, and whether it was valid.
pub fn describe(raw: &str, scheme: CheckDigitScheme) -> (String, bool) {
    match IdentifierCode::parse_with(raw, scheme) {
        Ok(code) => (
            format!(
                "OK: {code} owner={} category={} serial={} check={}",
                code.owner(),
                code.category(),
                code.serial(),
                code.check_digit()
            ),
            true,
        ),
        Err(e) => (format!("INVALID: {raw}: {e}"), false),
    }
}

/// Execute the code subcommand.
pub fn run_code(args: &CodeArgs) -> Result<u8> {
    let scheme = CheckDigitScheme::from(args.scheme);
    let mut invalid = 0usize;
    for raw in &args.codes {
        let (line, ok) = describe(raw, scheme);
        if !ok {
            invalid += 1;
        }
        println!("{line}");
    }
    tracing::info!(%scheme, checked = args.codes.len(), invalid, "codes checked");
    Ok(if invalid > 0 { 1 } else { 0 })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_valid_code() {
        let (line, ok) = describe("MSCU6639871", CheckDigitScheme::Summed);
        assert!(ok);
        assert_eq!(
            line,
            "OK: MSCU6639871 owner=MSC category=U serial=663987 check=1"
        );
    }

    #[test]
    fn test_describe_invalid_code() {
        let (line, ok) = describe("KOCU8090117", CheckDigitScheme::Summed);
        assert!(!ok);
        assert!(line.starts_with("INVALID: KOCU8090117: "));
    }

    #[test]
    fn test_describe_iso_scheme() {
        let (_, ok) = describe("CSQU3054383", CheckDigitScheme::Iso6346);
        assert!(ok);
    }

    #[test]
    fn test_run_code_exit_status() {
        let args = CodeArgs {
            codes: vec!["INKU2633836".into(), "CSQU3054389".into()],
            scheme: SchemeArg::Summed,
        };
        assert_eq!(run_code(&args).unwrap(), 0);

        let args = CodeArgs {
            codes: vec!["INKU2633836".into(), "abcU1234567".into()],
            scheme: SchemeArg::Summed,
        };
        assert_eq!(run_code(&args).unwrap(), 1);
    }
}
