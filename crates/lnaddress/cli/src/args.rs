use std::path::PathBuf;

use clap::Parser;
use regex_lite::Regex;

const ADDRESS_REGEX: &str = r"^[^@]+@[^@]+\.[^@]+$";

#[derive(Clone, Parser, Debug)]
#[command(
    name = "lnaddress2invoice",
    version,
    about = "Request a BOLT11 invoice from a Lightning Address",
    long_about = None
)]
pub struct Args {
    /// Lightning Address
    #[arg(short = 'r', long)]
    pub lnaddress: Option<String>,

    /// Amount in satoshis
    #[arg(short, long)]
    pub amount: Option<u64>,

    /// Optional comment to include in the invoice
    #[arg(short, long)]
    pub comment: Option<String>,

    /// Log to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Write log to the given file
    #[arg(short = 'f', long)]
    pub logfile: Option<PathBuf>,

    /// Decode and display the returned invoice
    #[arg(short, long)]
    pub decode: bool,

    /// Only decode the given invoice, without resolving any address
    #[arg(long, value_name = "BOLT11")]
    pub decode_invoice: Option<String>,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,

    #[arg(long, default_value = "lnaddress.toml")]
    pub config: PathBuf,

    /// Log filter, in `EnvFilter` syntax.
    #[arg(long)]
    pub log_level: Option<String>,

    #[arg(long)]
    pub user_agent: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// A Lightning Address and/or an amount, in any order
    pub positional: Vec<String>,
}

/// Address and amount picked out of free-form positional arguments.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Detected {
    pub lnaddress: Option<String>,
    pub amount: Option<u64>,
}

impl Detected {
    /// The last matching value of each kind wins; anything else is ignored.
    pub fn scan<S: AsRef<str>>(values: &[S]) -> anyhow::Result<Self> {
        let address = Regex::new(ADDRESS_REGEX)?;
        let mut detected = Self::default();
        for value in values.iter().map(AsRef::as_ref) {
            if address.is_match(value) {
                detected.lnaddress = Some(value.to_string());
            } else if let Some(amount) = parse_amount(value) {
                detected.amount = Some(amount);
            }
        }
        Ok(detected)
    }
}

/// Plain decimal digits only: no sign, no separators.
pub fn parse_amount(value: &str) -> Option<u64> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

impl Args {
    /// Explicit flags take precedence over positional values.
    pub fn resolved(&self) -> anyhow::Result<Detected> {
        let detected = Detected::scan(&self.positional)?;
        Ok(Detected {
            lnaddress: self.lnaddress.clone().or(detected.lnaddress),
            amount: self.amount.or(detected.amount),
        })
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(&["alice@example.com", "2100"], Some("alice@example.com"), Some(2100))]
    #[case(&["2100", "alice@example.com"], Some("alice@example.com"), Some(2100))]
    #[case(&["alice@localhost", "-5", "12.5"], None, None)]
    #[case(&["x@y.z@w", "0"], None, Some(0))]
    #[case(&["a@b.c", "d@e.f"], Some("d@e.f"), None)]
    #[case(&[], None, None)]
    fn test_scan(
        #[case] values: &[&str],
        #[case] lnaddress: Option<&str>,
        #[case] amount: Option<u64>,
    ) {
        let detected = Detected::scan(values).unwrap();
        assert_eq!(detected.lnaddress.as_deref(), lnaddress);
        assert_eq!(detected.amount, amount);
    }

    #[test]
    fn test_flags_win_over_positional() {
        let args = Args::parse_from([
            "lnaddress2invoice",
            "-r",
            "bob@example.org",
            "alice@example.com",
            "500",
        ]);
        assert_eq!(
            args.resolved().unwrap(),
            Detected {
                lnaddress: Some("bob@example.org".into()),
                amount: Some(500),
            }
        );
    }

    #[test]
    fn test_all_flags_parse() {
        let args = Args::parse_from([
            "lnaddress2invoice",
            "-a",
            "21",
            "-c",
            "thanks",
            "-v",
            "-f",
            "out.log",
            "-d",
            "--json",
            "--timeout",
            "30",
        ]);
        assert_eq!(args.amount, Some(21));
        assert_eq!(args.comment.as_deref(), Some("thanks"));
        assert!(args.verbose && args.decode && args.json);
        assert_eq!(args.logfile, Some(PathBuf::from("out.log")));
        assert_eq!(args.timeout, Some(30));
        assert!(args.positional.is_empty());
    }
}
