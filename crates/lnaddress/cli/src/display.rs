use std::fmt::Write;

use chrono::DateTime;
use lnaddress_core::Bolt11Invoice;

const NOT_AVAILABLE: &str = "n/a";

fn format_timestamp(secs: u64) -> String {
    i64::try_from(secs)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map_or_else(
            || secs.to_string(),
            |time| time.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        )
}

pub fn render_invoice(invoice: &Bolt11Invoice) -> String {
    let mut out = String::from("Decoded BOLT11 Invoice:\n");
    let mut line = |label: &str, value: &str| {
        let _ = writeln!(out, "- {label}: {value}");
    };

    line("Prefix", invoice.network_prefix());
    line("Amount (HRP)", invoice.amount_hint());
    if let Some(amount_msat) = invoice.amount_msat() {
        line("Amount (msat)", &amount_msat.to_string());
    }
    line("Timestamp", &format_timestamp(invoice.timestamp()));
    line(
        "Description",
        invoice.description().unwrap_or(NOT_AVAILABLE),
    );
    if let Some(hash) = invoice.description_hash() {
        line("Description Hash", hash);
    }
    line(
        "Payment Hash",
        invoice.payment_hash().unwrap_or(NOT_AVAILABLE),
    );
    line("Expiry", &format!("{} seconds", invoice.expiry()));
    line("Expires", &format_timestamp(invoice.expires_at()));
    line(
        "Payee Pubkey",
        invoice.payee_pubkey().unwrap_or(NOT_AVAILABLE),
    );
    line(
        "Fallback Address",
        invoice.fallback_address().unwrap_or(NOT_AVAILABLE),
    );
    if !invoice.routing_hints().is_empty() {
        line("Routing Hints", &invoice.routing_hints().join(", "));
    }
    out
}

pub fn render_json<T: serde::Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use lnaddress_core::invoice;

    use super::*;

    const COFFEE: &str = "lnbc1pvjluezrq2vdhkven9v5q8w4ur23clxd5mzfsh79vn6pg0kaytjeq8w4ur23clxd5mzfsh79vn6pg0kaytjeq8w4ur23clxd5mzfsh79vn6pg0kaytjeq8w4ur2323cczc";

    #[test]
    fn test_render_invoice() {
        let invoice = invoice::decode(COFFEE).unwrap();
        let rendered = render_invoice(&invoice);
        assert_eq!(
            rendered,
            "Decoded BOLT11 Invoice:\n\
             - Prefix: lnbc\n\
             - Amount (HRP): n/a\n\
             - Timestamp: 2017-06-01 10:57:38 UTC\n\
             - Description: coffee\n\
             - Payment Hash: n/a\n\
             - Expiry: 3600 seconds\n\
             - Expires: 2017-06-01 11:57:38 UTC\n\
             - Payee Pubkey: n/a\n\
             - Fallback Address: n/a\n"
        );
    }

    #[test]
    fn test_render_json() {
        let invoice = invoice::decode(COFFEE).unwrap();
        let json: serde_json::Value = serde_json::from_str(&render_json(&invoice).unwrap()).unwrap();
        assert_eq!(json["network_prefix"], "lnbc");
        assert_eq!(json["timestamp"], 1_496_314_658);
        assert_eq!(json["fields"]["description"], "coffee");
        assert_eq!(json["fields"]["expiry"], 3600);
    }

    #[test]
    fn test_timestamp_out_of_range_falls_back_to_seconds() {
        assert_eq!(format_timestamp(u64::MAX), u64::MAX.to_string());
        assert_eq!(format_timestamp(0), "1970-01-01 00:00:00 UTC");
    }
}
