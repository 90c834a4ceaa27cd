// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// File-size strings for the document list ("245 KB", "1.4 MB").

const KB: f64 = 1_000.0;
const MB: f64 = 1_000_000.0;
const GB: f64 = 1_000_000_000.0;

/// Format a byte count the way file browsers do: decimal units, whole
/// kilobytes, one decimal for megabytes, two for gigabytes.
pub fn format_file_size(bytes: u64) -> String {
    match bytes {
        0 => "Zero KB".to_string(),
        1 => "1 byte".to_string(),
        n if n < 1_000 => format!("{n} bytes"),
        n => {
            let n = n as f64;
            let kb = (n / KB).round();
            if kb < 1_000.0 {
                return format!("{kb:.0} KB");
            }
            let mb = round_to(n / MB, 1);
            if mb < 1_000.0 {
                return format!("{} MB", trim_decimals(mb, 1));
            }
            format!("{} GB", trim_decimals(round_to(n / GB, 2), 2))
        }
    }
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

fn trim_decimals(value: f64, places: usize) -> String {
    let text = format!("{:.*}", places, value);
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}
