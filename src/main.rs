#![forbid(unsafe_code)]

use std::fs::File;
use std::process::exit;

use serde_plist_xml::{Decoder, Error, Options, Value};

fn describe(value: &Value) -> String {
    match value {
        Value::Array(items) => format!("<array> with {} elements", items.len()),
        Value::Dictionary(dict) => format!("<dict> with {} keys", dict.len()),
        other => format!("<{}>", other.tag()),
    }
}

/// Read a plist XML file and report every decode error on stderr. This tool
/// can be used as a plist validator. Single parameter is the file name.
fn main() {
    let path = match std::env::args()
        .nth(1)
        .ok_or("This program validates an XML property list. Expected a path to a plist file as the first argument")
    {
        Ok(path) => path,
        Err(err) => {
            eprintln!("{err}");
            exit(1);
        }
    };

    let file = match File::open(&path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("Failed to read {path}: {err}");
            exit(2);
        }
    };

    let mut decoder = Decoder::with_error_sink(file, Options::default(), |err: &Error| {
        eprintln!("{path}: {err}");
    });
    let result = decoder.decode::<Value>().and_then(|value| {
        decoder.end()?;
        Ok(value)
    });

    match result {
        Ok(value) => {
            println!("{path}: valid plist, top-level {}", describe(&value));
            println!("{value:#?}");
        }
        Err(_) => {
            // Details already went to stderr through the sink.
            exit(3);
        }
    }
}
