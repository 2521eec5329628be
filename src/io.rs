//! Read network descriptions and write simulation results
//!
//! Descriptions are JSON documents:
//! ```json
//! {
//!   "pleats": ["a", "b"],
//!   "gadgets": [{"type": "AND", "id": "g", "inputs": ["a", "b"], "outputs": ["o"]}],
//!   "connections": [{"from": "o", "to": "a"}],
//!   "inputs": {"a": true, "b": null}
//! }
//! ```

use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

use itertools::Itertools;
use tracing::info;

use crate::error::Result;
use crate::network::NetworkDescription;
use crate::sim::RunResult;
use crate::Network;

/// Read a network description
pub fn read_description<R: Read>(r: R) -> Result<NetworkDescription> {
    Ok(serde_json::from_reader(r)?)
}

/// Read a network description from a file
pub fn read_description_file(path: &Path) -> Result<NetworkDescription> {
    info!(path = %path.display(), "reading network description");
    let f = File::open(path)?;
    read_description(BufReader::new(f))
}

/// Read a network description from a file and build the network
pub fn read_network_file(path: &Path) -> Result<Network> {
    let desc = read_description_file(path)?;
    Network::from_description(&desc)
}

/// Write a network description as JSON
pub fn write_description<W: Write>(w: W, desc: &NetworkDescription) -> Result<()> {
    serde_json::to_writer_pretty(w, desc)?;
    Ok(())
}

/// Write the result of a run as JSON
pub fn write_result<W: Write>(mut w: W, res: &RunResult) -> Result<()> {
    serde_json::to_writer_pretty(&mut w, res)?;
    writeln!(w)?;
    Ok(())
}

/// Format the result of a run as text: one `name: value` line per pleat, sorted by name,
/// followed by the trace if present
pub fn format_result(res: &RunResult) -> String {
    let mut ret = format!(
        "=== RESULT ===\n{}",
        res.values
            .iter()
            .format_with("", |(name, value), f| f(&format_args!("{name}: {value}\n")))
    );
    if !res.stabilized {
        ret += &format!("(no fixed point after {} iterations)\n", res.iterations);
    }
    if let Some(trace) = &res.trace {
        ret += &format!("\n=== TRACE ===\n{trace}");
    }
    ret
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimConfig;
    use crate::{Error, Signal};

    const HALF_ADDER: &str = r#"{
        "pleats": ["a", "b", "or_out", "and_out", "not_out", "sum", "carry"],
        "gadgets": [
            {"type": "OR", "id": "g_or", "inputs": ["a", "b"], "outputs": ["or_out"]},
            {"type": "AND", "id": "g_and", "inputs": ["a", "b"], "outputs": ["and_out"]},
            {"type": "NOT", "id": "g_not", "inputs": ["and_out"], "outputs": ["not_out"]},
            {"type": "AND", "id": "g_and2", "inputs": ["or_out", "not_out"], "outputs": ["sum"]},
            {"type": "AND", "id": "g_carry", "inputs": ["a", "b"], "outputs": ["carry"]}
        ],
        "inputs": {"a": true, "b": false}
    }"#;

    #[test]
    fn test_read_and_run() {
        let desc = read_description(HALF_ADDER.as_bytes()).unwrap();
        let mut net = Network::from_description(&desc).unwrap();
        let res = net.run(&SimConfig::traced()).unwrap();
        assert_eq!(res.get("sum"), Some(Signal::True));
        assert_eq!(res.get("carry"), Some(Signal::False));

        let text = format_result(&res);
        assert!(text.starts_with("=== RESULT ===\na: 1\nand_out: 0\nb: 0\n"));
        assert!(text.contains("=== TRACE ===\nTopological order: g_or, g_and, g_carry, g_not, g_and2\n"));

        let mut buf = Vec::new();
        write_result(&mut buf, &res).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(json["values"]["sum"], serde_json::Value::Bool(true));
        assert_eq!(json["stabilized"], serde_json::Value::Bool(true));
        assert!(json["trace"].is_array());
    }

    #[test]
    fn test_bridged_description() {
        let desc = read_description(
            r#"{
                "pleats": ["a", "b"],
                "gadgets": [{"type": "AND", "id": "g", "inputs": ["a", "b"], "outputs": ["o"]}],
                "connections": [{"from": "o", "to": "a"}],
                "inputs": {"a": true, "b": null}
            }"#
            .as_bytes(),
        )
        .unwrap();
        let mut net = Network::from_description(&desc).unwrap();
        assert_eq!(net.readers("o").unwrap(), vec!["g"]);
        let res = net.run(&SimConfig::default()).unwrap();
        assert!(res.stabilized);
        assert_eq!(res.get("o"), Some(Signal::Unknown));

        let res = net
            .simulate([("b", Signal::False)], &SimConfig::default())
            .unwrap();
        assert_eq!(res.get("o"), Some(Signal::False));
        assert!(format_result(&res).ends_with("b: 0\no: 0\n"));
    }

    #[test]
    fn test_malformed() {
        assert!(matches!(
            read_description("{\"gadgets\": 3}".as_bytes()),
            Err(Error::Json(_))
        ));
        assert!(matches!(
            read_network_file(Path::new("/nonexistent/network.json")),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn test_description_roundtrip() {
        let desc = read_description(HALF_ADDER.as_bytes()).unwrap();
        let mut buf = Vec::new();
        write_description(&mut buf, &desc).unwrap();
        assert_eq!(read_description(buf.as_slice()).unwrap(), desc);
    }
}
