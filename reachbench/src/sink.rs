//! Persists experiment records as TSV (the format the plotting step reads)
//! or as JSON lines.
use std::fmt;
use std::io::Write;
use std::str::FromStr;

use crate::error::{ReachError, Result};
use crate::experiment::ExperimentRecord;

pub const TSV_HEADER: &str = "method\trepresentation\tnodes\tdensity\taverage_time_sec\tmem_bytes";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Tsv,
    JsonLines,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Tsv => "tsv",
            OutputFormat::JsonLines => "jsonl",
        })
    }
}

impl FromStr for OutputFormat {
    type Err = ReachError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tsv" => Ok(OutputFormat::Tsv),
            "jsonl" | "json" => Ok(OutputFormat::JsonLines),
            other => Err(ReachError::InvalidConfig(format!("unsupported output format `{other}`; expected tsv or jsonl"))),
        }
    }
}

/// Header plus one row per record. Writes nothing for an empty slice.
pub fn write_tsv<W: Write>(records: &[ExperimentRecord], mut out: W) -> Result<()> {
    if records.is_empty() {
        return Ok(());
    }
    writeln!(out, "{TSV_HEADER}")?;
    for r in records {
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}\t{}",
            r.method, r.representation, r.nodes, r.density, r.average_time_sec, r.mem_bytes
        )?;
    }
    Ok(())
}

pub fn write_json_lines<W: Write>(records: &[ExperimentRecord], mut out: W) -> Result<()> {
    for r in records {
        serde_json::to_writer(&mut out, r)?;
        out.write_all(b"\n")?;
    }
    Ok(())
}

pub fn write_records<W: Write>(records: &[ExperimentRecord], format: OutputFormat, out: W) -> Result<()> {
    match format {
        OutputFormat::Tsv => write_tsv(records, out),
        OutputFormat::JsonLines => write_json_lines(records, out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reachability::Representation;
    use crate::traversal::Method;

    fn records() -> Vec<ExperimentRecord> {
        vec![
            ExperimentRecord { method: Method::Bfs, representation: Representation::Matrix, nodes: 20, density: 15, average_time_sec: 0.5, mem_bytes: 424 },
            ExperimentRecord { method: Method::Dfs, representation: Representation::List, nodes: 200, density: 95, average_time_sec: 0.25, mem_bytes: 322_024 },
        ]
    }

    #[test]
    fn tsv_layout() {
        let mut buf = Vec::new();
        write_tsv(&records(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines, vec![TSV_HEADER, "BFS\tmatrix\t20\t15\t0.5\t424", "DFS\tlist\t200\t95\t0.25\t322024"]);
    }

    #[test]
    fn tsv_empty_writes_nothing() {
        let mut buf = Vec::new();
        write_tsv(&[], &mut buf).unwrap();
        assert!(buf.is_empty());
    }

    #[test]
    fn json_lines_parse_back() {
        let mut buf = Vec::new();
        write_records(&records(), OutputFormat::JsonLines, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let parsed: Vec<ExperimentRecord> = text.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
        assert_eq!(parsed, records());
        assert!(text.starts_with(r#"{"method":"BFS","representation":"matrix","nodes":20"#));
    }

    #[test]
    fn format_parsing() {
        assert_eq!("TSV".parse::<OutputFormat>().unwrap(), OutputFormat::Tsv);
        assert_eq!("jsonl".parse::<OutputFormat>().unwrap(), OutputFormat::JsonLines);
        assert!("xml".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::default().to_string(), "tsv");
    }
}
