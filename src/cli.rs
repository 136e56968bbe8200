use anyhow::Result;
use clap::Parser;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use crate::config::load_config;
use crate::dataset::parse_dataset;
use crate::layout::{build_graph, compute_layout};
use crate::layout_dump::{LayoutDump, write_layout_dump};
use crate::view::{ViewState, couple_key, generation_collapse_sets};

#[derive(Parser, Debug)]
#[command(name = "kintree", version, about = "Family tree layout engine")]
pub struct Args {
    /// Input dataset (.json/.json5) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output layout JSON. Defaults to stdout.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Config JSON/JSON5 file
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Collapse a couple's branch ("idA|idB"), repeatable
    #[arg(long = "collapse")]
    pub collapse: Vec<String>,

    /// Collapse a single parent's branch, repeatable
    #[arg(long = "collapse-single")]
    pub collapse_single: Vec<String>,

    /// Collapse every couple and single parent of a recorded generation
    #[arg(long = "collapse-generation")]
    pub collapse_generation: Option<i64>,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    let input = read_input(args.input.as_deref())?;
    let dataset = parse_dataset(&input)?;

    let mut view = ViewState::new();
    for raw in &args.collapse {
        let (a, b) = parse_couple_arg(raw)?;
        view.collapsed_couples.insert(couple_key(a, b));
    }
    view.collapsed_singles
        .extend(args.collapse_single.iter().cloned());
    if let Some(generation) = args.collapse_generation {
        let nodes = build_graph(&dataset);
        let (couples, singles) = generation_collapse_sets(&nodes, &dataset.marriages, generation);
        view.collapsed_couples.extend(couples);
        view.collapsed_singles.extend(singles);
    }

    let layout = compute_layout(&dataset, &view, &config.layout);

    match args.output.as_deref() {
        Some(path) => write_layout_dump(path, &layout)?,
        None => {
            let dump = LayoutDump::from_layout(&layout);
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            serde_json::to_writer_pretty(&mut handle, &dump)?;
            handle.write_all(b"\n")?;
        }
    }

    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path
        && path != Path::new("-")
    {
        return Ok(std::fs::read_to_string(path)?);
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn parse_couple_arg(raw: &str) -> Result<(&str, &str)> {
    match raw.split_once('|') {
        Some((a, b)) if !a.is_empty() && !b.is_empty() => Ok((a, b)),
        _ => Err(anyhow::anyhow!(
            "--collapse expects \"idA|idB\", got {raw:?}"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn couple_arg_splits_on_pipe() {
        assert_eq!(parse_couple_arg("a|b").unwrap(), ("a", "b"));
        assert!(parse_couple_arg("lonely").is_err());
        assert!(parse_couple_arg("|b").is_err());
    }

    #[test]
    fn args_parse_repeatable_collapse_flags() {
        let args = Args::parse_from([
            "kintree",
            "-i",
            "family.json",
            "--collapse",
            "a|b",
            "--collapse",
            "c|d",
            "--collapse-single",
            "e",
        ]);
        assert_eq!(args.collapse.len(), 2);
        assert_eq!(args.collapse_single, vec!["e"]);
        assert_eq!(args.input.as_deref(), Some(Path::new("family.json")));
    }
}
