/* Read a list of automaton descriptions from JSON. The list itself must be well formed JSON, but
 * the entries are kept as raw values so that one malformed entry does not sink the others. */

use color_eyre::eyre::{Report, Result};
use serde_json::Value;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// List of possible errors while loading automata
#[derive(Debug)]
pub enum LoaderError {
    /// The provided file does not exist
    MissingFile(String),
    /// The content is not valid JSON
    InvalidJson(String),
    /// The top level JSON value is not a list
    NotAList,
}

impl std::fmt::Display for LoaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoaderError::MissingFile(path) => {
                write!(f, "Error: Provided file {} does not exist!", path)
            }
            LoaderError::InvalidJson(reason) => {
                write!(f, "Error: Invalid JSON file or body! {}", reason)
            }
            LoaderError::NotAList => write!(f, "Error: Input should be a list of automata"),
        }
    }
}

impl std::error::Error for LoaderError {}

/// Parse a JSON document holding a list of automaton descriptions and return its entries.
pub fn parse_automata_list(content: &str) -> Result<Vec<Value>> {
    let document: Value = match serde_json::from_str(content) {
        Ok(document) => document,
        Err(error) => return Err(Report::new(LoaderError::InvalidJson(error.to_string()))),
    };

    match document {
        Value::Array(entries) => Ok(entries),
        _ => Err(Report::new(LoaderError::NotAList)),
    }
}

/// Read a file containing a JSON list of automaton descriptions and return its entries.
pub fn read_automata_file<P: AsRef<Path>>(file_path: P) -> Result<Vec<Value>> {
    let file_path = file_path.as_ref();

    if !file_path.exists() {
        let err = LoaderError::MissingFile(file_path.display().to_string());
        return Err(Report::new(err));
    }

    let file = File::open(file_path)?;
    let mut reader = BufReader::new(file);

    let mut content = String::new();
    reader.read_to_string(&mut content)?;

    parse_automata_list(&content)
}
