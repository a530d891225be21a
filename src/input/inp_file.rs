//! Parser for the solver's `.inp` key-value files
use crate::error::{Error, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Parsed contents of one `.inp` file
///
/// The file format is a single `begin` ... `end` block. The first token
/// of every line inside the block is the key, the remaining tokens are
/// its values:
/// ```text
/// begin
///     ndims 3
///     size 128 64 64
///     op_file_format binary
/// end
/// ```
#[derive(Debug, Clone)]
pub struct InpFile {
    path: PathBuf,
    entries: HashMap<String, Vec<String>>,
}

impl InpFile {
    /// Read and parse an `.inp` file
    ///
    /// # Errors
    /// When the file cannot be read or contains no `begin`/`end` block.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let text = fs::read_to_string(&path)?;
        Self::from_str_named(&text, path)
    }

    /// Parse from an in-memory string, used by `read` and the tests
    ///
    /// # Errors
    /// When `begin` or `end` is missing.
    pub fn from_str_named(text: &str, path: PathBuf) -> Result<Self> {
        let mut entries: HashMap<String, Vec<String>> = HashMap::new();
        let mut in_block = false;
        let mut seen_end = false;
        for line in text.lines() {
            let mut tokens = line.split_whitespace();
            let first = match tokens.next() {
                Some(t) => t,
                None => continue,
            };
            match first {
                "begin" => {
                    in_block = true;
                }
                "end" => {
                    seen_end = in_block;
                    break;
                }
                key if in_block => {
                    let values: Vec<String> = tokens.map(str::to_string).collect();
                    entries.insert(key.to_string(), values);
                }
                _ => (),
            }
        }
        if !in_block || !seen_end {
            return Err(Error::Parse {
                file: path,
                msg: "no begin/end block".to_string(),
            });
        }
        Ok(Self { path, entries })
    }

    /// True if the file defines `key`
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// All value tokens of `key`
    ///
    /// # Errors
    /// When the key is absent.
    pub fn values(&self, key: &str) -> Result<&[String]> {
        self.entries
            .get(key)
            .map(Vec::as_slice)
            .ok_or_else(|| Error::MissingKey {
                key: key.to_string(),
                file: self.path.clone(),
            })
    }

    /// First value token of `key`, as a string
    ///
    /// # Errors
    /// When the key is absent or has no value.
    pub fn get_str(&self, key: &str) -> Result<&str> {
        self.values(key)?
            .first()
            .map(String::as_str)
            .ok_or_else(|| Error::MissingKey {
                key: key.to_string(),
                file: self.path.clone(),
            })
    }

    /// First value token of `key`, parsed
    ///
    /// # Errors
    /// When the key is absent or its value does not parse as `T`.
    pub fn get<T: FromStr>(&self, key: &str) -> Result<T> {
        let raw = self.get_str(key)?;
        raw.parse::<T>().map_err(|_| Error::InvalidValue {
            key: key.to_string(),
            value: raw.to_string(),
        })
    }

    /// All value tokens of `key`, parsed
    ///
    /// # Errors
    /// When the key is absent or any value does not parse as `T`.
    pub fn get_vec<T: FromStr>(&self, key: &str) -> Result<Vec<T>> {
        self.values(key)?
            .iter()
            .map(|raw| {
                raw.parse::<T>().map_err(|_| Error::InvalidValue {
                    key: key.to_string(),
                    value: raw.to_string(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOLVER_INP: &str = "\
begin
    ndims 3
    nvars 5
    size 16 8 4
    n_iter 100
    dt 0.05
    file_op_iter 10
    op_file_format binary
    op_overwrite no
end
";

    fn parse(text: &str) -> Result<InpFile> {
        InpFile::from_str_named(text, PathBuf::from("solver.inp"))
    }

    #[test]
    fn test_parse_scalars() {
        let inp = parse(SOLVER_INP).unwrap();
        assert_eq!(inp.get::<usize>("ndims").unwrap(), 3);
        assert_eq!(inp.get::<usize>("nvars").unwrap(), 5);
        assert_eq!(inp.get::<f64>("dt").unwrap(), 0.05);
        assert_eq!(inp.get_str("op_overwrite").unwrap(), "no");
    }

    #[test]
    fn test_parse_vector_valued_key() {
        let inp = parse(SOLVER_INP).unwrap();
        let size: Vec<usize> = inp.get_vec("size").unwrap();
        assert_eq!(size, vec![16, 8, 4]);
    }

    #[test]
    fn test_missing_key() {
        let inp = parse(SOLVER_INP).unwrap();
        assert!(matches!(
            inp.get::<usize>("nsims"),
            Err(Error::MissingKey { .. })
        ));
    }

    #[test]
    fn test_invalid_value() {
        let inp = parse(SOLVER_INP).unwrap();
        assert!(matches!(
            inp.get::<usize>("op_overwrite"),
            Err(Error::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_no_block_is_error() {
        assert!(parse("ndims 3\n").is_err());
        assert!(parse("begin\nndims 3\n").is_err());
    }

    #[test]
    fn test_text_outside_block_ignored() {
        let inp = parse("stray words\nbegin\nndims 2\nend\ntrailing\n").unwrap();
        assert_eq!(inp.get::<usize>("ndims").unwrap(), 2);
        assert!(!inp.contains("stray"));
        assert!(!inp.contains("trailing"));
    }
}
